// src/export.rs

use crate::error::{SimError, SimResult};
use crate::simulation::Snapshot;
use crate::viewport::Viewport;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct FrameRow<'a> {
    frame: u64,
    time_s: f64,
    id: &'a str,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    mass: f64,
    screen_x: f64,
    screen_y: f64,
    radius: f64,
}

/// Streams snapshots as CSV, one row per body per frame.
pub struct FrameWriter<W: Write> {
    wtr: csv::Writer<W>,
    viewport: Viewport,
    rows: usize,
}

impl FrameWriter<File> {
    pub fn to_path(path: impl AsRef<Path>, viewport: Viewport) -> SimResult<Self> {
        Ok(FrameWriter::new(File::create(path)?, viewport))
    }
}

impl<W: Write> FrameWriter<W> {
    pub fn new(writer: W, viewport: Viewport) -> Self {
        Self {
            wtr: csv::Writer::from_writer(writer),
            viewport,
            rows: 0,
        }
    }

    pub fn write_frame(&mut self, frame: u64, snapshot: &Snapshot) -> SimResult<()> {
        for body in snapshot {
            let screen = self.viewport.wrap(&self.viewport.to_screen(&body.position));
            self.wtr.serialize(FrameRow {
                frame,
                time_s: snapshot.elapsed_seconds(),
                id: body.id.as_str(),
                x: body.position.x(),
                y: body.position.y(),
                vx: body.velocity.x(),
                vy: body.velocity.y(),
                mass: body.mass,
                screen_x: screen.x(),
                screen_y: screen.y(),
                radius: Viewport::draw_radius(body.mass),
            })?;
            self.rows += 1;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(self) -> SimResult<W> {
        self.wtr
            .into_inner()
            .map_err(|err| SimError::Io(err.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::simulation::Simulation;

    #[test]
    fn writes_header_and_one_row_per_body() {
        let mut sim = Simulation::from_scenario(&ScenarioConfig::two_body()).unwrap();
        let mut writer = FrameWriter::new(Vec::new(), Viewport::default());
        writer.write_frame(0, &sim.snapshot()).unwrap();
        sim.tick(16.67).unwrap();
        writer.write_frame(1, &sim.snapshot()).unwrap();
        assert_eq!(writer.rows_written(), 4);

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "frame,time_s,id,x,y,vx,vy,mass,screen_x,screen_y,radius");
        assert!(lines[1].starts_with("0,0.0,1,128.0,0.0,0.0,2.4,100.0,576.0,512.0,"));
        assert!(lines[4].starts_with("1,"));
        assert_eq!(lines[4].split(',').nth(2), Some("2"));
    }
}
