use anyhow::{Context, Result};
use clap::Parser;
use gravity_sim::config::speed_readout;
use gravity_sim::{FrameClock, FrameWriter, ScenarioConfig, Simulation, Viewport};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

/// Runs a gravity scenario headless and writes every emitted frame as CSV.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scenario JSON file (built-in two-body scenario if omitted)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Wall-clock length of one frame in milliseconds
    #[arg(long, default_value_t = 16.67)]
    frame_ms: f64,

    /// Simulated time per unit of wall-clock time
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Write every n-th frame
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,

    /// CSV output path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run<W: Write>(simulation: &mut Simulation, args: &Args, mut writer: FrameWriter<W>) -> Result<()> {
    let pb = ProgressBar::new(args.frames);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut clock = FrameClock::new(args.speed);
    writer.write_frame(0, &simulation.snapshot())?;
    for frame in 1..=args.frames {
        let delta_ms = clock.advance(frame as f64 * args.frame_ms);
        simulation.tick(delta_ms)?;
        if frame % args.every == 0 {
            writer.write_frame(frame, &simulation.snapshot())?;
        }
        pb.inc(1);
    }
    pb.finish_with_message("Simulation complete");

    info!("wrote {} rows", writer.rows_written());
    writer.finish()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => ScenarioConfig::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => ScenarioConfig::two_body(),
    };
    let mut simulation = Simulation::from_scenario(&scenario)?;
    let initial_energy = simulation.total_energy();
    let initial_momentum = simulation.total_momentum();

    let viewport = Viewport::default();
    match &args.output {
        Some(path) => run(&mut simulation, &args, FrameWriter::to_path(path, viewport)?)?,
        None => run(&mut simulation, &args, FrameWriter::new(io::stdout().lock(), viewport))?,
    }

    let final_energy = simulation.total_energy();
    info!(
        "{} bodies, {:.3}s simulated over {} ticks",
        simulation.len(),
        simulation.elapsed_seconds(),
        simulation.tick_count()
    );
    info!(
        "energy {:.6e} -> {:.6e} (relative drift {:.3e})",
        initial_energy,
        final_energy,
        ((final_energy - initial_energy) / initial_energy).abs()
    );
    info!(
        "momentum {} -> {}",
        initial_momentum,
        simulation.total_momentum()
    );
    for body in &simulation.snapshot() {
        info!("{}: {} units/s", body.id, speed_readout(&body.velocity));
    }
    Ok(())
}
