// src/viewport.rs

use crate::config::{UNIT_EXTENT, VIEWPORT_SIZE};
use crate::vector::Vector;

/// World-to-screen mapping a renderer uses to place a
/// [`BodySnapshot`](crate::simulation::BodySnapshot) on its surface. The
/// physics core itself never works in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Visible world width and height, in world units.
    pub unit_extent: f64,
    /// Surface width and height, in pixels.
    pub size: f64,
}

impl Viewport {
    pub fn new(unit_extent: f64, size: f64) -> Self {
        Self { unit_extent, size }
    }

    /// `(world + extent/2) / extent * size`, per axis. The world origin lands
    /// in the centre of the surface.
    pub fn to_screen(&self, world: &Vector) -> Vector {
        let map = |w: f64| (w + self.unit_extent / 2.0) / self.unit_extent * self.size;
        Vector::new(map(world.x()), map(world.y()))
    }

    /// Wraps a screen point back onto the surface, so a body that leaves one
    /// edge reappears on the opposite one.
    pub fn wrap(&self, screen: &Vector) -> Vector {
        Vector::new(screen.x().rem_euclid(self.size), screen.y().rem_euclid(self.size))
    }

    /// Draw radius in pixels, growing with the cube root of the mass.
    pub fn draw_radius(mass: f64) -> f64 {
        mass.cbrt()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(UNIT_EXTENT, VIEWPORT_SIZE)
    }
}
