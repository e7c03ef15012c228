//! Scenario and physics configuration.
//!
//! A [`ScenarioConfig`] is what a driver hands to
//! [`Simulation::reset`](crate::simulation::Simulation::reset). It can be
//! built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "physics": { "gravitational_constant": 667.43, "min_distance": 1.0 },
//!   "bodies": [
//!     { "id": "1", "initial_position": { "x": 128.0, "y": 0.0 },
//!       "initial_velocity_scalar": 74.0, "mass": 100.0, "color_hint": "rgb(200, 0, 0)" },
//!     { "id": "2", "initial_position": { "x": -128.0, "y": 0.0 },
//!       "initial_velocity_scalar": 26.0, "mass": 100.0 }
//!   ]
//! }
//! ```

use crate::body::BodyId;
use crate::error::SimResult;
use crate::vector::Vector;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Lower bound applied to every mass before use.
pub const MASS_FLOOR: f64 = 1.0;

/// Gravitational constant in world units (scaled up from SI so that bodies a
/// few hundred units apart interact visibly at frame rate).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e2;

/// Separations below this are clamped before the inverse-square division.
pub const MIN_DISTANCE: f64 = 1.0;

/// Velocity control: `vy = (scalar - OFFSET) / DIVISOR`.
pub const VELOCITY_CONTROL_OFFSET: f64 = 50.0;
pub const VELOCITY_CONTROL_DIVISOR: f64 = 10.0;

/// Mass control: `mass = max(MASS_FLOOR, raw * SCALE)`.
pub const MASS_CONTROL_SCALE: f64 = 100.0;

/// Width and height of the visible world, in world units.
pub const UNIT_EXTENT: f64 = 2048.0;

/// Default renderer viewport edge, in pixels.
pub const VIEWPORT_SIZE: f64 = 1024.0;

/// Default wall-clock to simulated-time multiplier used by interactive drivers.
pub const DEFAULT_SPEED: f64 = 10.0;

/// Maps the one-dimensional velocity control to a 2D velocity.
pub fn velocity_from_control(scalar: f64) -> Vector {
    Vector::new(
        0.0,
        (scalar - VELOCITY_CONTROL_OFFSET) / VELOCITY_CONTROL_DIVISOR,
    )
}

/// Maps a raw mass control reading to a mass, floor included.
pub fn mass_from_control(raw: f64) -> f64 {
    (raw * MASS_CONTROL_SCALE).max(MASS_FLOOR)
}

/// Speed rounded to three decimals, as shown next to each body.
pub fn speed_readout(velocity: &Vector) -> f64 {
    (velocity.magnitude() * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: f64,
    pub min_distance: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            min_distance: MIN_DISTANCE,
        }
    }
}

/// Initial state of one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub id: BodyId,
    pub initial_position: Vector,
    pub initial_velocity_scalar: f64,
    pub mass: f64,
    /// Opaque renderer data, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hint: Option<String>,
}

impl BodyConfig {
    pub fn new(id: impl Into<BodyId>, initial_position: Vector, initial_velocity_scalar: f64, mass: f64) -> Self {
        Self {
            id: id.into(),
            initial_position,
            initial_velocity_scalar,
            mass,
            color_hint: None,
        }
    }

    pub fn with_color_hint(mut self, color_hint: impl Into<String>) -> Self {
        self.color_hint = Some(color_hint.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub physics: PhysicsConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Two equal masses either side of the origin, moving in opposite
    /// directions at 2.4 units/s.
    pub fn two_body() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            bodies: vec![
                BodyConfig::new("1", Vector::new(128.0, 0.0), 74.0, 100.0)
                    .with_color_hint("rgb(200, 0, 0)"),
                BodyConfig::new("2", Vector::new(-128.0, 0.0), 26.0, 100.0)
                    .with_color_hint("rgb(0, 200, 0)"),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
