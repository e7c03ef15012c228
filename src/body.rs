// src/body.rs

use crate::config::MASS_FLOOR;
use crate::error::{SimError, SimResult};
use crate::vector::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a body, unique within one simulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        BodyId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        BodyId::new(id)
    }
}

impl From<String> for BodyId {
    fn from(id: String) -> Self {
        BodyId(id)
    }
}

impl From<u32> for BodyId {
    fn from(id: u32) -> Self {
        BodyId(id.to_string())
    }
}

/// Raises `mass` to [`MASS_FLOOR`]. NaN also maps to the floor; an infinite
/// mass cannot be repaired and is rejected.
pub fn clamp_mass(mass: f64) -> SimResult<f64> {
    let clamped = mass.max(MASS_FLOOR);
    if !clamped.is_finite() {
        return Err(SimError::InvalidMass(mass));
    }
    Ok(clamped)
}

/// Kinematic state of one point mass.
///
/// Fields are only writable from inside the crate so the mass floor holds
/// for every body a [`Simulation`](crate::simulation::Simulation) owns.
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) mass: f64,
    pub(crate) position: Vector,
    pub(crate) velocity: Vector,
    pub(crate) acceleration: Vector,
    pub(crate) color_hint: Option<String>,
}

impl Body {
    pub fn new(id: BodyId, mass: f64, position: Vector, velocity: Vector) -> SimResult<Self> {
        Ok(Body {
            id,
            mass: clamp_mass(mass)?,
            position,
            velocity,
            acceleration: Vector::zeros(),
            color_hint: None,
        })
    }

    pub fn with_color_hint(mut self, color_hint: Option<String>) -> Self {
        self.color_hint = color_hint;
        self
    }

    pub fn id(&self) -> &BodyId {
        &self.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    pub fn acceleration(&self) -> &Vector {
        &self.acceleration
    }

    pub fn color_hint(&self) -> Option<&str> {
        self.color_hint.as_deref()
    }

    pub fn momentum(&self) -> Vector {
        self.velocity.clone() * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude().powi(2)
    }

    pub(crate) fn set_mass(&mut self, mass: f64) -> SimResult<()> {
        self.mass = clamp_mass(mass)?;
        Ok(())
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Body({}, m={:.2}, p={}, v={})",
            self.id, self.mass, self.position, self.velocity
        )
    }
}
