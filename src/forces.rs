// src/forces.rs

use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::error::{SimError, SimResult};
use crate::vector::Vector;
use log::debug;

/// A pairwise interaction between bodies.
pub trait ForceModel {
    /// Force exerted on `target` by `source`.
    fn pairwise_force(&self, target: &Body, source: &Body) -> SimResult<Vector>;

    /// Potential energy of the pair, counted once.
    fn potential_energy(&self, a: &Body, b: &Body) -> f64;

    fn name(&self) -> String;

    /// Net force on `bodies[index]`: the vector sum of the pairwise force
    /// from every other body, in slice order.
    ///
    /// A pair that cannot be evaluated contributes zero for this call.
    fn net_force(&self, index: usize, bodies: &[Body]) -> Vector {
        let target = &bodies[index];
        bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, source)| match self.pairwise_force(target, source) {
                Ok(force) => force,
                Err(err) => {
                    debug!(
                        "{}: skipping pair {} <- {}: {}",
                        self.name(),
                        target.id(),
                        source.id(),
                        err
                    );
                    Vector::zeros()
                }
            })
            .sum()
    }
}

/// Newtonian gravity, `F = G * m1 * m2 / r^2`.
///
/// Separations below `min_distance` are clamped up to it before dividing,
/// so the magnitude never exceeds `G * m1 * m2 / min_distance^2`. Bodies at
/// exactly the same position have no direction between them and yield
/// [`SimError::DegenerateVector`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonianGravity {
    pub gravitational_constant: f64,
    pub min_distance: f64,
}

impl NewtonianGravity {
    pub fn new(gravitational_constant: f64, min_distance: f64) -> Self {
        Self {
            gravitational_constant,
            min_distance,
        }
    }

    pub fn force_magnitude(&self, m1: f64, m2: f64, distance: f64) -> f64 {
        let r = distance.max(self.min_distance);
        // divide before multiplying so large masses at large separations
        // stay finite
        self.gravitational_constant * (m1 / r) * (m2 / r)
    }

    /// Like [`ForceModel::pairwise_force`] but refuses to clamp: pairs closer
    /// than `min_distance` fail with [`SimError::Singularity`].
    pub fn checked_force(&self, target: &Body, source: &Body) -> SimResult<Vector> {
        let distance = target.position().distance_to(source.position());
        if distance < self.min_distance {
            return Err(SimError::Singularity { distance });
        }
        self.pairwise_force(target, source)
    }
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        NewtonianGravity::from(&PhysicsConfig::default())
    }
}

impl From<&PhysicsConfig> for NewtonianGravity {
    fn from(config: &PhysicsConfig) -> Self {
        NewtonianGravity::new(config.gravitational_constant, config.min_distance)
    }
}

impl ForceModel for NewtonianGravity {
    fn pairwise_force(&self, target: &Body, source: &Body) -> SimResult<Vector> {
        let distance = target.position().distance_to(source.position());
        let magnitude = self.force_magnitude(target.mass(), source.mass(), distance);
        let mut force = target.position().direction_to(source.position())?;
        force.scale(magnitude);
        Ok(force)
    }

    fn potential_energy(&self, a: &Body, b: &Body) -> f64 {
        let r = a.position().distance_to(b.position()).max(self.min_distance);
        -self.gravitational_constant * a.mass() * b.mass() / r
    }

    fn name(&self) -> String {
        "NewtonianGravity".to_string()
    }
}
