// src/integrator.rs

use crate::body::Body;
use crate::vector::Vector;

/// Advances a single body given the net force acting on it.
pub trait Integrator {
    /// `dt` is in seconds. A zero step must leave the body untouched.
    fn step(&self, body: &mut Body, net_force: &Vector, dt: f64);
    fn name(&self) -> String;
}

/// Semi-implicit (symplectic) Euler.
///
/// Acceleration is recomputed from the force every step, velocity is kicked
/// with it, then position drifts with the *new* velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, body: &mut Body, net_force: &Vector, dt: f64) {
        if dt == 0.0 {
            return;
        }
        body.acceleration = net_force.clone() / body.mass;

        let mut dv = body.acceleration.clone();
        dv.scale(dt);
        body.velocity.add_vector(&dv);

        let mut dx = body.velocity.clone();
        dx.scale(dt);
        body.position.add_vector(&dx);
    }

    fn name(&self) -> String {
        "SemiImplicitEuler".to_string()
    }
}
