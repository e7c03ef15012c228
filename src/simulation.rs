// src/simulation.rs

use crate::body::{Body, BodyId};
use crate::config::{
    mass_from_control, velocity_from_control, BodyConfig, PhysicsConfig, ScenarioConfig,
};
use crate::error::{SimError, SimResult};
use crate::forces::{ForceModel, NewtonianGravity};
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::vector::Vector;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::Serialize;

/// Owns a set of bodies and advances them one tick at a time.
///
/// The simulation is uninitialized until the first [`reset`](Self::reset);
/// ticking before that fails with [`SimError::NotInitialized`]. Bodies are
/// kept in configuration order, which is also the order in which pairwise
/// forces are summed, so identical inputs give bit-identical runs.
#[derive(Debug, Clone)]
pub struct Simulation<F = NewtonianGravity, I = SemiImplicitEuler> {
    force_model: F,
    integrator: I,
    bodies: Option<Vec<Body>>,
    elapsed: f64,
    ticks: u64,
}

impl Simulation {
    pub fn new() -> Self {
        Simulation::with_models(NewtonianGravity::default(), SemiImplicitEuler)
    }

    pub fn from_physics(physics: &PhysicsConfig) -> Self {
        Simulation::with_models(NewtonianGravity::from(physics), SemiImplicitEuler)
    }

    /// Builds a simulation with the scenario's physics and resets it to the
    /// scenario's bodies.
    pub fn from_scenario(scenario: &ScenarioConfig) -> SimResult<Self> {
        let mut simulation = Simulation::from_physics(&scenario.physics);
        simulation.reset(&scenario.bodies)?;
        Ok(simulation)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::new()
    }
}

impl<F: ForceModel, I: Integrator> Simulation<F, I> {
    pub fn with_models(force_model: F, integrator: I) -> Self {
        Self {
            force_model,
            integrator,
            bodies: None,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    /// Replaces every body with a fresh set built from `configs`.
    ///
    /// The new set is fully built before it replaces the old one; on error
    /// the previous bodies are left as they were.
    pub fn reset(&mut self, configs: &[BodyConfig]) -> SimResult<()> {
        if let Some(id) = configs.iter().map(|c| &c.id).duplicates().next() {
            return Err(SimError::DuplicateBodyId(id.clone()));
        }
        let bodies = configs
            .iter()
            .map(|c| {
                Body::new(
                    c.id.clone(),
                    c.mass,
                    c.initial_position.clone(),
                    velocity_from_control(c.initial_velocity_scalar),
                )
                .map(|body| body.with_color_hint(c.color_hint.clone()))
            })
            .collect::<SimResult<Vec<_>>>()?;

        info!(
            "reset with {} bodies using {} / {}",
            bodies.len(),
            self.force_model.name(),
            self.integrator.name()
        );
        self.bodies = Some(bodies);
        self.elapsed = 0.0;
        self.ticks = 0;
        Ok(())
    }

    /// Advances simulated time by `delta_ms` milliseconds.
    ///
    /// All net forces are computed from the positions at the start of the
    /// tick before any body moves. A zero delta changes nothing.
    pub fn tick(&mut self, delta_ms: f64) -> SimResult<()> {
        let bodies = self.bodies.as_mut().ok_or(SimError::NotInitialized)?;
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            return Err(SimError::InvalidTimeStep(delta_ms));
        }
        if delta_ms == 0.0 {
            return Ok(());
        }
        let dt = delta_ms / 1000.0;

        let current: &[Body] = bodies;
        let net_forces: Vec<Vector> = (0..current.len())
            .map(|i| self.force_model.net_force(i, current))
            .collect();

        for (body, force) in bodies.iter_mut().zip(&net_forces) {
            self.integrator.step(body, force, dt);
        }

        self.elapsed += dt;
        self.ticks += 1;
        trace!("tick {} advanced {:.4}s", self.ticks, dt);
        Ok(())
    }

    /// Owned copy of every body's public state, in body order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elapsed_seconds: self.elapsed,
            bodies: self
                .bodies()
                .iter()
                .map(|b| BodySnapshot {
                    id: b.id.clone(),
                    position: b.position.clone(),
                    velocity: b.velocity.clone(),
                    mass: b.mass,
                    color_hint: b.color_hint.clone(),
                })
                .collect(),
        }
    }

    /// Stores `value` as the body's mass, raised to the mass floor.
    pub fn set_mass(&mut self, id: &BodyId, value: f64) -> SimResult<()> {
        let body = self.body_mut(id)?;
        body.set_mass(value)?;
        debug!("mass of {} set to {}", id, body.mass);
        Ok(())
    }

    /// Sets the body's mass from a raw mass control reading.
    pub fn set_mass_control(&mut self, id: &BodyId, raw: f64) -> SimResult<()> {
        self.set_mass(id, mass_from_control(raw))
    }

    /// Sets the body's velocity from the one-dimensional velocity control.
    ///
    /// Takes effect immediately on the running body, replacing whatever
    /// velocity it has built up, rather than waiting for the next `reset`.
    pub fn set_velocity(&mut self, id: &BodyId, scalar: f64) -> SimResult<()> {
        let body = self.body_mut(id)?;
        body.velocity = velocity_from_control(scalar);
        debug!("velocity of {} set to {}", id, body.velocity);
        Ok(())
    }

    fn body_mut(&mut self, id: &BodyId) -> SimResult<&mut Body> {
        self.bodies
            .as_mut()
            .ok_or(SimError::NotInitialized)?
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| SimError::UnknownBodyId(id.clone()))
    }

    pub fn body(&self, id: &BodyId) -> Option<&Body> {
        self.bodies().iter().find(|b| &b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        self.bodies.as_deref().unwrap_or(&[])
    }

    pub fn is_initialized(&self) -> bool {
        self.bodies.is_some()
    }

    pub fn len(&self) -> usize {
        self.bodies().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies().is_empty()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn force_model(&self) -> &F {
        &self.force_model
    }

    /// Net force on the body with `id`, evaluated at the current positions.
    pub fn net_force(&self, id: &BodyId) -> SimResult<Vector> {
        let index = self
            .bodies()
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| SimError::UnknownBodyId(id.clone()))?;
        Ok(self.force_model.net_force(index, self.bodies()))
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies().iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> Vector {
        self.bodies().iter().map(Body::momentum).sum()
    }

    pub fn center_of_mass_velocity(&self) -> Vector {
        let total_mass = self.total_mass();
        if total_mass == 0.0 {
            return Vector::zeros();
        }
        self.total_momentum() / total_mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies().iter().map(Body::kinetic_energy).sum()
    }

    pub fn potential_energy(&self) -> f64 {
        self.bodies()
            .iter()
            .tuple_combinations()
            .map(|(a, b)| self.force_model.potential_energy(a, b))
            .sum()
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}

/// Read-only state of one body at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub position: Vector,
    pub velocity: Vector,
    pub mass: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_hint: Option<String>,
}

impl BodySnapshot {
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

/// Immutable copy of all bodies, detached from the simulation that made it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    elapsed_seconds: f64,
    bodies: Vec<BodySnapshot>,
}

impl Snapshot {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn bodies(&self) -> &[BodySnapshot] {
        &self.bodies
    }

    pub fn get(&self, id: &BodyId) -> Option<&BodySnapshot> {
        self.bodies.iter().find(|b| &b.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BodySnapshot> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a BodySnapshot;
    type IntoIter = std::slice::Iter<'a, BodySnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
