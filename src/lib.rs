//! Point masses attracting each other in a 2D plane.
//!
//! A driver owns a [`Simulation`], calls [`Simulation::reset`] with a set of
//! [`BodyConfig`]s, then [`Simulation::tick`] once per frame and hands
//! [`Simulation::snapshot`] to whatever draws the bodies.

pub mod body;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod vector;
pub mod viewport;

pub use body::{Body, BodyId};
pub use clock::FrameClock;
pub use config::{BodyConfig, PhysicsConfig, ScenarioConfig};
pub use error::{SimError, SimResult};
pub use export::FrameWriter;
pub use forces::{ForceModel, NewtonianGravity};
pub use integrator::{Integrator, SemiImplicitEuler};
pub use simulation::{BodySnapshot, Simulation, Snapshot};
pub use vector::Vector;
pub use viewport::Viewport;
