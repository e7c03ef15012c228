//! Error types for the physics core.
//!
//! Per-pair failures (`DegenerateVector`, `Singularity`) are recovered inside
//! [`Simulation::tick`](crate::simulation::Simulation::tick) and never reach
//! the driver. Everything else is returned to the caller.

use crate::body::BodyId;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// Normalising a zero-length vector.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    /// Two bodies closer than the force model's distance floor.
    #[error("bodies are {distance:.3e} apart, below the distance floor")]
    Singularity { distance: f64 },

    /// A mass the floor clamp cannot repair (infinite).
    #[error("invalid mass {0}")]
    InvalidMass(f64),

    #[error("unknown body id '{0}'")]
    UnknownBodyId(BodyId),

    #[error("duplicate body id '{0}'")]
    DuplicateBodyId(BodyId),

    /// `tick` called before the first `reset`.
    #[error("simulation has not been initialized; call reset first")]
    NotInitialized,

    #[error("invalid time step {0} ms")]
    InvalidTimeStep(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
