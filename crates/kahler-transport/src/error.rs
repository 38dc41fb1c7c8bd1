//! Error types for kahler-transport.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("transport needs at least 2 steps, got {0}")]
    TooFewSteps(usize),

    #[error("initial tangent vector has non-finite components")]
    NonFiniteInitial,

    #[error("curve returned a non-finite point at sample {index} (t = {t})")]
    NonFiniteCurve { index: usize, t: f64 },

    #[error("transport diverged at step {step}: tangent vector became non-finite")]
    Diverged { step: usize },

    #[error("cannot extract a holonomy angle from a zero-length tangent vector")]
    DegenerateVector,

    #[error("holonomy composition needs at least one loop")]
    NoLoops,

    #[error("invalid sampler configuration: {0}")]
    InvalidSampler(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
