//! Error types for the kahler engine.

use kahler_field::FieldError;
use kahler_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KahlerError {
    #[error("manifold error: {0}")]
    Field(#[from] FieldError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, KahlerError>;
