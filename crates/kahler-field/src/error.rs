//! Error types for kahler-field.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("grid size must be at least 2, got {0}")]
    InvalidSize(usize),

    #[error("invalid grid bounds [{lo}, {hi}]: need finite lo < hi")]
    InvalidBounds { lo: f64, hi: f64 },

    #[error("field shape {found:?} does not match grid shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error(
        "singular metric at cell ({row}, {col}) near (x = {x:.4}, y = {y:.4}): \
         |g| = {value:e} is below tolerance {tolerance:e}"
    )]
    SingularMetric {
        row: usize,
        col: usize,
        x: f64,
        y: f64,
        value: f64,
        tolerance: f64,
    },
}

pub type Result<T> = std::result::Result<T, FieldError>;
