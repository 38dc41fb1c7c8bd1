//! Discretized fractal Kähler geometry on a 2-D grid.
//!
//! Builds, in order:
//! - the coordinate [`Grid`] over a fixed square (default `[-2, 2]²`)
//! - a seeded [`FractalPotential`] `K` (superposition of decaying wave bands)
//! - the isotropic metric `g = ¼ (∂²K/∂x² + ∂²K/∂y²)`
//! - the diagonal-metric [`Connection`] `Γˣ_xx = ½ ∂ₓg / g`, `Γʸ_yy = ½ ∂ᵧg / g`
//!
//! and exposes grid lookup of the connection at continuous coordinates
//! through the [`ConnectionField`] trait. [`FractalManifold`] owns all of the
//! above and is read-only after construction.
//!
//! # Example
//!
//! ```
//! use kahler_field::{ConnectionField, FractalManifold, ManifoldParams, Vec2};
//!
//! let manifold = FractalManifold::new(ManifoldParams {
//!     size: 60,
//!     fractal_level: 1,
//!     scale: 1.0,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let gamma = manifold.christoffel_at(Vec2::new(0.1, -0.2));
//! assert!(gamma.gamma_x_xx.is_finite());
//! ```

pub mod connection;
pub mod derivative;
pub mod error;
pub mod grid;
pub mod manifold;
pub mod metric;
pub mod potential;
pub mod sampler;

pub use connection::{Connection, SINGULAR_METRIC_TOLERANCE};
pub use derivative::{gradient, second_derivative};
pub use error::{FieldError, Result};
pub use grid::{Axis, DEFAULT_BOUNDS, Grid, linspace};
pub use manifold::{FractalManifold, ManifoldParams};
pub use metric::{MetricExtremum, metric_from_potential, min_abs_metric};
pub use potential::{Band, DEFAULT_SEED, FractalPotential, PhaseSource};
pub use sampler::{ChristoffelSample, ConnectionField, GridSampler, Sampling};

use nalgebra as na;

/// 2D real vector alias.
pub type Vec2 = na::Vector2<f64>;
/// 2x2 real matrix alias.
pub type Mat2 = na::Matrix2<f64>;
/// Dynamic matrix, indexed `(row, col) = (iy, ix)` for grid fields.
pub type DMat = na::DMatrix<f64>;
/// Double-precision complex scalar.
pub type C64 = na::Complex<f64>;
/// 2D complex vector alias.
pub type CVec2 = na::Vector2<C64>;
/// 2x2 complex matrix alias.
pub type CMat2 = na::Matrix2<C64>;
