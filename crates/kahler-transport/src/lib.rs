//! Parallel transport and holonomy on a discretized Kähler manifold.
//!
//! A tangent vector is carried along a parametric [`Curve`] by forward-Euler
//! integration of
//!
//! ```text
//! dv^x/dt = -Γˣ_xx v^x dx/dt
//! dv^y/dt = -Γʸ_yy v^y dy/dt
//! ```
//!
//! using connection coefficients looked up through a
//! [`ConnectionField`](kahler_field::ConnectionField). The holonomy of a
//! closed loop is the signed rotation between the initial and final vector.
//!
//! # Architecture
//!
//! - [`curve`]: the [`Curve`] trait and standard loops
//! - [`tangent`]: real and complex tangent representations behind [`TangentSpace`]
//! - [`transport`]: the integrator
//! - [`holonomy`]: angle, phase and matrix extraction
//! - [`compose`]: chaining loops, `M_total = M_k ⋯ M_1`
//! - [`ensemble`]: seeded Monte-Carlo sampling over random circles
//!
//! # Example
//!
//! ```
//! use kahler_field::{FractalManifold, ManifoldParams, Vec2};
//! use kahler_transport::{Circle, Curve, RealTangent, compose_holonomies};
//!
//! let manifold = FractalManifold::new(ManifoldParams {
//!     size: 60,
//!     fractal_level: 1,
//!     scale: 1.0,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! // A loop followed by its reversal comes back close to where it started.
//! let circle = Circle::new(Vec2::zeros(), 0.3);
//! let back = circle.reversed();
//! let composed =
//!     compose_holonomies::<RealTangent>(&manifold, &[&circle, &back], Vec2::new(1.0, 1.0), 400)
//!         .unwrap();
//! assert!(composed.total_angle.abs() < 1e-2);
//! ```

pub mod compose;
pub mod curve;
pub mod ensemble;
pub mod error;
pub mod holonomy;
pub mod tangent;
pub mod transport;

pub use compose::{ComposedHolonomy, compose, compose_holonomies};
pub use curve::{Circle, Curve, Ellipse, Lemniscate, Reversed};
pub use ensemble::{CircleSampler, HolonomyStatistics, sample_circle_holonomies};
pub use error::{Result, TransportError};
pub use holonomy::{Holonomy, compute_holonomy, holonomy_angle, holonomy_from_transport};
pub use tangent::{
    ComplexTangent, RealTangent, TangentSpace, phase_matrix, rotation_angle, rotation_matrix,
};
pub use transport::{Transport, parallel_transport, parameter_samples};

/// Default number of samples along a path.
pub const DEFAULT_STEPS: usize = 100;
