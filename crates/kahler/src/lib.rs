//! kahler: parallel transport and holonomy on fractal Kähler manifolds.
//!
//! This is the umbrella crate: it re-exports the field and transport crates
//! and adds JSON configuration, the [`HolonomyEngine`] driver and Markdown
//! report rendering.
//!
//! # Example
//!
//! ```
//! use kahler::{HolonomyEngine, SimulationConfig};
//!
//! let json = r#"{
//!     "manifold": { "size": 60, "fractal_level": 1, "scale": 1.0 },
//!     "transport": { "steps": 100 },
//!     "initial_vector": { "type": "real", "components": [1.0, 1.0] },
//!     "loops": [{ "type": "circle", "center": [0.0, 0.0], "radius": 0.3 }]
//! }"#;
//! let config = SimulationConfig::from_json_str(json).unwrap();
//! let engine = HolonomyEngine::from_config(&config).unwrap();
//! let outcome = engine.run(&config).unwrap();
//! assert!(outcome.total_angle().is_finite());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod report;

pub use config::{
    InitialVector, LoopSpec, ManifoldConfig, SimulationConfig, TangentVector, TransportConfig,
};
pub use engine::{ComposedOutcome, HolonomyEngine, SimulationOutcome, simulate};
pub use error::{KahlerError, Result};
pub use report::{REPORT_TITLE, render_ensemble, render_markdown};

pub use kahler_field::{
    self, C64, CMat2, CVec2, ConnectionField, FieldError, FractalManifold, ManifoldParams, Mat2,
    Sampling, Vec2,
};
pub use kahler_transport::{
    self, Circle, CircleSampler, ComplexTangent, ComposedHolonomy, Curve, DEFAULT_STEPS, Ellipse,
    Holonomy, HolonomyStatistics, Lemniscate, RealTangent, Reversed, TangentSpace, TransportError,
    compose_holonomies, compute_holonomy, holonomy_angle, parallel_transport, rotation_angle,
    rotation_matrix, sample_circle_holonomies,
};
