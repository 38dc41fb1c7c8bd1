//! JSON configuration for holonomy runs.
//!
//! ```json
//! {
//!   "manifold": { "size": 150, "fractal_level": 4, "scale": 0.2 },
//!   "transport": { "steps": 200 },
//!   "initial_vector": { "type": "real", "components": [1.0, 0.0] },
//!   "loops": [{ "type": "circle", "center": [0.5, -0.3], "radius": 0.5 }]
//! }
//! ```
//!
//! Every field except `loops` has a default.

use crate::error::{KahlerError, Result};
use kahler_field::{
    C64, CVec2, DEFAULT_SEED, ManifoldParams, SINGULAR_METRIC_TOLERANCE, Sampling, Vec2,
};
use kahler_transport::{Circle, CircleSampler, Curve, DEFAULT_STEPS, Ellipse, Lemniscate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manifold construction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifoldConfig {
    /// Grid samples per axis.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Number of wave bands in the potential.
    #[serde(default = "default_fractal_level")]
    pub fractal_level: usize,
    /// Potential amplitude.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Phase source seed.
    #[serde(default)]
    pub seed: u32,
    /// Smallest accepted `|g|`.
    #[serde(default = "default_singular_tolerance")]
    pub singular_tolerance: f64,
    /// Connection lookup mode.
    #[serde(default)]
    pub sampling: Sampling,
}

fn default_size() -> usize {
    100
}

fn default_fractal_level() -> usize {
    3
}

fn default_scale() -> f64 {
    0.1
}

fn default_singular_tolerance() -> f64 {
    SINGULAR_METRIC_TOLERANCE
}

impl Default for ManifoldConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            fractal_level: default_fractal_level(),
            scale: default_scale(),
            seed: DEFAULT_SEED,
            singular_tolerance: default_singular_tolerance(),
            sampling: Sampling::default(),
        }
    }
}

impl ManifoldConfig {
    pub fn params(&self) -> ManifoldParams {
        ManifoldParams {
            size: self.size,
            fractal_level: self.fractal_level,
            scale: self.scale,
            seed: self.seed,
            singular_tolerance: self.singular_tolerance,
            sampling: self.sampling,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(KahlerError::InvalidConfig(format!(
                "manifold.size must be at least 2, got {}",
                self.size
            )));
        }
        if !self.scale.is_finite() {
            return Err(KahlerError::InvalidConfig(
                "manifold.scale must be finite".into(),
            ));
        }
        if !(self.singular_tolerance.is_finite() && self.singular_tolerance > 0.0) {
            return Err(KahlerError::InvalidConfig(format!(
                "manifold.singular_tolerance must be positive, got {}",
                self.singular_tolerance
            )));
        }
        Ok(())
    }
}

/// Per-path integration settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Samples along each path.
    #[serde(default = "default_steps")]
    pub steps: usize,
}

fn default_steps() -> usize {
    DEFAULT_STEPS
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
        }
    }
}

/// Starting tangent vector; the variant selects real or complex transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InitialVector {
    /// `(vx, vy)`.
    Real { components: [f64; 2] },
    /// `(v_z, v_z̄)`, each given as `[re, im]`.
    Complex { z: [f64; 2], zbar: [f64; 2] },
}

impl Default for InitialVector {
    fn default() -> Self {
        Self::Real {
            components: [1.0, 0.0],
        }
    }
}

impl InitialVector {
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Real { components } => components.iter().all(|c| c.is_finite()),
            Self::Complex { z, zbar } => z.iter().chain(zbar).all(|c| c.is_finite()),
        }
    }

    /// The vector in its tangent-space representation.
    pub fn tangent(&self) -> TangentVector {
        match *self {
            Self::Real { components: [x, y] } => TangentVector::Real(Vec2::new(x, y)),
            Self::Complex { z, zbar } => TangentVector::Complex(CVec2::new(
                C64::new(z[0], z[1]),
                C64::new(zbar[0], zbar[1]),
            )),
        }
    }
}

/// [`InitialVector`] converted for transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TangentVector {
    Real(Vec2),
    Complex(CVec2),
}

/// A closed loop, deserialized by `type`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LoopSpec {
    Circle { center: [f64; 2], radius: f64 },
    Ellipse { center: [f64; 2], radii: [f64; 2] },
    Lemniscate { center: [f64; 2], scale: f64 },
}

impl LoopSpec {
    pub fn validate(&self) -> Result<()> {
        let (center, sizes): ([f64; 2], Vec<f64>) = match *self {
            Self::Circle { center, radius } => (center, vec![radius]),
            Self::Ellipse { center, radii } => (center, radii.to_vec()),
            Self::Lemniscate { center, scale } => (center, vec![scale]),
        };
        if !center.iter().all(|c| c.is_finite()) {
            return Err(KahlerError::InvalidConfig(format!(
                "loop center must be finite: {self:?}"
            )));
        }
        if !sizes.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(KahlerError::InvalidConfig(format!(
                "loop size must be positive: {self:?}"
            )));
        }
        Ok(())
    }
}

impl Curve for LoopSpec {
    fn point(&self, t: f64) -> Vec2 {
        match *self {
            Self::Circle { center, radius } => Circle::new(center.into(), radius).point(t),
            Self::Ellipse { center, radii } => Ellipse::new(center.into(), radii.into()).point(t),
            Self::Lemniscate { center, scale } => {
                Lemniscate::new(center.into(), scale).point(t)
            }
        }
    }
}

/// A full run: manifold, integration settings, start vector and loops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub manifold: ManifoldConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub initial_vector: InitialVector,
    /// Loops traversed in order.
    pub loops: Vec<LoopSpec>,
    /// Optional Monte-Carlo ensemble over random circles.
    #[serde(default)]
    pub ensemble: Option<CircleSampler>,
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every precondition before anything is computed.
    pub fn validate(&self) -> Result<()> {
        self.manifold.validate()?;
        if self.transport.steps < 2 {
            return Err(KahlerError::InvalidConfig(format!(
                "transport.steps must be at least 2, got {}",
                self.transport.steps
            )));
        }
        if !self.initial_vector.is_finite() {
            return Err(KahlerError::InvalidConfig(
                "initial_vector must be finite".into(),
            ));
        }
        if self.loops.is_empty() {
            return Err(KahlerError::InvalidConfig(
                "at least one loop is required".into(),
            ));
        }
        for loop_spec in &self.loops {
            loop_spec.validate()?;
        }
        if let Some(sampler) = &self.ensemble {
            sampler.validate()?;
        }
        Ok(())
    }

    /// Single circle on the reference manifold (`size = 150`, level 4, scale 0.2).
    pub fn reference_circle() -> Self {
        Self {
            manifold: ManifoldConfig {
                size: 150,
                fractal_level: 4,
                scale: 0.2,
                ..Default::default()
            },
            transport: TransportConfig { steps: 200 },
            initial_vector: InitialVector::Real {
                components: [1.0, 0.0],
            },
            loops: vec![LoopSpec::Circle {
                center: [0.5, -0.3],
                radius: 0.5,
            }],
            ensemble: None,
        }
    }

    /// Three consecutive loops with complex transport on a fine manifold.
    pub fn depth3() -> Self {
        Self {
            manifold: ManifoldConfig {
                size: 300,
                fractal_level: 5,
                scale: 0.3,
                ..Default::default()
            },
            transport: TransportConfig { steps: 300 },
            initial_vector: InitialVector::Complex {
                z: [1.0, 0.0],
                zbar: [1.0, 0.0],
            },
            loops: vec![
                LoopSpec::Circle {
                    center: [0.5, 0.5],
                    radius: 0.4,
                },
                LoopSpec::Lemniscate {
                    center: [0.0, 0.0],
                    scale: 0.1,
                },
                LoopSpec::Circle {
                    center: [-0.7, -0.6],
                    radius: 0.5,
                },
            ],
            ensemble: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = SimulationConfig::from_json_str(
            r#"{ "loops": [{ "type": "circle", "center": [0.0, 0.0], "radius": 0.5 }] }"#,
        )
        .unwrap();
        assert_eq!(config.manifold, ManifoldConfig::default());
        assert_eq!(config.transport.steps, 100);
        assert_eq!(config.initial_vector, InitialVector::default());
        assert_eq!(config.manifold.seed, 0);
        assert_eq!(config.manifold.sampling, Sampling::Nearest);
        assert!(config.ensemble.is_none());
    }

    #[test]
    fn test_full_document() {
        let json = r#"{
            "manifold": { "size": 64, "fractal_level": 2, "scale": 0.5, "seed": 7, "sampling": "bilinear" },
            "transport": { "steps": 250 },
            "initial_vector": { "type": "complex", "z": [1.0, 0.5], "zbar": [1.0, -0.5] },
            "loops": [
                { "type": "ellipse", "center": [0.1, 0.2], "radii": [0.3, 0.2] },
                { "type": "lemniscate", "center": [0.0, 0.0], "scale": 0.1 }
            ],
            "ensemble": { "n_samples": 8, "seed": 3 }
        }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(config.manifold.sampling, Sampling::Bilinear);
        assert_eq!(config.manifold.seed, 7);
        assert_eq!(config.transport.steps, 250);
        let TangentVector::Complex(v) = config.initial_vector.tangent() else {
            panic!("expected a complex vector");
        };
        assert_eq!(v[1], C64::new(1.0, -0.5));
        assert_eq!(
            InitialVector::default().tangent(),
            TangentVector::Real(Vec2::new(1.0, 0.0))
        );
        assert_eq!(config.loops.len(), 2);
        let sampler = config.ensemble.unwrap();
        assert_eq!(sampler.n_samples, 8);
        assert_eq!(sampler.radius_range, (0.1, 0.5));
    }

    #[test]
    fn test_json_roundtrip_of_presets() {
        for config in [SimulationConfig::reference_circle(), SimulationConfig::depth3()] {
            let json = config.to_json_string().unwrap();
            assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
        }
    }

    #[test]
    fn test_validation_failures() {
        let base = SimulationConfig::reference_circle();

        let mut c = base.clone();
        c.manifold.size = 1;
        assert!(matches!(c.validate(), Err(KahlerError::InvalidConfig(_))));

        let mut c = base.clone();
        c.transport.steps = 1;
        assert!(matches!(c.validate(), Err(KahlerError::InvalidConfig(_))));

        let mut c = base.clone();
        c.loops.clear();
        assert!(matches!(c.validate(), Err(KahlerError::InvalidConfig(_))));

        let mut c = base.clone();
        c.loops.push(LoopSpec::Circle {
            center: [0.0, 0.0],
            radius: -1.0,
        });
        assert!(matches!(c.validate(), Err(KahlerError::InvalidConfig(_))));

        let mut c = base.clone();
        c.initial_vector = InitialVector::Real {
            components: [f64::NAN, 0.0],
        };
        assert!(matches!(c.validate(), Err(KahlerError::InvalidConfig(_))));

        let mut c = base;
        c.ensemble = Some(CircleSampler {
            n_samples: 0,
            ..Default::default()
        });
        assert!(matches!(c.validate(), Err(KahlerError::Transport(_))));
    }

    #[test]
    fn test_malformed_json() {
        let err = SimulationConfig::from_json_str(r#"{ "loops": [{ "type": "square" }] }"#)
            .unwrap_err();
        assert!(matches!(err, KahlerError::Json(_)));
    }

    #[test]
    fn test_loop_spec_matches_curves() {
        let looped = LoopSpec::Circle {
            center: [0.5, -0.3],
            radius: 0.5,
        };
        let circle = Circle::new(Vec2::new(0.5, -0.3), 0.5);
        for t in [0.0, 0.3, 0.9] {
            assert_eq!(looped.point(t), circle.point(t));
        }
        let lem = LoopSpec::Lemniscate {
            center: [0.0, 0.0],
            scale: 0.1,
        };
        assert_relative_eq!(lem.point(0.0).x, 0.1, epsilon = 1e-12);
    }
}
