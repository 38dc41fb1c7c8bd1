//! High-level driver tying a manifold to transport settings.

use crate::config::{SimulationConfig, TangentVector, TransportConfig};
use crate::error::{KahlerError, Result};
use crate::report::{render_ensemble, render_markdown};
use kahler_field::{CVec2, FractalManifold, ManifoldParams, Vec2};
use kahler_transport::{
    CircleSampler, ComplexTangent, ComposedHolonomy, Curve, Holonomy, HolonomyStatistics,
    RealTangent, compose_holonomies, compute_holonomy, sample_circle_holonomies,
};
use std::path::Path;

/// A built manifold plus the step count used for every path.
#[derive(Debug, Clone)]
pub struct HolonomyEngine {
    manifold: FractalManifold,
    transport: TransportConfig,
}

/// Composed holonomy of the configured loops; the variant follows the
/// initial vector.
#[derive(Debug, Clone)]
pub enum ComposedOutcome {
    Real(ComposedHolonomy<RealTangent>),
    Complex(ComposedHolonomy<ComplexTangent>),
}

impl ComposedOutcome {
    pub fn total_angle(&self) -> f64 {
        match self {
            Self::Real(c) => c.total_angle,
            Self::Complex(c) => c.total_angle,
        }
    }

    pub fn wrapped_angle(&self) -> f64 {
        match self {
            Self::Real(c) => c.wrapped_angle(),
            Self::Complex(c) => c.wrapped_angle(),
        }
    }

    /// Per-loop angles in traversal order.
    pub fn loop_angles(&self) -> Vec<f64> {
        match self {
            Self::Real(c) => c.loops.iter().map(|h| h.angle).collect(),
            Self::Complex(c) => c.loops.iter().map(|h| h.angle).collect(),
        }
    }

    pub fn render_markdown(&self, title: &str) -> String {
        match self {
            Self::Real(c) => render_markdown(title, c),
            Self::Complex(c) => render_markdown(title, c),
        }
    }
}

/// Result of [`HolonomyEngine::run`].
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub composed: ComposedOutcome,
    /// Random-circle statistics, present when the config has an `ensemble`.
    pub ensemble: Option<HolonomyStatistics>,
}

impl SimulationOutcome {
    pub fn total_angle(&self) -> f64 {
        self.composed.total_angle()
    }

    pub fn wrapped_angle(&self) -> f64 {
        self.composed.wrapped_angle()
    }

    pub fn loop_angles(&self) -> Vec<f64> {
        self.composed.loop_angles()
    }

    /// Loop sections, then the ensemble section if one was sampled.
    pub fn render_markdown(&self, title: &str) -> String {
        let mut out = self.composed.render_markdown(title);
        if let Some(stats) = &self.ensemble {
            out.push_str(&render_ensemble(stats));
        }
        out
    }
}

impl HolonomyEngine {
    pub fn new(params: ManifoldParams, transport: TransportConfig) -> Result<Self> {
        if transport.steps < 2 {
            return Err(KahlerError::InvalidConfig(format!(
                "transport.steps must be at least 2, got {}",
                transport.steps
            )));
        }
        let manifold = FractalManifold::new(params)?;
        Ok(Self {
            manifold,
            transport,
        })
    }

    /// Validate `config` and build its manifold.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.manifold.params(), config.transport)
    }

    pub fn manifold(&self) -> &FractalManifold {
        &self.manifold
    }

    pub fn steps(&self) -> usize {
        self.transport.steps
    }

    pub fn holonomy(
        &self,
        curve: &(impl Curve + ?Sized),
        initial: Vec2,
    ) -> Result<Holonomy<RealTangent>> {
        Ok(compute_holonomy::<RealTangent>(
            &self.manifold,
            curve,
            initial,
            self.steps(),
        )?)
    }

    pub fn complex_holonomy(
        &self,
        curve: &(impl Curve + ?Sized),
        initial: CVec2,
    ) -> Result<Holonomy<ComplexTangent>> {
        Ok(compute_holonomy::<ComplexTangent>(
            &self.manifold,
            curve,
            initial,
            self.steps(),
        )?)
    }

    pub fn compose(
        &self,
        loops: &[&dyn Curve],
        initial: Vec2,
    ) -> Result<ComposedHolonomy<RealTangent>> {
        Ok(compose_holonomies::<RealTangent>(
            &self.manifold,
            loops,
            initial,
            self.steps(),
        )?)
    }

    pub fn compose_complex(
        &self,
        loops: &[&dyn Curve],
        initial: CVec2,
    ) -> Result<ComposedHolonomy<ComplexTangent>> {
        Ok(compose_holonomies::<ComplexTangent>(
            &self.manifold,
            loops,
            initial,
            self.steps(),
        )?)
    }

    /// Monte-Carlo holonomy statistics over random circles.
    pub fn sample_circles(
        &self,
        sampler: &CircleSampler,
        initial: Vec2,
    ) -> Result<HolonomyStatistics> {
        Ok(sample_circle_holonomies::<RealTangent>(
            &self.manifold,
            sampler,
            initial,
            self.steps(),
        )?)
    }

    pub fn sample_circles_complex(
        &self,
        sampler: &CircleSampler,
        initial: CVec2,
    ) -> Result<HolonomyStatistics> {
        Ok(sample_circle_holonomies::<ComplexTangent>(
            &self.manifold,
            sampler,
            initial,
            self.steps(),
        )?)
    }

    /// Traverse the loops of `config` from its initial vector, with this
    /// engine's manifold and step count. The ensemble, if configured, starts
    /// every random circle from the same vector.
    pub fn run(&self, config: &SimulationConfig) -> Result<SimulationOutcome> {
        if config.loops.is_empty() {
            return Err(KahlerError::InvalidConfig(
                "at least one loop is required".into(),
            ));
        }
        let loops: Vec<&dyn Curve> = config.loops.iter().map(|l| l as &dyn Curve).collect();
        let initial = config.initial_vector.tangent();

        let composed = match initial {
            TangentVector::Real(v0) => ComposedOutcome::Real(self.compose(&loops, v0)?),
            TangentVector::Complex(v0) => {
                ComposedOutcome::Complex(self.compose_complex(&loops, v0)?)
            }
        };
        let ensemble = match &config.ensemble {
            Some(sampler) => Some(match initial {
                TangentVector::Real(v0) => self.sample_circles(sampler, v0)?,
                TangentVector::Complex(v0) => self.sample_circles_complex(sampler, v0)?,
            }),
            None => None,
        };

        tracing::info!(
            loops = config.loops.len(),
            steps = self.steps(),
            total_angle = composed.total_angle(),
            wrapped_angle = composed.wrapped_angle(),
            ensemble_samples = ensemble.as_ref().map_or(0, |s| s.angles.len()),
            "simulation finished"
        );
        Ok(SimulationOutcome { composed, ensemble })
    }

    /// Render `outcome` as Markdown and write it to `path`.
    pub fn write_report(
        outcome: &SimulationOutcome,
        title: &str,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, outcome.render_markdown(title))?;
        tracing::info!(path = %path.display(), "report written");
        Ok(())
    }
}

/// Build the engine for `config` and run it.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationOutcome> {
    HolonomyEngine::from_config(config)?.run(config)
}
