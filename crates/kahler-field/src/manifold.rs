//! The fractal Kähler manifold: grid, potential, metric and connection.

use crate::connection::{Connection, SINGULAR_METRIC_TOLERANCE};
use crate::error::Result;
use crate::grid::Grid;
use crate::metric::{metric_from_potential, min_abs_metric};
use crate::potential::{DEFAULT_SEED, FractalPotential, PhaseSource};
use crate::sampler::{ChristoffelSample, ConnectionField, GridSampler, Sampling};
use crate::{DMat, Vec2};

/// Construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManifoldParams {
    /// Samples per axis (≥ 2).
    pub size: usize,
    /// Number of superposed wave bands.
    pub fractal_level: usize,
    /// Oscillation amplitude of the potential.
    pub scale: f64,
    /// Seed of the phase source.
    pub seed: u32,
    /// Smallest `|g|` accepted when building the connection.
    pub singular_tolerance: f64,
    /// Connection lookup mode.
    pub sampling: Sampling,
}

impl Default for ManifoldParams {
    fn default() -> Self {
        Self {
            size: 100,
            fractal_level: 3,
            scale: 0.1,
            seed: DEFAULT_SEED,
            singular_tolerance: SINGULAR_METRIC_TOLERANCE,
            sampling: Sampling::Nearest,
        }
    }
}

/// 2D manifold with a metric derived from a fractal Kähler potential.
///
/// Every field is computed once in [`FractalManifold::new`] and shared
/// read-only by all later transport calls.
#[derive(Debug, Clone)]
pub struct FractalManifold {
    params: ManifoldParams,
    grid: Grid,
    potential: FractalPotential,
    k: DMat,
    g: DMat,
    connection: Connection,
}

impl FractalManifold {
    /// Build the manifold; phases come from a source seeded with `params.seed`.
    pub fn new(params: ManifoldParams) -> Result<Self> {
        let grid = Grid::new(params.size)?;
        let mut source = PhaseSource::seeded(params.seed);
        let potential = FractalPotential::generate(params.fractal_level, params.scale, &mut source);
        let k = potential.sample(&grid);
        let g = metric_from_potential(&k, &grid);

        let connection = match Connection::from_metric(&g, &grid, params.singular_tolerance) {
            Ok(connection) => connection,
            Err(err) => {
                tracing::warn!(
                    size = params.size,
                    fractal_level = params.fractal_level,
                    scale = params.scale,
                    %err,
                    "rejecting manifold with singular metric"
                );
                return Err(err);
            }
        };

        let min_abs_g = min_abs_metric(&g).map_or(f64::NAN, |m| m.value.abs());
        tracing::info!(
            size = params.size,
            fractal_level = params.fractal_level,
            scale = params.scale,
            seed = params.seed,
            min_abs_g,
            max_abs_gamma = connection.max_abs(),
            "built fractal Kähler manifold"
        );

        Ok(Self {
            params,
            grid,
            potential,
            k,
            g,
            connection,
        })
    }

    pub fn params(&self) -> &ManifoldParams {
        &self.params
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn potential(&self) -> &FractalPotential {
        &self.potential
    }

    /// Potential `K` sampled on the grid.
    pub fn potential_field(&self) -> &DMat {
        &self.k
    }

    /// Metric `g` sampled on the grid.
    pub fn metric(&self) -> &DMat {
        &self.g
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Sampler using the configured lookup mode.
    pub fn sampler(&self) -> GridSampler<'_> {
        GridSampler::new(&self.grid, &self.connection, self.params.sampling)
    }
}

impl ConnectionField for FractalManifold {
    fn christoffel_at(&self, point: Vec2) -> ChristoffelSample {
        self.sampler().christoffel_at(point)
    }
}
