//! Monte-Carlo sampling of holonomies over random circular loops.
//!
//! Loop parameters are drawn sequentially from a seeded [`StdRng`], then the
//! independent transports run in parallel. The result does not depend on
//! the number of worker threads.

use crate::curve::Circle;
use crate::error::{Result, TransportError};
use crate::holonomy::compute_holonomy;
use crate::tangent::TangentSpace;
use kahler_field::{ConnectionField, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Distribution of random circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleSampler {
    /// Number of circles to draw.
    pub n_samples: usize,
    /// Range of both center coordinates.
    pub center_range: (f64, f64),
    /// Range of radii; the lower end must be positive.
    pub radius_range: (f64, f64),
    /// RNG seed.
    pub seed: u64,
}

impl Default for CircleSampler {
    fn default() -> Self {
        Self {
            n_samples: 64,
            center_range: (-1.0, 1.0),
            radius_range: (0.1, 0.5),
            seed: 42,
        }
    }
}

impl CircleSampler {
    pub fn validate(&self) -> Result<()> {
        if self.n_samples == 0 {
            return Err(TransportError::InvalidSampler(
                "n_samples must be positive".into(),
            ));
        }
        let ordered = |(lo, hi): (f64, f64)| lo.is_finite() && hi.is_finite() && lo <= hi;
        if !ordered(self.center_range) {
            return Err(TransportError::InvalidSampler(format!(
                "bad center_range {:?}",
                self.center_range
            )));
        }
        if !ordered(self.radius_range) || self.radius_range.0 <= 0.0 {
            return Err(TransportError::InvalidSampler(format!(
                "bad radius_range {:?}",
                self.radius_range
            )));
        }
        Ok(())
    }

    /// Draw the circles, in a fixed order for a given seed.
    pub fn draw(&self) -> Result<Vec<Circle>> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (c_lo, c_hi) = self.center_range;
        let (r_lo, r_hi) = self.radius_range;
        let circles = (0..self.n_samples)
            .map(|_| {
                let cx = c_lo + (c_hi - c_lo) * rng.r#gen::<f64>();
                let cy = c_lo + (c_hi - c_lo) * rng.r#gen::<f64>();
                let r = r_lo + (r_hi - r_lo) * rng.r#gen::<f64>();
                Circle::new(Vec2::new(cx, cy), r)
            })
            .collect();
        Ok(circles)
    }
}

/// Holonomy angles of a sampled ensemble with summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolonomyStatistics {
    pub angles: Vec<f64>,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl HolonomyStatistics {
    pub fn from_angles(angles: Vec<f64>) -> Self {
        if angles.is_empty() {
            return Self {
                angles,
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }
        let n = angles.len() as f64;
        let mean = angles.iter().sum::<f64>() / n;
        let var = angles.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;
        Self {
            angles,
            mean,
            std_dev: var.sqrt(),
        }
    }
}

/// Holonomy angle of every circle drawn by `sampler`.
pub fn sample_circle_holonomies<T: TangentSpace>(
    field: &(impl ConnectionField + Sync + ?Sized),
    sampler: &CircleSampler,
    initial: T::Vector,
    steps: usize,
) -> Result<HolonomyStatistics> {
    let circles = sampler.draw()?;
    let angles: Vec<f64> = circles
        .par_iter()
        .map(|circle| compute_holonomy::<T>(field, circle, initial, steps).map(|h| h.angle))
        .collect::<Result<_>>()?;

    let stats = HolonomyStatistics::from_angles(angles);
    tracing::info!(
        tangent = T::NAME,
        n_samples = sampler.n_samples,
        seed = sampler.seed,
        mean = stats.mean,
        std_dev = stats.std_dev,
        "sampled circle holonomies"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tangent::{ComplexTangent, RealTangent};
    use approx::assert_relative_eq;
    use kahler_field::{C64, CVec2, FractalManifold, ManifoldParams};

    fn manifold() -> FractalManifold {
        FractalManifold::new(ManifoldParams {
            size: 60,
            fractal_level: 1,
            scale: 1.0,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_draw_is_seeded() {
        let sampler = CircleSampler {
            n_samples: 10,
            ..Default::default()
        };
        let a = sampler.draw().unwrap();
        assert_eq!(a, sampler.draw().unwrap());
        assert_eq!(a.len(), 10);
        for c in &a {
            assert!((-1.0..=1.0).contains(&c.center.x));
            assert!((-1.0..=1.0).contains(&c.center.y));
            assert!((0.1..=0.5).contains(&c.radius));
        }

        let other = CircleSampler {
            seed: 7,
            ..sampler.clone()
        };
        assert_ne!(a, other.draw().unwrap());
    }

    #[test]
    fn test_invalid_sampler() {
        let bad = [
            CircleSampler {
                n_samples: 0,
                ..Default::default()
            },
            CircleSampler {
                center_range: (1.0, -1.0),
                ..Default::default()
            },
            CircleSampler {
                radius_range: (0.0, 0.5),
                ..Default::default()
            },
            CircleSampler {
                radius_range: (0.1, f64::INFINITY),
                ..Default::default()
            },
        ];
        for sampler in &bad {
            assert!(matches!(
                sampler.validate(),
                Err(TransportError::InvalidSampler(_))
            ));
        }
    }

    #[test]
    fn test_statistics() {
        let stats = HolonomyStatistics::from_angles(vec![1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(stats.mean, 2.5);
        assert_relative_eq!(stats.std_dev, 1.25_f64.sqrt());
        assert!(HolonomyStatistics::from_angles(Vec::new()).mean.is_nan());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let m = manifold();
        let sampler = CircleSampler {
            n_samples: 12,
            ..Default::default()
        };
        let v0 = Vec2::new(1.0, 1.0);
        let stats = sample_circle_holonomies::<RealTangent>(&m, &sampler, v0, 80).unwrap();

        let sequential: Vec<f64> = sampler
            .draw()
            .unwrap()
            .iter()
            .map(|c| compute_holonomy::<RealTangent>(&m, c, v0, 80).unwrap().angle)
            .collect();
        assert_eq!(stats.angles, sequential);
        assert!(stats.std_dev.is_finite());
    }

    #[test]
    fn test_complex_ensemble() {
        let m = manifold();
        let sampler = CircleSampler {
            n_samples: 6,
            seed: 3,
            ..Default::default()
        };
        let one = C64::new(1.0, 0.0);
        let stats =
            sample_circle_holonomies::<ComplexTangent>(&m, &sampler, CVec2::new(one, one), 60)
                .unwrap();
        assert_eq!(stats.angles.len(), 6);
        assert!(stats.angles.iter().all(|a| a.is_finite()));
    }
}
