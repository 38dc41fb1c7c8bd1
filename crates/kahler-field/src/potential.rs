//! Seeded fractal Kähler potential.
//!
//! The potential is a superposition of `level` wave bands:
//!
//!   K(x, y) = Σ_l  scale · w_l · [sin(f_l x + φ_l) + cos(f_l y + φ_l)]
//!
//! with `f_l = 2^l`, `w_l = 1 / f_l^1.2` and one random phase `φ_l` per band.
//! Higher bands oscillate faster and contribute less, which produces the
//! self-similar fine structure.
//!
//! Phases come from an explicit [`PhaseSource`]: a 32-bit Mersenne Twister
//! whose doubles are built exactly like numpy's legacy `RandomState`, so a
//! given seed always reproduces the same field bit for bit.

use crate::DMat;
use crate::grid::Grid;
use rand_mt::Mt;
use std::f64::consts::PI;

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u32 = 0;

/// Decay exponent of the band weights.
const WEIGHT_EXPONENT: f64 = 1.2;

/// Explicit, seeded source of uniform band phases.
#[derive(Clone)]
pub struct PhaseSource {
    mt: Mt,
    seed: u32,
}

impl PhaseSource {
    pub fn seeded(seed: u32) -> Self {
        Self {
            mt: Mt::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Uniform double in `[0, 1)` with 53 random bits.
    pub fn next_f64(&mut self) -> f64 {
        let a = self.mt.next_u32() >> 5;
        let b = self.mt.next_u32() >> 6;
        (a as f64 * 67_108_864.0 + b as f64) / 9_007_199_254_740_992.0
    }

    /// Uniform double in `[lo, hi)`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

impl Default for PhaseSource {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

impl std::fmt::Debug for PhaseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseSource")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

/// One wave band of the potential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Spatial frequency `2^l`.
    pub freq: f64,
    /// Amplitude weight `freq^-1.2`.
    pub weight: f64,
    /// Phase offset in `[0, 2π)`.
    pub phase: f64,
}

/// Fractal superposition of wave bands.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalPotential {
    scale: f64,
    bands: Vec<Band>,
}

impl FractalPotential {
    /// Draw one phase per band from `source`, in band order.
    pub fn generate(level: usize, scale: f64, source: &mut PhaseSource) -> Self {
        let bands = (0..level)
            .map(|l| {
                let freq = 2f64.powi(l as i32);
                Band {
                    freq,
                    weight: 1.0 / freq.powf(WEIGHT_EXPONENT),
                    phase: source.uniform(0.0, 2.0 * PI),
                }
            })
            .collect();
        Self { scale, bands }
    }

    /// Potential drawn from a fresh source seeded with `seed`.
    pub fn seeded(level: usize, scale: f64, seed: u32) -> Self {
        Self::generate(level, scale, &mut PhaseSource::seeded(seed))
    }

    pub fn level(&self) -> usize {
        self.bands.len()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Evaluate `K(x, y)`, accumulating bands from coarse to fine.
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        let mut k = 0.0;
        for band in &self.bands {
            k += self.scale
                * band.weight
                * ((band.freq * x + band.phase).sin() + (band.freq * y + band.phase).cos());
        }
        k
    }

    /// Sample the potential on every grid cell.
    pub fn sample(&self, grid: &Grid) -> DMat {
        let (rows, cols) = grid.shape();
        let (x, y) = (grid.x(), grid.y());
        DMat::from_fn(rows, cols, |r, c| self.eval(x[c], y[r]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_phase_source_reference_stream() {
        // First doubles of the seed-0 MT19937 stream.
        let mut source = PhaseSource::seeded(0);
        assert_eq!(source.next_f64(), 0.5488135039273248);
        assert_eq!(source.next_f64(), 0.7151893663724195);
        assert_eq!(source.next_f64(), 0.6027633760716439);
        assert_eq!(source.next_f64(), 0.5448831829968969);
    }

    #[test]
    fn test_reference_phases() {
        let k = FractalPotential::seeded(4, 0.2, DEFAULT_SEED);
        let expected = [
            3.448296944257913,
            4.493667318642264,
            3.787273988239316,
            3.4236020095353483,
        ];
        for (band, phase) in k.bands().iter().zip(expected) {
            assert_relative_eq!(band.phase, phase, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_band_schedule() {
        let k = FractalPotential::seeded(3, 1.0, 7);
        let freqs: Vec<f64> = k.bands().iter().map(|b| b.freq).collect();
        assert_eq!(freqs, vec![1.0, 2.0, 4.0]);
        assert_relative_eq!(k.bands()[0].weight, 1.0);
        assert_relative_eq!(k.bands()[2].weight, 4f64.powf(-1.2), epsilon = 1e-15);
        assert!(k.bands().windows(2).all(|w| w[1].weight < w[0].weight));
    }

    #[test]
    fn test_level_zero_is_flat() {
        let grid = Grid::new(8).unwrap();
        let field = FractalPotential::seeded(0, 0.5, DEFAULT_SEED).sample(&grid);
        assert!(field.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_zero_scale_is_flat() {
        let grid = Grid::new(8).unwrap();
        let field = FractalPotential::seeded(4, 0.0, DEFAULT_SEED).sample(&grid);
        assert!(field.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_same_seed_same_field() {
        let grid = Grid::new(40).unwrap();
        let a = FractalPotential::seeded(4, 0.2, 11).sample(&grid);
        let b = FractalPotential::seeded(4, 0.2, 11).sample(&grid);
        assert_eq!(a, b);

        let c = FractalPotential::seeded(4, 0.2, 12).sample(&grid);
        assert_ne!(a, c);
    }

    #[test]
    fn test_single_band_closed_form() {
        let k = FractalPotential::seeded(1, 0.3, DEFAULT_SEED);
        let phase = k.bands()[0].phase;
        let (x, y) = (0.7, -1.1);
        let expected = 0.3 * ((x + phase).sin() + (y + phase).cos());
        assert_relative_eq!(k.eval(x, y), expected, epsilon = 1e-15);
    }
}
