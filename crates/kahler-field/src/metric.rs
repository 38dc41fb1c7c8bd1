//! Isotropic metric derived from the Kähler potential.
//!
//!   g(x, y) = ¼ (∂²K/∂x² + ∂²K/∂y²)
//!
//! A single scalar stands in for both diagonal components `g_xx = g_yy`.
//! Nothing here rejects small values; the connection builder does.

use crate::DMat;
use crate::derivative::second_derivative;
use crate::grid::{Axis, Grid};

/// Derive the scalar metric from the potential sampled on `grid`.
pub fn metric_from_potential(potential: &DMat, grid: &Grid) -> DMat {
    let d2k_dx2 = second_derivative(potential, grid.spacing(Axis::X), Axis::X);
    let d2k_dy2 = second_derivative(potential, grid.spacing(Axis::Y), Axis::Y);
    (d2k_dx2 + d2k_dy2) * 0.25
}

/// Cell holding the smallest `|g|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricExtremum {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Locate the cell with the smallest metric magnitude.
///
/// Returns `None` for an empty field.
pub fn min_abs_metric(metric: &DMat) -> Option<MetricExtremum> {
    let mut best: Option<MetricExtremum> = None;
    for row in 0..metric.nrows() {
        for col in 0..metric.ncols() {
            let value = metric[(row, col)];
            if best.is_none_or(|b| value.abs() < b.value.abs()) {
                best = Some(MetricExtremum { row, col, value });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::FractalPotential;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_potential_gives_zero_metric() {
        let grid = Grid::new(16).unwrap();
        let k = DMat::zeros(16, 16);
        let g = metric_from_potential(&k, &grid);
        assert!(g.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_paraboloid_metric_is_constant_inside() {
        // K = x² + y²  ⇒  ΔK = 4  ⇒  g = 1.
        let grid = Grid::new(41).unwrap();
        let (xx, yy) = grid.mesh();
        let k = xx.component_mul(&xx) + yy.component_mul(&yy);
        let g = metric_from_potential(&k, &grid);
        for r in 2..39 {
            for c in 2..39 {
                assert_relative_eq!(g[(r, c)], 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_single_band_metric_tracks_laplacian() {
        // One band: ΔK = -K, so g ≈ -K/4 away from the edges.
        let grid = Grid::new(200).unwrap();
        let potential = FractalPotential::seeded(1, 1.0, 0);
        let k = potential.sample(&grid);
        let g = metric_from_potential(&k, &grid);
        for (r, c) in [(50, 50), (100, 30), (140, 170)] {
            assert_relative_eq!(g[(r, c)], -0.25 * k[(r, c)], epsilon = 1e-3);
        }
    }

    #[test]
    fn test_min_abs_metric() {
        let g = DMat::from_row_slice(2, 2, &[0.5, -0.01, 0.2, 0.03]);
        let m = min_abs_metric(&g).unwrap();
        assert_eq!((m.row, m.col), (0, 1));
        assert_eq!(m.value, -0.01);
        assert!(min_abs_metric(&DMat::zeros(0, 0)).is_none());
    }
}
