//! Christoffel symbols for the diagonal (isotropic) metric.
//!
//! With `g_xx = g_yy = g` and the simplified ansatz used here, only two
//! components are kept:
//!
//!   Γˣ_xx = ½ (∂g/∂x) / g
//!   Γʸ_yy = ½ (∂g/∂y) / g
//!
//! Every other component is zero by construction. The holomorphic
//! component used by complex transport, `Γᶻ_zz = ∂_z g / g` with
//! `∂_z = ½ (∂ₓ - i∂ᵧ)`, is `Γˣ_xx - i Γʸ_yy`; samplers read it off the same
//! fields.
//!
//! The metric is checked before dividing: any cell with a non-finite `g` or
//! `|g|` below the tolerance is reported as [`FieldError::SingularMetric`]
//! instead of producing `inf`/`NaN`.

use crate::DMat;
use crate::derivative::gradient;
use crate::error::{FieldError, Result};
use crate::grid::{Axis, Grid};

/// Smallest `|g|` accepted as a divisor.
pub const SINGULAR_METRIC_TOLERANCE: f64 = 1e-9;

/// Discretized connection coefficients on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    gamma_x_xx: DMat,
    gamma_y_yy: DMat,
}

impl Connection {
    /// Build the connection from the metric field sampled on `grid`.
    pub fn from_metric(metric: &DMat, grid: &Grid, tolerance: f64) -> Result<Self> {
        check_metric(metric, grid, tolerance)?;

        let dg_dx = gradient(metric, grid.spacing(Axis::X), Axis::X);
        let dg_dy = gradient(metric, grid.spacing(Axis::Y), Axis::Y);
        let (rows, cols) = metric.shape();

        Ok(Self {
            gamma_x_xx: DMat::from_fn(rows, cols, |r, c| 0.5 * dg_dx[(r, c)] / metric[(r, c)]),
            gamma_y_yy: DMat::from_fn(rows, cols, |r, c| 0.5 * dg_dy[(r, c)] / metric[(r, c)]),
        })
    }

    /// `Γˣ_xx` on every cell.
    pub fn gamma_x_xx(&self) -> &DMat {
        &self.gamma_x_xx
    }

    /// `Γʸ_yy` on every cell.
    pub fn gamma_y_yy(&self) -> &DMat {
        &self.gamma_y_yy
    }

    /// `(Γˣ_xx, Γʸ_yy)` at cell `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> (f64, f64) {
        (self.gamma_x_xx[(row, col)], self.gamma_y_yy[(row, col)])
    }

    /// Largest `|Γ|` over both components.
    pub fn max_abs(&self) -> f64 {
        self.gamma_x_xx
            .iter()
            .chain(self.gamma_y_yy.iter())
            .fold(0.0, |m, v| m.max(v.abs()))
    }
}

/// Reject metrics with the wrong shape or a cell where `g` is non-finite or
/// `|g| < tolerance`.
///
/// Cells are scanned in row-major order; the first offender is reported.
fn check_metric(metric: &DMat, grid: &Grid, tolerance: f64) -> Result<()> {
    if metric.shape() != grid.shape() {
        return Err(FieldError::ShapeMismatch {
            expected: grid.shape(),
            found: metric.shape(),
        });
    }
    for row in 0..metric.nrows() {
        for col in 0..metric.ncols() {
            let value = metric[(row, col)];
            if !value.is_finite() || value.abs() < tolerance {
                let p = grid.point(row, col);
                return Err(FieldError::SingularMetric {
                    row,
                    col,
                    x: p.x,
                    y: p.y,
                    value,
                    tolerance,
                });
            }
        }
    }
    Ok(())
}
