//! Finite-difference derivatives of grid fields.
//!
//! Boundary policy: second-order centered differences in the interior,
//! first-order one-sided differences on the edge cells
//!
//!   interior:  (f[i+1] - f[i-1]) / 2h
//!   first:     (f[1] - f[0]) / h
//!   last:      (f[n-1] - f[n-2]) / h
//!
//! Axis `X` differentiates along columns, axis `Y` along rows.

use crate::DMat;
use crate::grid::Axis;

/// First derivative of `field` along `axis` with sample spacing `h`.
///
/// An axis with fewer than two samples has no defined derivative and
/// yields zeros.
pub fn gradient(field: &DMat, h: f64, axis: Axis) -> DMat {
    let (rows, cols) = field.shape();
    let n = match axis {
        Axis::X => cols,
        Axis::Y => rows,
    };
    if n < 2 {
        return DMat::zeros(rows, cols);
    }

    let at = |line: usize, i: usize| match axis {
        Axis::X => field[(line, i)],
        Axis::Y => field[(i, line)],
    };

    DMat::from_fn(rows, cols, |r, c| {
        let (line, i) = match axis {
            Axis::X => (r, c),
            Axis::Y => (c, r),
        };
        if i == 0 {
            (at(line, 1) - at(line, 0)) / h
        } else if i == n - 1 {
            (at(line, n - 1) - at(line, n - 2)) / h
        } else {
            (at(line, i + 1) - at(line, i - 1)) / (2.0 * h)
        }
    })
}

/// Second derivative along `axis`: the gradient applied twice.
pub fn second_derivative(field: &DMat, h: f64, axis: Axis) -> DMat {
    gradient(&gradient(field, h, axis), h, axis)
}
