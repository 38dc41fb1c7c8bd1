//! Uniform coordinate grid over a square.

use crate::error::{FieldError, Result};
use crate::{DMat, Vec2};

/// Default bounding square `[lo, hi]` used on both axes.
pub const DEFAULT_BOUNDS: (f64, f64) = (-2.0, 2.0);

/// Coordinate axis.
///
/// Fields are stored with rows following `Y` and columns following `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// `n` evenly spaced samples over `[lo, hi]`, last sample pinned to `hi`.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => return Vec::new(),
        1 => return vec![lo],
        _ => {}
    }
    let step = (hi - lo) / (n - 1) as f64;
    let mut samples: Vec<f64> = (0..n).map(|i| lo + i as f64 * step).collect();
    samples[n - 1] = hi;
    samples
}

/// Square lattice of `size × size` coordinate samples.
///
/// Both axes are strictly increasing and immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    x: Vec<f64>,
    y: Vec<f64>,
    lo: f64,
    hi: f64,
}

impl Grid {
    /// Grid over [`DEFAULT_BOUNDS`].
    pub fn new(size: usize) -> Result<Self> {
        Self::with_bounds(size, DEFAULT_BOUNDS.0, DEFAULT_BOUNDS.1)
    }

    /// Grid over `[lo, hi]²`.
    pub fn with_bounds(size: usize, lo: f64, hi: f64) -> Result<Self> {
        if size < 2 {
            return Err(FieldError::InvalidSize(size));
        }
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(FieldError::InvalidBounds { lo, hi });
        }
        let axis = linspace(lo, hi, size);
        Ok(Self {
            x: axis.clone(),
            y: axis,
            lo,
            hi,
        })
    }

    /// Number of samples per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.x.len()
    }

    /// `(size, size)`, the shape of every field on this grid.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    /// Sample spacing along `axis`, measured between the first two samples.
    #[inline]
    pub fn spacing(&self, axis: Axis) -> f64 {
        let a = self.axis(axis);
        a[1] - a[0]
    }

    /// Bounding interval shared by both axes.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    /// Coordinates of grid cell `(row, col)`.
    #[inline]
    pub fn point(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(self.x[col], self.y[row])
    }

    /// Coordinate mesh `(xx, yy)`, each `size × size`.
    pub fn mesh(&self) -> (DMat, DMat) {
        let (rows, cols) = self.shape();
        let xx = DMat::from_fn(rows, cols, |_, c| self.x[c]);
        let yy = DMat::from_fn(rows, cols, |r, _| self.y[r]);
        (xx, yy)
    }

    /// Index of the sample nearest to `value` along `axis`.
    ///
    /// Equivalent to `argmin_i |axis[i] - value|` with ties going to the
    /// lower index, but computed in O(1) from the uniform spacing. Values
    /// outside the axis range clamp to the edge index; the second element
    /// of the result reports whether that happened.
    pub fn nearest_index(&self, axis: Axis, value: f64) -> (usize, bool) {
        let a = self.axis(axis);
        let last = a.len() - 1;

        if value.is_nan() {
            return (0, true);
        }
        if value <= a[0] {
            return (0, value < a[0]);
        }
        if value >= a[last] {
            return (last, value > a[last]);
        }

        let step = (self.hi - self.lo) / last as f64;
        let guess = (((value - a[0]) / step).round() as usize).min(last);

        // Rounding of the guess can be off by one near cell midpoints.
        let start = guess.saturating_sub(1);
        let end = (guess + 1).min(last);
        let mut best = start;
        let mut best_dist = (a[start] - value).abs();
        for (i, &sample) in a.iter().enumerate().take(end + 1).skip(start + 1) {
            let dist = (sample - value).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        (best, false)
    }

    /// Fractional index of `value` along `axis`, clamped to the axis range.
    ///
    /// Returns `(i0, frac, clamped)` with `value ≈ axis[i0] + frac·spacing`,
    /// `i0 ≤ size - 2` and `frac ∈ [0, 1]`.
    pub fn cell_index(&self, axis: Axis, value: f64) -> (usize, f64, bool) {
        let a = self.axis(axis);
        let last = a.len() - 1;
        let clamped = !(a[0]..=a[last]).contains(&value);
        let v = if value.is_nan() {
            a[0]
        } else {
            value.clamp(a[0], a[last])
        };
        let step = (self.hi - self.lo) / last as f64;
        let s = (v - a[0]) / step;
        let i0 = (s.floor() as usize).min(last - 1);
        let frac = (s - i0 as f64).clamp(0.0, 1.0);
        (i0, frac, clamped)
    }
}
