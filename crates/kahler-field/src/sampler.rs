//! Lookup of connection coefficients at continuous coordinates.
//!
//! The reference lookup is nearest-neighbour: each axis independently picks
//! the closest grid sample, and coordinates outside the grid box clamp to
//! the edge. Bilinear interpolation is available as an opt-in refinement.
//! Clamping is reported on the returned sample, never as an error.

use crate::connection::Connection;
use crate::grid::{Axis, Grid};
use crate::{C64, Vec2};
use serde::{Deserialize, Serialize};

/// Interpolation used when sampling the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sampling {
    /// Value at the nearest grid cell.
    #[default]
    Nearest,
    /// Bilinear blend of the four surrounding cells.
    Bilinear,
}

/// Connection coefficients at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChristoffelSample {
    pub gamma_x_xx: f64,
    pub gamma_y_yy: f64,
    /// The query point was outside the grid box and was clamped to it.
    pub clamped: bool,
}

impl ChristoffelSample {
    /// Holomorphic component `Γᶻ_zz = Γˣ_xx - i Γʸ_yy`.
    #[inline]
    pub fn holomorphic(&self) -> C64 {
        C64::new(self.gamma_x_xx, -self.gamma_y_yy)
    }
}

/// Anything that can report connection coefficients at a point.
pub trait ConnectionField {
    fn christoffel_at(&self, point: Vec2) -> ChristoffelSample;
}

/// Borrowing sampler over a grid and its connection.
#[derive(Debug, Clone, Copy)]
pub struct GridSampler<'a> {
    grid: &'a Grid,
    connection: &'a Connection,
    sampling: Sampling,
}

impl<'a> GridSampler<'a> {
    pub fn new(grid: &'a Grid, connection: &'a Connection, sampling: Sampling) -> Self {
        Self {
            grid,
            connection,
            sampling,
        }
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Nearest-neighbour lookup.
    pub fn nearest(&self, point: Vec2) -> ChristoffelSample {
        let (ix, cx) = self.grid.nearest_index(Axis::X, point.x);
        let (iy, cy) = self.grid.nearest_index(Axis::Y, point.y);
        let (gamma_x_xx, gamma_y_yy) = self.connection.at(iy, ix);
        ChristoffelSample {
            gamma_x_xx,
            gamma_y_yy,
            clamped: cx || cy,
        }
    }

    /// Bilinear lookup over the enclosing cell.
    pub fn bilinear(&self, point: Vec2) -> ChristoffelSample {
        let (ix, fx, cx) = self.grid.cell_index(Axis::X, point.x);
        let (iy, fy, cy) = self.grid.cell_index(Axis::Y, point.y);

        let blend = |field: &crate::DMat| {
            let v00 = field[(iy, ix)];
            let v01 = field[(iy, ix + 1)];
            let v10 = field[(iy + 1, ix)];
            let v11 = field[(iy + 1, ix + 1)];
            (1.0 - fy) * ((1.0 - fx) * v00 + fx * v01) + fy * ((1.0 - fx) * v10 + fx * v11)
        };

        ChristoffelSample {
            gamma_x_xx: blend(self.connection.gamma_x_xx()),
            gamma_y_yy: blend(self.connection.gamma_y_yy()),
            clamped: cx || cy,
        }
    }
}

impl ConnectionField for GridSampler<'_> {
    fn christoffel_at(&self, point: Vec2) -> ChristoffelSample {
        match self.sampling {
            Sampling::Nearest => self.nearest(point),
            Sampling::Bilinear => self.bilinear(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DMat;
    use approx::assert_relative_eq;

    /// g = exp(x + 2y) gives Γˣ_xx ≈ ½ and Γʸ_yy ≈ 1 everywhere inside.
    fn exponential_connection(size: usize) -> (Grid, Connection) {
        let grid = Grid::new(size).unwrap();
        let (xx, yy) = grid.mesh();
        let g = DMat::from_fn(size, size, |r, c| (xx[(r, c)] + 2.0 * yy[(r, c)]).exp());
        let conn = Connection::from_metric(&g, &grid, 1e-9).unwrap();
        (grid, conn)
    }

    #[test]
    fn test_nearest_picks_cell_value() {
        let (grid, conn) = exponential_connection(21);
        let sampler = GridSampler::new(&grid, &conn, Sampling::Nearest);
        // Grid spacing 0.2; (0.31, -0.49) is nearest to (0.4, -0.4) → col 12, row 8.
        let s = sampler.christoffel_at(Vec2::new(0.31, -0.49));
        let (gx, gy) = conn.at(8, 12);
        assert_eq!((s.gamma_x_xx, s.gamma_y_yy), (gx, gy));
        assert!(!s.clamped);
    }

    #[test]
    fn test_nearest_clamps_outside() {
        let (grid, conn) = exponential_connection(11);
        let sampler = GridSampler::new(&grid, &conn, Sampling::Nearest);
        let s = sampler.christoffel_at(Vec2::new(5.0, -9.0));
        let (gx, gy) = conn.at(0, 10);
        assert_eq!((s.gamma_x_xx, s.gamma_y_yy), (gx, gy));
        assert!(s.clamped);
    }

    #[test]
    fn test_bilinear_matches_on_nodes() {
        let (grid, conn) = exponential_connection(21);
        let sampler = GridSampler::new(&grid, &conn, Sampling::Bilinear);
        let p = grid.point(7, 13);
        let s = sampler.christoffel_at(p);
        let (gx, gy) = conn.at(7, 13);
        assert_relative_eq!(s.gamma_x_xx, gx, epsilon = 1e-12);
        assert_relative_eq!(s.gamma_y_yy, gy, epsilon = 1e-12);
    }

    #[test]
    fn test_bilinear_is_between_neighbours() {
        let (grid, conn) = exponential_connection(81);
        let sampler = GridSampler::new(&grid, &conn, Sampling::Bilinear);
        let s = sampler.christoffel_at(Vec2::new(0.123, 0.456));
        assert_relative_eq!(s.gamma_x_xx, 0.5, epsilon = 1e-2);
        assert_relative_eq!(s.gamma_y_yy, 1.0, epsilon = 1e-2);
        assert!(!s.clamped);
    }

    #[test]
    fn test_holomorphic_component() {
        let s = ChristoffelSample {
            gamma_x_xx: 0.3,
            gamma_y_yy: -0.8,
            clamped: false,
        };
        assert_eq!(s.holomorphic(), C64::new(0.3, 0.8));
    }
}
