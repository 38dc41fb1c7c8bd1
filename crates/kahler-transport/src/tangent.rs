//! Tangent-space representations for transport.
//!
//! The integrator, extractor and composer are written once, generic over
//! [`TangentSpace`]. Two instantiations exist:
//!
//! - [`RealTangent`]: `(vx, vy) ∈ ℝ²`, holonomy is a rotation angle and an
//!   orthogonal 2×2 matrix.
//! - [`ComplexTangent`]: `(v_z, v_z̄) ∈ ℂ²`, holonomy is a U(1) phase and
//!   the unitary `diag(e^{iθ}, e^{-iθ})`.

use crate::error::{Result, TransportError};
use kahler_field::{C64, CMat2, CVec2, ChristoffelSample, Mat2, Vec2};
use std::f64::consts::PI;
use std::fmt::Debug;

/// Operations the transport pipeline needs from a tangent representation.
pub trait TangentSpace: Debug + Clone + Copy + Send + Sync + 'static {
    type Vector: Debug + Clone + Copy + PartialEq + Send + Sync;
    type Matrix: Debug + Clone + PartialEq + Send + Sync;

    /// Short label for diagnostics.
    const NAME: &'static str;

    /// One explicit Euler step of the transport equation.
    fn step(v: &Self::Vector, gamma: &ChristoffelSample, velocity: &Vec2, dt: f64)
    -> Self::Vector;

    fn is_finite(v: &Self::Vector) -> bool;

    /// Signed holonomy angle in `(-π, π]` taking `initial` to `transported`.
    fn angle(initial: &Self::Vector, transported: &Self::Vector) -> Result<f64>;

    /// Holonomy matrix for a signed angle.
    fn holonomy_matrix(angle: f64) -> Self::Matrix;

    fn identity() -> Self::Matrix;

    /// `later · earlier`: apply `earlier` first.
    fn compose(later: &Self::Matrix, earlier: &Self::Matrix) -> Self::Matrix;

    /// Largest entry of `|M†M - I|`; zero for an exactly unitary matrix.
    fn unitarity_defect(m: &Self::Matrix) -> f64;

    /// Entries as complex numbers, for uniform reporting.
    fn to_complex(m: &Self::Matrix) -> CMat2;
}

/// Real tangent vectors `(vx, vy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealTangent;

/// Complex tangent vectors `(v_z, v_z̄)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexTangent;

/// Map an angle from `[-π, π]` into `(-π, π]`.
#[inline]
fn half_open(angle: f64) -> f64 {
    if angle <= -PI { PI } else { angle }
}

/// Rescale so the largest component is 1, keeping huge vectors away from
/// overflow in the norm.
fn unit(v: &Vec2) -> Option<Vec2> {
    let m = v.amax();
    if m == 0.0 || !m.is_finite() {
        return None;
    }
    let s = v / m;
    Some(s / s.norm())
}

/// Counter-clockwise rotation by `angle`.
pub fn rotation_matrix(angle: f64) -> Mat2 {
    let (s, c) = angle.sin_cos();
    Mat2::new(c, -s, s, c)
}

/// Angle of a rotation matrix, in `(-π, π]`.
pub fn rotation_angle(m: &Mat2) -> f64 {
    m[(1, 0)].atan2(m[(0, 0)])
}

/// `diag(p, p̄)` for a unit phase `p`.
pub fn phase_matrix(phase: C64) -> CMat2 {
    CMat2::new(phase, C64::new(0.0, 0.0), C64::new(0.0, 0.0), phase.conj())
}

impl TangentSpace for RealTangent {
    type Vector = Vec2;
    type Matrix = Mat2;

    const NAME: &'static str = "real";

    fn step(v: &Vec2, gamma: &ChristoffelSample, velocity: &Vec2, dt: f64) -> Vec2 {
        let dvx = -gamma.gamma_x_xx * v.x * velocity.x;
        let dvy = -gamma.gamma_y_yy * v.y * velocity.y;
        Vec2::new(v.x + dvx * dt, v.y + dvy * dt)
    }

    fn is_finite(v: &Vec2) -> bool {
        v.x.is_finite() && v.y.is_finite()
    }

    fn angle(initial: &Vec2, transported: &Vec2) -> Result<f64> {
        let (u0, u1) = match (unit(initial), unit(transported)) {
            (Some(u0), Some(u1)) => (u0, u1),
            _ => return Err(TransportError::DegenerateVector),
        };
        // Rounding can push the cosine just outside [-1, 1].
        let cos = u0.dot(&u1).clamp(-1.0, 1.0);
        let mut angle = cos.acos();
        let cross = u0.x * u1.y - u0.y * u1.x;
        if cross < 0.0 {
            angle = -angle;
        }
        Ok(half_open(angle))
    }

    fn holonomy_matrix(angle: f64) -> Mat2 {
        rotation_matrix(angle)
    }

    fn identity() -> Mat2 {
        Mat2::identity()
    }

    fn compose(later: &Mat2, earlier: &Mat2) -> Mat2 {
        later * earlier
    }

    fn unitarity_defect(m: &Mat2) -> f64 {
        (m.transpose() * m - Mat2::identity()).amax()
    }

    fn to_complex(m: &Mat2) -> CMat2 {
        m.map(|v| C64::new(v, 0.0))
    }
}

impl TangentSpace for ComplexTangent {
    type Vector = CVec2;
    type Matrix = CMat2;

    const NAME: &'static str = "complex";

    fn step(v: &CVec2, gamma: &ChristoffelSample, velocity: &Vec2, dt: f64) -> CVec2 {
        let gz = gamma.holomorphic();
        let zdot = C64::new(velocity.x, velocity.y);
        let dvz = -gz * v[0] * zdot;
        let dvzbar = -gz.conj() * v[1] * zdot.conj();
        CVec2::new(v[0] + dvz * dt, v[1] + dvzbar * dt)
    }

    fn is_finite(v: &CVec2) -> bool {
        v[0].is_finite() && v[1].is_finite()
    }

    fn angle(initial: &CVec2, transported: &CVec2) -> Result<f64> {
        // Phase picked up by the holomorphic component.
        let overlap = transported[0] * initial[0].conj();
        if overlap.norm() == 0.0 || !overlap.is_finite() {
            return Err(TransportError::DegenerateVector);
        }
        Ok(half_open(overlap.arg()))
    }

    fn holonomy_matrix(angle: f64) -> CMat2 {
        phase_matrix(C64::from_polar(1.0, angle))
    }

    fn identity() -> CMat2 {
        CMat2::identity()
    }

    fn compose(later: &CMat2, earlier: &CMat2) -> CMat2 {
        later * earlier
    }

    fn unitarity_defect(m: &CMat2) -> f64 {
        (m.adjoint() * m - CMat2::identity())
            .iter()
            .fold(0.0, |acc, z| acc.max(z.norm()))
    }

    fn to_complex(m: &CMat2) -> CMat2 {
        *m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat() -> ChristoffelSample {
        ChristoffelSample {
            gamma_x_xx: 0.0,
            gamma_y_yy: 0.0,
            clamped: false,
        }
    }

    #[test]
    fn test_real_angle_sign() {
        let a = RealTangent::angle(&Vec2::new(1.0, 0.0), &Vec2::new(0.0, 2.0)).unwrap();
        assert_relative_eq!(a, PI / 2.0, epsilon = 1e-12);
        let b = RealTangent::angle(&Vec2::new(1.0, 0.0), &Vec2::new(0.0, -3.0)).unwrap();
        assert_relative_eq!(b, -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_real_angle_parallel_vectors() {
        // Cosine rounds above 1 without clipping for these.
        let v = Vec2::new(0.1, 0.7);
        let a = RealTangent::angle(&v, &(v * 3.0)).unwrap();
        assert!(a.is_finite());
        assert!(a.abs() < 1e-7);
    }

    #[test]
    fn test_real_angle_half_turn_is_positive() {
        let a = RealTangent::angle(&Vec2::new(1.0, 0.0), &Vec2::new(-1.0, 0.0)).unwrap();
        assert_relative_eq!(a, PI);
        // Approaching from below would give -π; it folds onto +π.
        let b = RealTangent::angle(&Vec2::new(1.0, 0.0), &Vec2::new(-1.0, -1e-300)).unwrap();
        assert_relative_eq!(b, PI);
    }

    #[test]
    fn test_real_angle_zero_vector() {
        assert_eq!(
            RealTangent::angle(&Vec2::zeros(), &Vec2::new(1.0, 0.0)),
            Err(TransportError::DegenerateVector)
        );
    }

    #[test]
    fn test_real_angle_huge_vectors() {
        let a = RealTangent::angle(&Vec2::new(1e300, 0.0), &Vec2::new(1e300, 1e300)).unwrap();
        assert_relative_eq!(a, PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_roundtrip() {
        for angle in [-3.0, -1.2, 0.0, 0.4, 2.9, PI] {
            let m = rotation_matrix(angle);
            assert_relative_eq!(rotation_angle(&m), angle, epsilon = 1e-12);
            assert!(RealTangent::unitarity_defect(&m) < 1e-12);
        }
    }

    #[test]
    fn test_real_step_flat_connection() {
        let v = Vec2::new(0.3, -0.4);
        let next = RealTangent::step(&v, &flat(), &Vec2::new(2.0, 1.0), 0.1);
        assert_eq!(next, v);
    }

    #[test]
    fn test_real_step_components_decouple() {
        let gamma = ChristoffelSample {
            gamma_x_xx: 2.0,
            gamma_y_yy: -1.0,
            clamped: false,
        };
        let next = RealTangent::step(&Vec2::new(1.0, 1.0), &gamma, &Vec2::new(0.5, 3.0), 0.01);
        assert_relative_eq!(next.x, 1.0 - 2.0 * 0.5 * 0.01, epsilon = 1e-15);
        assert_relative_eq!(next.y, 1.0 + 3.0 * 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_complex_step_keeps_conjugate_pair() {
        let gamma = ChristoffelSample {
            gamma_x_xx: 0.4,
            gamma_y_yy: -0.9,
            clamped: false,
        };
        let z = C64::new(0.7, 0.2);
        let v = CVec2::new(z, z.conj());
        let next = ComplexTangent::step(&v, &gamma, &Vec2::new(-1.0, 2.0), 0.05);
        assert_relative_eq!(next[1].re, next[0].re, epsilon = 1e-15);
        assert_relative_eq!(next[1].im, -next[0].im, epsilon = 1e-15);
    }

    #[test]
    fn test_complex_angle_and_matrix() {
        let v0 = CVec2::new(C64::new(1.0, 0.0), C64::new(1.0, 0.0));
        let vf = CVec2::new(C64::from_polar(2.5, 0.8), C64::from_polar(2.5, -0.8));
        let angle = ComplexTangent::angle(&v0, &vf).unwrap();
        assert_relative_eq!(angle, 0.8, epsilon = 1e-12);

        let m = ComplexTangent::holonomy_matrix(angle);
        assert!(ComplexTangent::unitarity_defect(&m) < 1e-12);
        assert_relative_eq!(m[(0, 0)].arg(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(m[(1, 1)].arg(), -0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_complex_angle_degenerate() {
        let v0 = CVec2::new(C64::new(0.0, 0.0), C64::new(1.0, 0.0));
        assert_eq!(
            ComplexTangent::angle(&v0, &v0),
            Err(TransportError::DegenerateVector)
        );
    }

    #[test]
    fn test_compose_order() {
        let a = RealTangent::holonomy_matrix(0.3);
        let b = RealTangent::holonomy_matrix(-1.1);
        let ab = RealTangent::compose(&b, &a);
        assert_relative_eq!(rotation_angle(&ab), -0.8, epsilon = 1e-12);
    }
}
