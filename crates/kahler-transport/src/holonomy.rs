//! Holonomy extraction from a transported vector.

use crate::curve::Curve;
use crate::error::{Result, TransportError};
use crate::tangent::{RealTangent, TangentSpace};
use crate::transport::{Transport, parallel_transport};
use kahler_field::{C64, ConnectionField, Vec2};

/// Holonomy of one path.
#[derive(Debug, Clone)]
pub struct Holonomy<T: TangentSpace> {
    /// Signed angle in `(-π, π]`.
    pub angle: f64,
    /// Unit phase factor `e^{iθ}`.
    pub phase: C64,
    /// Rotation (real) or unitary (complex) holonomy matrix.
    pub matrix: T::Matrix,
    /// Transported vector at every sample.
    pub vectors: Vec<T::Vector>,
    /// Curve point at every sample.
    pub points: Vec<Vec2>,
}

impl<T: TangentSpace> Holonomy<T> {
    pub fn initial(&self) -> Option<&T::Vector> {
        self.vectors.first()
    }

    pub fn final_vector(&self) -> Option<&T::Vector> {
        self.vectors.last()
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

/// Signed angle taking `v0` to `vf`, in `(-π, π]`.
///
/// The cosine is clipped to `[-1, 1]` before `acos`; the sign follows the
/// 2D cross product `v0 × vf`.
pub fn holonomy_angle(v0: &Vec2, vf: &Vec2) -> Result<f64> {
    RealTangent::angle(v0, vf)
}

/// Extract the holonomy from a finished transport.
pub fn holonomy_from_transport<T: TangentSpace>(transport: Transport<T>) -> Result<Holonomy<T>> {
    let angle = match (transport.initial(), transport.final_vector()) {
        (Some(first), Some(last)) => T::angle(first, last)?,
        _ => return Err(TransportError::TooFewSteps(transport.len())),
    };
    Ok(Holonomy {
        angle,
        phase: C64::from_polar(1.0, angle),
        matrix: T::holonomy_matrix(angle),
        vectors: transport.vectors,
        points: transport.points,
    })
}

/// Transport `initial` around `curve` and report the holonomy.
pub fn compute_holonomy<T: TangentSpace>(
    field: &(impl ConnectionField + ?Sized),
    curve: &(impl Curve + ?Sized),
    initial: T::Vector,
    steps: usize,
) -> Result<Holonomy<T>> {
    let transport = parallel_transport::<T>(field, curve, initial, steps)?;
    let holonomy = holonomy_from_transport(transport)?;
    tracing::debug!(
        tangent = T::NAME,
        steps,
        angle = holonomy.angle,
        "holonomy computed"
    );
    Ok(holonomy)
}
