//! Forward-Euler integration of the parallel-transport equation.
//!
//! The curve is sampled at `steps` evenly spaced parameters in `[0, 1]`.
//! Velocities come from finite differences of the sampled points (forward
//! at the first sample, centered inside, both scaled by the forward gap). The vector is stepped from every
//! sample but the last, so the trajectory has exactly `steps` entries.

use crate::curve::Curve;
use crate::error::{Result, TransportError};
use crate::tangent::TangentSpace;
use kahler_field::{ConnectionField, Vec2, linspace};

/// Trajectory of a transported vector.
#[derive(Debug, Clone)]
pub struct Transport<T: TangentSpace> {
    /// Transported vector at each sample; `vectors[0]` is the initial vector.
    pub vectors: Vec<T::Vector>,
    /// Curve points at each sample.
    pub points: Vec<Vec2>,
    /// Samples whose connection lookup fell outside the grid box.
    pub clamped_samples: usize,
}

impl<T: TangentSpace> Transport<T> {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn initial(&self) -> Option<&T::Vector> {
        self.vectors.first()
    }

    pub fn final_vector(&self) -> Option<&T::Vector> {
        self.vectors.last()
    }
}

/// Parameter values `t_i`, evenly spaced over `[0, 1]`.
pub fn parameter_samples(steps: usize) -> Vec<f64> {
    linspace(0.0, 1.0, steps)
}

/// Finite-difference velocity `dγ/dt` at sample `i < points.len() - 1`,
/// where `dt` is the gap to the next sample.
fn velocity_at(points: &[Vec2], i: usize, dt: f64) -> Vec2 {
    if i == 0 {
        (points[1] - points[0]) / dt
    } else {
        (points[i + 1] - points[i - 1]) / (2.0 * dt)
    }
}

/// Transport `initial` along `curve` through the connection of `field`.
///
/// The tangent representation is picked with a turbofish:
///
/// ```
/// use kahler_field::{FractalManifold, ManifoldParams, Vec2};
/// use kahler_transport::{Circle, RealTangent, parallel_transport};
///
/// let manifold = FractalManifold::new(ManifoldParams {
///     size: 60,
///     fractal_level: 1,
///     scale: 1.0,
///     ..Default::default()
/// })
/// .unwrap();
/// let circle = Circle::new(Vec2::zeros(), 0.3);
/// let transport =
///     parallel_transport::<RealTangent>(&manifold, &circle, Vec2::new(1.0, 1.0), 50).unwrap();
/// assert_eq!(transport.vectors.len(), 50);
/// ```
pub fn parallel_transport<T: TangentSpace>(
    field: &(impl ConnectionField + ?Sized),
    curve: &(impl Curve + ?Sized),
    initial: T::Vector,
    steps: usize,
) -> Result<Transport<T>> {
    if steps < 2 {
        return Err(TransportError::TooFewSteps(steps));
    }
    if !T::is_finite(&initial) {
        return Err(TransportError::NonFiniteInitial);
    }

    let ts = parameter_samples(steps);
    let points: Vec<Vec2> = ts.iter().map(|&t| curve.point(t)).collect();
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(TransportError::NonFiniteCurve { index, t: ts[index] });
    }

    let mut vectors = Vec::with_capacity(steps);
    vectors.push(initial);
    let mut clamped_samples = 0;
    let mut v = initial;

    for i in 0..steps - 1 {
        let gamma = field.christoffel_at(points[i]);
        if gamma.clamped {
            clamped_samples += 1;
        }
        let dt = ts[i + 1] - ts[i];
        let velocity = velocity_at(&points, i, dt);

        v = T::step(&v, &gamma, &velocity, dt);
        if !T::is_finite(&v) {
            return Err(TransportError::Diverged { step: i + 1 });
        }
        vectors.push(v);
    }

    if clamped_samples > 0 {
        tracing::warn!(
            tangent = T::NAME,
            clamped_samples,
            steps,
            "curve left the grid box; connection lookups were clamped to the edge"
        );
    }
    tracing::debug!(tangent = T::NAME, steps, "transport complete");

    Ok(Transport {
        vectors,
        points,
        clamped_samples,
    })
}
