//! Chaining holonomies of consecutive loops.
//!
//! Each loop starts from the final, unnormalized vector of the previous
//! loop. Angles add, phases multiply and matrices compose right to left,
//! `M_total = M_k · … · M_2 · M_1`.

use crate::curve::Curve;
use crate::error::{Result, TransportError};
use crate::holonomy::{Holonomy, compute_holonomy};
use crate::tangent::TangentSpace;
use kahler_field::{C64, ConnectionField};
use std::f64::consts::PI;

/// Holonomy of several loops traversed one after another.
#[derive(Debug, Clone)]
pub struct ComposedHolonomy<T: TangentSpace> {
    /// Per-loop results, in traversal order.
    pub loops: Vec<Holonomy<T>>,
    /// Sum of the signed per-loop angles; not wrapped.
    pub total_angle: f64,
    /// Product of the per-loop phase factors.
    pub total_phase: C64,
    /// `M_k · … · M_1`.
    pub total_matrix: T::Matrix,
}

impl<T: TangentSpace> ComposedHolonomy<T> {
    /// Total angle folded into `(-π, π]`.
    pub fn wrapped_angle(&self) -> f64 {
        let angle = self.total_phase.arg();
        if angle <= -PI { PI } else { angle }
    }

    /// Vector at the end of the last loop.
    pub fn final_vector(&self) -> Option<&T::Vector> {
        self.loops.last().and_then(Holonomy::final_vector)
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }
}

/// Combine already-computed loop holonomies, given in traversal order.
pub fn compose<T: TangentSpace>(loops: Vec<Holonomy<T>>) -> Result<ComposedHolonomy<T>> {
    if loops.is_empty() {
        return Err(TransportError::NoLoops);
    }

    let mut total_angle = 0.0;
    let mut total_phase = C64::new(1.0, 0.0);
    let mut total_matrix = T::identity();
    for h in &loops {
        total_angle += h.angle;
        total_phase *= h.phase;
        total_matrix = T::compose(&h.matrix, &total_matrix);
    }

    Ok(ComposedHolonomy {
        loops,
        total_angle,
        total_phase,
        total_matrix,
    })
}

/// Transport `initial` around each loop in turn and compose the results.
pub fn compose_holonomies<T: TangentSpace>(
    field: &(impl ConnectionField + ?Sized),
    loops: &[&dyn Curve],
    initial: T::Vector,
    steps: usize,
) -> Result<ComposedHolonomy<T>> {
    if loops.is_empty() {
        return Err(TransportError::NoLoops);
    }

    let mut results = Vec::with_capacity(loops.len());
    let mut v = initial;
    for (i, curve) in loops.iter().enumerate() {
        let h = compute_holonomy::<T>(field, *curve, v, steps)?;
        tracing::debug!(tangent = T::NAME, loop_index = i, angle = h.angle, "loop done");
        if let Some(last) = h.final_vector() {
            v = *last;
        }
        results.push(h);
    }

    let composed = compose(results)?;
    tracing::debug!(
        tangent = T::NAME,
        loops = composed.len(),
        total_angle = composed.total_angle,
        "composed holonomy"
    );
    Ok(composed)
}
