//! Parametric curves `t ∈ [0, 1] → (x, y)`.
//!
//! Closures `Fn(f64) -> Vec2` are curves; the standard closed loops used by
//! the drivers are provided as small `Copy` types.

use kahler_field::Vec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A path through the manifold, parameterized over `[0, 1]`.
pub trait Curve {
    fn point(&self, t: f64) -> Vec2;

    /// The same path traversed backwards, `t ↦ 1 - t`.
    fn reversed(self) -> Reversed<Self>
    where
        Self: Sized,
    {
        Reversed(self)
    }
}

impl<F: Fn(f64) -> Vec2> Curve for F {
    fn point(&self, t: f64) -> Vec2 {
        self(t)
    }
}

/// Counter-clockwise circle, starting at angle 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Curve for Circle {
    fn point(&self, t: f64) -> Vec2 {
        let theta = 2.0 * PI * t;
        Vec2::new(
            self.center.x + self.radius * theta.cos(),
            self.center.y + self.radius * theta.sin(),
        )
    }
}

/// Axis-aligned ellipse with semi-axes `radii`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Vec2,
    pub radii: Vec2,
}

impl Ellipse {
    pub fn new(center: Vec2, radii: Vec2) -> Self {
        Self { center, radii }
    }
}

impl Curve for Ellipse {
    fn point(&self, t: f64) -> Vec2 {
        let theta = 2.0 * PI * t;
        Vec2::new(
            self.center.x + self.radii.x * theta.cos(),
            self.center.y + self.radii.y * theta.sin(),
        )
    }
}

/// Figure-eight `scale · (cos θ, sin 2θ) / (1 + sin² θ)` around `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lemniscate {
    pub center: Vec2,
    pub scale: f64,
}

impl Lemniscate {
    pub fn new(center: Vec2, scale: f64) -> Self {
        Self { center, scale }
    }
}

impl Curve for Lemniscate {
    fn point(&self, t: f64) -> Vec2 {
        let theta = 2.0 * PI * t;
        let denom = 1.0 + theta.sin().powi(2);
        Vec2::new(
            self.center.x + self.scale * theta.cos() / denom,
            self.center.y + self.scale * (2.0 * theta).sin() / denom,
        )
    }
}

/// A curve traversed from `t = 1` back to `t = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reversed<C>(pub C);

impl<C: Curve> Curve for Reversed<C> {
    fn point(&self, t: f64) -> Vec2 {
        self.0.point(1.0 - t)
    }
}
