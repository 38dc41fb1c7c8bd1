//! Holonomy of a single circle on the reference manifold.
//!
//! Demonstrates:
//! - Building a 150×150 manifold (4 bands, scale 0.2)
//! - Transporting (1, 0) around a circle of radius 0.5 at (0.5, -0.3)
//! - Checking the rotation matrix and the reversal error
//! - Monte-Carlo statistics over random circles
//!
//! Run with `RUST_LOG=debug` to see per-call diagnostics.

use kahler::{
    CircleSampler, Curve, HolonomyEngine, RealTangent, SimulationConfig, TangentSpace,
    TransportConfig, Vec2,
};
use tracing_subscriber::EnvFilter;

fn main() -> kahler::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Circle Holonomy on a Fractal Kähler Manifold ===\n");

    let config = SimulationConfig::reference_circle();
    let engine = HolonomyEngine::from_config(&config)?;
    let circle = config.loops[0];

    let h = engine.holonomy(&circle, Vec2::new(1.0, 0.0))?;
    println!("Holonomy angle: {:.6} rad ({:.4}°)", h.angle, h.angle_degrees());
    println!("Rotation matrix:");
    for r in 0..2 {
        println!("  [{:+.6}  {:+.6}]", h.matrix[(r, 0)], h.matrix[(r, 1)]);
    }
    println!(
        "Orthogonality defect |RᵀR - I|: {:.2e}",
        RealTangent::unitarity_defect(&h.matrix)
    );
    if let Some(vf) = h.final_vector() {
        println!("Final vector: ({:.6}, {:.6}), |v| = {:.6}", vf.x, vf.y, vf.norm());
    }

    println!("\nLoop followed by its reversal, v0 = (1, 1):");
    let back = circle.reversed();
    for steps in [100, 200, 400, 800] {
        let engine = HolonomyEngine::new(config.manifold.params(), TransportConfig { steps })?;
        let c = engine.compose(&[&circle, &back], Vec2::new(1.0, 1.0))?;
        println!("  steps = {steps:4}: total angle = {:+.3e}", c.total_angle);
    }

    println!("\nRandom circles:");
    let stats = engine.sample_circles(&CircleSampler::default(), Vec2::new(1.0, 1.0))?;
    println!(
        "  {} samples: mean = {:+.6} rad, std = {:.6} rad",
        stats.angles.len(),
        stats.mean,
        stats.std_dev
    );

    Ok(())
}
