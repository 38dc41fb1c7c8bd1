//! Depth-3 complex holonomy: three loops traversed in sequence.
//!
//! Each loop starts from the final vector of the previous one. The
//! per-loop phases, angles and unitary matrices are printed together with
//! the composed total. A Markdown report goes to `depth3_results.md`, or to
//! the path given as a positional argument.
//!
//! An optional JSON configuration can be passed with `--config <file>`; an
//! `ensemble` entry in it adds random-circle statistics to the output.

use kahler::{ComposedOutcome, HolonomyEngine, KahlerError, REPORT_TITLE, SimulationConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> kahler::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = SimulationConfig::depth3();
    let mut output = PathBuf::from("depth3_results.md");
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args.next().ok_or_else(|| {
                KahlerError::InvalidConfig("--config needs a file path".into())
            })?;
            config = SimulationConfig::from_file(path)?;
        } else {
            output = PathBuf::from(arg);
        }
    }

    let engine = HolonomyEngine::from_config(&config)?;
    let outcome = engine.run(&config)?;

    println!("=== Depth-3 Fractal Holonomy Simulation ===");
    match &outcome.composed {
        ComposedOutcome::Complex(c) => {
            for (i, h) in c.loops.iter().enumerate() {
                println!(
                    "loop{}: phase = {:.4}{:+.4}j, angle = {:.2}°",
                    i + 1,
                    h.phase.re,
                    h.phase.im,
                    h.angle_degrees()
                );
            }
            println!(
                "Total: phase = {:.4}{:+.4}j, angle = {:.2}°",
                c.total_phase.re,
                c.total_phase.im,
                c.wrapped_angle().to_degrees()
            );
        }
        ComposedOutcome::Real(c) => {
            for (i, h) in c.loops.iter().enumerate() {
                println!("loop{}: angle = {:.2}°", i + 1, h.angle_degrees());
            }
            println!("Total: angle = {:.2}°", c.wrapped_angle().to_degrees());
        }
    }
    if let Some(stats) = &outcome.ensemble {
        println!(
            "Ensemble: {} circles, mean = {:.2}°, std = {:.2}°",
            stats.angles.len(),
            stats.mean.to_degrees(),
            stats.std_dev.to_degrees()
        );
    }

    HolonomyEngine::write_report(&outcome, REPORT_TITLE, &output)?;
    println!("\nReport written to {}", output.display());
    Ok(())
}
