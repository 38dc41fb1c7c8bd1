//! Markdown rendering of composed holonomies.

use kahler_field::{C64, CMat2};
use kahler_transport::{ComposedHolonomy, HolonomyStatistics, TangentSpace};
use std::fmt::Write;

/// Default report title.
pub const REPORT_TITLE: &str = "Fractal Holonomy Simulation Results";

fn complex(z: C64) -> String {
    format!("{:+.4}{:+.4}j", z.re, z.im)
}

fn push_section(out: &mut String, heading: &str, phase: C64, angle_degrees: f64, matrix: &CMat2) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "## {heading}\n");
    let _ = writeln!(out, "Phase factor: {}\n", complex(phase));
    let _ = writeln!(out, "Rotation angle: {angle_degrees:.4}°\n");
    out.push_str("Holonomy matrix:\n\n");
    for r in 0..2 {
        let _ = writeln!(
            out,
            "    {}  {}",
            complex(matrix[(r, 0)]),
            complex(matrix[(r, 1)])
        );
    }
    out.push('\n');
}

/// Render one section per loop and a total section.
///
/// Each section lists the phase factor, the angle in degrees and the
/// matrix with entries formatted as `±re±imj`.
pub fn render_markdown<T: TangentSpace>(title: &str, composed: &ComposedHolonomy<T>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {title}\n");
    for (i, h) in composed.loops.iter().enumerate() {
        push_section(
            &mut out,
            &format!("Loop {}", i + 1),
            h.phase,
            h.angle_degrees(),
            &T::to_complex(&h.matrix),
        );
    }
    push_section(
        &mut out,
        "Total Holonomy",
        composed.total_phase,
        composed.wrapped_angle().to_degrees(),
        &T::to_complex(&composed.total_matrix),
    );
    out
}

/// Summary section for a Monte-Carlo ensemble of random circles.
pub fn render_ensemble(stats: &HolonomyStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Random Circle Ensemble\n");
    let _ = writeln!(out, "Samples: {}\n", stats.angles.len());
    let _ = writeln!(out, "Mean angle: {:.4}°\n", stats.mean.to_degrees());
    let _ = writeln!(out, "Standard deviation: {:.4}°\n", stats.std_dev.to_degrees());
    out
}
