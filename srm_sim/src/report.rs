//! Plain-text rendering of simulation results.

use crate::alignment::Alignment;
use crate::model::MotorState;
use crate::run::RunResult;
use std::collections::HashSet;
use std::fmt::Write;

/// One line per coil: `L1 (-30° to P1)`, ties marked with `~`.
pub fn format_alignments(alignments: &[Alignment]) -> String {
    let mut out = String::new();
    for a in alignments {
        let _ = writeln!(
            out,
            "L{} ({:.0}° to P{}){}",
            a.coil_index,
            a.signed_angle,
            a.pole_index,
            if a.is_ambiguous { " ~" } else { "" }
        );
    }
    out
}

/// Rotor state after a step.
pub fn format_state(state: &MotorState) -> String {
    let mut out = format!(
        "rotor {:.3}°, last step {:.3}°, integrity {:.0}%",
        state.rotor_angle, state.last_step_angle, state.rotor_integrity
    );
    if state.last_step_angle > 0.0 {
        let _ = write!(
            out,
            " ({:.0} steps per revolution)",
            360.0 / state.last_step_angle
        );
    }
    if state.negative_overlap > 0.0 {
        let _ = write!(out, ", negative overlap {:.1}%", 100.0 * state.negative_overlap);
    }
    out
}

/// Multi-line summary of one run.
pub fn format_summary(r: &RunResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "coils:            {}", r.coil_count);
    let _ = writeln!(out, "poles:            {}", r.pole_count);
    let _ = writeln!(out, "components:       {}", r.component_count);
    let _ = writeln!(out, "steps:            {}", r.steps_taken);
    let _ = writeln!(out, "step angle:       {:.3}°", r.step_angle);
    let _ = writeln!(out, "overlap:          {:.1}%", r.overlap_percent);
    let _ = writeln!(out, "negative overlap: {:.1}%", r.negative_overlap_percent);
    let _ = writeln!(out, "rotor integrity:  {:.0}%", r.rotor_integrity_percent);
    match &r.error {
        None => {
            let _ = writeln!(out, "result:           ok");
        }
        Some(e) => {
            let _ = writeln!(out, "result:           {e}");
        }
    }
    out
}

/// Sweep table. The first row of each coil count and of each component
/// count is marked with `*`.
pub fn format_table(results: &[RunResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:>6} {:>6} {:>6} {:>10} {:>8} {:>10}  error",
        "coils", "poles", "total", "steps", "angle", "overlap", "integrity"
    );

    let mut seen_coils = HashSet::new();
    let mut seen_components = HashSet::new();
    for r in results {
        let coils = mark(r.coil_count, seen_coils.insert(r.coil_count));
        let total = mark(r.component_count, seen_components.insert(r.component_count));
        let steps = if r.error.is_some() {
            "-".to_string()
        } else {
            r.steps_taken.to_string()
        };
        let angle = if r.step_angle != 0.0 {
            format!("{:.3}°", r.step_angle)
        } else {
            "-".to_string()
        };
        let error = r.error.as_ref().map(ToString::to_string).unwrap_or_default();

        let _ = writeln!(
            out,
            "{:>6} {:>6} {:>6} {:>6} {:>10} {:>7.0}% {:>9.0}%  {}",
            coils,
            r.pole_count,
            total,
            steps,
            angle,
            r.overlap_percent,
            r.rotor_integrity_percent,
            error
        );
    }
    out
}

fn mark(value: usize, first: bool) -> String {
    if first {
        format!("*{value}")
    } else {
        value.to_string()
    }
}
