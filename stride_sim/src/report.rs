// stride_sim/src/report.rs

use std::fmt::Write;

use crate::runner::RunSummary;
use stride_core::types::MotionEvent;

/// Renders a finished run as plain text, ending with the last `tail`
/// trajectory points.
pub fn render(summary: &RunSummary, tail: usize) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, summary, tail);
    out
}

fn write_report(out: &mut String, summary: &RunSummary, tail: usize) -> std::fmt::Result {
    let view = &summary.final_view;
    let state = &view.snapshot.state;

    writeln!(out, "== Run ==")?;
    writeln!(out, "seed:        {}", summary.seed)?;
    writeln!(
        out,
        "samples:     {} ({} accepted, {} rejected)",
        summary.samples, view.stats.accepted, view.stats.rejected
    )?;

    writeln!(out, "\n== Segments ==")?;
    for segment in &summary.segments {
        writeln!(
            out,
            "{:<16} {:>7} .. {:>7} ms  moving={:<5} walking={:<5} steps={:<4} dist={:.2} m",
            segment.label,
            segment.start_ms,
            segment.end_ms,
            segment.state.is_moving,
            segment.state.is_walking,
            segment.state.step_count,
            segment.state.distance_meters,
        )?;
    }

    let (mut started, mut stopped, mut steps) = (0, 0, 0);
    for event in &summary.events {
        match event {
            MotionEvent::MovementStarted { .. } => started += 1,
            MotionEvent::MovementStopped { .. } => stopped += 1,
            MotionEvent::StepDetected { .. } => steps += 1,
        }
    }
    writeln!(out, "\n== Events ==")?;
    writeln!(
        out,
        "movement started: {}  movement stopped: {}  steps: {}",
        started, stopped, steps
    )?;

    writeln!(out, "\n== Final state ==")?;
    writeln!(out, "moving:      {}", state.is_moving)?;
    writeln!(out, "walking:     {}", state.is_walking)?;
    writeln!(out, "direction:   {}", state.direction)?;
    writeln!(out, "steps:       {}", state.step_count)?;
    writeln!(out, "distance:    {:.2} m", state.distance_meters)?;
    writeln!(out, "speed:       {:.2} m/s", state.speed_mps)?;
    writeln!(
        out,
        "orientation: roll {:.1} deg, pitch {:.1} deg, yaw {:.1} deg",
        view.orientation.roll.to_degrees(),
        view.orientation.pitch.to_degrees(),
        view.orientation.yaw.to_degrees()
    )?;
    writeln!(
        out,
        "position:    [{:.3}, {:.3}, {:.3}] m",
        view.position.x, view.position.y, view.position.z
    )?;
    writeln!(
        out,
        "velocity:    [{:.3}, {:.3}, {:.3}] m/s",
        view.velocity.x, view.velocity.y, view.velocity.z
    )?;
    writeln!(
        out,
        "trajectory:  {} points, {:.3} m horizontal path",
        view.trajectory.len(),
        view.path_length
    )?;

    if tail > 0 && !view.trajectory.is_empty() {
        writeln!(out, "\n== Last {} trajectory points ==", tail.min(view.trajectory.len()))?;
        let skip = view.trajectory.len().saturating_sub(tail);
        for point in view.trajectory.iter().skip(skip) {
            writeln!(
                out,
                "{:>8} ms  [{:.3}, {:.3}, {:.3}]",
                point.timestamp_ms, point.position.x, point.position.y, point.position.z
            )?;
        }
    }
    Ok(())
}
