// stride_core/src/classification/steps.rs

use crate::buffer::SampleBuffer;
use crate::params::Parameters;
use crate::types::{MotionEvent, MotionState};
use tracing::{debug, info};

/// Fewer buffered samples than this and no peak test is possible.
pub const MIN_STEP_SAMPLES: usize = 3;
/// Upper clamp on the cadence-derived speed, in m/s.
pub const MAX_SPEED_MPS: f64 = 5.0;

/// Peak detector with a refractory window and a constant-stride distance model.
///
/// A step is counted on the newest sample when its acceleration magnitude is
/// a trailing 3-point peak (strictly above each of the two samples before it),
/// exceeds `step_threshold`, and lands strictly inside
/// `(min_step_interval_ms, max_step_interval_ms)` after the timing reference.
///
/// The timing reference starts at the first sample ever seen. A qualifying
/// peak that arrives too late is not counted but becomes the new reference,
/// so counting resumes after a pause. The speed from before the pause is
/// dropped at that point.
#[derive(Debug, Clone, Default)]
pub struct StepDetector {
    /// Timestamp the refractory window is measured from.
    reference_ms: Option<u64>,
    /// Timestamp of the last counted step, used for the speed estimate.
    last_step_ms: Option<u64>,
}

impl StepDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the detector against the newest buffered sample.
    ///
    /// Returns `true` when a step was counted this cycle.
    pub fn update(
        &mut self,
        buffer: &SampleBuffer,
        params: &Parameters,
        state: &mut MotionState,
        events: &mut Vec<MotionEvent>,
    ) -> bool {
        let Some(now) = buffer.latest_timestamp() else {
            return false;
        };
        let reference = *self.reference_ms.get_or_insert(now);

        if !state.is_walking || buffer.len() < MIN_STEP_SAMPLES {
            return false;
        }

        let recent = buffer.recent_accel_magnitudes(MIN_STEP_SAMPLES);
        let (two_back, one_back, current) = (recent[0], recent[1], recent[2]);

        let is_peak = current > one_back && current > two_back;
        if !is_peak || current <= params.step_threshold {
            return false;
        }

        let since_reference = now.saturating_sub(reference);
        if since_reference >= params.max_step_interval_ms {
            debug!(
                since_reference,
                "Peak after a long gap; re-arming the step reference"
            );
            self.reference_ms = Some(now);
            self.last_step_ms = None;
            state.speed_mps = 0.0;
            return false;
        }
        if since_reference <= params.min_step_interval_ms {
            return false;
        }

        self.on_step(now, params, state);
        info!(
            timestamp_ms = now,
            step_count = state.step_count,
            distance_m = state.distance_meters,
            "Step detected"
        );
        events.push(MotionEvent::StepDetected {
            timestamp_ms: now,
            step_count: state.step_count,
        });
        true
    }

    fn on_step(&mut self, now: u64, params: &Parameters, state: &mut MotionState) {
        state.step_count += 1;
        state.distance_meters += params.avg_step_length;

        if let Some(previous) = self.last_step_ms {
            let elapsed_s = now.saturating_sub(previous) as f64 / 1000.0;
            if elapsed_s > 0.0 {
                state.speed_mps = (params.avg_step_length / elapsed_s).clamp(0.0, MAX_SPEED_MPS);
            }
        }

        self.reference_ms = Some(now);
        self.last_step_ms = Some(now);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
