// stride_core/src/classification/mod.rs

//! Variance-based motion classification and the two walking-gated stages that
//! hang off it: step detection and direction estimation.

use crate::buffer::SampleBuffer;
use crate::params::Parameters;
use crate::stats;
use crate::types::{MotionEvent, MotionState};
use tracing::info;

pub mod direction;
pub mod steps;

/// Below this many buffered samples the classifier leaves the state untouched.
pub const MIN_CLASSIFY_SAMPLES: usize = 5;
/// Peak angular rate (rad/s) above which movement is treated as handling, not walking.
pub const MAX_WALKING_ROTATION: f64 = 0.5;

/// The two window signals the classification is based on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSignals {
    /// Population variance of the buffered acceleration magnitudes.
    pub magnitude_variance: f64,
    /// Largest buffered angular-rate norm.
    pub rotation_intensity: f64,
}

impl WindowSignals {
    pub fn from_buffer(buffer: &SampleBuffer) -> Option<Self> {
        if buffer.len() < MIN_CLASSIFY_SAMPLES {
            return None;
        }
        let magnitude_variance = stats::variance(&buffer.accel_magnitudes())?;
        let rotation_intensity = buffer
            .gyro()
            .iter()
            .map(|g| g.norm())
            .fold(0.0_f64, f64::max);

        Some(Self {
            magnitude_variance,
            rotation_intensity,
        })
    }
}

/// Level-triggered moving/walking classifier.
///
/// Each cycle recomputes both flags from scratch; there is no hysteresis, so a
/// variance hovering around a threshold will make the flags flap.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionClassifier;

impl MotionClassifier {
    /// Updates `state.is_moving` / `state.is_walking` from the buffer contents.
    ///
    /// A moving -> still edge zeroes the speed but keeps the distance. Edges
    /// are reported through `events`. Returns the signals that were used, or
    /// `None` if the buffer is too short and nothing changed.
    pub fn classify(
        &self,
        buffer: &SampleBuffer,
        params: &Parameters,
        state: &mut MotionState,
        events: &mut Vec<MotionEvent>,
    ) -> Option<WindowSignals> {
        let signals = WindowSignals::from_buffer(buffer)?;
        let timestamp_ms = buffer.latest_timestamp()?;

        let was_moving = state.is_moving;
        state.is_moving = signals.magnitude_variance > params.move_threshold;
        state.is_walking = state.is_moving
            && signals.magnitude_variance > params.walk_threshold
            && signals.rotation_intensity < MAX_WALKING_ROTATION;

        if !was_moving && state.is_moving {
            info!(
                timestamp_ms,
                variance = signals.magnitude_variance,
                "Movement started"
            );
            events.push(MotionEvent::MovementStarted { timestamp_ms });
        } else if was_moving && !state.is_moving {
            info!(timestamp_ms, "Movement stopped");
            state.speed_mps = 0.0;
            events.push(MotionEvent::MovementStopped { timestamp_ms });
        }

        Some(signals)
    }
}
