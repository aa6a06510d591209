// stride_core/src/params.rs

//! Runtime-tunable thresholds of the motion pipeline.
//!
//! [`Parameters`] is the full set the engine runs with. [`ParameterUpdate`] is
//! its sparse mirror: only the fields that are `Some` get written. Nothing is
//! range-checked; a negative threshold is a legal (if odd) way to force a
//! classifier branch.

use serde::{Deserialize, Serialize};

// =========================================================================
// == Full Parameter Set ==
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Capacity of the sample history. Shrinking it evicts on the next push.
    pub buffer_size: usize,
    /// Minimum acceleration magnitude (m/s^2) for a peak to count as a step.
    pub step_threshold: f64,
    /// Magnitude variance above which motion is considered walking.
    pub walk_threshold: f64,
    /// Magnitude variance above which the device is considered moving.
    pub move_threshold: f64,
    /// Steps closer together than this are suppressed.
    pub min_step_interval_ms: u64,
    /// Steps further apart than this are not counted; the detector re-arms instead.
    pub max_step_interval_ms: u64,
    /// Constant stride length in meters.
    pub avg_step_length: f64,
    /// Weight of the previous filtered value in the accelerometer EMA, in `[0, 1]`.
    pub smoothing_factor: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            buffer_size: 20,
            step_threshold: 1.2,
            walk_threshold: 0.15,
            move_threshold: 0.08,
            min_step_interval_ms: 300,
            max_step_interval_ms: 2000,
            avg_step_length: 0.7,
            smoothing_factor: 0.8,
        }
    }
}

impl Parameters {
    /// Overwrites every field that is present in `update`, keeping the rest.
    pub fn apply(&mut self, update: &ParameterUpdate) {
        if let Some(v) = update.buffer_size {
            self.buffer_size = v;
        }
        if let Some(v) = update.step_threshold {
            self.step_threshold = v;
        }
        if let Some(v) = update.walk_threshold {
            self.walk_threshold = v;
        }
        if let Some(v) = update.move_threshold {
            self.move_threshold = v;
        }
        if let Some(v) = update.min_step_interval_ms {
            self.min_step_interval_ms = v;
        }
        if let Some(v) = update.max_step_interval_ms {
            self.max_step_interval_ms = v;
        }
        if let Some(v) = update.avg_step_length {
            self.avg_step_length = v;
        }
        if let Some(v) = update.smoothing_factor {
            self.smoothing_factor = v;
        }
    }
}

// =========================================================================
// == Sparse Update ==
// =========================================================================

/// A partial [`Parameters`]; `None` means "leave as is".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_step_interval_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_step_interval_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_step_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothing_factor: Option<f64>,
}

impl ParameterUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
