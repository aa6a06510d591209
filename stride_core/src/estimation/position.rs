// stride_core/src/estimation/position.rs

use crate::buffer::SampleBuffer;
use crate::estimation::trajectory::Trajectory;
use crate::stats;
use crate::types::{Orientation, Vector3};
use tracing::debug;

/// Gravity subtracted from the world z-axis, in m/s^2.
pub const GRAVITY: f64 = 9.8;
/// Number of most recent magnitudes inspected by the stationary detector.
pub const ZUPT_WINDOW: usize = 10;
/// Magnitude variance under which the device is considered stationary.
pub const ZUPT_VARIANCE_THRESHOLD: f64 = 0.1;
/// Factor applied to the velocity on every stationary cycle.
pub const ZUPT_DECAY: f64 = 0.1;

/// Double integrator from device-frame acceleration to world-frame position.
///
/// Unconstrained double integration of noisy acceleration diverges within
/// seconds; the zero-velocity update is what keeps it bounded. Two guards
/// apply per cycle:
/// - while the classifier reports no movement, linear acceleration is taken
///   as zero (velocity only coasts and decays);
/// - while the last [`ZUPT_WINDOW`] magnitudes are quiet, velocity is scaled
///   by [`ZUPT_DECAY`].
#[derive(Debug, Clone, Default)]
pub struct PositionIntegrator {
    velocity: Vector3,
    position: Vector3,
    trajectory: Trajectory,
}

impl PositionIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Runs one integration cycle and records the resulting position.
    ///
    /// With `dt == None` (cold start) nothing is integrated, but the current
    /// position is still recorded. Returns `true` if the zero-velocity update
    /// fired.
    pub fn update(
        &mut self,
        accel: &Vector3,
        orientation: &Orientation,
        dt: Option<f64>,
        timestamp_ms: u64,
        is_moving: bool,
        buffer: &SampleBuffer,
    ) -> bool {
        let mut zupt_applied = false;

        if let Some(dt) = dt {
            // --- 1. Device -> world, minus gravity ---
            let linear_accel = if is_moving {
                Self::device_to_world(accel, orientation) - Vector3::new(0.0, 0.0, GRAVITY)
            } else {
                Vector3::zeros()
            };

            // --- 2. Integrate twice ---
            self.velocity += linear_accel * dt;
            self.position += self.velocity * dt;

            // --- 3. Zero-velocity update ---
            if Self::is_stationary(buffer) {
                self.velocity *= ZUPT_DECAY;
                zupt_applied = true;
                debug!(timestamp_ms, speed = self.velocity.norm(), "ZUPT applied");
            }
        }

        self.trajectory.push(self.position, timestamp_ms);
        zupt_applied
    }

    /// Rotates a device-frame vector into the world frame using roll and pitch.
    ///
    /// Yaw is not applied, so the horizontal axes stay device-aligned.
    pub fn device_to_world(accel: &Vector3, orientation: &Orientation) -> Vector3 {
        let (sin_roll, cos_roll) = orientation.roll.sin_cos();
        let (sin_pitch, cos_pitch) = orientation.pitch.sin_cos();

        Vector3::new(
            accel.x * cos_pitch + accel.z * sin_pitch,
            accel.x * sin_roll * sin_pitch + accel.y * cos_roll - accel.z * sin_roll * cos_pitch,
            -accel.x * cos_roll * sin_pitch + accel.y * sin_roll + accel.z * cos_roll * cos_pitch,
        )
    }

    /// True when the last [`ZUPT_WINDOW`] magnitudes are (nearly) constant.
    /// Needs a full window.
    pub fn is_stationary(buffer: &SampleBuffer) -> bool {
        if buffer.len() < ZUPT_WINDOW {
            return false;
        }
        stats::variance(&buffer.recent_accel_magnitudes(ZUPT_WINDOW))
            .is_some_and(|v| v < ZUPT_VARIANCE_THRESHOLD)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
