// stride_core/src/estimation/orientation.rs

use crate::types::{Orientation, Vector3};

/// Weight of the gyro-integrated estimate in the complementary filter.
pub const GYRO_WEIGHT: f64 = 0.98;

/// Complementary filter over roll and pitch, open-loop integration for yaw.
///
/// Roll and pitch blend the high-bandwidth gyro integral with the
/// gravity-derived tilt, which pins their long-term drift. Yaw has no
/// reference and is left to drift.
#[derive(Debug, Clone, Default)]
pub struct OrientationEstimator {
    orientation: Orientation,
}

impl OrientationEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Advances the attitude by `dt` seconds.
    ///
    /// `dt` is `None` on the very first sample: there is no previous timestamp
    /// to integrate from, so the attitude is left as is.
    pub fn update(&mut self, accel: &Vector3, gyro: &Vector3, dt: Option<f64>) -> Orientation {
        let Some(dt) = dt else {
            return self.orientation;
        };

        // --- 1. Gyro integration (Euler) ---
        let gyro_roll = self.orientation.roll + gyro.x * dt;
        let gyro_pitch = self.orientation.pitch + gyro.y * dt;
        let gyro_yaw = self.orientation.yaw + gyro.z * dt;

        // --- 2. Tilt from the gravity direction ---
        let (accel_roll, accel_pitch) = Self::tilt_from_accel(accel);

        // --- 3. Fuse ---
        self.orientation = Orientation {
            roll: GYRO_WEIGHT * gyro_roll + (1.0 - GYRO_WEIGHT) * accel_roll,
            pitch: GYRO_WEIGHT * gyro_pitch + (1.0 - GYRO_WEIGHT) * accel_pitch,
            yaw: gyro_yaw,
        };
        self.orientation
    }

    /// `(roll, pitch)` implied by treating `accel` as pure gravity.
    pub fn tilt_from_accel(accel: &Vector3) -> (f64, f64) {
        let roll = accel.y.atan2(accel.z);
        let pitch = (-accel.x).atan2((accel.y * accel.y + accel.z * accel.z).sqrt());
        (roll, pitch)
    }

    pub fn reset(&mut self) {
        self.orientation = Orientation::default();
    }
}
