// stride_core/src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

// --- Core Type Aliases ---
/// Every vector in the pipeline (acceleration, angular rate, velocity,
/// position) is a plain 3-component `f64` vector.
pub type Vector3 = nalgebra::Vector3<f64>;

// =========================================================================
// == Inbound Data ==
// =========================================================================

/// One paired accelerometer + gyroscope reading as handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Device-frame specific force in m/s^2.
    pub accel: Vector3,
    /// Device-frame angular rate in rad/s.
    pub gyro: Vector3,
    /// Milliseconds on the producer's clock. Must never go backwards.
    pub timestamp_ms: u64,
}

impl SensorSample {
    pub fn new(accel: Vector3, gyro: Vector3, timestamp_ms: u64) -> Self {
        Self {
            accel,
            gyro,
            timestamp_ms,
        }
    }
}

// =========================================================================
// == Motion State ==
// =========================================================================

/// The coarse walking direction inferred from the vertical-axis trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Stationary,
    Forward,
    Backward,
    Uncertain,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Stationary => "stationary",
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Uncertain => "uncertain",
        };
        f.write_str(label)
    }
}

/// The classified motion record. Replaced wholesale on every ingestion cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionState {
    pub is_moving: bool,
    pub is_walking: bool,
    pub direction: Direction,
    /// Accumulated stride distance in meters. Never decreases until reset.
    pub distance_meters: f64,
    /// Number of detected steps. Never decreases until reset.
    pub step_count: u64,
    /// Cadence-derived speed in m/s, within `[0, MAX_SPEED_MPS]`.
    pub speed_mps: f64,
}

/// An immutable copy of [`MotionState`] tagged with the sample that produced it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionStateSnapshot {
    pub state: MotionState,
    /// `None` until the first sample has been accepted.
    pub timestamp_ms: Option<u64>,
}

/// Side effects emitted by the classifier and the step detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionEvent {
    MovementStarted { timestamp_ms: u64 },
    MovementStopped { timestamp_ms: u64 },
    StepDetected { timestamp_ms: u64, step_count: u64 },
}

// =========================================================================
// == Attitude & Trajectory ==
// =========================================================================

/// Euler attitude in radians.
///
/// `yaw` is pure gyro integration with no absolute reference, so it drifts
/// without bound over a long session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// A dead-reckoned position and the timestamp of the cycle that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub position: Vector3,
    pub timestamp_ms: u64,
}
