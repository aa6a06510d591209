// stride_sim/src/config/structs.rs

use serde::{Deserialize, Serialize};
use stride_core::params::{ParameterUpdate, Parameters};

// =========================================================================
// == Top-Level Scenario ==
// =========================================================================

/// # ScenarioConfig
/// The root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    /// Engine parameters at the start of the run.
    #[serde(default)]
    pub engine: Parameters,

    #[serde(default)]
    pub noise: NoiseConfig,

    // The TOML has `[[segments]]`, which becomes a Vec of SegmentConfig structs.
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
}

impl ScenarioConfig {
    /// Total scripted duration in seconds.
    pub fn duration_s(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_s).sum()
    }
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in a scenario.toml file.
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Accelerometer output rate. Each accelerometer reading produces one engine sample.
    #[serde(default = "default_rate_hz")]
    pub accel_rate_hz: f64,
    /// Gyroscope output rate. Independent of the accelerometer rate.
    #[serde(default = "default_rate_hz")]
    pub gyro_rate_hz: f64,
    /// Timestamp of the first generated reading, in ms.
    #[serde(default)]
    pub start_timestamp_ms: u64,
    /// Gravity magnitude the synthetic accelerometer reports at rest.
    #[serde(default = "default_gravity")]
    pub gravity: f64,
}

fn default_rate_hz() -> f64 {
    50.0
}

fn default_gravity() -> f64 {
    9.8
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            accel_rate_hz: default_rate_hz(),
            gyro_rate_hz: default_rate_hz(),
            start_timestamp_ms: 0,
            gravity: default_gravity(),
        }
    }
}

/// White noise added to the synthetic readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    /// Per-axis accelerometer standard deviation in m/s^2.
    pub accel_std: [f64; 3],
    /// Per-axis gyroscope standard deviation in rad/s.
    pub gyro_std: [f64; 3],
    /// Probability that an accelerometer reading comes out as NaN.
    pub glitch_probability: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            accel_std: [0.02; 3],
            gyro_std: [0.005; 3],
            glitch_probability: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub duration_s: f64,
    pub motion: MotionProfile,
    /// Parameter changes applied to the engine when the segment starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retune: Option<ParameterUpdate>,
}

/// The ground-truth motion of the device during a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionProfile {
    /// Lying flat and still.
    Idle,
    /// Upright walking: a vertical bounce at the step cadence, plus an
    /// optional linear drift of the vertical reading.
    Walk {
        cadence_hz: f64,
        amplitude: f64,
        #[serde(default)]
        z_drift: f64,
    },
    /// Still, but spinning about the vertical axis.
    Turn { yaw_rate: f64 },
}
