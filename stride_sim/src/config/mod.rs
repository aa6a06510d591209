// stride_sim/src/config/mod.rs

//! This module handles loading and resolving scenario configuration from disk.

pub mod structs;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;
use tracing::info;

use crate::error::SimError;
pub use structs::{MotionProfile, NoiseConfig, ScenarioConfig, SegmentConfig, Simulation};

/// Prefix for environment overrides, e.g. `STRIDE_SIMULATION__SEED=7`.
pub const ENV_PREFIX: &str = "STRIDE_";

/// The provider stack: the scenario file, then environment overrides on top.
pub fn scenario_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Loads, merges and validates a scenario file.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, SimError> {
    // `Toml::file` silently yields nothing for a missing file.
    if !path.exists() {
        return Err(SimError::MissingScenario(path.to_path_buf()));
    }
    info!("Loading scenario from: {}", path.display());

    let config: ScenarioConfig = scenario_figment(path).extract()?;
    validate(&config)?;

    info!(
        segments = config.segments.len(),
        duration_s = config.duration_s(),
        "Scenario loaded"
    );
    Ok(config)
}

/// Rejects settings the synthesizer cannot run with. Engine parameters are
/// not checked; the engine accepts any value.
pub fn validate(config: &ScenarioConfig) -> Result<(), SimError> {
    for rate in [config.simulation.accel_rate_hz, config.simulation.gyro_rate_hz] {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(SimError::SampleRate(rate));
        }
    }

    let mut start_ms = config.simulation.start_timestamp_ms;
    for (index, segment) in config.segments.iter().enumerate() {
        start_ms = segment_end_ms(index, segment, start_ms)?;
    }
    Ok(())
}

/// Timestamp at which segment `index` ends when it starts at `start_ms`.
pub fn segment_end_ms(
    index: usize,
    segment: &SegmentConfig,
    start_ms: u64,
) -> Result<u64, SimError> {
    let duration_s = segment.duration_s;
    if !(duration_s.is_finite() && duration_s >= 0.0) {
        return Err(SimError::SegmentDuration { index, duration_s });
    }

    let duration_ms = (duration_s * 1000.0).round();
    // `u64::MAX as f64` rounds up to 2^64, so equality already overflows.
    if duration_ms >= u64::MAX as f64 {
        return Err(SimError::TimelineOverflow { index });
    }
    start_ms
        .checked_add(duration_ms as u64)
        .ok_or(SimError::TimelineOverflow { index })
}
