// stride_core/src/classification/direction.rs

use crate::buffer::SampleBuffer;
use crate::stats;
use crate::types::Direction;

pub const MIN_DIRECTION_SAMPLES: usize = 5;
/// Minimum |slope| of the z-axis trend, per sample, to call a direction.
pub const TREND_THRESHOLD: f64 = 0.1;
/// Minimum magnitude consistency to trust the trend.
pub const CONSISTENCY_THRESHOLD: f64 = 0.7;
const CONSISTENCY_GAIN: f64 = 10.0;

/// Forward/backward classifier driven by the vertical-axis acceleration trend.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionEstimator;

impl DirectionEstimator {
    /// Returns the new direction, or `None` to keep the previous one (walking
    /// but not enough history yet).
    pub fn estimate(&self, buffer: &SampleBuffer, is_walking: bool) -> Option<Direction> {
        if !is_walking {
            return Some(Direction::Stationary);
        }
        if buffer.len() < MIN_DIRECTION_SAMPLES {
            return None;
        }

        let trend = Self::vertical_trend(buffer)?;
        let consistency = Self::consistency(buffer)?;

        let direction = if trend > TREND_THRESHOLD && consistency > CONSISTENCY_THRESHOLD {
            Direction::Forward
        } else if trend < -TREND_THRESHOLD && consistency > CONSISTENCY_THRESHOLD {
            Direction::Backward
        } else {
            Direction::Uncertain
        };
        Some(direction)
    }

    /// OLS slope of buffered z-axis acceleration against sample index.
    pub fn vertical_trend(buffer: &SampleBuffer) -> Option<f64> {
        let z: Vec<f64> = buffer.accel().iter().map(|a| a.z).collect();
        stats::ols_slope(&z)
    }

    /// `max(0, 1 - 10 * variance(|a|))`: close to 1 for a steady magnitude.
    pub fn consistency(buffer: &SampleBuffer) -> Option<f64> {
        let variance = stats::variance(&buffer.accel_magnitudes())?;
        Some((1.0 - CONSISTENCY_GAIN * variance).max(0.0))
    }
}
