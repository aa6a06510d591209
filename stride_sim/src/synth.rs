// stride_sim/src/synth.rs

use rand::distributions::Bernoulli;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use crate::config::segment_end_ms;
use crate::config::structs::{MotionProfile, NoiseConfig, SegmentConfig, Simulation};
use crate::error::SimError;
use crate::prng::SimulationRng;
use stride_core::types::Vector3;

/// A single reading from one of the two independent sensor streams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    Accel { reading: Vector3, timestamp_ms: u64 },
    Gyro { reading: Vector3, timestamp_ms: u64 },
}

impl SensorEvent {
    pub fn timestamp_ms(&self) -> u64 {
        match self {
            SensorEvent::Accel { timestamp_ms, .. } | SensorEvent::Gyro { timestamp_ms, .. } => {
                *timestamp_ms
            }
        }
    }

    /// Gyro readings sort ahead of accel readings with the same timestamp.
    fn stream_order(&self) -> u8 {
        match self {
            SensorEvent::Gyro { .. } => 0,
            SensorEvent::Accel { .. } => 1,
        }
    }
}

// =========================================================================
// == Synthesizer ==
// =========================================================================

/// Generates noisy accelerometer and gyroscope streams from scripted motion.
///
/// The device frame has +z up when lying flat, so at rest the accelerometer
/// reports `(0, 0, gravity)`.
#[derive(Debug, Clone)]
pub struct ImuSynthesizer {
    gravity: f64,
    accel_period_ms: f64,
    gyro_period_ms: f64,
    accel_noise: [Normal<f64>; 3], // X, Y, Z
    gyro_noise: [Normal<f64>; 3],  // X, Y, Z
    glitch: Bernoulli,
    rng: SimulationRng,
}

impl ImuSynthesizer {
    pub fn new(simulation: &Simulation, noise: &NoiseConfig, seed: u64) -> Result<Self, SimError> {
        for rate in [simulation.accel_rate_hz, simulation.gyro_rate_hz] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(SimError::SampleRate(rate));
            }
        }

        Ok(Self {
            gravity: simulation.gravity,
            accel_period_ms: 1000.0 / simulation.accel_rate_hz,
            gyro_period_ms: 1000.0 / simulation.gyro_rate_hz,
            accel_noise: [
                Normal::new(0.0, noise.accel_std[0])?,
                Normal::new(0.0, noise.accel_std[1])?,
                Normal::new(0.0, noise.accel_std[2])?,
            ],
            gyro_noise: [
                Normal::new(0.0, noise.gyro_std[0])?,
                Normal::new(0.0, noise.gyro_std[1])?,
                Normal::new(0.0, noise.gyro_std[2])?,
            ],
            glitch: Bernoulli::new(noise.glitch_probability)?,
            rng: SimulationRng::seeded(seed),
        })
    }

    /// All readings of segment `index` starting at `start_ms`, merged in
    /// arrival order. Both streams start at the segment boundary.
    pub fn segment_events(
        &mut self,
        index: usize,
        segment: &SegmentConfig,
        start_ms: u64,
    ) -> Result<Vec<SensorEvent>, SimError> {
        // Every reading lands before the segment end, so it fits in a u64.
        let end_ms = segment_end_ms(index, segment, start_ms)?;
        let duration_ms = (end_ms - start_ms) as f64;
        let mut events = Vec::new();

        // --- 1. Gyroscope stream ---
        for offset_ms in Self::tick_offsets(self.gyro_period_ms, duration_ms) {
            let truth = Self::true_angular_rate(&segment.motion);
            let reading = Vector3::new(
                truth.x + self.gyro_noise[0].sample(&mut self.rng.0),
                truth.y + self.gyro_noise[1].sample(&mut self.rng.0),
                truth.z + self.gyro_noise[2].sample(&mut self.rng.0),
            );
            events.push(SensorEvent::Gyro {
                reading,
                timestamp_ms: start_ms + offset_ms,
            });
        }

        // --- 2. Accelerometer stream ---
        for offset_ms in Self::tick_offsets(self.accel_period_ms, duration_ms) {
            let truth = self.true_specific_force(&segment.motion, offset_ms as f64 / 1000.0);
            let mut reading = Vector3::new(
                truth.x + self.accel_noise[0].sample(&mut self.rng.0),
                truth.y + self.accel_noise[1].sample(&mut self.rng.0),
                truth.z + self.accel_noise[2].sample(&mut self.rng.0),
            );
            if self.glitch.sample(&mut self.rng.0) {
                reading.x = f64::NAN;
            }
            events.push(SensorEvent::Accel {
                reading,
                timestamp_ms: start_ms + offset_ms,
            });
        }

        // --- 3. Interleave ---
        events.sort_by_key(|e| (e.timestamp_ms(), e.stream_order()));
        Ok(events)
    }

    /// Offsets in ms of the readings that fall inside `[0, duration_ms)`.
    fn tick_offsets(period_ms: f64, duration_ms: f64) -> impl Iterator<Item = u64> {
        (0_u64..)
            .map(move |k| k as f64 * period_ms)
            .take_while(move |t| *t < duration_ms)
            .map(|t| t.round() as u64)
    }

    /// What a perfect accelerometer reads `t_s` seconds into the segment.
    fn true_specific_force(&self, motion: &MotionProfile, t_s: f64) -> Vector3 {
        match motion {
            MotionProfile::Idle | MotionProfile::Turn { .. } => {
                Vector3::new(0.0, 0.0, self.gravity)
            }
            MotionProfile::Walk {
                cadence_hz,
                amplitude,
                z_drift,
            } => {
                let bounce = amplitude * (2.0 * PI * cadence_hz * t_s).sin();
                Vector3::new(0.0, 0.0, self.gravity + bounce + z_drift * t_s)
            }
        }
    }

    fn true_angular_rate(motion: &MotionProfile) -> Vector3 {
        match motion {
            MotionProfile::Turn { yaw_rate } => Vector3::new(0.0, 0.0, *yaw_rate),
            _ => Vector3::zeros(),
        }
    }
}
