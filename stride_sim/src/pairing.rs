// stride_sim/src/pairing.rs

use crate::synth::SensorEvent;
use stride_core::types::{SensorSample, Vector3};

/// Turns the two independent sensor streams into paired engine samples.
///
/// The accelerometer drives the pipeline: every accel reading yields one
/// sample carrying the most recent gyro reading. Until the first gyro reading
/// arrives, the angular rate is taken as zero.
#[derive(Debug, Clone, Default)]
pub struct SamplePairer {
    latest_gyro: Option<Vector3>,
}

impl SamplePairer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: &SensorEvent) -> Option<SensorSample> {
        match *event {
            SensorEvent::Gyro { reading, .. } => {
                self.latest_gyro = Some(reading);
                None
            }
            SensorEvent::Accel {
                reading,
                timestamp_ms,
            } => Some(SensorSample::new(
                reading,
                self.latest_gyro.unwrap_or_else(Vector3::zeros),
                timestamp_ms,
            )),
        }
    }

    pub fn latest_gyro(&self) -> Option<Vector3> {
        self.latest_gyro
    }

    pub fn reset(&mut self) {
        self.latest_gyro = None;
    }
}
