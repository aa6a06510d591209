// stride_core/src/engine.rs

use std::fmt;

use crate::buffer::SampleBuffer;
use crate::classification::{direction::DirectionEstimator, steps::StepDetector, MotionClassifier};
use crate::error::MotionError;
use crate::estimation::{orientation::OrientationEstimator, position::PositionIntegrator};
use crate::params::{ParameterUpdate, Parameters};
use crate::signal::SignalConditioner;
use crate::types::{
    MotionEvent, MotionState, MotionStateSnapshot, Orientation, SensorSample, TrajectoryPoint,
    Vector3,
};
use tracing::{debug, warn};

/// Receives the side effects of an ingestion cycle (movement edges, steps).
///
/// Called after the cycle's state has been committed, so reading the engine
/// from a different handle would already show the new state.
pub trait MotionObserver: Send {
    fn on_event(&mut self, _event: &MotionEvent) {}
}

/// The single owner of all pipeline state.
///
/// One [`ingest`](Self::ingest) call runs the whole pipeline to completion;
/// the engine has no internal locking and is not meant to be shared between
/// writers. Producers delivering accelerometer and gyroscope readings on
/// separate streams must pair them before calling in.
pub struct MotionEngine {
    params: Parameters,
    state: MotionState,
    /// Timestamp of the last accepted sample; `None` until cold start.
    last_timestamp_ms: Option<u64>,

    // --- Pipeline stages ---
    conditioner: SignalConditioner,
    buffer: SampleBuffer,
    classifier: MotionClassifier,
    steps: StepDetector,
    direction: DirectionEstimator,
    orientation: OrientationEstimator,
    position: PositionIntegrator,

    observer: Option<Box<dyn MotionObserver>>,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

impl fmt::Debug for MotionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionEngine")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("last_timestamp_ms", &self.last_timestamp_ms)
            .field("buffered", &self.buffer.len())
            .field("orientation", &self.orientation.orientation())
            .field("position", &self.position.position())
            .finish_non_exhaustive()
    }
}

impl MotionEngine {
    pub fn new(params: Parameters) -> Self {
        Self {
            buffer: SampleBuffer::new(params.buffer_size),
            params,
            state: MotionState::default(),
            last_timestamp_ms: None,
            conditioner: SignalConditioner::new(),
            classifier: MotionClassifier,
            steps: StepDetector::new(),
            direction: DirectionEstimator,
            orientation: OrientationEstimator::new(),
            position: PositionIntegrator::new(),
            observer: None,
        }
    }

    /// Registers the observer that receives movement and step events,
    /// replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn MotionObserver>) {
        self.observer = Some(observer);
    }

    pub fn with_observer(mut self, observer: Box<dyn MotionObserver>) -> Self {
        self.set_observer(observer);
        self
    }

    // =========================================================================
    // == Inbound ==
    // =========================================================================

    /// Runs one full pipeline cycle for a paired sample.
    ///
    /// A sample with a non-finite component, or one older than the last
    /// accepted sample, is rejected before anything is touched.
    pub fn ingest(
        &mut self,
        accel: Vector3,
        gyro: Vector3,
        timestamp_ms: u64,
    ) -> Result<MotionStateSnapshot, MotionError> {
        if let Err(e) = self.validate(&accel, &gyro, timestamp_ms) {
            warn!(error = %e, "Dropping malformed sample");
            return Err(e);
        }

        // --- 1. Clock (shared by orientation and position) ---
        let dt = self
            .last_timestamp_ms
            .map(|previous| (timestamp_ms - previous) as f64 / 1000.0);
        self.last_timestamp_ms = Some(timestamp_ms);

        // --- 2. Conditioning & history ---
        let conditioned = self.conditioner.condition(&accel, self.params.smoothing_factor);
        self.buffer.set_capacity(self.params.buffer_size);
        self.buffer.push(conditioned, gyro, timestamp_ms);

        // --- 3. Classification on a working copy of the state ---
        let mut next = self.state.clone();
        let mut events = Vec::new();
        self.classifier
            .classify(&self.buffer, &self.params, &mut next, &mut events);
        self.steps
            .update(&self.buffer, &self.params, &mut next, &mut events);
        if let Some(direction) = self.direction.estimate(&self.buffer, next.is_walking) {
            next.direction = direction;
        }

        // --- 4. Attitude & dead reckoning ---
        let orientation = self.orientation.update(&conditioned, &gyro, dt);
        self.position.update(
            &conditioned,
            &orientation,
            dt,
            timestamp_ms,
            next.is_moving,
            &self.buffer,
        );

        // --- 5. Commit, then notify ---
        self.state = next;
        if let Some(observer) = self.observer.as_mut() {
            for event in &events {
                observer.on_event(event);
            }
        }

        Ok(self.current_state())
    }

    pub fn ingest_sample(
        &mut self,
        sample: &SensorSample,
    ) -> Result<MotionStateSnapshot, MotionError> {
        self.ingest(sample.accel, sample.gyro, sample.timestamp_ms)
    }

    fn validate(
        &self,
        accel: &Vector3,
        gyro: &Vector3,
        timestamp_ms: u64,
    ) -> Result<(), MotionError> {
        if !accel.iter().all(|c| c.is_finite()) {
            return Err(MotionError::NonFiniteSample { field: "accel" });
        }
        if !gyro.iter().all(|c| c.is_finite()) {
            return Err(MotionError::NonFiniteSample { field: "gyro" });
        }
        if let Some(previous_ms) = self.last_timestamp_ms {
            if timestamp_ms < previous_ms {
                return Err(MotionError::TimestampRegression {
                    previous_ms,
                    received_ms: timestamp_ms,
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // == Outbound (all copies) ==
    // =========================================================================

    pub fn current_state(&self) -> MotionStateSnapshot {
        MotionStateSnapshot {
            state: self.state.clone(),
            timestamp_ms: self.last_timestamp_ms,
        }
    }

    pub fn position(&self) -> Vector3 {
        self.position.position()
    }

    pub fn velocity(&self) -> Vector3 {
        self.position.velocity()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation.orientation()
    }

    pub fn trajectory(&self) -> Vec<TrajectoryPoint> {
        self.position.trajectory().to_vec()
    }

    /// Horizontal path length over the retained trajectory.
    pub fn path_length(&self) -> f64 {
        self.position.trajectory().path_length()
    }

    pub fn parameters(&self) -> Parameters {
        self.params.clone()
    }

    /// Number of samples currently held in the history buffer.
    pub fn buffered_samples(&self) -> usize {
        self.buffer.len()
    }

    // =========================================================================
    // == Configuration & Lifecycle ==
    // =========================================================================

    /// Merges `update` into the parameters. Takes effect on the next sample;
    /// buffers and accumulated state are left alone.
    pub fn update_parameters(&mut self, update: &ParameterUpdate) {
        self.params.apply(update);
        debug!(params = ?self.params, "Parameters updated");
    }

    /// Returns every piece of state to its construction-time value.
    /// Parameters and the registered observer are kept.
    pub fn reset(&mut self) {
        self.state = MotionState::default();
        self.last_timestamp_ms = None;
        self.conditioner.reset();
        self.buffer.clear();
        self.buffer.set_capacity(self.params.buffer_size);
        self.steps.reset();
        self.orientation.reset();
        self.position.reset();
        debug!("Engine reset");
    }
}
