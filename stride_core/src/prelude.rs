// stride_core/src/prelude.rs

// --- Core Entry Point ---
pub use crate::engine::{MotionEngine, MotionObserver};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::error::MotionError;
pub use crate::params::{ParameterUpdate, Parameters};
pub use crate::types::{
    Direction, MotionEvent, MotionState, MotionStateSnapshot, Orientation, SensorSample,
    TrajectoryPoint, Vector3,
};

// --- Pipeline Stages (Exported for callers that want to drive a single stage) ---
pub use crate::buffer::SampleBuffer;
pub use crate::classification::{
    direction::DirectionEstimator, steps::StepDetector, MotionClassifier,
};
pub use crate::estimation::{
    orientation::OrientationEstimator, position::PositionIntegrator, trajectory::Trajectory,
};
pub use crate::signal::SignalConditioner;
