// stride_sim/src/prelude.rs

// Re-export the entire stride_core prelude so you can easily access
// pure types like `MotionEngine`, `Parameters`, `Vector3`, etc.
pub use stride_core::prelude::*;

// Re-export common harness types for easy access in other modules.
pub use crate::config::structs::*;
pub use crate::error::SimError;
pub use crate::pairing::SamplePairer;
pub use crate::prng::SimulationRng;
pub use crate::synth::{ImuSynthesizer, SensorEvent};
pub use crate::worker::{EngineView, EngineWorker, WorkerStats};
