// stride_core/src/lib.rs

//! A small inertial motion-tracking engine.
//!
//! Paired accelerometer/gyroscope samples go in through
//! [`MotionEngine::ingest`](engine::MotionEngine::ingest); a classified motion
//! state (moving, walking, direction, steps, distance, speed) and a
//! dead-reckoned trajectory come out.

pub mod buffer;
pub mod classification;
pub mod engine;
pub mod error;
pub mod estimation;
pub mod params;
pub mod prelude;
pub mod signal;
pub mod stats;
pub mod types;
