// stride_sim/src/lib.rs

//! Scenario harness around `stride_core`.
//!
//! A scenario file describes a sequence of motion segments. The harness
//! synthesises independent accelerometer and gyroscope streams for them,
//! pairs the streams the way a sensor host would, and drives a
//! [`MotionEngine`](stride_core::engine::MotionEngine) on a dedicated worker
//! thread.

// This prelude is for convenience for other files WITHIN the stride_sim crate.
pub mod prelude;

pub mod cli;
pub mod config;
pub mod error;
pub mod pairing;
pub mod prng;
pub mod report;
pub mod runner;
pub mod synth;
pub mod worker;
