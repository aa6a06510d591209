// stride_sim/src/error.rs

use std::path::PathBuf;
use stride_core::error::MotionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario file not found: {}", .0.display())]
    MissingScenario(PathBuf),

    #[error("failed to load scenario: {0}")]
    Config(#[from] figment::Error),

    #[error("failed to serialize scenario: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid noise parameters: {0}")]
    Noise(#[from] rand_distr::NormalError),

    #[error("invalid glitch probability: {0}")]
    Glitch(#[from] rand::distributions::BernoulliError),

    #[error("invalid sample rate {0} Hz; must be positive and finite")]
    SampleRate(f64),

    #[error("segment {index} has invalid duration {duration_s} s; must be finite and not negative")]
    SegmentDuration { index: usize, duration_s: f64 },

    #[error("segment {index} ends past the largest representable timestamp")]
    TimelineOverflow { index: usize },

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error("failed to start engine worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("engine worker is no longer running")]
    WorkerGone,

    #[error("engine worker panicked")]
    WorkerPanicked,
}
