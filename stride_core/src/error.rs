// stride_core/src/error.rs

use thiserror::Error;

/// Reasons the engine refuses a sample. A refused sample leaves every piece of
/// engine state exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    /// A component of the accelerometer or gyroscope vector is NaN or infinite.
    #[error("sample rejected: {field} contains a non-finite component")]
    NonFiniteSample { field: &'static str },

    /// The sample is older than the last one the engine accepted.
    #[error("sample rejected: timestamp {received_ms} ms precedes last accepted {previous_ms} ms")]
    TimestampRegression { previous_ms: u64, received_ms: u64 },
}
