// stride_core/src/buffer.rs

use crate::types::Vector3;
use std::collections::VecDeque;

/// Bounded FIFO history of conditioned samples.
///
/// Acceleration, angular rate and timestamps are kept as three parallel
/// sequences that are pushed and evicted in lockstep, so index `i` refers to
/// the same sample in all three.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    capacity: usize,
    accel: VecDeque<Vector3>,
    gyro: VecDeque<Vector3>,
    timestamps: VecDeque<u64>,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            accel: VecDeque::new(),
            gyro: VecDeque::new(),
            timestamps: VecDeque::new(),
        }
    }

    /// Changes the capacity. Nothing is evicted until the next [`push`](Self::push).
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends one triple, then evicts the oldest triples until the buffer fits.
    pub fn push(&mut self, accel: Vector3, gyro: Vector3, timestamp_ms: u64) {
        self.accel.push_back(accel);
        self.gyro.push_back(gyro);
        self.timestamps.push_back(timestamp_ms);

        while self.accel.len() > self.capacity {
            self.accel.pop_front();
            self.gyro.pop_front();
            self.timestamps.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.accel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accel.is_empty()
    }

    pub fn clear(&mut self) {
        self.accel.clear();
        self.gyro.clear();
        self.timestamps.clear();
    }

    // --- Read-only accessors ---

    pub fn accel(&self) -> &VecDeque<Vector3> {
        &self.accel
    }

    pub fn gyro(&self) -> &VecDeque<Vector3> {
        &self.gyro
    }

    pub fn timestamps(&self) -> &VecDeque<u64> {
        &self.timestamps
    }

    pub fn latest_timestamp(&self) -> Option<u64> {
        self.timestamps.back().copied()
    }

    /// The last `k` accelerations, oldest first. Yields fewer when the buffer is shorter.
    pub fn recent_accel(&self, k: usize) -> impl Iterator<Item = &Vector3> + '_ {
        self.accel.iter().skip(self.accel.len().saturating_sub(k))
    }

    /// Euclidean norms of every buffered acceleration, oldest first.
    pub fn accel_magnitudes(&self) -> Vec<f64> {
        self.accel.iter().map(|a| a.norm()).collect()
    }

    /// Euclidean norms of the last `k` buffered accelerations, oldest first.
    pub fn recent_accel_magnitudes(&self, k: usize) -> Vec<f64> {
        self.recent_accel(k).map(|a| a.norm()).collect()
    }
}
