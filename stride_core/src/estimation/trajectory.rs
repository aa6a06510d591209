// stride_core/src/estimation/trajectory.rs

use crate::types::{TrajectoryPoint, Vector3};
use std::collections::VecDeque;

/// How many dead-reckoned points are retained.
pub const TRAJECTORY_CAPACITY: usize = 1000;

/// Capacity-capped, chronologically ordered position history.
#[derive(Debug, Clone)]
pub struct Trajectory {
    points: VecDeque<TrajectoryPoint>,
    capacity: usize,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::with_capacity(TRAJECTORY_CAPACITY)
    }
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a point, dropping the oldest one once the cap is exceeded.
    pub fn push(&mut self, position: Vector3, timestamp_ms: u64) {
        self.points.push_back(TrajectoryPoint {
            position,
            timestamp_ms,
        });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn latest(&self) -> Option<&TrajectoryPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrajectoryPoint> + '_ {
        self.points.iter()
    }

    /// An owned copy of the retained points, oldest first.
    pub fn to_vec(&self) -> Vec<TrajectoryPoint> {
        self.points.iter().copied().collect()
    }

    /// Sum of the horizontal (x/y) segment lengths across the retained points.
    pub fn path_length(&self) -> f64 {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| (b.position.xy() - a.position.xy()).norm())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cap_keeps_most_recent_points() {
        let mut trajectory = Trajectory::new();
        for i in 0..1500_u64 {
            trajectory.push(Vector3::new(i as f64, 0.0, 0.0), i);
        }

        assert_eq!(trajectory.len(), TRAJECTORY_CAPACITY);
        let points = trajectory.to_vec();
        assert_eq!(points.first().unwrap().timestamp_ms, 500);
        assert_eq!(points.last().unwrap().timestamp_ms, 1499);
        assert!(points.windows(2).all(|w| w[0].timestamp_ms < w[1].timestamp_ms));
    }

    #[test]
    fn test_path_length_ignores_vertical_motion() {
        let mut trajectory = Trajectory::with_capacity(10);
        trajectory.push(Vector3::new(0.0, 0.0, 0.0), 0);
        trajectory.push(Vector3::new(3.0, 4.0, 7.0), 10);
        trajectory.push(Vector3::new(3.0, 4.0, -2.0), 20);
        trajectory.push(Vector3::new(3.0, 5.0, 0.0), 30);

        assert_abs_diff_eq!(trajectory.path_length(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_path_length_of_short_trajectory_is_zero() {
        let mut trajectory = Trajectory::new();
        assert_eq!(trajectory.path_length(), 0.0);
        trajectory.push(Vector3::new(1.0, 1.0, 1.0), 0);
        assert_eq!(trajectory.path_length(), 0.0);
    }
}
