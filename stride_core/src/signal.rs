// stride_core/src/signal.rs

use crate::types::Vector3;

/// Per-axis exponential moving average over raw accelerometer readings.
///
/// `filtered = k * filtered_prev + (1 - k) * raw`, where `k` is the smoothing
/// factor. The filter starts at zero, so the first few outputs ramp up toward
/// the true reading. Gyroscope data never passes through here.
#[derive(Debug, Clone, Default)]
pub struct SignalConditioner {
    filtered: Vector3,
}

impl SignalConditioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `raw` into the running average and returns the new filtered value.
    pub fn condition(&mut self, raw: &Vector3, smoothing_factor: f64) -> Vector3 {
        self.filtered = self.filtered * smoothing_factor + raw * (1.0 - smoothing_factor);
        self.filtered
    }

    /// The most recent filtered value.
    pub fn filtered(&self) -> Vector3 {
        self.filtered
    }

    pub fn reset(&mut self) {
        self.filtered = Vector3::zeros();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_first_output_is_weighted_toward_zero() {
        let mut conditioner = SignalConditioner::new();
        let out = conditioner.condition(&Vector3::new(10.0, -5.0, 1.0), 0.8);
        assert_abs_diff_eq!(out.x, 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(out.y, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(out.z, 0.2, epsilon = EPSILON);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut conditioner = SignalConditioner::new();
        let raw = Vector3::new(0.3, -0.1, 9.8);
        for _ in 0..200 {
            conditioner.condition(&raw, 0.8);
        }
        assert_abs_diff_eq!(conditioner.filtered(), raw, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_smoothing_passes_raw_through() {
        let mut conditioner = SignalConditioner::new();
        conditioner.condition(&Vector3::new(4.0, 4.0, 4.0), 0.0);
        let raw = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(conditioner.condition(&raw, 0.0), raw);
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut conditioner = SignalConditioner::new();
        conditioner.condition(&Vector3::new(1.0, 1.0, 1.0), 0.5);
        conditioner.reset();
        assert_eq!(conditioner.filtered(), Vector3::zeros());
    }
}
