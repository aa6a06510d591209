// stride_core/src/stats.rs

//! Window statistics shared by the classifier, the direction estimator and
//! the stationary detector.

use num_traits::Float;

/// Arithmetic mean, or `None` for an empty window.
pub fn mean<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let n = T::from(values.len())?;
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    Some(sum / n)
}

/// Population variance (divides by `n`), or `None` for an empty window.
pub fn variance<T: Float>(values: &[T]) -> Option<T> {
    let mu = mean(values)?;
    let n = T::from(values.len())?;
    let sum_sq = values.iter().fold(T::zero(), |acc, &v| {
        let d = v - mu;
        acc + d * d
    });
    Some(sum_sq / n)
}

/// Ordinary least-squares slope of `values` against their index `0..n`.
///
/// Returns `None` when fewer than two points are given.
pub fn ols_slope<T: Float>(values: &[T]) -> Option<T> {
    if values.len() < 2 {
        return None;
    }
    let n = T::from(values.len())?;

    let (mut sum_x, mut sum_y) = (T::zero(), T::zero());
    let (mut sum_xy, mut sum_xx) = (T::zero(), T::zero());
    for (i, &y) in values.iter().enumerate() {
        let x = T::from(i)?;
        sum_x = sum_x + x;
        sum_y = sum_y + y;
        sum_xy = sum_xy + x * y;
        sum_xx = sum_xx + x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == T::zero() {
        return None;
    }
    Some((n * sum_xy - sum_x * sum_y) / denominator)
}
