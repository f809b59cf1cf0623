//! Rolling-window helpers over plain `f64` slices.
//!
//! Used by strategies that need indicator math on series other than the
//! close (volume ratios, rolling highs/lows, z-scores). Output is the same
//! length as the input; indices with fewer than `window` values of history
//! (or any NaN inside the window) are `f64::NAN`.

/// Rolling mean with a full-window requirement.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().sum::<f64>() / w.len() as f64
    })
}

/// Rolling sample standard deviation (ddof = 1).
///
/// A window of 1 has no variance estimate and yields NaN, matching the
/// sample-std convention used throughout the metrics layer.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        if w.len() < 2 {
            return f64::NAN;
        }
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let variance =
            w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (w.len() - 1) as f64;
        variance.sqrt()
    })
}

/// Rolling maximum.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Rolling minimum.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

fn rolling_apply<F>(values: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }
    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = f(slice);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn mean_basic() {
        let result = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(result[0].is_nan());
        assert_approx(result[1], 1.5, DEFAULT_EPSILON);
        assert_approx(result[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn std_is_sample_std() {
        // Sample std of [1, 2, 3] = 1.0
        let result = rolling_std(&[1.0, 2.0, 3.0], 3);
        assert_approx(result[2], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn std_window_one_is_nan() {
        let result = rolling_std(&[1.0, 2.0], 1);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn max_min_basic() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        let max = rolling_max(&values, 3);
        let min = rolling_min(&values, 3);
        assert_approx(max[2], 4.0, DEFAULT_EPSILON);
        assert_approx(min[2], 1.0, DEFAULT_EPSILON);
        assert_approx(max[4], 5.0, DEFAULT_EPSILON);
        assert_approx(min[4], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn nan_in_window_propagates() {
        let result = rolling_mean(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn window_larger_than_series() {
        let result = rolling_mean(&[1.0, 2.0], 5);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
