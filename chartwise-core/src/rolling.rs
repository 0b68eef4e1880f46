//! Rolling-window statistics shared by every indicator.
//!
//! Convention: strict warm-up. A trailing-window statistic over `window`
//! values is `f64::NAN` at positions `< window - 1` and wherever its window
//! contains a NaN input. Exponential and Wilder smoothing follow the same
//! rule: nothing is published until `window` defined inputs have been seen.
//!
//! Every function returns a vector of the same length as its input.

/// Rolling arithmetic mean over a trailing window.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Rolling sum over a trailing window.
pub fn rolling_sum(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().sum::<f64>())
}

/// Rolling population standard deviation (divide by N).
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, population_std)
}

/// Rolling maximum over a trailing window.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Rolling minimum over a trailing window.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Rolling mean absolute deviation around the window mean.
pub fn rolling_mean_abs_deviation(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        w.iter().map(|v| (v - mean).abs()).sum::<f64>() / w.len() as f64
    })
}

/// Population standard deviation of a slice. Empty slice → 0.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    variance.sqrt()
}

/// Apply `f` to every full trailing window that contains no NaN.
///
/// Each window is reduced from scratch rather than with a running sum, so
/// identical windows always produce bit-identical results.
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
        let slice = &values[(i + 1 - window)..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = f(slice);
    }

    result
}

/// Exponential moving average with `alpha = 2 / (span + 1)`.
///
/// The recursion is seeded with the first defined input
/// (`ema[start] = x[start]`) and runs over every later value, but outputs are
/// published only from `start + span - 1`. Leading NaNs are skipped; a NaN
/// after the seed taints everything that follows.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if span == 0 {
        return result;
    }

    let start = match values.iter().position(|v| !v.is_nan()) {
        Some(idx) => idx,
        None => return result,
    };

    let alpha = 2.0 / (span as f64 + 1.0);
    let publish_from = start + span - 1;
    let mut prev = values[start];

    if publish_from == start {
        result[start] = prev;
    }

    for i in (start + 1)..n {
        if values[i].is_nan() {
            return result;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        if i >= publish_from {
            result[i] = prev;
        }
    }

    result
}

/// Wilder smoothing (recursive average with weight `1 / period`).
///
/// Seed: mean of the first `period` consecutive defined values. Leading NaNs
/// are skipped; a NaN after the seed taints everything that follows.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    let start = match values.iter().position(|v| !v.is_nan()) {
        Some(idx) => idx,
        None => return result,
    };

    let seed_end = start + period;
    if seed_end > n {
        return result;
    }

    let seed_window = &values[start..seed_end];
    if seed_window.iter().any(|v| v.is_nan()) {
        return result;
    }

    let mut prev = seed_window.iter().sum::<f64>() / period as f64;
    result[seed_end - 1] = prev;

    let alpha = 1.0 / period as f64;
    for i in seed_end..n {
        if values[i].is_nan() {
            return result;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = prev;
    }

    result
}

/// Shift a series forward by `periods`: `out[t] = values[t - periods]`.
pub fn lag(values: &[f64], periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in periods..n {
        result[i] = values[i - periods];
    }
    result
}
