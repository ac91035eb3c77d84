//! Small statistics helpers.

/// Arithmetic mean, or `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median, or `None` for an empty slice.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let upper = sorted.len().checked_div(2)?;
    if upper * 2 == sorted.len() {
        let low = sorted.get(upper.checked_sub(1)?)?;
        let high = sorted.get(upper)?;
        Some((low + high) / 2.0)
    } else {
        sorted.get(upper).copied()
    }
}

/// Ordinary least-squares slope of `values` against indices `0..n`.
///
/// Returns `None` with fewer than two points.
#[must_use]
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let count = values.len() as f64;
    let x_mean = (count - 1.0) / 2.0;
    let y_mean = mean(values)?;
    let (numerator, denominator) = values.iter().enumerate().fold(
        (0.0, 0.0),
        |(numerator, denominator), (index, value)| {
            let dx = index as f64 - x_mean;
            (numerator + dx * (value - y_mean), denominator + dx * dx)
        },
    );
    Some(numerator / denominator)
}
