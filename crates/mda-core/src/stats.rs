//! Small numeric helpers shared by the metric and narrative crates.
//!
//! Every function here is total: empty input, zero denominators and
//! non-finite intermediates collapse to 0.0 instead of NaN or infinity.

/// Divide, returning 0.0 when the denominator is zero or either side is not finite.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    let result = numerator / denominator;
    if result.is_finite() {
        result
    } else {
        0.0
    }
}

/// Compute the mean of a data slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Compute sample standard deviation.
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64;
    variance.sqrt()
}

/// Sample standard deviation as a percentage of the mean.
pub fn coefficient_of_variation(data: &[f64]) -> f64 {
    safe_div(std_dev(data), mean(data).abs()) * 100.0
}

/// Least-squares slope of `data` against its index (change per step).
pub fn linear_slope(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(data);
    let (num, den) = data.iter().enumerate().fold((0.0, 0.0), |(num, den), (i, y)| {
        let dx = i as f64 - x_mean;
        (num + dx * (y - y_mean), den + dx * dx)
    });
    safe_div(num, den)
}
