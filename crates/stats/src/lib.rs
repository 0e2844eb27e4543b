//! Statistical kernels shared by the teleconnection engines.
//!
//! Every function here is NaN-propagating: a missing sample yields an
//! undefined (`NaN`) result rather than an error, so invariant or masked grid
//! cells flow through the reducers without special-casing.

mod kendall;

pub use kendall::kendall_tau_b;

/// Arithmetic mean of a slice. Returns NaN if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns NaN if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns NaN if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Returns `true` when every sample equals the first.
///
/// Empty slices and slices holding NaN are not constant. The check is exact,
/// so it also catches series such as `[0.1; n]` whose computed variance is a
/// rounding residue rather than zero.
pub fn is_constant(data: &[f64]) -> bool {
    match data.split_first() {
        Some((&first, rest)) => !first.is_nan() && rest.iter().all(|&x| x == first),
        None => false,
    }
}

/// Pearson correlation coefficient of two equally long series.
///
/// Returns NaN when either series contains NaN, when fewer than 2 samples are
/// given, or when either series is constant (zero variance). The result is
/// clipped to `[-1, 1]`.
///
/// # Panics
///
/// Panics if `x` and `y` differ in length.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(
        x.len(),
        y.len(),
        "pearson_correlation: series must have equal length"
    );
    if x.len() < 2 || is_constant(x) || is_constant(y) {
        return f64::NAN;
    }

    let mx = mean(x);
    let my = mean(y);

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }

    (sum_xy / denom).clamp(-1.0, 1.0)
}
