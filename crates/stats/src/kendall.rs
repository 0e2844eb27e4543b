//! Kendall tau-b rank correlation.
//!
//! Uses Knight's (1966) algorithm: sort the pairs by `(x, y)`, count tie
//! groups, then count discordant pairs as the inversions of the `y` sequence
//! with a merge sort. Runs in O(n log n).

use std::cmp::Ordering;

/// Kendall tau-b correlation between `x` and `y`, corrected for ties.
///
/// Returns NaN when any sample is NaN, when fewer than 2 samples are given,
/// or when either series is fully tied (e.g. constant), since the
/// coefficient is undefined there. The result is clipped to `[-1, 1]`.
///
/// # Panics
///
/// Panics if `x` and `y` differ in length.
pub fn kendall_tau_b(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "kendall_tau_b: series must have equal length");

    let n = x.len();
    if n < 2 || x.iter().chain(y.iter()).any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    pairs.sort_by(|a, b| cmp_f64(a.0, b.0).then_with(|| cmp_f64(a.1, b.1)));

    let total = (n as u64) * (n as u64 - 1) / 2;
    let x_ties = tie_pairs(&pairs, |a, b| a.0 == b.0);
    let joint_ties = tie_pairs(&pairs, |a, b| a.0 == b.0 && a.1 == b.1);

    let mut ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let mut scratch = vec![0.0; n];
    let discordant = count_inversions(&mut ys, &mut scratch);
    let y_ties = tie_pairs(&ys, |a, b| a == b);

    if x_ties == total || y_ties == total {
        return f64::NAN;
    }

    let con_minus_dis =
        total as f64 - x_ties as f64 - y_ties as f64 + joint_ties as f64 - 2.0 * discordant as f64;
    let tau = con_minus_dis / ((total - x_ties) as f64).sqrt() / ((total - y_ties) as f64).sqrt();
    tau.clamp(-1.0, 1.0)
}

/// Ordering for NaN-free floats; `-0.0` and `0.0` compare equal.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Number of tied pairs `k * (k - 1) / 2` summed over runs of equal
/// neighbours in sorted data.
fn tie_pairs<T>(sorted: &[T], same: impl Fn(&T, &T) -> bool) -> u64 {
    let mut ties = 0u64;
    let mut run = 1u64;
    for w in sorted.windows(2) {
        if same(&w[0], &w[1]) {
            run += 1;
        } else {
            ties += run * (run - 1) / 2;
            run = 1;
        }
    }
    ties + run * (run - 1) / 2
}

/// Sorts `values` ascending and returns the number of strict inversions
/// (`i < j` with `values[i] > values[j]`). Equal values are not inversions.
fn count_inversions(values: &mut [f64], scratch: &mut [f64]) -> u64 {
    let n = values.len();
    if n < 2 {
        return 0;
    }
    let mid = n / 2;
    let mut inversions = count_inversions(&mut values[..mid], &mut scratch[..mid])
        + count_inversions(&mut values[mid..], &mut scratch[mid..]);

    scratch[..n].copy_from_slice(values);
    let (left, right) = scratch[..n].split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in values.iter_mut() {
        if j >= right.len() || (i < left.len() && left[i] <= right[j]) {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
            inversions += (left.len() - i) as u64;
        }
    }
    inversions
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tau_with_ties_matches_reference() {
        // Reference value from a brute-force O(n^2) tau-b.
        let x = [12.0, 2.0, 1.0, 12.0, 2.0];
        let y = [1.0, 4.0, 7.0, 1.0, 0.0];
        assert_relative_eq!(kendall_tau_b(&x, &y), -0.47140452079103173, epsilon = 1e-12);
    }

    #[test]
    fn tau_with_y_ties() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [5.0, 6.0, 7.0, 8.0, 7.0];
        assert_relative_eq!(kendall_tau_b(&x, &y), 0.7378647873726218, epsilon = 1e-12);
    }

    #[test]
    fn tau_with_joint_ties() {
        let x = [1.0, 1.0, 2.0, 2.0, 3.0];
        let y = [1.0, 2.0, 1.0, 2.0, 3.0];
        assert_relative_eq!(kendall_tau_b(&x, &y), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn tau_perfect_discordance() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(kendall_tau_b(&x, &y), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn tau_is_invariant_under_monotone_transform() {
        let x = [0.3, 1.2, -0.7, 2.5, 0.9, -1.4];
        let y: Vec<f64> = x.iter().map(|v: &f64| v.exp()).collect();
        assert_relative_eq!(kendall_tau_b(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn tau_constant_series_is_nan() {
        let x = [1.0, 2.0, 3.0];
        let y = [7.0, 7.0, 7.0];
        assert!(kendall_tau_b(&x, &y).is_nan());
    }

    #[test]
    fn tau_nan_sample_is_nan() {
        let x = [1.0, 2.0, f64::NAN];
        let y = [1.0, 2.0, 3.0];
        assert!(kendall_tau_b(&x, &y).is_nan());
    }

    #[test]
    fn tau_single_sample_is_nan() {
        assert!(kendall_tau_b(&[1.0], &[1.0]).is_nan());
    }

    #[test]
    fn inversions_counts_strict_only() {
        let mut v = [3.0, 1.0, 2.0, 2.0];
        let mut scratch = [0.0; 4];
        // (3,1), (3,2), (3,2)
        assert_eq!(count_inversions(&mut v, &mut scratch), 3);
        assert_eq!(v, [1.0, 2.0, 2.0, 3.0]);
    }

    #[test]
    fn tie_pairs_counts_runs() {
        // runs: [1,1,1] -> 3, [2] -> 0, [4,4] -> 1
        assert_eq!(tie_pairs(&[1, 1, 1, 2, 4, 4], |a, b| a == b), 4);
    }
}
