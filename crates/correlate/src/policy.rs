//! Extremum selection policies shared by both reducers.

use ndarray::ArrayView1;

/// How the teleconnection value of a location is chosen from its
/// correlation row, and how it is reported.
///
/// The variants are not interchangeable: `MagnitudeOfMinimum` reports the
/// strength of the most negative edge, while `MaximumMagnitude` may pick a
/// strongly positive partner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtremumPolicy {
    /// Most negative coefficient, sign kept.
    #[default]
    SignedMinimum,
    /// Most negative coefficient, reported as its absolute value.
    MagnitudeOfMinimum,
    /// Coefficient with the largest absolute value, reported as `|r|`.
    MaximumMagnitude,
}

impl ExtremumPolicy {
    /// Selection key; the candidate with the smallest key wins.
    fn key(self, r: f64) -> f64 {
        match self {
            Self::SignedMinimum | Self::MagnitudeOfMinimum => r,
            Self::MaximumMagnitude => -r.abs(),
        }
    }

    /// Reported value for a selected coefficient.
    pub fn report(self, r: f64) -> f64 {
        match self {
            Self::SignedMinimum => r,
            Self::MagnitudeOfMinimum | Self::MaximumMagnitude => r.abs(),
        }
    }

    /// Threshold predicate for a reported value.
    ///
    /// Signed values pass when `value <= threshold`. Magnitudes pass when
    /// `value >= |threshold|`, so the default threshold of -0.5 keeps edges
    /// of strength 0.5 or more under every policy. NaN never passes.
    pub fn passes(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::SignedMinimum => value <= threshold,
            Self::MagnitudeOfMinimum | Self::MaximumMagnitude => value >= threshold.abs(),
        }
    }
}

/// What to do when several partners share the extremal value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TiePolicy {
    /// Keep the first candidate along the outer axis, then the inner axis
    /// (the smallest linear id).
    #[default]
    FirstMatch,
    /// Keep every tied candidate.
    ReportAll,
    /// Keep no partner and flag the origin as ambiguous.
    FlagAmbiguous,
}

/// Extremum and tie policies applied by a reducer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReductionPolicy {
    extremum: ExtremumPolicy,
    ties: TiePolicy,
}

impl ReductionPolicy {
    /// Create a policy from its two parts.
    pub fn new(extremum: ExtremumPolicy, ties: TiePolicy) -> Self {
        Self { extremum, ties }
    }

    /// Set the extremum policy.
    pub fn with_extremum(mut self, extremum: ExtremumPolicy) -> Self {
        self.extremum = extremum;
        self
    }

    /// Set the tie policy.
    pub fn with_ties(mut self, ties: TiePolicy) -> Self {
        self.ties = ties;
        self
    }

    /// Returns the extremum policy.
    pub fn extremum(&self) -> ExtremumPolicy {
        self.extremum
    }

    /// Returns the tie policy.
    pub fn ties(&self) -> TiePolicy {
        self.ties
    }
}

/// The reduced correlation row of one origin location.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremum {
    /// Linear id of the origin location.
    pub origin: usize,
    /// Reported teleconnection value, NaN when no partner had a finite
    /// coefficient.
    pub value: f64,
    /// Selected partner ids; empty when there is no candidate or the
    /// extremum was flagged ambiguous.
    pub partners: Vec<usize>,
    /// `true` when several candidates tied and [`TiePolicy::FlagAmbiguous`]
    /// suppressed them.
    pub ambiguous: bool,
}

impl Extremum {
    /// First selected partner, if any.
    pub fn partner(&self) -> Option<usize> {
        self.partners.first().copied()
    }
}

/// Reduce one correlation row to its extremum.
///
/// The origin's own entry and NaN entries are skipped. Candidates are every
/// remaining location whose selection key equals the best key exactly.
pub fn select_extremum(row: ArrayView1<'_, f64>, origin: usize, policy: &ReductionPolicy) -> Extremum {
    let mut best = f64::INFINITY;
    let mut best_r = f64::NAN;
    let mut candidates: Vec<usize> = Vec::new();

    for (j, &r) in row.iter().enumerate() {
        if j == origin || r.is_nan() {
            continue;
        }
        let key = policy.extremum.key(r);
        if key < best {
            best = key;
            best_r = r;
            candidates.clear();
            candidates.push(j);
        } else if key == best {
            candidates.push(j);
        }
    }

    let value = policy.extremum.report(best_r);
    let (partners, ambiguous) = match (candidates.len(), policy.ties) {
        (0 | 1, _) => (candidates, false),
        (_, TiePolicy::FirstMatch) => (vec![candidates[0]], false),
        (_, TiePolicy::ReportAll) => (candidates, false),
        (_, TiePolicy::FlagAmbiguous) => (Vec::new(), true),
    };

    Extremum {
        origin,
        value,
        partners,
        ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn policy(extremum: ExtremumPolicy, ties: TiePolicy) -> ReductionPolicy {
        ReductionPolicy::new(extremum, ties)
    }

    #[test]
    fn signed_minimum_skips_self() {
        // Self entry (index 0) is the smallest but must be ignored.
        let row = array![-2.0, 0.3, -0.4, 0.9];
        let e = select_extremum(row.view(), 0, &ReductionPolicy::default());
        assert_eq!(e.partners, vec![2]);
        assert_eq!(e.value, -0.4);
        assert!(!e.ambiguous);
    }

    #[test]
    fn magnitude_of_minimum_reports_abs() {
        let row = array![1.0, 0.95, -0.4];
        let e = select_extremum(
            row.view(),
            0,
            &policy(ExtremumPolicy::MagnitudeOfMinimum, TiePolicy::FirstMatch),
        );
        assert_eq!(e.partners, vec![2]);
        assert_eq!(e.value, 0.4);
    }

    #[test]
    fn maximum_magnitude_can_pick_positive() {
        let row = array![1.0, 0.95, -0.4];
        let e = select_extremum(
            row.view(),
            0,
            &policy(ExtremumPolicy::MaximumMagnitude, TiePolicy::FirstMatch),
        );
        assert_eq!(e.partners, vec![1]);
        assert_eq!(e.value, 0.95);
    }

    #[test]
    fn nan_entries_are_skipped() {
        let row = array![1.0, f64::NAN, 0.2, f64::NAN];
        let e = select_extremum(row.view(), 0, &ReductionPolicy::default());
        assert_eq!(e.partners, vec![2]);
        assert_eq!(e.value, 0.2);
    }

    #[test]
    fn all_nan_gives_no_partner() {
        let row = array![1.0, f64::NAN, f64::NAN];
        let e = select_extremum(row.view(), 0, &ReductionPolicy::default());
        assert!(e.partners.is_empty());
        assert!(e.value.is_nan());
        assert!(!e.ambiguous);
        assert_eq!(e.partner(), None);
    }

    #[test]
    fn ties_first_match() {
        let row = array![-0.7, 1.0, 0.1, -0.7];
        let e = select_extremum(row.view(), 1, &ReductionPolicy::default());
        assert_eq!(e.partners, vec![0]);
        assert_eq!(e.value, -0.7);
    }

    #[test]
    fn ties_report_all() {
        let row = array![-0.7, 1.0, 0.1, -0.7];
        let e = select_extremum(
            row.view(),
            1,
            &policy(ExtremumPolicy::SignedMinimum, TiePolicy::ReportAll),
        );
        assert_eq!(e.partners, vec![0, 3]);
    }

    #[test]
    fn ties_flag_ambiguous() {
        let row = array![-0.7, 1.0, 0.1, -0.7];
        let e = select_extremum(
            row.view(),
            1,
            &policy(ExtremumPolicy::SignedMinimum, TiePolicy::FlagAmbiguous),
        );
        assert!(e.partners.is_empty());
        assert!(e.ambiguous);
        assert_eq!(e.value, -0.7);
    }

    #[test]
    fn magnitude_ties_across_sign() {
        let row = array![1.0, 0.6, -0.6];
        let e = select_extremum(
            row.view(),
            0,
            &policy(ExtremumPolicy::MaximumMagnitude, TiePolicy::ReportAll),
        );
        assert_eq!(e.partners, vec![1, 2]);
        assert_eq!(e.value, 0.6);
    }

    #[test]
    fn passes_is_policy_aware() {
        assert!(ExtremumPolicy::SignedMinimum.passes(-0.6, -0.5));
        assert!(!ExtremumPolicy::SignedMinimum.passes(-0.4, -0.5));
        assert!(ExtremumPolicy::MagnitudeOfMinimum.passes(0.6, -0.5));
        assert!(!ExtremumPolicy::MaximumMagnitude.passes(0.4, -0.5));
        assert!(!ExtremumPolicy::SignedMinimum.passes(f64::NAN, -0.5));
        assert!(!ExtremumPolicy::MaximumMagnitude.passes(f64::NAN, -0.5));
    }

    #[test]
    fn builder_methods() {
        let p = ReductionPolicy::default()
            .with_extremum(ExtremumPolicy::MaximumMagnitude)
            .with_ties(TiePolicy::ReportAll);
        assert_eq!(p.extremum(), ExtremumPolicy::MaximumMagnitude);
        assert_eq!(p.ties(), TiePolicy::ReportAll);
        assert_eq!(ReductionPolicy::default().ties(), TiePolicy::FirstMatch);
    }
}
