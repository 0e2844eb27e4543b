//! Ordered path records under one CRS.

use teleconnect_correlate::ExtremumPolicy;

use crate::crs::Crs;
use crate::record::PathRecord;

/// Path records in origin order, plus the CRS their geometry is declared in.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCollection {
    crs: Crs,
    records: Vec<PathRecord>,
}

impl PathCollection {
    pub(crate) fn new(crs: Crs, records: Vec<PathRecord>) -> Self {
        Self { crs, records }
    }

    /// CRS of every geometry in the collection.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// All records.
    pub fn records(&self) -> &[PathRecord] {
        &self.records
    }

    /// Iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, PathRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only records matching `predicate`, preserving order.
    pub fn filter(&self, mut predicate: impl FnMut(&PathRecord) -> bool) -> Self {
        Self {
            crs: self.crs.clone(),
            records: self
                .records
                .iter()
                .filter(|r| predicate(*r))
                .cloned()
                .collect(),
        }
    }

    /// Keep records whose value passes `threshold` under `policy`.
    ///
    /// See [`ExtremumPolicy::passes`] for the predicate.
    pub fn filter_threshold(&self, policy: ExtremumPolicy, threshold: f64) -> Self {
        self.filter(|r| policy.passes(r.value(), threshold))
    }
}

impl<'a> IntoIterator for &'a PathCollection {
    type Item = &'a PathRecord;
    type IntoIter = std::slice::Iter<'a, PathRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
