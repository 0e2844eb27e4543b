//! Per-pixel Kendall rank reduction.

use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;
use tracing::info;

use crate::error::CorrelateError;
use crate::policy::{Extremum, ReductionPolicy, select_extremum};
use crate::reduction::{CorrelationReducer, Reduction};

/// Receives each origin's full correlation map as soon as it is reduced.
///
/// Called from worker threads, in no particular order. An error aborts the
/// whole reduction.
pub trait MapObserver: Sync {
    /// Inspect the map of `origin`, indexed by linear location id.
    fn observe(
        &self,
        origin: usize,
        map: &[f64],
        extremum: &Extremum,
    ) -> Result<(), CorrelateError>;
}

/// Reducer that computes one Kendall τ-b map per origin location.
///
/// Each origin is independent, so origins are processed in parallel. Only
/// the map being reduced is held per worker unless `retain_maps` is set.
#[derive(Clone, Copy, Default)]
pub struct RankReducer<'a> {
    retain_maps: bool,
    progress: bool,
    observer: Option<&'a dyn MapObserver>,
}

impl std::fmt::Debug for RankReducer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankReducer")
            .field("retain_maps", &self.retain_maps)
            .field("progress", &self.progress)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl<'a> RankReducer<'a> {
    /// Create a reducer that keeps no maps and logs no progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every per-origin map in the output.
    pub fn with_retain_maps(mut self, retain: bool) -> Self {
        self.retain_maps = retain;
        self
    }

    /// Log progress roughly every tenth of the origins.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Hand every map to `observer` after it is reduced.
    pub fn with_observer(mut self, observer: &'a dyn MapObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    fn origin_map(columns: &[Vec<f64>], origin: usize) -> Vec<f64> {
        let reference = &columns[origin];
        columns
            .iter()
            .map(|other| teleconnect_stats::kendall_tau_b(reference, other))
            .collect()
    }
}

impl CorrelationReducer for RankReducer<'_> {
    fn name(&self) -> &'static str {
        "rank"
    }

    #[tracing::instrument(skip(self, series, policy), fields(n_times = series.nrows(), n_locations = series.ncols()))]
    fn reduce(
        &self,
        series: ArrayView2<'_, f64>,
        policy: &ReductionPolicy,
    ) -> Result<Reduction, CorrelateError> {
        let n_locations = series.ncols();
        if n_locations == 0 {
            return Err(CorrelateError::NoLocations);
        }

        let columns: Vec<Vec<f64>> = series.columns().into_iter().map(|c| c.to_vec()).collect();
        let completed = AtomicUsize::new(0);
        let step = (n_locations / 10).max(1);

        let results: Vec<(Extremum, Option<Vec<f64>>)> = (0..n_locations)
            .into_par_iter()
            .map(|origin| {
                let map = Self::origin_map(&columns, origin);
                let extremum = select_extremum(ArrayView1::from(&map[..]), origin, policy);

                if let Some(observer) = self.observer {
                    observer.observe(origin, &map, &extremum)?;
                }
                if self.progress {
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % step == 0 || done == n_locations {
                        info!(done, total = n_locations, "rank correlation progress");
                    }
                }

                Ok((extremum, self.retain_maps.then_some(map)))
            })
            .collect::<Result<_, CorrelateError>>()?;

        let mut extrema = Vec::with_capacity(n_locations);
        let mut maps = self
            .retain_maps
            .then(|| Array2::<f64>::from_elem((n_locations, n_locations), f64::NAN));
        for (extremum, map) in results {
            if let (Some(maps), Some(map)) = (maps.as_mut(), map) {
                maps.row_mut(extremum.origin)
                    .assign(&ArrayView1::from(&map[..]));
            }
            extrema.push(extremum);
        }

        Ok(Reduction::new(extrema, maps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::sync::Mutex;

    fn series() -> Array2<f64> {
        // Columns: rising, falling, rising with noise, constant.
        array![
            [1.0, 9.0, 2.0, 4.0],
            [2.0, 8.0, 1.0, 4.0],
            [3.0, 7.0, 4.0, 4.0],
            [4.0, 6.0, 3.0, 4.0],
            [5.0, 5.0, 6.0, 4.0],
        ]
    }

    #[test]
    fn rising_and_falling_are_partners() {
        let reduction = RankReducer::new()
            .reduce(series().view(), &ReductionPolicy::default())
            .unwrap();
        let extrema = reduction.extrema();
        assert_eq!(extrema.len(), 4);
        assert_eq!(extrema[0].partner(), Some(1));
        assert_relative_eq!(extrema[0].value, -1.0, epsilon = 1e-12);
        assert_eq!(extrema[1].partner(), Some(0));
    }

    #[test]
    fn constant_series_has_no_partner() {
        let reduction = RankReducer::new()
            .reduce(series().view(), &ReductionPolicy::default())
            .unwrap();
        let constant = &reduction.extrema()[3];
        assert!(constant.value.is_nan());
        assert!(constant.partners.is_empty());
    }

    #[test]
    fn retained_maps_have_self_value() {
        let reduction = RankReducer::new()
            .with_retain_maps(true)
            .reduce(series().view(), &ReductionPolicy::default())
            .unwrap();
        let maps = reduction.maps().unwrap();
        assert_eq!(maps.dim(), (4, 4));
        for i in 0..3 {
            assert_relative_eq!(maps[[i, i]], 1.0, epsilon = 1e-12);
        }
        assert!(maps[[3, 3]].is_nan());
        assert_relative_eq!(maps[[0, 1]], maps[[1, 0]], epsilon = 1e-12);
    }

    #[test]
    fn two_location_anticorrelation() {
        let series = array![[1.0, 3.0], [2.0, 2.0], [3.0, 1.0]];
        let rank = RankReducer::new()
            .reduce(series.view(), &ReductionPolicy::default())
            .unwrap();
        assert_eq!(rank.extrema()[0].partner(), Some(1));
        assert_relative_eq!(rank.extrema()[0].value, -1.0, epsilon = 1e-12);
    }

    struct Recorder(Mutex<Vec<usize>>);

    impl MapObserver for Recorder {
        fn observe(
            &self,
            origin: usize,
            map: &[f64],
            _extremum: &Extremum,
        ) -> Result<(), CorrelateError> {
            assert_eq!(map.len(), 4);
            self.0.lock().unwrap().push(origin);
            Ok(())
        }
    }

    #[test]
    fn observer_sees_every_origin() {
        let recorder = Recorder(Mutex::new(Vec::new()));
        RankReducer::new()
            .with_observer(&recorder)
            .with_progress(true)
            .reduce(series().view(), &ReductionPolicy::default())
            .unwrap();
        let mut seen = recorder.0.into_inner().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    struct Failing;

    impl MapObserver for Failing {
        fn observe(
            &self,
            origin: usize,
            _map: &[f64],
            _extremum: &Extremum,
        ) -> Result<(), CorrelateError> {
            Err(CorrelateError::Observer {
                origin,
                reason: "refused".to_string(),
            })
        }
    }

    #[test]
    fn observer_failure_aborts() {
        let err = RankReducer::new()
            .with_observer(&Failing)
            .reduce(series().view(), &ReductionPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CorrelateError::Observer { .. }));
    }
}
