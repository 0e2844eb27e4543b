//! The teleconnection run: normalize, index, reduce, build paths, filter.

use ndarray::Array2;
use teleconnect_correlate::{CorrelationReducer, DenseReducer, RankReducer, Reduction};
use teleconnect_grid::{GridIndex, SpaceTimeField, normalize};
use teleconnect_paths::{PathBuilder, PathCollection};
use tracing::{debug, info, info_span, warn};

use crate::config::{Engine, TeleconnectionConfig};
use crate::diagnostics::{Hooks, SinkObserver};
use crate::error::PipelineError;
use crate::map::TeleconnectionMap;

/// Everything a run produces. Owns its data; nothing refers back to the
/// input field.
#[derive(Debug, Clone)]
pub struct TeleconnectionOutput {
    /// Per-location values and partners.
    pub map: TeleconnectionMap,
    /// Paths, threshold-filtered for the dense engine.
    pub paths: PathCollection,
    /// Retained per-origin maps, `(N origins, N locations)`, when requested
    /// from the per-pixel engine.
    pub maps: Option<Array2<f64>>,
}

/// Compute the teleconnection map and paths of `field`.
///
/// The field is normalized first, so callers may pass coordinates in any
/// order or range. The dense engine keeps only paths whose value passes the
/// configured threshold; the per-pixel engine keeps every path.
///
/// # Errors
///
/// Returns [`PipelineError`] on an invalid config, a degenerate grid, a
/// reducer failure (including a diagnostic sink error) or a path failure.
pub fn run(
    field: &SpaceTimeField,
    config: &TeleconnectionConfig,
    engine: Engine,
    hooks: Hooks<'_>,
) -> Result<TeleconnectionOutput, PipelineError> {
    config.validate()?;
    let _span = info_span!("run", %engine, variable = field.variable()).entered();

    let field = normalize(field)?;
    let grid = field.grid_index()?;
    let series = field.series_matrix();
    debug!(
        n_locations = grid.n_locations(),
        n_times = field.n_times(),
        "series matrix built"
    );

    let reduction = reduce(&series, &grid, config, engine, hooks)?;
    let (extrema, maps) = reduction.into_parts();

    let paths = PathBuilder::new(config.crs().clone()).build(&extrema, &grid)?;
    let n_built = paths.len();
    let paths = match engine {
        Engine::Dense => paths.filter_threshold(config.extremum(), config.threshold()),
        Engine::PerPixel => paths,
    };

    let map = TeleconnectionMap::from_extrema(grid, &extrema);
    info!(
        n_locations = extrema.len(),
        n_with_partner = map.n_with_partner(),
        n_ambiguous = map.n_ambiguous(),
        n_built,
        n_paths = paths.len(),
        "teleconnection run complete"
    );

    Ok(TeleconnectionOutput { map, paths, maps })
}

fn reduce(
    series: &Array2<f64>,
    grid: &GridIndex,
    config: &TeleconnectionConfig,
    engine: Engine,
    hooks: Hooks<'_>,
) -> Result<Reduction, PipelineError> {
    let policy = config.reduction_policy();
    match engine {
        Engine::Dense => {
            if config.retain_maps() {
                warn!("retain_maps is ignored by the dense engine");
            }
            let mut reducer = DenseReducer::new();
            if let Some(limit) = config.memory_limit() {
                reducer = reducer.with_memory_limit(limit);
            }
            Ok(reducer.reduce(series.view(), &policy)?)
        }
        Engine::PerPixel => {
            let observer = match (config.diagnostics(), hooks.diagnostics()) {
                (true, Some(sink)) => Some(SinkObserver::new(sink, grid)),
                (true, None) => {
                    warn!("diagnostics enabled but no sink attached");
                    None
                }
                (false, _) => None,
            };
            let mut reducer = RankReducer::new()
                .with_retain_maps(config.retain_maps())
                .with_progress(config.progress());
            if let Some(observer) = observer.as_ref() {
                reducer = reducer.with_observer(observer);
            }
            Ok(reducer.reduce(series.view(), &policy)?)
        }
    }
}
