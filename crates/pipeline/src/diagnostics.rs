//! Per-origin diagnostic seam for the per-pixel engine.

use ndarray::ArrayView2;
use teleconnect_correlate::{CorrelateError, Extremum, MapObserver};
use teleconnect_grid::{Axis, GeoPoint, GridIndex};

/// Boxed error returned by a diagnostic sink.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// One origin's correlation map, ready to render.
#[derive(Debug)]
pub struct DiagnosticFrame<'a> {
    /// 1-based sequence number, `origin + 1`.
    pub sequence: usize,
    /// Linear id of the origin.
    pub origin: usize,
    /// Origin coordinates.
    pub origin_point: GeoPoint,
    /// Coordinates of every selected partner.
    pub partner_points: Vec<GeoPoint>,
    /// Reported teleconnection value.
    pub value: f64,
    /// Longitude axis of the map.
    pub lon: &'a Axis,
    /// Latitude axis of the map.
    pub lat: &'a Axis,
    /// Correlation of the origin with every location, `(n_lon, n_lat)`.
    pub map: ArrayView2<'a, f64>,
}

/// Receives diagnostic frames from worker threads.
///
/// Frames arrive in no particular order; the sequence number identifies
/// them. Any error aborts the run.
pub trait DiagnosticSink: Sync {
    fn render(&self, frame: &DiagnosticFrame<'_>) -> Result<(), SinkError>;
}

/// Optional collaborators of a run.
#[derive(Clone, Copy, Default)]
pub struct Hooks<'a> {
    diagnostics: Option<&'a dyn DiagnosticSink>,
}

impl<'a> Hooks<'a> {
    /// No collaborators.
    pub fn none() -> Self {
        Self::default()
    }

    /// Attach a diagnostic sink; it is only called when the run's config
    /// enables diagnostics.
    pub fn with_diagnostics(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    pub(crate) fn diagnostics(&self) -> Option<&'a dyn DiagnosticSink> {
        self.diagnostics
    }
}

impl std::fmt::Debug for Hooks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

/// Adapts a [`DiagnosticSink`] to the reducer's [`MapObserver`] seam.
pub(crate) struct SinkObserver<'a> {
    sink: &'a dyn DiagnosticSink,
    grid: &'a GridIndex,
}

impl<'a> SinkObserver<'a> {
    pub(crate) fn new(sink: &'a dyn DiagnosticSink, grid: &'a GridIndex) -> Self {
        Self { sink, grid }
    }

    fn point(&self, origin: usize, id: usize) -> Result<GeoPoint, CorrelateError> {
        self.grid.point(id).ok_or_else(|| CorrelateError::Observer {
            origin,
            reason: format!("location {id} is not on the grid"),
        })
    }
}

impl MapObserver for SinkObserver<'_> {
    fn observe(
        &self,
        origin: usize,
        map: &[f64],
        extremum: &Extremum,
    ) -> Result<(), CorrelateError> {
        let axes = self.grid.axes();
        let (lon, lat) = (&axes[0], &axes[1]);
        let map = ArrayView2::from_shape((lon.len(), lat.len()), map).map_err(|e| {
            CorrelateError::Observer {
                origin,
                reason: e.to_string(),
            }
        })?;
        let partner_points = extremum
            .partners
            .iter()
            .map(|&p| self.point(origin, p))
            .collect::<Result<Vec<_>, _>>()?;

        let frame = DiagnosticFrame {
            sequence: origin + 1,
            origin,
            origin_point: self.point(origin, origin)?,
            partner_points,
            value: extremum.value,
            lon,
            lat,
            map,
        };
        self.sink
            .render(&frame)
            .map_err(|e| CorrelateError::Observer {
                origin,
                reason: e.to_string(),
            })
    }
}
