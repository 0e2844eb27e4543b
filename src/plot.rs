//! PNG rendering of per-origin diagnostic frames.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use teleconnect_pipeline::{DiagnosticFrame, DiagnosticSink, SinkError};
use tracing::debug;

const NAN_COLOR: RGBColor = RGBColor(200, 200, 200);
const NEGATIVE: RGBColor = RGBColor(33, 102, 172);
const POSITIVE: RGBColor = RGBColor(178, 24, 43);

/// Writes `fig_{sequence}.png` heat maps with the teleconnection line into a
/// directory that must already exist.
#[derive(Debug, Clone)]
pub struct PlotSink {
    dir: PathBuf,
    size: (u32, u32),
}

impl PlotSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            size: (800, 500),
        }
    }

    /// Figure path for a sequence number.
    pub fn figure_path(&self, sequence: usize) -> PathBuf {
        self.dir.join(format!("fig_{sequence}.png"))
    }

    fn draw(&self, path: &Path, frame: &DiagnosticFrame<'_>) -> Result<(), SinkError> {
        let lon_edges = cell_edges(frame.lon.values());
        let lat_edges = cell_edges(frame.lat.values());
        let (x0, x1) = span(&lon_edges);
        let (y0, y1) = span(&lat_edges);

        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        let cells = frame.map.indexed_iter().map(|((i, j), &r)| {
            Rectangle::new(
                [(lon_edges[i], lat_edges[j]), (lon_edges[i + 1], lat_edges[j + 1])],
                diverging(r).filled(),
            )
        });
        chart.draw_series(cells)?;

        let origin = (frame.origin_point.lon, frame.origin_point.lat);
        chart.draw_series(frame.partner_points.iter().map(|p| {
            PathElement::new(vec![origin, (p.lon, p.lat)], BLACK.stroke_width(2))
        }))?;
        chart.draw_series(std::iter::once(Circle::new(origin, 5, BLACK.filled())))?;
        chart.draw_series(
            frame
                .partner_points
                .iter()
                .map(|p| Cross::new((p.lon, p.lat), 5, BLACK.stroke_width(2))),
        )?;

        root.present()?;
        Ok(())
    }
}

impl DiagnosticSink for PlotSink {
    fn render(&self, frame: &DiagnosticFrame<'_>) -> Result<(), SinkError> {
        let path = self.figure_path(frame.sequence);
        self.draw(&path, frame)?;
        debug!(
            path = %path.display(),
            origin = frame.origin,
            value = frame.value,
            "diagnostic figure written"
        );
        Ok(())
    }
}

/// Blue for negative, red for positive, fading to white at zero.
fn diverging(r: f64) -> RGBColor {
    if !r.is_finite() {
        return NAN_COLOR;
    }
    let t = r.clamp(-1.0, 1.0);
    let (base, weight) = if t < 0.0 { (NEGATIVE, -t) } else { (POSITIVE, t) };
    let fade = |c: u8| (255.0 - (255.0 - f64::from(c)) * weight).round() as u8;
    RGBColor(fade(base.0), fade(base.1), fade(base.2))
}

/// Cell boundaries for sorted cell centres: midpoints between neighbours,
/// extended by half a step at both ends. A single centre gets unit width.
fn cell_edges(centres: &[f64]) -> Vec<f64> {
    match centres {
        [] => vec![0.0, 1.0],
        [c] => vec![c - 0.5, c + 0.5],
        _ => {
            let n = centres.len();
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centres[0] - (centres[1] - centres[0]) / 2.0);
            edges.extend(centres.windows(2).map(|w| (w[0] + w[1]) / 2.0));
            edges.push(centres[n - 1] + (centres[n - 1] - centres[n - 2]) / 2.0);
            edges
        }
    }
}

fn span(edges: &[f64]) -> (f64, f64) {
    let lo = edges.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = edges.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo < hi { (lo, hi) } else { (lo - 0.5, lo + 0.5) }
}
