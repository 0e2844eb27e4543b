//! # teleconnect-pipeline
//!
//! Orchestrates one teleconnection run over a [`SpaceTimeField`]:
//!
//! 1. normalize coordinates,
//! 2. build the grid index and `(T, N)` series matrix,
//! 3. reduce with the selected [`Engine`],
//! 4. build CRS-tagged paths and filter them by threshold (dense engine).
//!
//! The per-pixel engine can hand every origin's map to a
//! [`DiagnosticSink`] when the config enables it.
//!
//! [`SpaceTimeField`]: teleconnect_grid::SpaceTimeField

mod config;
mod diagnostics;
mod error;
mod map;
mod run;

pub use config::{DEFAULT_THRESHOLD, Engine, TeleconnectionConfig};
pub use diagnostics::{DiagnosticFrame, DiagnosticSink, Hooks, SinkError};
pub use error::PipelineError;
pub use map::TeleconnectionMap;
pub use run::{TeleconnectionOutput, run};

pub use teleconnect_correlate::{ExtremumPolicy, TiePolicy};
pub use teleconnect_paths::Crs;
