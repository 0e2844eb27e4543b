//! Run configuration.

use teleconnect_correlate::{ExtremumPolicy, ReductionPolicy, TiePolicy};
use teleconnect_paths::Crs;

use crate::error::PipelineError;

/// Default threshold on the reported teleconnection value.
pub const DEFAULT_THRESHOLD: f64 = -0.5;

/// Which reducer a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Engine {
    /// Full Pearson matrix, threshold-filtered paths.
    #[default]
    Dense,
    /// Per-origin Kendall maps, every unambiguous path emitted.
    PerPixel,
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Dense => "dense",
            Self::PerPixel => "per-pixel",
        })
    }
}

/// Configuration for one teleconnection run.
///
/// # Example
///
/// ```
/// use teleconnect_pipeline::{ExtremumPolicy, TeleconnectionConfig};
///
/// let config = TeleconnectionConfig::new()
///     .with_threshold(-0.7)
///     .with_extremum(ExtremumPolicy::MagnitudeOfMinimum);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TeleconnectionConfig {
    threshold: f64,
    extremum: ExtremumPolicy,
    ties: TiePolicy,
    crs: Crs,
    diagnostics: bool,
    progress: bool,
    retain_maps: bool,
    memory_limit: Option<usize>,
}

impl TeleconnectionConfig {
    /// Defaults: threshold -0.5, signed minimum, first-match ties, WGS84,
    /// diagnostics, progress and map retention off, no memory limit.
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            extremum: ExtremumPolicy::default(),
            ties: TiePolicy::default(),
            crs: Crs::default(),
            diagnostics: false,
            progress: false,
            retain_maps: false,
            memory_limit: None,
        }
    }

    /// Sets the threshold applied to dense-engine paths.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the extremum policy.
    pub fn with_extremum(mut self, extremum: ExtremumPolicy) -> Self {
        self.extremum = extremum;
        self
    }

    /// Sets the tie policy.
    pub fn with_ties(mut self, ties: TiePolicy) -> Self {
        self.ties = ties;
        self
    }

    /// Sets the CRS declared on path output.
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = crs;
        self
    }

    /// Enables or disables the diagnostic sink.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Enables or disables progress logging.
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    /// Keeps per-origin correlation maps in the output (per-pixel engine).
    pub fn with_retain_maps(mut self, retain: bool) -> Self {
        self.retain_maps = retain;
        self
    }

    /// Caps the dense matrix size in bytes.
    pub fn with_memory_limit(mut self, bytes: Option<usize>) -> Self {
        self.memory_limit = bytes;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn extremum(&self) -> ExtremumPolicy {
        self.extremum
    }

    pub fn ties(&self) -> TiePolicy {
        self.ties
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    pub fn progress(&self) -> bool {
        self.progress
    }

    pub fn retain_maps(&self) -> bool {
        self.retain_maps
    }

    pub fn memory_limit(&self) -> Option<usize> {
        self.memory_limit
    }

    /// Extremum and tie policies as one reducer policy.
    pub fn reduction_policy(&self) -> ReductionPolicy {
        ReductionPolicy::new(self.extremum, self.ties)
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidThreshold`] for a non-finite threshold
    /// or one outside `[-1, 1]`, and [`PipelineError::InvalidMemoryLimit`]
    /// for a zero memory limit.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.threshold.is_finite() || !(-1.0..=1.0).contains(&self.threshold) {
            return Err(PipelineError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        if self.memory_limit == Some(0) {
            return Err(PipelineError::InvalidMemoryLimit);
        }
        Ok(())
    }
}

impl Default for TeleconnectionConfig {
    fn default() -> Self {
        Self::new()
    }
}
