use tracing_subscriber::EnvFilter;

/// Workspace crates whose events reach the subscriber.
const CRATE_TARGETS: &[&str] = &[
    "teleconnect",
    "teleconnect_correlate",
    "teleconnect_grid",
    "teleconnect_io",
    "teleconnect_paths",
    "teleconnect_pipeline",
    "teleconnect_stats",
];

/// Level for a `-v` count: none warns, then info, debug, trace.
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directives applying `level` to every workspace crate.
fn directives(verbosity: u8) -> String {
    let level = level(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG`, when set, replaces the verbosity-derived filter.
pub fn init(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
