use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Teleconnection maps for gridded space-time fields.
#[derive(Parser)]
#[command(
    name = "teleconnect",
    version,
    about = "Teleconnection maps and connecting paths for gridded fields"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Pearson reduction over the dense correlation matrix.
    Dense(RunArgs),
    /// Per-pixel Kendall reduction, with optional diagnostics and maps.
    Pixel(RunArgs),
}

/// Arguments shared by both engines. Each flag overrides the config file.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input NetCDF file.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for output files.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Variable to read.
    #[arg(long)]
    pub variable: Option<String>,

    /// Threshold a path value must satisfy (dense engine).
    #[arg(short, long, allow_hyphen_values = true)]
    pub threshold: Option<f64>,

    /// Extremum policy: signed-minimum, magnitude-of-minimum, maximum-magnitude.
    #[arg(long)]
    pub extremum: Option<String>,

    /// Tie policy: first-match, report-all, flag-ambiguous.
    #[arg(long)]
    pub ties: Option<String>,

    /// CRS tag of the output paths, e.g. EPSG:4326.
    #[arg(long)]
    pub crs: Option<String>,

    /// Render one figure per origin into this directory.
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,

    /// Log per-origin progress.
    #[arg(long)]
    pub progress: bool,

    /// Write every per-origin correlation map to NetCDF.
    #[arg(long)]
    pub retain_maps: bool,

    /// Dense correlation matrix limit in MiB.
    #[arg(long)]
    pub memory_limit_mib: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_threshold_parses() {
        let cli = Cli::try_parse_from(["teleconnect", "dense", "-t", "-0.7", "-i", "air.nc"])
            .unwrap();
        match cli.command {
            Command::Dense(args) => {
                assert_eq!(args.threshold, Some(-0.7));
                assert_eq!(args.input, Some(PathBuf::from("air.nc")));
            }
            Command::Pixel(_) => panic!("expected dense"),
        }
    }

    #[test]
    fn pixel_flags() {
        let cli = Cli::try_parse_from([
            "teleconnect",
            "-vv",
            "pixel",
            "--diagnostics",
            "figs",
            "--retain-maps",
            "--ties",
            "flag-ambiguous",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Pixel(args) => {
                assert_eq!(args.diagnostics, Some(PathBuf::from("figs")));
                assert!(args.retain_maps);
                assert!(!args.progress);
                assert_eq!(args.ties.as_deref(), Some("flag-ambiguous"));
            }
            Command::Dense(_) => panic!("expected pixel"),
        }
    }
}
