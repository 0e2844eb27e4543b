//! `dense` / `pixel` commands: read a field, reduce it, write the outputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, warn};

use teleconnect_io::{read_field, write_correlation_maps, write_map_netcdf, write_paths_geojson};
use teleconnect_pipeline::{Engine, Hooks, run as run_pipeline};

use crate::cli::RunArgs;
use crate::config::TeleconnectConfig;
use crate::convert;
use crate::plot::PlotSink;

/// Output file locations for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub map: PathBuf,
    pub paths: PathBuf,
    pub maps: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: &Path, engine: Engine) -> Self {
        Self {
            map: dir.join(format!("teleconnection_{engine}.nc")),
            paths: dir.join(format!("paths_{engine}.geojson")),
            maps: dir.join("correlation_maps.nc"),
        }
    }
}

/// Run one engine end to end.
pub fn run(args: RunArgs, engine: Engine) -> Result<()> {
    let _cmd = info_span!("run", %engine).entered();

    let config = load_config(&args)?;
    let input = config
        .io
        .input
        .as_ref()
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;

    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let tele_cfg =
        convert::build_teleconnection_config(&config.teleconnection, &config.diagnostics)?;

    let field = read_field(input, &reader_cfg)
        .with_context(|| format!("failed to read NetCDF: {}", input.display()))?;

    let sink = if tele_cfg.diagnostics() {
        let dir = &config.diagnostics.dir;
        std::fs::create_dir_all(dir).with_context(|| {
            format!("failed to create diagnostics directory: {}", dir.display())
        })?;
        if engine == Engine::Dense {
            warn!("diagnostics are only rendered by the per-pixel engine");
        }
        Some(PlotSink::new(dir))
    } else {
        None
    };
    let hooks = match &sink {
        Some(sink) => Hooks::none().with_diagnostics(sink),
        None => Hooks::none(),
    };

    let output = run_pipeline(&field, &tele_cfg, engine, hooks).context("teleconnection run failed")?;

    let dir = &config.io.output_dir;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    let targets = OutputPaths::new(dir, engine);

    write_map_netcdf(&targets.map, &output.map, &writer_cfg)
        .with_context(|| format!("failed to write map: {}", targets.map.display()))?;
    write_paths_geojson(&targets.paths, &output.paths)
        .with_context(|| format!("failed to write paths: {}", targets.paths.display()))?;
    if let Some(maps) = &output.maps {
        write_correlation_maps(&targets.maps, &output.map, maps, &writer_cfg).with_context(
            || format!("failed to write correlation maps: {}", targets.maps.display()),
        )?;
    }

    info!(
        n_paths = output.paths.len(),
        n_with_partner = output.map.n_with_partner(),
        n_ambiguous = output.map.n_ambiguous(),
        output_dir = %dir.display(),
        "run complete"
    );
    Ok(())
}

/// Load the TOML config (or defaults) and apply CLI overrides.
pub fn load_config(args: &RunArgs) -> Result<TeleconnectConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            toml::from_str(&text).context("failed to parse TOML config")?
        }
        None => TeleconnectConfig::default(),
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

fn apply_overrides(config: &mut TeleconnectConfig, args: &RunArgs) {
    if let Some(input) = &args.input {
        config.io.input = Some(input.clone());
    }
    if let Some(dir) = &args.output_dir {
        config.io.output_dir = dir.clone();
    }
    if let Some(variable) = &args.variable {
        config.io.variable = variable.clone();
    }
    let t = &mut config.teleconnection;
    if let Some(threshold) = args.threshold {
        t.threshold = threshold;
    }
    if let Some(extremum) = &args.extremum {
        t.extremum = extremum.clone();
    }
    if let Some(ties) = &args.ties {
        t.ties = ties.clone();
    }
    if let Some(crs) = &args.crs {
        t.crs = crs.clone();
    }
    if let Some(mib) = args.memory_limit_mib {
        t.memory_limit_mib = Some(mib);
    }
    t.progress |= args.progress;
    t.retain_maps |= args.retain_maps;
    if let Some(dir) = &args.diagnostics {
        config.diagnostics.enabled = true;
        config.diagnostics.dir = dir.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn args(argv: &[&str]) -> RunArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Dense(a) | Command::Pixel(a) => a,
        }
    }

    #[test]
    fn output_paths_name_the_engine() {
        let out = OutputPaths::new(Path::new("out"), Engine::PerPixel);
        assert_eq!(out.map, PathBuf::from("out/teleconnection_per-pixel.nc"));
        assert_eq!(out.paths, PathBuf::from("out/paths_per-pixel.geojson"));
        assert_eq!(out.maps, PathBuf::from("out/correlation_maps.nc"));
    }

    #[test]
    fn overrides_replace_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teleconnect.toml");
        std::fs::write(
            &path,
            "[io]\ninput = \"a.nc\"\n[teleconnection]\nthreshold = -0.3\n",
        )
        .unwrap();
        let path_str = path.to_str().unwrap();

        let config = load_config(&args(&["teleconnect", "dense", "-c", path_str])).unwrap();
        assert_eq!(config.io.input, Some(PathBuf::from("a.nc")));
        assert_eq!(config.teleconnection.threshold, -0.3);

        let config = load_config(&args(&[
            "teleconnect",
            "pixel",
            "-c",
            path_str,
            "-i",
            "b.nc",
            "-t",
            "-0.9",
            "--diagnostics",
            "figs",
            "--retain-maps",
        ]))
        .unwrap();
        assert_eq!(config.io.input, Some(PathBuf::from("b.nc")));
        assert_eq!(config.teleconnection.threshold, -0.9);
        assert!(config.teleconnection.retain_maps);
        assert!(config.diagnostics.enabled);
        assert_eq!(config.diagnostics.dir, PathBuf::from("figs"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(&args(&["teleconnect", "dense", "-c", "/nonexistent/t.toml"]))
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = run(args(&["teleconnect", "dense"]), Engine::Dense).unwrap_err();
        assert!(err.to_string().contains("no input path"));
    }
}
