//! poledet - config-driven training and inference for YOLO pole detection.
//!
//! This crate maps a flat run configuration onto calls into an external
//! object-detection library. Model training, augmentation and inference all
//! live in that library; here we resolve parameters, dispatch the calls and
//! report failures.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod library;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{OrchestratorArgs, PredictCli, TrainCli};
use config::{RunConfig, default_config_path, load_run_config};
use constants::DEFAULT_CONFIG_FILE;
use library::{ExecMode, UltralyticsCli};
use pipeline::InferenceOptions;
use std::path::{Path, PathBuf};
use tracing::info;

pub use error::{Error, Result};

/// Entry point for `poledet-train`.
pub fn run_train() -> Result<()> {
    let cli = TrainCli::parse();
    init_logging(cli.common.verbose, cli.common.quiet);

    let config = load_config(&cli.common)?;
    let library = build_library(&cli.common, &config)?;
    pipeline::run_training(&config, &library)
}

/// Entry point for `poledet-predict`.
pub fn run_predict() -> Result<()> {
    let cli = PredictCli::parse();
    init_logging(cli.common.verbose, cli.common.quiet);

    let config = load_config(&cli.common)?;
    let library = build_library(&cli.common, &config)?;
    let options = InferenceOptions {
        show_progress: !cli.common.quiet && !cli.common.dry_run && !cli.no_progress,
    };
    pipeline::run_inference(&config, &library, &options)
}

/// Load the run configuration named on the command line, or the default one.
fn load_config(args: &OrchestratorArgs) -> Result<RunConfig> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path(DEFAULT_CONFIG_FILE)?,
    };

    info!("Loading configuration: {}", path.display());
    load_run_config(&path)
}

fn build_library(args: &OrchestratorArgs, config: &RunConfig) -> Result<UltralyticsCli> {
    let mode = if args.dry_run {
        ExecMode::DryRun
    } else {
        ExecMode::Run
    };
    let program = resolve_program(&args.yolo)?;
    Ok(UltralyticsCli::new(program, config.base_dir(), mode))
}

/// Make relative program paths like `./yolo` absolute.
///
/// The library runs from the config's directory, which would otherwise
/// change what a relative path points at. Bare names are left for `PATH`
/// lookup.
fn resolve_program(program: &Path) -> Result<PathBuf> {
    if program.is_relative() && program.components().count() > 1 {
        Ok(std::path::absolute(program)?)
    } else {
        Ok(program.to_path_buf())
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // stdout belongs to the library process and to dry-run plans
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
