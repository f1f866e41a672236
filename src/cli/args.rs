//! CLI argument definitions.

use crate::constants::DEFAULT_YOLO_PROGRAM;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Train a YOLO detection model and evaluate it, driven by a run configuration.
#[derive(Debug, Parser)]
#[command(name = "poledet-train")]
#[command(author, version, about, long_about = None)]
pub struct TrainCli {
    /// Options shared by both entry points.
    #[command(flatten)]
    pub common: OrchestratorArgs,
}

/// Run a trained YOLO detection model on an image file or folder.
#[derive(Debug, Parser)]
#[command(name = "poledet-predict")]
#[command(author, version, about, long_about = None)]
pub struct PredictCli {
    /// Options shared by both entry points.
    #[command(flatten)]
    pub common: OrchestratorArgs,

    /// Do not show a progress bar in folder mode.
    #[arg(long)]
    pub no_progress: bool,
}

/// Options shared by the training and inference entry points.
#[derive(Debug, Args)]
pub struct OrchestratorArgs {
    /// Run configuration file (default: config.yaml next to the executable).
    #[arg(short, long, env = "POLEDET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Detection library executable.
    #[arg(long, env = "POLEDET_YOLO", default_value = DEFAULT_YOLO_PROGRAM)]
    pub yolo: PathBuf,

    /// Print the library invocations as JSON lines instead of running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
