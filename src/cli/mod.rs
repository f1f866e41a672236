//! CLI argument parsing.

mod args;

pub use args::{OrchestratorArgs, PredictCli, TrainCli};
