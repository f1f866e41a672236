//! Training and inference orchestration.

mod inference;
mod training;

pub use inference::{InferenceOptions, SourceMode, list_source_folder, run_inference};
pub use training::run_training;
