//! Training orchestration: one training call followed by one validation call.

use crate::config::RunConfig;
use crate::constants::keys;
use crate::error::Result;
use crate::library::{DetectionLibrary, DetectionModel, TrainParams, ValParams};
use std::time::Instant;
use tracing::info;

/// Train a model and evaluate it, as described by `config`.
///
/// Every key is resolved before the library is touched, so a missing key
/// fails the run without side effects. Library failures are returned as-is.
pub fn run_training<L: DetectionLibrary>(config: &RunConfig, library: &L) -> Result<()> {
    let start = Instant::now();

    let model_id = config.require(keys::MODEL)?.to_string();
    let train_params = TrainParams::from_config(config)?;
    let val_params = ValParams::from_config(config)?;

    info!("Loading model: {model_id}");
    let mut model = library.load_model(&model_id)?;

    model.train(&train_params)?;
    model.validate(&val_params)?;

    info!("Training and validation finished in {:.1?}", start.elapsed());
    Ok(())
}
