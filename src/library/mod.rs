//! Boundary to the external object-detection library.
//!
//! The orchestrators only ever talk to these traits. [`UltralyticsCli`] is the
//! production implementation; tests substitute a recording fake.

mod params;
mod ultralytics;

pub use params::{ParamSet, PredictParams, PredictSettings, TrainParams, ValParams};
pub use ultralytics::{CliModel, ExecMode, UltralyticsCli, find_trained_weights};

use crate::error::Result;

/// Constructs model handles from an architecture or weights identifier.
pub trait DetectionLibrary {
    /// Handle type produced by this library.
    type Model: DetectionModel;

    /// Bind a model handle to `identifier` (e.g. `yolov8n.pt` or a weights path).
    fn load_model(&self, identifier: &str) -> Result<Self::Model>;
}

/// An opaque handle to a loaded detection model.
///
/// Every call blocks until the library is done and produces its artifacts
/// on disk; nothing structured comes back.
pub trait DetectionModel {
    /// Train the model.
    fn train(&mut self, params: &TrainParams) -> Result<()>;

    /// Evaluate the model on a dataset split.
    fn validate(&mut self, params: &ValParams) -> Result<()>;

    /// Run inference on one source.
    fn predict(&mut self, params: &PredictParams) -> Result<()>;
}
