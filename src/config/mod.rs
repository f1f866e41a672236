//! Run configuration loading.

mod file;
mod paths;
mod types;

pub use file::load_run_config;
pub use paths::{default_config_path, executable_dir};
pub use types::{ConfigValue, RunConfig};
