//! Default configuration file location.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Directory holding the running executable.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(std::path::Path::to_path_buf)
        .ok_or(Error::ConfigDirNotFound)
}

/// Path of the fixed-name configuration file next to the running executable.
pub fn default_config_path(file_name: &str) -> Result<PathBuf> {
    Ok(executable_dir()?.join(file_name))
}
