//! Run configuration file loading.

use crate::config::{ConfigValue, RunConfig};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Document formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    /// Pick the format from the file extension. Unknown extensions are read as YAML.
    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Load a run configuration from a YAML or TOML file.
///
/// The load is permissive: no keys are checked here. Missing keys surface
/// when an orchestrator asks for them.
pub fn load_run_config(path: &Path) -> Result<RunConfig> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let values = parse_values(&contents, Format::from_path(path)).map_err(|source| {
        Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    debug!("Loaded {} key(s) from {}", values.len(), path.display());
    Ok(RunConfig::new(path, values))
}

fn parse_values(
    contents: &str,
    format: Format,
) -> std::result::Result<BTreeMap<String, ConfigValue>, Box<dyn std::error::Error + Send + Sync>> {
    // An empty YAML document is null rather than a mapping
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    match format {
        Format::Yaml => {
            let mut values: BTreeMap<String, ConfigValue> = serde_yaml::from_str(contents)?;
            for value in values.values_mut() {
                if let Some(flag) = value.as_str().and_then(yaml11_bool) {
                    *value = ConfigValue::Bool(flag);
                }
            }
            Ok(values)
        }
        Format::Toml => Ok(toml::from_str(contents)?),
    }
}

/// YAML 1.1 boolean spellings, which `serde_yaml` reads as plain strings.
fn yaml11_bool(word: &str) -> Option<bool> {
    match word {
        "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Some(true),
        "no" | "No" | "NO" | "off" | "Off" | "OFF" => Some(false),
        _ => None,
    }
}
