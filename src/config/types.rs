//! Run configuration type definitions.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single scalar configuration value.
///
/// The run configuration is flat, so nested tables and lists are not
/// representable and are rejected at load time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit null (`key:` or `key: ~` in YAML).
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Free-form string.
    String(String),
}

impl ConfigValue {
    /// Borrow the value as a string slice, if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            // Debug keeps the decimal point on whole numbers (1.0, not 1)
            Self::Float(x) => write!(f, "{x:?}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

/// Flat key-value mapping controlling one training or inference run.
///
/// Read-only once loaded. Lookups of required keys go through
/// [`RunConfig::require`], which names the file in its error.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    path: PathBuf,
    base_dir: PathBuf,
    values: BTreeMap<String, ConfigValue>,
}

impl RunConfig {
    /// Build a configuration from already-parsed values.
    ///
    /// `path` is the file the values came from. Its parent directory becomes
    /// the base directory that relative paths are resolved against.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, values: BTreeMap<String, ConfigValue>) -> Self {
        let path = path.into();
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            path,
            base_dir,
            values,
        }
    }

    /// Path of the file this configuration was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the configuration file.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Look up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Look up a key the caller cannot run without.
    pub fn require(&self, key: &str) -> Result<&ConfigValue> {
        self.values.get(key).ok_or_else(|| Error::MissingConfigKey {
            key: key.to_string(),
            path: self.path.clone(),
        })
    }

    /// Number of keys in the configuration.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the configuration has no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_values_verbatim() {
        assert_eq!(ConfigValue::from("runs/train").to_string(), "runs/train");
        assert_eq!(ConfigValue::from(true).to_string(), "true");
        assert_eq!(ConfigValue::from(300_i64).to_string(), "300");
        assert_eq!(ConfigValue::from(0.01).to_string(), "0.01");
        assert_eq!(ConfigValue::from(1.0).to_string(), "1.0");
        assert_eq!(ConfigValue::Null.to_string(), "None");
    }

    #[test]
    fn test_require_reports_key_and_path() {
        let config = RunConfig::new("/srv/models/config.yaml", BTreeMap::new());
        let err = config.require("epochs").unwrap_err();
        match err {
            Error::MissingConfigKey { key, path } => {
                assert_eq!(key, "epochs");
                assert_eq!(path, PathBuf::from("/srv/models/config.yaml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_base_dir_is_parent_of_config() {
        let config = RunConfig::new("/srv/models/config.yaml", BTreeMap::new());
        assert_eq!(config.base_dir(), Path::new("/srv/models"));

        let bare = RunConfig::new("config.yaml", BTreeMap::new());
        assert_eq!(bare.base_dir(), Path::new("."));
    }

    #[test]
    fn test_as_str_only_for_strings() {
        assert_eq!(ConfigValue::from("folder").as_str(), Some("folder"));
        assert_eq!(ConfigValue::from(1_i64).as_str(), None);
    }
}
