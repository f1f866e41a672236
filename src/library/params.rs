//! Named parameter sets passed across the library boundary.
//!
//! Each set is resolved from the run configuration in full before any
//! library call, so a missing key fails the run up front. Values are
//! carried verbatim.

use crate::config::{ConfigValue, RunConfig};
use crate::constants::{keys, params};
use crate::error::Result;

/// An ordered list of `name = value` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamSet {
    entries: Vec<(&'static str, ConfigValue)>,
}

impl ParamSet {
    /// Copy `config_keys` out of the configuration, keeping their names.
    fn from_keys(config: &RunConfig, config_keys: &[&'static str]) -> Result<Self> {
        let mut set = Self::default();
        for &key in config_keys {
            set.push_from(config, key, key)?;
        }
        Ok(set)
    }

    /// Copy `key` from the configuration under the library name `name`.
    fn push_from(&mut self, config: &RunConfig, name: &'static str, key: &str) -> Result<()> {
        let value = config.require(key)?.clone();
        self.entries.push((name, value));
        Ok(())
    }

    /// Append a parameter.
    pub fn push(&mut self, name: &'static str, value: ConfigValue) {
        self.entries.push((name, value));
    }

    /// Value of a parameter by library name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Parameter names in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Iterate over parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ConfigValue)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Training parameters: dataset, hyperparameters, augmentation and output location.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainParams(ParamSet);

/// Config keys passed to training under their own name, in call order.
const TRAIN_KEYS: &[&str] = &[
    keys::DATA,
    keys::PLOTS,
    keys::AMP,
    keys::EPOCHS,
    keys::PATIENCE,
    keys::IMGSZ,
    keys::BATCH,
    keys::LR0,
    keys::LRF,
    keys::FRACTION,
    keys::SAVE_PERIOD,
    keys::DEVICE,
    keys::HSV_H,
    keys::HSV_S,
    keys::HSV_V,
    keys::DEGREES,
    keys::SCALE,
    keys::FLIPLR,
    keys::MOSAIC,
];

impl TrainParams {
    /// Resolve every training parameter from the configuration.
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        let mut set = ParamSet::from_keys(config, TRAIN_KEYS)?;
        set.push_from(config, params::PROJECT, keys::TRAIN_PROJECT)?;
        set.push_from(config, params::NAME, keys::TRAIN_NAME)?;
        Ok(Self(set))
    }

    /// The underlying parameter set.
    #[must_use]
    pub fn params(&self) -> &ParamSet {
        &self.0
    }
}

/// Validation parameters: dataset, split, plotting and thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct ValParams(ParamSet);

const VAL_KEYS: &[&str] = &[keys::DATA, keys::SPLIT, keys::PLOTS, keys::IOU, keys::CONF];

impl ValParams {
    /// Resolve every validation parameter from the configuration.
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        ParamSet::from_keys(config, VAL_KEYS).map(Self)
    }

    /// The underlying parameter set.
    #[must_use]
    pub fn params(&self) -> &ParamSet {
        &self.0
    }
}

/// Fixed inference parameters shared by every prediction of a run.
///
/// The source is supplied per call via [`PredictParams::for_source`].
#[derive(Debug, Clone, PartialEq)]
pub struct PredictSettings(ParamSet);

impl PredictSettings {
    /// Resolve the fixed inference parameters from the configuration.
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        let mut set = ParamSet::default();
        set.push_from(config, keys::SAVE, keys::SAVE)?;
        set.push_from(config, keys::IMGSZ, keys::IMGSZ)?;
        set.push_from(config, params::PROJECT, keys::TEST_PROJECT)?;
        set.push_from(config, params::NAME, keys::TEST_NAME)?;
        set.push_from(config, keys::IOU, keys::IOU)?;
        set.push_from(config, keys::CONF, keys::CONF)?;
        set.push_from(config, keys::SHOW, keys::SHOW)?;
        Ok(Self(set))
    }
}

/// Parameters for a single inference call.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictParams(ParamSet);

impl PredictParams {
    /// Combine a source with the run's fixed settings. The source comes first.
    #[must_use]
    pub fn for_source(source: &str, settings: &PredictSettings) -> Self {
        let mut set = ParamSet::default();
        set.push(params::SOURCE, ConfigValue::from(source));
        for (name, value) in settings.0.iter() {
            set.push(name, value.clone());
        }
        Self(set)
    }

    /// The source this call runs on.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.0.get(params::SOURCE).and_then(ConfigValue::as_str)
    }

    /// The underlying parameter set.
    #[must_use]
    pub fn params(&self) -> &ParamSet {
        &self.0
    }
}
