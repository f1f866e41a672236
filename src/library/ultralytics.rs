//! Ultralytics `yolo` command-line adapter.
//!
//! Each library call becomes one blocking `yolo <action> model=<id> key=value ...`
//! child process, run from the configuration's base directory so relative
//! paths in the configuration resolve the same way for the library as they do
//! for us.

use super::{DetectionLibrary, DetectionModel, ParamSet, PredictParams, TrainParams, ValParams};
use crate::config::ConfigValue;
use crate::constants::{TRAINED_WEIGHTS, actions, keys, params};
use crate::error::{Error, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Whether library calls are executed or only printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Spawn the library program and wait for it.
    #[default]
    Run,
    /// Print each invocation as a JSON line on stdout instead of running it.
    DryRun,
}

/// Library backed by the Ultralytics `yolo` program.
#[derive(Debug, Clone)]
pub struct UltralyticsCli {
    program: PathBuf,
    working_dir: PathBuf,
    mode: ExecMode,
}

impl UltralyticsCli {
    /// Create an adapter that runs `program` inside `working_dir`.
    pub fn new(
        program: impl Into<PathBuf>,
        working_dir: impl Into<PathBuf>,
        mode: ExecMode,
    ) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
            mode,
        }
    }
}

impl DetectionLibrary for UltralyticsCli {
    type Model = CliModel;

    fn load_model(&self, identifier: &str) -> Result<CliModel> {
        debug!("Binding model handle to {identifier}");
        Ok(CliModel {
            program: self.program.clone(),
            working_dir: self.working_dir.clone(),
            mode: self.mode,
            weights: identifier.to_string(),
            carried: ParamSet::default(),
        })
    }
}

/// Training settings an in-process model keeps and reuses when validated.
const CARRIED_INTO_VAL: &[&str] = &[
    params::PROJECT,
    params::NAME,
    keys::DEVICE,
    keys::BATCH,
    keys::IMGSZ,
];

/// Model handle for [`UltralyticsCli`]: the weights identifier every call is made with.
///
/// After training, the handle also remembers the run's output location,
/// device, batch and image size so that validation lands next to the
/// training run instead of in the library's default directory.
#[derive(Debug, Clone)]
pub struct CliModel {
    program: PathBuf,
    working_dir: PathBuf,
    mode: ExecMode,
    weights: String,
    carried: ParamSet,
}

/// One planned library call, as printed in dry-run mode.
#[derive(Debug, Serialize)]
struct Invocation<'a> {
    program: &'a Path,
    cwd: &'a Path,
    args: &'a [String],
}

impl CliModel {
    /// Weights identifier the handle is currently bound to.
    #[must_use]
    pub fn weights(&self) -> &str {
        &self.weights
    }

    /// Keep the training settings that validation inherits.
    fn remember_training(&mut self, train_params: &TrainParams) {
        let set = train_params.params();
        let mut carried = ParamSet::default();
        for &name in CARRIED_INTO_VAL {
            if let Some(value) = set.get(name) {
                carried.push(name, value.clone());
            }
        }
        self.carried = carried;
    }

    /// Validation parameters plus the inherited training settings they do not override.
    fn validation_set(&self, val_params: &ValParams) -> ParamSet {
        let mut set = val_params.params().clone();
        for (name, value) in self.carried.iter() {
            if set.get(name).is_none() {
                set.push(name, value.clone());
            }
        }
        set
    }

    /// Command-line arguments for `action` with `params`.
    #[must_use]
    pub fn command_args(&self, action: &str, params: &ParamSet) -> Vec<String> {
        let mut args = Vec::with_capacity(params.len() + 2);
        args.push(action.to_string());
        args.push(format!("model={}", self.weights));
        args.extend(params.iter().map(|(name, value)| format!("{name}={value}")));
        args
    }

    fn invoke(&self, action: &str, params: &ParamSet) -> Result<()> {
        let args = self.command_args(action, params);

        if self.mode == ExecMode::DryRun {
            let invocation = Invocation {
                program: &self.program,
                cwd: &self.working_dir,
                args: &args,
            };
            let mut out = std::io::stdout().lock();
            serde_json::to_writer(&mut out, &invocation)
                .map_err(|e| Error::PlanWrite { source: e })?;
            writeln!(out)?;
            return Ok(());
        }

        debug!(
            "{} {} (cwd: {})",
            self.program.display(),
            args.join(" "),
            self.working_dir.display()
        );

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|e| Error::LibraryLaunch {
                program: self.program.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(Error::LibraryFailed {
                action: action.to_string(),
                status,
            });
        }

        Ok(())
    }
}

impl DetectionModel for CliModel {
    fn train(&mut self, train_params: &TrainParams) -> Result<()> {
        info!("Training {}", self.weights);
        self.invoke(actions::TRAIN, train_params.params())?;
        self.remember_training(train_params);

        if self.mode == ExecMode::DryRun {
            return Ok(());
        }

        // The in-process library validates the freshly trained weights, so do the same
        let set = train_params.params();
        let project = set.get(params::PROJECT).and_then(ConfigValue::as_str);
        let name = set.get(params::NAME).and_then(ConfigValue::as_str);
        let trained = project
            .zip(name)
            .and_then(|(project, name)| {
                find_trained_weights(&self.working_dir.join(project), name)
            });

        match trained {
            Some(path) => {
                info!("Trained weights: {}", path.display());
                self.weights = path.display().to_string();
            }
            None => warn!(
                "Could not locate trained weights, evaluating {} instead",
                self.weights
            ),
        }

        Ok(())
    }

    fn validate(&mut self, params: &ValParams) -> Result<()> {
        info!("Validating {}", self.weights);
        let set = self.validation_set(params);
        self.invoke(actions::VAL, &set)
    }

    fn predict(&mut self, params: &PredictParams) -> Result<()> {
        info!("Predicting on {}", params.source().unwrap_or("<unknown>"));
        self.invoke(actions::PREDICT, params.params())
    }
}

/// Find the newest trained weights for run `name` under `project_dir`.
///
/// The library appends a counter to the run name when the directory already
/// exists (`run`, `run2`, `run3`, ...), so every such directory is a candidate.
#[must_use]
pub fn find_trained_weights(project_dir: &Path, name: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(project_dir).ok()?;

    entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(|dir| dir.strip_prefix(name))
                .is_some_and(|suffix| suffix.chars().all(|c| c.is_ascii_digit()))
        })
        .map(|entry| entry.path().join(TRAINED_WEIGHTS))
        .filter_map(|weights| {
            let modified = weights.metadata().ok()?.modified().ok()?;
            Some((modified, weights))
        })
        .max_by_key(|(modified, _): &(SystemTime, PathBuf)| *modified)
        .map(|(_, weights)| weights)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch_weights(root: &Path, run: &str, age: Duration) -> PathBuf {
        let weights = root.join(run).join(TRAINED_WEIGHTS);
        std::fs::create_dir_all(weights.parent().unwrap()).unwrap();
        std::fs::write(&weights, b"pt").unwrap();
        let file = std::fs::File::options().write(true).open(&weights).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
        weights
    }

    #[test]
    fn test_command_args_render_values_verbatim() {
        let values: BTreeMap<String, ConfigValue> = [
            ("data", ConfigValue::from("../data/data.yaml")),
            ("split", ConfigValue::from("test")),
            ("plots", ConfigValue::Bool(true)),
            ("iou", ConfigValue::Float(0.7)),
            ("conf", ConfigValue::Float(1.0)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let config = RunConfig::new("config.yaml", values);
        let val = ValParams::from_config(&config).unwrap();

        let library = UltralyticsCli::new("yolo", ".", ExecMode::Run);
        let model = library.load_model("yolov8n.pt").unwrap();
        assert_eq!(
            model.command_args(actions::VAL, val.params()),
            vec![
                "val",
                "model=yolov8n.pt",
                "data=../data/data.yaml",
                "split=test",
                "plots=true",
                "iou=0.7",
                "conf=1.0",
            ]
        );
    }

    fn train_config() -> RunConfig {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/train_config.yaml");
        crate::config::load_run_config(&path).unwrap()
    }

    #[test]
    fn test_validation_inherits_training_settings() {
        let config = train_config();
        let train = TrainParams::from_config(&config).unwrap();
        let val = ValParams::from_config(&config).unwrap();

        let library = UltralyticsCli::new("yolo", ".", ExecMode::Run);
        let mut model = library.load_model("yolov8n.pt").unwrap();
        assert_eq!(model.validation_set(&val), *val.params());

        model.remember_training(&train);
        let args = model.command_args(actions::VAL, &model.validation_set(&val));
        assert_eq!(
            args,
            vec![
                "val",
                "model=yolov8n.pt",
                "data=../../data/processed/data.yaml",
                "split=test",
                "plots=true",
                "iou=0.7",
                "conf=0.25",
                "project=../../data/train_results",
                "name=train_result",
                "device=cpu",
                "batch=16",
                "imgsz=640",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_train_rebinds_handle_to_trained_weights() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let work = dir.path().join("src/models");
        std::fs::create_dir_all(&work).unwrap();
        let script = dir.path().join("fake-yolo");
        std::fs::write(
            &script,
            "#!/bin/sh\nmkdir -p ../../data/train_results/train_result/weights\n\
             touch ../../data/train_results/train_result/weights/best.pt\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let train = TrainParams::from_config(&train_config()).unwrap();
        let library = UltralyticsCli::new(&script, &work, ExecMode::Run);
        let mut model = library.load_model("yolov8n.pt").unwrap();
        assert_eq!(model.weights(), "yolov8n.pt");

        model.train(&train).unwrap();

        assert!(model.weights().ends_with("train_result/weights/best.pt"));
        assert!(Path::new(model.weights()).exists());
    }

    #[test]
    fn test_find_trained_weights_picks_newest_run() {
        let dir = TempDir::new().unwrap();
        touch_weights(dir.path(), "train_result", Duration::from_secs(600));
        let newest = touch_weights(dir.path(), "train_result3", Duration::from_secs(1));
        touch_weights(dir.path(), "train_result2", Duration::from_secs(300));
        touch_weights(dir.path(), "train_result_old", Duration::ZERO);

        assert_eq!(find_trained_weights(dir.path(), "train_result"), Some(newest));
    }

    #[test]
    fn test_find_trained_weights_ignores_runs_without_weights() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("train_result")).unwrap();

        assert_eq!(find_trained_weights(dir.path(), "train_result"), None);
        assert_eq!(find_trained_weights(&dir.path().join("missing"), "run"), None);
    }

    #[test]
    fn test_launch_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let library =
            UltralyticsCli::new(dir.path().join("no-such-yolo"), dir.path(), ExecMode::Run);
        let mut model = library.load_model("best.pt").unwrap();

        let config = RunConfig::new(
            "config.yaml",
            [
                ("data", "d.yaml"),
                ("split", "val"),
                ("plots", "false"),
                ("iou", "0.5"),
                ("conf", "0.5"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), ConfigValue::from(v)))
            .collect(),
        );
        let val = ValParams::from_config(&config).unwrap();

        let err = model.validate(&val).unwrap_err();
        assert!(matches!(err, Error::LibraryLaunch { .. }));
    }
}
