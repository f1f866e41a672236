//! Inference orchestration over a single file or every entry of a folder.

use crate::config::{ConfigValue, RunConfig};
use crate::constants::{FOLDER_MODE, keys};
use crate::error::{Error, Result};
use crate::library::{DetectionLibrary, DetectionModel, PredictParams, PredictSettings};
use crate::output::progress::PredictionProgress;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// How the inference source is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// One call per entry of `folder_path`.
    Folder,
    /// One call on `file_path`.
    File,
}

impl SourceMode {
    /// Only the exact string `folder` selects folder mode; anything else is a single file.
    #[must_use]
    pub fn from_value(value: &ConfigValue) -> Self {
        if value.as_str() == Some(FOLDER_MODE) {
            Self::Folder
        } else {
            Self::File
        }
    }

    /// Configuration key holding the source path for this mode.
    #[must_use]
    pub const fn source_key(self) -> &'static str {
        match self {
            Self::Folder => keys::FOLDER_PATH,
            Self::File => keys::FILE_PATH,
        }
    }
}

/// Options for an inference run.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferenceOptions {
    /// Show a progress bar in folder mode.
    pub show_progress: bool,
}

/// Run inference as described by `config`.
///
/// Files are processed one at a time in listing order. The first failure
/// aborts the remaining batch.
pub fn run_inference<L: DetectionLibrary>(
    config: &RunConfig,
    library: &L,
    options: &InferenceOptions,
) -> Result<()> {
    let start = Instant::now();

    let weights = config.require(keys::WEIGHTS_PATH)?.to_string();
    let settings = PredictSettings::from_config(config)?;
    let mode = SourceMode::from_value(config.require(keys::FOLDER_OR_FILE)?);
    let source = config.require(mode.source_key())?.to_string();

    info!("Loading weights: {weights}");
    let mut model = library.load_model(&weights)?;

    let calls = match mode {
        SourceMode::Folder => {
            let entries = list_source_folder(config.base_dir(), &source)?;
            info!("Found {} file(s) in {source}", entries.len());

            let progress = PredictionProgress::new(entries.len(), options.show_progress);
            for entry in &entries {
                let params = PredictParams::for_source(entry, &settings);
                progress.predict(entry, || model.predict(&params))?;
            }
            progress.finish();
            entries.len()
        }
        SourceMode::File => {
            model.predict(&PredictParams::for_source(&source, &settings))?;
            1
        }
    };

    info!(
        "Inference finished: {calls} call(s) in {:.1?}",
        start.elapsed()
    );
    Ok(())
}

/// List every entry of `folder` in directory order, joined onto `folder`.
///
/// `folder` is read relative to `base_dir`, but the returned paths keep the
/// configured spelling because the library runs from `base_dir` as well.
/// Entries are neither filtered nor recursed into. A name that is not valid
/// UTF-8 cannot be passed to the library verbatim and fails the listing.
pub fn list_source_folder(base_dir: &Path, folder: &str) -> Result<Vec<String>> {
    let dir = base_dir.join(folder);
    let read_err = |source| Error::SourceDirRead {
        path: dir.clone(),
        source,
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = Path::new(folder).join(entry.file_name());
        let path = path
            .into_os_string()
            .into_string()
            .map_err(|raw| Error::NonUtf8SourceEntry { path: raw.into() })?;
        entries.push(path);
    }

    Ok(entries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_folder_mode_only_for_exact_string() {
        assert_eq!(
            SourceMode::from_value(&ConfigValue::from("folder")),
            SourceMode::Folder
        );
        assert_eq!(
            SourceMode::from_value(&ConfigValue::from("file")),
            SourceMode::File
        );
        assert_eq!(
            SourceMode::from_value(&ConfigValue::from("anything_else")),
            SourceMode::File
        );
        assert_eq!(
            SourceMode::from_value(&ConfigValue::from("Folder")),
            SourceMode::File
        );
        assert_eq!(SourceMode::from_value(&ConfigValue::Bool(true)), SourceMode::File);
    }

    #[test]
    fn test_list_source_folder_keeps_configured_prefix() {
        let base = TempDir::new().unwrap();
        let images = base.path().join("images");
        std::fs::create_dir(&images).unwrap();
        std::fs::write(images.join("a.jpg"), b"").unwrap();
        std::fs::write(images.join("notes.txt"), b"").unwrap();
        std::fs::create_dir(images.join("nested")).unwrap();

        let mut entries = list_source_folder(base.path(), "images").unwrap();
        entries.sort();

        let expected: Vec<String> = ["a.jpg", "nested", "notes.txt"]
            .iter()
            .map(|name| Path::new("images").join(name).to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, expected);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_rejects_non_utf8_entry() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let base = TempDir::new().unwrap();
        let images = base.path().join("images");
        std::fs::create_dir(&images).unwrap();
        std::fs::write(images.join("pole_01.jpg"), b"").unwrap();
        std::fs::write(images.join(OsStr::from_bytes(b"pole_\xff.jpg")), b"").unwrap();

        let result = list_source_folder(base.path(), "images");
        match result {
            Err(Error::NonUtf8SourceEntry { path }) => {
                assert!(path.starts_with("images"));
                assert_eq!(path.file_name().unwrap().as_bytes(), b"pole_\xff.jpg");
            }
            other => panic!("expected non-UTF-8 entry error, got {other:?}"),
        }
    }

    #[test]
    fn test_list_missing_folder_fails() {
        let base = TempDir::new().unwrap();
        let result = list_source_folder(base.path(), "missing");
        assert!(matches!(result, Err(Error::SourceDirRead { .. })));
    }
}
