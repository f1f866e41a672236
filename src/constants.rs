//! Application-wide constants.
//!
//! Configuration key names and library defaults live here so the
//! orchestrators and their tests agree on a single spelling.

/// Fixed name of the run configuration file looked up next to the executable.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Default detection library executable (the Ultralytics CLI).
pub const DEFAULT_YOLO_PROGRAM: &str = "yolo";

/// Mode selector value that turns on folder inference.
pub const FOLDER_MODE: &str = "folder";

/// Trained weights file written by the library inside each run directory.
pub const TRAINED_WEIGHTS: &str = "weights/best.pt";

/// Library action names as understood by the `yolo` program.
pub mod actions {
    /// Training.
    pub const TRAIN: &str = "train";
    /// Validation on a dataset split.
    pub const VAL: &str = "val";
    /// Inference on a source.
    pub const PREDICT: &str = "predict";
}

/// Keys read from the run configuration.
pub mod keys {
    /// Architecture or weights identifier for training.
    pub const MODEL: &str = "model";
    /// Trained weights file for inference.
    pub const WEIGHTS_PATH: &str = "weights_path";
    /// Dataset description file.
    pub const DATA: &str = "data";
    /// Save plots.
    pub const PLOTS: &str = "plots";
    /// Automatic mixed precision.
    pub const AMP: &str = "amp";
    /// Training epochs.
    pub const EPOCHS: &str = "epochs";
    /// Early-stop patience in epochs.
    pub const PATIENCE: &str = "patience";
    /// Input image size.
    pub const IMGSZ: &str = "imgsz";
    /// Batch size.
    pub const BATCH: &str = "batch";
    /// Initial learning rate.
    pub const LR0: &str = "lr0";
    /// Final learning rate factor.
    pub const LRF: &str = "lrf";
    /// Fraction of the dataset to train on.
    pub const FRACTION: &str = "fraction";
    /// Checkpoint period in epochs.
    pub const SAVE_PERIOD: &str = "save_period";
    /// Compute device.
    pub const DEVICE: &str = "device";
    /// Hue augmentation.
    pub const HSV_H: &str = "hsv_h";
    /// Saturation augmentation.
    pub const HSV_S: &str = "hsv_s";
    /// Value augmentation.
    pub const HSV_V: &str = "hsv_v";
    /// Rotation augmentation in degrees.
    pub const DEGREES: &str = "degrees";
    /// Scale augmentation gain.
    pub const SCALE: &str = "scale";
    /// Horizontal flip probability.
    pub const FLIPLR: &str = "fliplr";
    /// Mosaic probability.
    pub const MOSAIC: &str = "mosaic";
    /// Training output directory.
    pub const TRAIN_PROJECT: &str = "train_project";
    /// Training run name.
    pub const TRAIN_NAME: &str = "train_name";
    /// Evaluation split.
    pub const SPLIT: &str = "split";
    /// Intersection-over-union threshold.
    pub const IOU: &str = "iou";
    /// Confidence threshold.
    pub const CONF: &str = "conf";
    /// Save annotated outputs.
    pub const SAVE: &str = "save";
    /// Display annotated outputs.
    pub const SHOW: &str = "show";
    /// Inference output directory.
    pub const TEST_PROJECT: &str = "test_project";
    /// Inference run name.
    pub const TEST_NAME: &str = "test_name";
    /// Inference mode selector.
    pub const FOLDER_OR_FILE: &str = "folder_or_file";
    /// Source folder for folder mode.
    pub const FOLDER_PATH: &str = "folder_path";
    /// Source file for single-file mode.
    pub const FILE_PATH: &str = "file_path";
}

/// Parameter names on the library side that differ from the config key.
pub mod params {
    /// Output directory.
    pub const PROJECT: &str = "project";
    /// Run name.
    pub const NAME: &str = "name";
    /// Inference source.
    pub const SOURCE: &str = "source";
}
