//! Progress display for folder inference.

use indicatif::{ProgressBar, ProgressStyle};

/// Per-image progress over a folder of inference sources.
///
/// A disabled or empty run carries no bar, and every method is then a no-op.
#[derive(Debug)]
pub struct PredictionProgress {
    bar: Option<ProgressBar>,
}

impl PredictionProgress {
    /// Bar over `total_images` predictions, or none when `enabled` is false.
    pub fn new(total_images: usize, enabled: bool) -> Self {
        if !enabled || total_images == 0 {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total_images as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} images ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░ "),
        );
        Self { bar: Some(bar) }
    }

    /// Whether a bar is drawn.
    pub const fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Predict on `source` through `f` with the bar hidden, so the library's
    /// own output is not overdrawn. The bar advances only when `f` succeeds.
    pub fn predict<T, E>(
        &self,
        source: &str,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let Some(bar) = &self.bar else {
            return f();
        };

        bar.set_message(source.to_string());
        let result = bar.suspend(f);
        if result.is_ok() {
            bar.inc(1);
        }
        result
    }

    /// Finish the bar once every image has been predicted.
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_with_message("done");
        }
    }

    #[cfg(test)]
    fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_or_empty_has_no_bar() {
        assert!(!PredictionProgress::new(10, false).is_visible());
        assert!(!PredictionProgress::new(0, true).is_visible());
        assert!(PredictionProgress::new(3, true).is_visible());
    }

    #[test]
    fn test_without_bar_runs_prediction() {
        let progress = PredictionProgress::new(0, true);
        assert_eq!(progress.predict("images/a.jpg", || Ok::<_, ()>(7)), Ok(7));
        assert_eq!(progress.position(), None);
    }

    #[test]
    fn test_failed_prediction_does_not_advance() {
        let progress = PredictionProgress::new(2, true);
        assert_eq!(progress.predict("images/a.jpg", || Ok::<_, ()>(())), Ok(()));
        assert_eq!(progress.predict("images/b.jpg", || Err::<(), _>("boom")), Err("boom"));
        assert_eq!(progress.position(), Some(1));
        progress.finish();
    }
}
