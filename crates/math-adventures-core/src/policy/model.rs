//! Difficulty policy backed by a trained classifier.
//!
//! The classifier sees `[current_level_index, recent_accuracy, recent_avg_time]`
//! and returns a class index. The index is clamped onto the ladder; unlike
//! the rule engine the result may skip a level (Easy -> Hard), which is left
//! to the model.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::DifficultyPolicy;
use crate::difficulty::Difficulty;
use crate::error::LoadError;
use crate::model::{Classifier, ModelArtifact};

/// Seconds substituted for the average time when no trials exist yet.
pub const DEFAULT_EMPTY_WINDOW_TIME: f64 = 8.0;

const DEFAULT_WINDOW_SIZE: usize = 5;

/// Policy delegating decisions to an opaque classifier.
pub struct ModelBasedPolicy {
    classifier: Box<dyn Classifier>,
    window_size: usize,
    empty_window_time: f64,
    source: Option<PathBuf>,
}

impl ModelBasedPolicy {
    /// Load a model artifact from disk.
    ///
    /// # Errors
    /// Returns a [`LoadError`] if the file is missing or unreadable, is not a
    /// valid artifact, was written by an incompatible version, or holds a
    /// structurally invalid tree.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let artifact = ModelArtifact::load(path)?;
        info!(
            path = %path.display(),
            name = %artifact.metadata.name,
            nodes = artifact.tree.len(),
            "loaded difficulty model"
        );
        Ok(Self {
            classifier: Box::new(artifact.tree),
            window_size: DEFAULT_WINDOW_SIZE,
            empty_window_time: DEFAULT_EMPTY_WINDOW_TIME,
            source: Some(path.to_path_buf()),
        })
    }

    /// Wrap any classifier.
    pub fn with_classifier(classifier: impl Classifier + 'static) -> Self {
        Self {
            classifier: Box::new(classifier),
            window_size: DEFAULT_WINDOW_SIZE,
            empty_window_time: DEFAULT_EMPTY_WINDOW_TIME,
            source: None,
        }
    }

    /// Number of recent trials the caller should summarise (at least 1).
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size.max(1);
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Override the seconds used when the caller has no average time.
    pub fn with_empty_window_time(mut self, secs: f64) -> Self {
        self.empty_window_time = secs;
        self
    }

    pub fn empty_window_time(&self) -> f64 {
        self.empty_window_time
    }

    /// Path the artifact was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl fmt::Debug for ModelBasedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBasedPolicy")
            .field("source", &self.source)
            .field("window_size", &self.window_size)
            .field("empty_window_time", &self.empty_window_time)
            .finish_non_exhaustive()
    }
}

impl DifficultyPolicy for ModelBasedPolicy {
    fn next_difficulty(
        &self,
        current: Difficulty,
        recent_accuracy: f64,
        recent_avg_time: Option<f64>,
    ) -> Difficulty {
        let avg_time = recent_avg_time.unwrap_or(self.empty_window_time);
        let features = [current.index() as f64, recent_accuracy, avg_time];
        let class = self.classifier.predict(&features);
        let next = Difficulty::from_index_clamped(class);

        debug!(policy = "model", %current, ?features, class, %next, "difficulty decision");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixed(i64);

    impl Classifier for Fixed {
        fn predict(&self, _features: &[f64; 3]) -> i64 {
            self.0
        }
    }

    struct Recording(Rc<Cell<[f64; 3]>>);

    impl Classifier for Recording {
        fn predict(&self, features: &[f64; 3]) -> i64 {
            self.0.set(*features);
            1
        }
    }

    #[test]
    fn out_of_range_classes_are_clamped() {
        let high = ModelBasedPolicy::with_classifier(Fixed(7));
        assert_eq!(high.next_difficulty(Difficulty::Easy, 0.5, Some(4.0)), Difficulty::Hard);

        let low = ModelBasedPolicy::with_classifier(Fixed(-3));
        assert_eq!(low.next_difficulty(Difficulty::Hard, 0.5, Some(4.0)), Difficulty::Easy);
    }

    #[test]
    fn model_may_skip_a_level() {
        let policy = ModelBasedPolicy::with_classifier(Fixed(2));
        assert_eq!(policy.next_difficulty(Difficulty::Easy, 1.0, Some(1.0)), Difficulty::Hard);
    }

    #[test]
    fn features_encode_level_index() {
        let seen = Rc::new(Cell::new([0.0; 3]));
        let policy = ModelBasedPolicy::with_classifier(Recording(Rc::clone(&seen)));
        policy.next_difficulty(Difficulty::Hard, 0.75, Some(5.5));
        assert_eq!(seen.get(), [2.0, 0.75, 5.5]);
    }

    #[test]
    fn missing_time_uses_empty_window_default() {
        let seen = Rc::new(Cell::new([0.0; 3]));
        let policy = ModelBasedPolicy::with_classifier(Recording(Rc::clone(&seen)));
        policy.next_difficulty(Difficulty::Easy, 0.0, None);
        assert_eq!(seen.get(), [0.0, 0.0, DEFAULT_EMPTY_WINDOW_TIME]);

        let seen = Rc::new(Cell::new([0.0; 3]));
        let policy = ModelBasedPolicy::with_classifier(Recording(Rc::clone(&seen)))
            .with_empty_window_time(12.0);
        policy.next_difficulty(Difficulty::Medium, 0.0, None);
        assert_eq!(seen.get()[2], 12.0);
    }

    #[test]
    fn window_size_is_at_least_one() {
        let policy = ModelBasedPolicy::with_classifier(Fixed(1));
        assert_eq!(policy.window_size(), 5);
        assert_eq!(policy.with_window_size(0).window_size(), 1);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelBasedPolicy::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
