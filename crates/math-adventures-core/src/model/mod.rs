//! Trained difficulty models.
//!
//! The model-based policy only depends on [`Classifier`]; the bundled
//! implementation is a [`DecisionTree`] persisted as a versioned
//! [`ModelArtifact`].

mod artifact;
mod compat;
mod tree;

pub use artifact::{ArtifactMetadata, ModelArtifact, ARTIFACT_VERSION};
pub use compat::{check_compatibility, parse_version, Compatibility};
pub use tree::{DecisionTree, TreeNode};

/// Length of the feature vector: `[level_index, recent_accuracy, recent_avg_time]`.
pub const FEATURE_COUNT: usize = 3;

/// Black-box predictor of the next level index.
///
/// Implementations may return any integer; callers clamp it onto the ladder.
pub trait Classifier {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> i64;
}
