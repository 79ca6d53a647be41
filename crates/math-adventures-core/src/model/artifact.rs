//! On-disk model artifact: a versioned JSON document wrapping a decision tree.
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "metadata": { "name": "...", "created_at": "...", "samples": 8000, ... },
//!   "tree": { "nodes": [ { "kind": "split", ... }, { "kind": "leaf", "class": 1 } ] }
//! }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::compat::{check_compatibility, Compatibility};
use super::tree::DecisionTree;
use crate::error::{CoreError, LoadError};

/// Current artifact format version (semver).
pub const ARTIFACT_VERSION: &str = "1.0.0";

/// Provenance of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Training set size
    #[serde(default)]
    pub samples: usize,
    #[serde(default)]
    pub max_depth: usize,
    /// RNG seed used to synthesise the training set
    #[serde(default)]
    pub seed: Option<u64>,
    /// Fraction of training samples the tree classifies correctly
    #[serde(default)]
    pub training_accuracy: f64,
}

impl Default for ArtifactMetadata {
    fn default() -> Self {
        Self {
            name: "difficulty-model".to_string(),
            created_at: Utc::now(),
            samples: 0,
            max_depth: 0,
            seed: None,
            training_accuracy: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    #[serde(default)]
    pub metadata: ArtifactMetadata,
    pub tree: DecisionTree,
}

impl ModelArtifact {
    pub fn new(metadata: ArtifactMetadata, tree: DecisionTree) -> Self {
        Self {
            version: ARTIFACT_VERSION.to_string(),
            metadata,
            tree,
        }
    }

    /// Serialize the artifact to a JSON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate an artifact.
    ///
    /// # Errors
    /// Returns `LoadError::Parse` for malformed JSON, `IncompatibleVersion`
    /// for a different major format version, `InvalidTree` for a broken tree.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;

        match check_compatibility(ARTIFACT_VERSION, &artifact.version) {
            Compatibility::Compatible => {}
            compat @ Compatibility::MinorNewer { .. } => warn!("{compat}"),
            Compatibility::Incompatible { .. } => {
                return Err(LoadError::IncompatibleVersion {
                    found: artifact.version,
                    supported: ARTIFACT_VERSION.to_string(),
                });
            }
        }

        artifact.tree.validate()?;
        Ok(artifact)
    }

    /// Read an artifact from disk.
    ///
    /// # Errors
    /// Returns `LoadError::NotFound` if the path does not exist, `Io` if it
    /// cannot be read, and any error from [`ModelArtifact::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Write the artifact to disk as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classifier, TreeNode};

    fn artifact() -> ModelArtifact {
        let tree = DecisionTree::new(vec![
            TreeNode::Split {
                feature: 1,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { class: 0 },
            TreeNode::Leaf { class: 2 },
        ])
        .unwrap();
        ModelArtifact::new(
            ArtifactMetadata {
                name: "test".to_string(),
                ..Default::default()
            },
            tree,
        )
    }

    #[test]
    fn save_then_load_preserves_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        artifact().save(&path).unwrap();

        let loaded = ModelArtifact::load(&path).unwrap();
        assert_eq!(loaded.version, ARTIFACT_VERSION);
        assert_eq!(loaded.metadata.name, "test");
        assert_eq!(loaded.tree.predict(&[0.0, 0.9, 3.0]), 2);
        assert_eq!(loaded.tree.predict(&[0.0, 0.1, 3.0]), 0);
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            ModelArtifact::from_json("not a model"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn rejects_major_version_bump() {
        let mut a = artifact();
        a.version = "2.0.0".to_string();
        let json = a.to_json().unwrap();
        assert!(matches!(
            ModelArtifact::from_json(&json),
            Err(LoadError::IncompatibleVersion { .. })
        ));
    }

    #[test]
    fn accepts_newer_minor_version() {
        let mut a = artifact();
        a.version = "1.4.0".to_string();
        let json = a.to_json().unwrap();
        assert!(ModelArtifact::from_json(&json).is_ok());
    }

    #[test]
    fn rejects_invalid_tree() {
        let json = r#"{
            "version": "1.0.0",
            "metadata": { "name": "broken", "created_at": "2026-01-01T00:00:00Z" },
            "tree": { "nodes": [
                { "kind": "split", "feature": 1, "threshold": 0.5, "left": 1, "right": 9 },
                { "kind": "leaf", "class": 0 }
            ] }
        }"#;
        assert!(matches!(
            ModelArtifact::from_json(json),
            Err(LoadError::InvalidTree(_))
        ));
    }

    #[test]
    fn metadata_defaults_fill_missing_fields() {
        let json = r#"{
            "version": "1.0.0",
            "metadata": { "name": "minimal", "created_at": "2026-01-01T00:00:00Z" },
            "tree": { "nodes": [ { "kind": "leaf", "class": 1 } ] }
        }"#;
        let a = ModelArtifact::from_json(json).unwrap();
        assert_eq!(a.metadata.samples, 0);
        assert!(a.metadata.seed.is_none());
    }
}
