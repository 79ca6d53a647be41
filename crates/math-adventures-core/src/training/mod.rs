//! Offline training of the difficulty model.
//!
//! Produces a [`ModelArtifact`] from synthetic learner transitions. This is
//! a batch job; the session never trains, it only loads the result.

mod cart;
mod synth;

pub use cart::{fit, TreeParams};
pub use synth::{generate_dataset, synthesize_transition, Sample};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::{ArtifactMetadata, Classifier, DecisionTree, ModelArtifact};

/// Parameters of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub samples: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// `None` = random
    pub seed: Option<u64>,
    pub name: String,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            samples: 8000,
            max_depth: 6,
            min_samples_split: 2,
            seed: Some(42),
            name: "difficulty-model".to_string(),
        }
    }
}

/// Fraction of samples the tree labels correctly (0.0 when empty).
pub fn accuracy_on(tree: &DecisionTree, samples: &[Sample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let hits = samples
        .iter()
        .filter(|s| tree.predict(&s.features) == s.label as i64)
        .count();
    hits as f64 / samples.len() as f64
}

/// Synthesise a dataset, fit a tree and wrap it as an artifact.
pub fn train(config: &TrainingConfig) -> ModelArtifact {
    let data = generate_dataset(config.samples, config.seed);
    let tree = fit(
        &data,
        TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
        },
    );
    let training_accuracy = accuracy_on(&tree, &data);

    info!(
        samples = data.len(),
        nodes = tree.len(),
        depth = tree.depth(),
        training_accuracy,
        "trained difficulty model"
    );

    ModelArtifact::new(
        ArtifactMetadata {
            name: config.name.clone(),
            created_at: Utc::now(),
            samples: data.len(),
            max_depth: config.max_depth,
            seed: config.seed,
            training_accuracy,
        },
        tree,
    )
}
