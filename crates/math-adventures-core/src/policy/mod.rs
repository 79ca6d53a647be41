//! Difficulty selection policies.
//!
//! A policy maps the current level plus a summary of recent performance to
//! the next level. Two variants exist:
//! - [`RuleBasedPolicy`]: thresholded state machine, one step at a time
//! - [`ModelBasedPolicy`]: trained classifier, may move more than one step
//!
//! Callers hold a [`PolicyEngine`] and only ever call
//! [`DifficultyPolicy::next_difficulty`].

mod model;
mod rule;

pub use model::{ModelBasedPolicy, DEFAULT_EMPTY_WINDOW_TIME};
pub use rule::{RuleBasedPolicy, RuleConfig};

use tracing::warn;

use crate::difficulty::Difficulty;
use crate::storage::{EngineKind, PolicyConfig};

/// Shared contract of every difficulty policy.
pub trait DifficultyPolicy {
    /// Pick the next level.
    ///
    /// `recent_accuracy` is in `[0, 1]`; `recent_avg_time` is `None` when no
    /// trials have been summarised yet. Always returns a level on the ladder.
    fn next_difficulty(
        &self,
        current: Difficulty,
        recent_accuracy: f64,
        recent_avg_time: Option<f64>,
    ) -> Difficulty;
}

/// The active policy of a session.
#[derive(Debug)]
pub enum PolicyEngine {
    RuleBased(RuleBasedPolicy),
    ModelBased(ModelBasedPolicy),
}

impl PolicyEngine {
    /// Build the engine described by configuration.
    ///
    /// A configured model that cannot be loaded is not fatal here: the error
    /// is logged and the rule engine is used instead.
    ///
    /// # Errors
    /// Returns an error only if the rule thresholds are invalid.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, crate::error::ConfigError> {
        let rule = RuleBasedPolicy::new(config.rule_config())?;

        if config.engine != EngineKind::Model {
            return Ok(PolicyEngine::RuleBased(rule));
        }

        let Some(path) = config.model_path.as_deref() else {
            warn!("model engine selected but no model_path configured; using rule engine");
            return Ok(PolicyEngine::RuleBased(rule));
        };

        match ModelBasedPolicy::load(path) {
            Ok(model) => Ok(PolicyEngine::ModelBased(
                model
                    .with_window_size(config.window_size)
                    .with_empty_window_time(config.empty_window_time),
            )),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load model; using rule engine");
                Ok(PolicyEngine::RuleBased(rule))
            }
        }
    }

    /// Number of recent trials summarised for each decision, fixed when the
    /// engine is built.
    pub fn window_size(&self) -> usize {
        match self {
            PolicyEngine::RuleBased(p) => p.window_size(),
            PolicyEngine::ModelBased(p) => p.window_size(),
        }
    }

    /// Short label for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            PolicyEngine::RuleBased(_) => "rule",
            PolicyEngine::ModelBased(_) => "model",
        }
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        PolicyEngine::RuleBased(RuleBasedPolicy::default())
    }
}

impl From<RuleBasedPolicy> for PolicyEngine {
    fn from(policy: RuleBasedPolicy) -> Self {
        PolicyEngine::RuleBased(policy)
    }
}

impl From<ModelBasedPolicy> for PolicyEngine {
    fn from(policy: ModelBasedPolicy) -> Self {
        PolicyEngine::ModelBased(policy)
    }
}

impl DifficultyPolicy for PolicyEngine {
    fn next_difficulty(
        &self,
        current: Difficulty,
        recent_accuracy: f64,
        recent_avg_time: Option<f64>,
    ) -> Difficulty {
        match self {
            PolicyEngine::RuleBased(p) => p.next_difficulty(current, recent_accuracy, recent_avg_time),
            PolicyEngine::ModelBased(p) => p.next_difficulty(current, recent_accuracy, recent_avg_time),
        }
    }
}
