//! Thresholded rule engine over the difficulty ladder.
//!
//! ```text
//! accuracy >= up    and (time unknown or time <= fast)  -> step up
//! accuracy >= up    and time > fast                     -> stay
//! accuracy <= down                                      -> step down
//! otherwise                                             -> stay
//! ```
//!
//! Both boundaries are inclusive, so ties move the learner.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DifficultyPolicy;
use crate::difficulty::Difficulty;
use crate::error::ConfigError;

/// Thresholds for [`RuleBasedPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Number of recent trials the caller should summarise
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Recent accuracy at or above which the learner moves up
    #[serde(default = "default_up_threshold")]
    pub up_threshold: f64,
    /// Recent accuracy at or below which the learner moves down
    #[serde(default = "default_down_threshold")]
    pub down_threshold: f64,
    /// Average seconds per answer that still counts as fluent
    #[serde(default = "default_fast_time_threshold")]
    pub fast_time_threshold: f64,
}

fn default_window_size() -> usize {
    5
}
fn default_up_threshold() -> f64 {
    0.8
}
fn default_down_threshold() -> f64 {
    0.5
}
fn default_fast_time_threshold() -> f64 {
    6.0
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            up_threshold: default_up_threshold(),
            down_threshold: default_down_threshold(),
            fast_time_threshold: default_fast_time_threshold(),
        }
    }
}

impl RuleConfig {
    /// Check that the thresholds describe a usable rule set.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(invalid("window_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.up_threshold) {
            return Err(invalid("up_threshold", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.down_threshold) {
            return Err(invalid("down_threshold", "must be within [0, 1]"));
        }
        if self.down_threshold > self.up_threshold {
            return Err(invalid("down_threshold", "must not exceed up_threshold"));
        }
        if self.fast_time_threshold.is_nan() || self.fast_time_threshold < 0.0 {
            return Err(invalid("fast_time_threshold", "must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Deterministic policy that moves at most one level per decision.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedPolicy {
    config: RuleConfig,
}

impl RuleBasedPolicy {
    /// Create a policy with custom thresholds.
    ///
    /// # Errors
    /// Returns an error if the thresholds fail [`RuleConfig::validate`].
    pub fn new(config: RuleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn window_size(&self) -> usize {
        self.config.window_size
    }
}

impl DifficultyPolicy for RuleBasedPolicy {
    fn next_difficulty(
        &self,
        current: Difficulty,
        recent_accuracy: f64,
        recent_avg_time: Option<f64>,
    ) -> Difficulty {
        let next = if recent_accuracy >= self.config.up_threshold {
            match recent_avg_time {
                Some(secs) if secs > self.config.fast_time_threshold => current,
                _ => current.step_up(),
            }
        } else if recent_accuracy <= self.config.down_threshold {
            current.step_down()
        } else {
            current
        };

        debug!(
            policy = "rule",
            %current,
            recent_accuracy,
            ?recent_avg_time,
            %next,
            "difficulty decision"
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RuleBasedPolicy {
        RuleBasedPolicy::default()
    }

    #[test]
    fn hard_stays_hard_at_ceiling() {
        assert_eq!(policy().next_difficulty(Difficulty::Hard, 1.0, Some(0.0)), Difficulty::Hard);
    }

    #[test]
    fn easy_stays_easy_at_floor() {
        for time in [None, Some(0.0), Some(3.0), Some(60.0)] {
            assert_eq!(policy().next_difficulty(Difficulty::Easy, 0.0, time), Difficulty::Easy);
        }
    }

    #[test]
    fn accurate_and_fast_steps_up() {
        assert_eq!(
            policy().next_difficulty(Difficulty::Medium, 0.9, Some(3.0)),
            Difficulty::Hard
        );
    }

    #[test]
    fn accurate_but_slow_stays() {
        assert_eq!(
            policy().next_difficulty(Difficulty::Medium, 0.9, Some(10.0)),
            Difficulty::Medium
        );
    }

    #[test]
    fn accurate_with_unknown_time_steps_up() {
        assert_eq!(policy().next_difficulty(Difficulty::Easy, 1.0, None), Difficulty::Medium);
    }

    #[test]
    fn perfect_accuracy_from_easy_moves_one_step() {
        assert_eq!(
            policy().next_difficulty(Difficulty::Easy, 1.0, Some(0.1)),
            Difficulty::Medium
        );
    }

    #[test]
    fn middle_band_stays() {
        for time in [None, Some(1.0), Some(30.0)] {
            assert_eq!(
                policy().next_difficulty(Difficulty::Medium, 0.6, time),
                Difficulty::Medium
            );
        }
    }

    #[test]
    fn boundaries_are_inclusive() {
        let p = policy();
        assert_eq!(p.next_difficulty(Difficulty::Medium, 0.8, Some(6.0)), Difficulty::Hard);
        assert_eq!(p.next_difficulty(Difficulty::Medium, 0.5, Some(6.0)), Difficulty::Easy);
    }

    #[test]
    fn low_accuracy_steps_down() {
        assert_eq!(policy().next_difficulty(Difficulty::Hard, 0.2, Some(2.0)), Difficulty::Medium);
    }

    #[test]
    fn custom_thresholds_apply() {
        let p = RuleBasedPolicy::new(RuleConfig {
            window_size: 3,
            up_threshold: 0.6,
            down_threshold: 0.2,
            fast_time_threshold: 10.0,
        })
        .unwrap();
        assert_eq!(p.window_size(), 3);
        assert_eq!(p.next_difficulty(Difficulty::Easy, 0.6, Some(9.0)), Difficulty::Medium);
        assert_eq!(p.next_difficulty(Difficulty::Medium, 0.3, Some(9.0)), Difficulty::Medium);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = RuleConfig {
            up_threshold: 0.4,
            down_threshold: 0.6,
            ..RuleConfig::default()
        };
        assert!(matches!(
            RuleBasedPolicy::new(config),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "down_threshold"
        ));
    }

    #[test]
    fn rejects_empty_window() {
        let config = RuleConfig {
            window_size: 0,
            ..RuleConfig::default()
        };
        assert!(RuleBasedPolicy::new(config).is_err());
    }

    #[test]
    fn rejects_nan_time_threshold() {
        let config = RuleConfig {
            fast_time_threshold: f64::NAN,
            ..RuleConfig::default()
        };
        assert!(RuleBasedPolicy::new(config).is_err());
    }
}
