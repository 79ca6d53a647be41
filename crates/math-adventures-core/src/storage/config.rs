//! TOML-based application configuration.
//!
//! Stores:
//! - Session setup (learner name, starting level, operations, length)
//! - Difficulty policy selection and thresholds
//!
//! Configuration is stored at `~/.config/math-adventures/config.toml`.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::data_dir;
use crate::difficulty::{Difficulty, Operation};
use crate::error::ConfigError;
use crate::policy::{RuleConfig, DEFAULT_EMPTY_WINDOW_TIME};

/// Which difficulty policy a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Rule,
    Model,
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rule" => Ok(EngineKind::Rule),
            "model" => Ok(EngineKind::Model),
            other => Err(format!("unknown engine: {other} (expected rule or model)")),
        }
    }
}

impl<'de> Deserialize<'de> for EngineKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Session setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_learner_name")]
    pub learner_name: String,
    #[serde(default)]
    pub start_difficulty: Difficulty,
    /// Operations puzzles are drawn from (empty = all)
    #[serde(default = "default_operations")]
    pub operations: Vec<Operation>,
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,
}

/// Difficulty policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_engine")]
    pub engine: EngineKind,
    /// Trained model artifact, used when `engine = "model"`
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_up_threshold")]
    pub up_threshold: f64,
    #[serde(default = "default_down_threshold")]
    pub down_threshold: f64,
    #[serde(default = "default_fast_time_threshold")]
    pub fast_time_threshold: f64,
    /// Seconds fed to the model while the window is still empty
    #[serde(default = "default_empty_window_time")]
    pub empty_window_time: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/math-adventures/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Allowed session lengths.
pub const MAX_QUESTIONS_RANGE: std::ops::RangeInclusive<u32> = 5..=50;

// Default functions
fn default_learner_name() -> String {
    "Student".into()
}
fn default_operations() -> Vec<Operation> {
    vec![Operation::Addition, Operation::Subtraction]
}
fn default_max_questions() -> u32 {
    10
}
fn default_engine() -> EngineKind {
    EngineKind::Rule
}
fn default_window_size() -> usize {
    RuleConfig::default().window_size
}
fn default_up_threshold() -> f64 {
    RuleConfig::default().up_threshold
}
fn default_down_threshold() -> f64 {
    RuleConfig::default().down_threshold
}
fn default_fast_time_threshold() -> f64 {
    RuleConfig::default().fast_time_threshold
}
fn default_empty_window_time() -> f64 {
    DEFAULT_EMPTY_WINDOW_TIME
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            learner_name: default_learner_name(),
            start_difficulty: Difficulty::Easy,
            operations: default_operations(),
            max_questions: default_max_questions(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            model_path: None,
            window_size: default_window_size(),
            up_threshold: default_up_threshold(),
            down_threshold: default_down_threshold(),
            fast_time_threshold: default_fast_time_threshold(),
            empty_window_time: default_empty_window_time(),
        }
    }
}

impl PolicyConfig {
    /// Thresholds for the rule engine.
    pub fn rule_config(&self) -> RuleConfig {
        RuleConfig {
            window_size: self.window_size,
            up_threshold: self.up_threshold,
            down_threshold: self.down_threshold,
            fast_time_threshold: self.fast_time_threshold,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                // Lists accept JSON or a comma-separated shorthand.
                serde_json::Value::Array(_) => serde_json::from_str(value).unwrap_or_else(|_| {
                    serde_json::Value::Array(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(|s| serde_json::Value::String(s.to_string()))
                            .collect(),
                    )
                }),
                serde_json::Value::Object(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                // Clears optional fields.
                _ if value.is_empty() => serde_json::Value::Null,
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Every dotted key accepted by [`Config::get`] and [`Config::set`],
    /// sorted.
    pub fn keys() -> Vec<String> {
        fn collect(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (name, child) in map {
                        let key = if prefix.is_empty() {
                            name.clone()
                        } else {
                            format!("{prefix}.{name}")
                        };
                        collect(&key, child, out);
                    }
                }
                _ => out.push(prefix.to_string()),
            }
        }

        let mut keys = Vec::new();
        if let Ok(json) = serde_json::to_value(Self::default()) {
            collect("", &json, &mut keys);
        }
        keys
    }

    /// Location of the default config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/math-adventures"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without touching disk. The result
    /// must still pass [`Config::validate`], otherwise `self` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// or validate.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Check ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !MAX_QUESTIONS_RANGE.contains(&self.session.max_questions) {
            return Err(ConfigError::InvalidValue {
                key: "session.max_questions".to_string(),
                message: format!(
                    "must be between {} and {}",
                    MAX_QUESTIONS_RANGE.start(),
                    MAX_QUESTIONS_RANGE.end()
                ),
            });
        }
        if !self.policy.empty_window_time.is_finite() || self.policy.empty_window_time < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "policy.empty_window_time".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }
        self.policy
            .rule_config()
            .validate()
            .map_err(|e| match e {
                ConfigError::InvalidValue { key, message } => ConfigError::InvalidValue {
                    key: format!("policy.{key}"),
                    message,
                },
                other => other,
            })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.session.learner_name, "Student");
        assert_eq!(cfg.session.start_difficulty, Difficulty::Easy);
        assert_eq!(
            cfg.session.operations,
            vec![Operation::Addition, Operation::Subtraction]
        );
        assert_eq!(cfg.session.max_questions, 10);
        assert_eq!(cfg.policy.engine, EngineKind::Rule);
        assert_eq!(cfg.policy.window_size, 5);
        assert_eq!(cfg.policy.up_threshold, 0.8);
        assert_eq!(cfg.policy.down_threshold, 0.5);
        assert_eq!(cfg.policy.fast_time_threshold, 6.0);
        assert_eq!(cfg.policy.empty_window_time, 8.0);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [policy]
            engine = "model"
            model_path = "model.json"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.policy.engine, EngineKind::Model);
        assert_eq!(parsed.policy.model_path, Some(PathBuf::from("model.json")));
        assert_eq!(parsed.policy.up_threshold, 0.8);
        assert_eq!(parsed.session.max_questions, 10);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("session.start_difficulty").as_deref(), Some("Easy"));
        assert_eq!(cfg.get("policy.window_size").as_deref(), Some("5"));
        assert_eq!(cfg.get("policy.engine").as_deref(), Some("rule"));
        assert!(cfg.get("policy.missing_key").is_none());
    }

    #[test]
    fn set_value_updates_number_and_string() {
        let mut cfg = Config::default();
        cfg.set_value("policy.up_threshold", "0.9").unwrap();
        cfg.set_value("session.learner_name", "Ada").unwrap();
        cfg.set_value("session.start_difficulty", "Medium").unwrap();
        assert_eq!(cfg.policy.up_threshold, 0.9);
        assert_eq!(cfg.session.learner_name, "Ada");
        assert_eq!(cfg.session.start_difficulty, Difficulty::Medium);
    }

    #[test]
    fn set_value_accepts_enum_labels_in_any_case() {
        let mut cfg = Config::default();
        cfg.set_value("session.start_difficulty", "medium").unwrap();
        cfg.set_value("policy.engine", "Model").unwrap();
        cfg.set_value("session.operations", "Division,MUL").unwrap();
        assert_eq!(cfg.session.start_difficulty, Difficulty::Medium);
        assert_eq!(cfg.policy.engine, EngineKind::Model);
        assert_eq!(
            cfg.session.operations,
            vec![Operation::Division, Operation::Multiplication]
        );
        assert_eq!(cfg.get("session.start_difficulty").as_deref(), Some("Medium"));
    }

    #[test]
    fn keys_cover_both_sections() {
        let keys = Config::keys();
        assert!(keys.contains(&"session.max_questions".to_string()));
        assert!(keys.contains(&"policy.model_path".to_string()));
        assert!(keys.contains(&"policy.empty_window_time".to_string()));
        let cfg = Config::default();
        for key in &keys {
            assert!(cfg.get(key).is_some(), "{key} is not readable");
        }
    }

    #[test]
    fn set_value_accepts_comma_list() {
        let mut cfg = Config::default();
        cfg.set_value("session.operations", "multiplication, division").unwrap();
        assert_eq!(
            cfg.session.operations,
            vec![Operation::Multiplication, Operation::Division]
        );
    }

    #[test]
    fn set_value_fills_optional_path() {
        let mut cfg = Config::default();
        cfg.set_value("policy.model_path", "/tmp/model.json").unwrap();
        assert_eq!(cfg.policy.model_path, Some(PathBuf::from("/tmp/model.json")));
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("policy.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_value_rejects_out_of_range_and_keeps_old_value() {
        let mut cfg = Config::default();
        assert!(cfg.set_value("session.max_questions", "100").is_err());
        assert!(cfg.set_value("policy.down_threshold", "0.95").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_value_rejects_bad_enum() {
        let mut cfg = Config::default();
        assert!(cfg.set_value("policy.engine", "neural").is_err());
    }

    #[test]
    fn save_to_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.session.max_questions = 20;
        cfg.policy.engine = EngineKind::Model;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nmax_questions = 2\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
