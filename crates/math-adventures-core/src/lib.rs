//! # Math Adventures Core Library
//!
//! Adaptive-difficulty logic for arithmetic practice. A session logs every
//! answer, summarises the learner's recent accuracy and pacing, and asks a
//! difficulty policy which level the next puzzle should be.
//!
//! ## Architecture
//!
//! - **Tracker**: append-only trial log with all-time and windowed statistics
//! - **Policy**: rule engine or trained classifier behind one trait
//! - **Model / Training**: decision-tree artifacts and the offline trainer
//! - **Session**: explicit context object tying tracker, level and policy together
//!
//! ## Key Components
//!
//! - [`PerformanceTracker`]: trial log and statistics
//! - [`DifficultyPolicy`]: shared policy contract
//! - [`PolicyEngine`]: the active policy of a session
//! - [`Session`]: one learner's practice run
//! - [`Config`]: TOML configuration

pub mod difficulty;
pub mod error;
pub mod export;
pub mod model;
pub mod policy;
pub mod puzzle;
pub mod session;
pub mod storage;
pub mod tracker;
pub mod training;

pub use difficulty::{Difficulty, Operation};
pub use error::{ConfigError, CoreError, LoadError};
pub use model::{Classifier, DecisionTree, ModelArtifact};
pub use policy::{DifficultyPolicy, ModelBasedPolicy, PolicyEngine, RuleBasedPolicy, RuleConfig};
pub use puzzle::{generate_puzzle, Puzzle, PuzzleGenerator};
pub use session::{parse_answer, Feedback, Session, SubmitOutcome};
pub use storage::{Config, EngineKind, PolicyConfig, SessionConfig};
pub use tracker::{PerformanceTracker, SessionSummary, TrialRecord, WindowSummary, UNPARSEABLE_ANSWER};
pub use training::{train, TrainingConfig};
