//! A single practice session.
//!
//! The session owns the tracker, the current level and the active policy.
//! One answer flows through it as:
//!
//! ```text
//! submit -> log_trial -> window summary -> policy.next_difficulty -> current level
//! ```
//!
//! A session is created with [`Session::start`], may be [`Session::reset`],
//! and is simply dropped when the learner is done.

use serde::Serialize;
use tracing::{debug, info};

use crate::difficulty::Difficulty;
use crate::error::ConfigError;
use crate::policy::{DifficultyPolicy, PolicyEngine};
use crate::puzzle::{Puzzle, PuzzleGenerator};
use crate::storage::{Config, SessionConfig};
use crate::tracker::{PerformanceTracker, SessionSummary, UNPARSEABLE_ANSWER};

/// Encouragement shown after an answer. Never reveals the correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Correct => "Correct! Great job, keep it up!",
            Feedback::Incorrect => "Incorrect. Don't worry, you'll get the next one!",
        }
    }
}

/// What happened when an answer was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub previous: Difficulty,
    pub next: Difficulty,
    pub feedback: Feedback,
}

impl SubmitOutcome {
    pub fn changed(&self) -> bool {
        self.previous != self.next
    }
}

/// Parse a learner's typed answer, mapping anything that is not an integer
/// to [`UNPARSEABLE_ANSWER`].
pub fn parse_answer(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(UNPARSEABLE_ANSWER)
}

#[derive(Debug)]
pub struct Session {
    settings: SessionConfig,
    tracker: PerformanceTracker,
    current: Difficulty,
    policy: PolicyEngine,
}

impl Session {
    /// Begin a session at the configured starting level. The window of
    /// recent trials is the one `policy` was built with.
    pub fn start(config: &Config, policy: PolicyEngine) -> Self {
        info!(
            learner = %config.session.learner_name,
            start = %config.session.start_difficulty,
            policy = policy.kind(),
            window_size = policy.window_size(),
            max_questions = config.session.max_questions,
            "session started"
        );
        Self {
            settings: config.session.clone(),
            tracker: PerformanceTracker::new(),
            current: config.session.start_difficulty,
            policy,
        }
    }

    /// Begin a session with the policy described by `config`.
    ///
    /// # Errors
    /// Returns an error if the rule thresholds are invalid. An unloadable
    /// model is not an error; the rule engine is used instead.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let policy = PolicyEngine::from_config(&config.policy)?;
        Ok(Self::start(config, policy))
    }

    pub fn current_difficulty(&self) -> Difficulty {
        self.current
    }

    pub fn tracker(&self) -> &PerformanceTracker {
        &self.tracker
    }

    pub fn policy(&self) -> &PolicyEngine {
        &self.policy
    }

    pub fn settings(&self) -> &SessionConfig {
        &self.settings
    }

    pub fn window_size(&self) -> usize {
        self.policy.window_size()
    }

    pub fn answered(&self) -> usize {
        self.tracker.len()
    }

    pub fn remaining(&self) -> usize {
        (self.settings.max_questions as usize).saturating_sub(self.answered())
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// Draw the next puzzle at the current level.
    pub fn next_puzzle(&self, generator: &mut PuzzleGenerator) -> Puzzle {
        generator.next(self.current)
    }

    /// Record an answer and move the level according to the policy.
    ///
    /// The trial is logged at the puzzle's own difficulty. The policy then
    /// sees the accuracy and pacing of the last `window_size` trials.
    pub fn submit(&mut self, puzzle: &Puzzle, raw_answer: &str, elapsed_secs: f64) -> SubmitOutcome {
        let submitted = parse_answer(raw_answer);
        let correct = self
            .tracker
            .log_trial(
                puzzle.question.clone(),
                puzzle.answer,
                submitted,
                elapsed_secs,
                puzzle.difficulty,
                puzzle.operation,
            )
            .is_correct();

        let window = self.tracker.window_summary(self.policy.window_size());
        let previous = self.current;
        let next = self
            .policy
            .next_difficulty(previous, window.accuracy, window.average_time);
        self.current = next;

        debug!(
            question = %puzzle.question,
            correct,
            window_accuracy = window.accuracy,
            window_size = window.size,
            %previous,
            %next,
            "answer submitted"
        );

        SubmitOutcome {
            correct,
            previous,
            next,
            feedback: if correct {
                Feedback::Correct
            } else {
                Feedback::Incorrect
            },
        }
    }

    /// Discard all trials and restart at `start`. The policy is kept.
    pub fn reset(&mut self, start: Difficulty) {
        info!(discarded = self.tracker.len(), %start, "session reset");
        self.tracker = PerformanceTracker::new();
        self.current = start;
        self.settings.start_difficulty = start;
    }

    pub fn summary(&self) -> SessionSummary {
        self.tracker.summary()
    }
}
