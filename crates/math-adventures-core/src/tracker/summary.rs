//! Session summary report.

use std::collections::BTreeMap;

use serde::Serialize;

use super::trial::TrialRecord;
use crate::difficulty::{Difficulty, Operation};

/// Aggregated view of a session, computed from the tracker on demand.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// Total questions answered
    pub total: usize,
    /// Questions answered correctly
    pub correct: usize,
    /// Overall accuracy (0.0-1.0)
    pub accuracy: f64,
    /// Mean seconds per question
    pub average_time: f64,
    pub counts_by_difficulty: BTreeMap<Difficulty, usize>,
    pub accuracy_by_difficulty: BTreeMap<Difficulty, f64>,
    pub counts_by_operation: BTreeMap<Operation, usize>,
    /// Ladder position per trial (1 = Easy .. 3 = Hard)
    pub trajectory: Vec<u8>,
    /// Most recent attempts, oldest first
    pub recent: Vec<TrialRecord>,
}

impl SessionSummary {
    /// How many attempts the report lists.
    pub const RECENT_ATTEMPTS: usize = 10;

    /// Render as a plain-text report.
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str("\nSession Summary\n");
        output.push_str(&"=".repeat(60));
        output.push_str("\n\n");

        if self.total == 0 {
            output.push_str("No questions answered yet.\n");
            return output;
        }

        output.push_str(&format!("Total Questions Answered: {}\n", self.total));
        output.push_str(&format!("Overall Accuracy: {:.1}%\n", self.accuracy * 100.0));
        output.push_str(&format!(
            "Average Time per Question: {:.2} seconds\n\n",
            self.average_time
        ));

        output.push_str(&format!("{:<10} {:>8} {:>9}\n", "Level", "Attempts", "Accuracy"));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for (level, count) in &self.counts_by_difficulty {
            let acc = self.accuracy_by_difficulty.get(level).copied().unwrap_or(0.0);
            output.push_str(&format!("{:<10} {:>8} {:>8.0}%\n", level, count, acc * 100.0));
        }
        output.push('\n');

        output.push_str("Recent Attempts:\n");
        for trial in &self.recent {
            let answer = if trial.was_unparseable() {
                "-".to_string()
            } else {
                trial.submitted_answer().to_string()
            };
            output.push_str(&format!(
                "  {} | Your answer: {} | Correct: {} | {} | Time: {:.2}s | Level: {}\n",
                trial.question(),
                answer,
                trial.correct_answer(),
                if trial.is_correct() { "ok" } else { "x" },
                trial.elapsed_secs(),
                trial.difficulty()
            ));
        }

        output.push_str(&format!("\nDifficulty trajectory: {}\n", sparkline(&self.trajectory)));
        output
    }
}

fn sparkline(levels: &[u8]) -> String {
    levels
        .iter()
        .map(|level| match level {
            1 => '▁',
            2 => '▄',
            _ => '█',
        })
        .collect()
}
