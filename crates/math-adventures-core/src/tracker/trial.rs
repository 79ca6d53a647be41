//! A single answered question.

use serde::Serialize;

use crate::difficulty::{Difficulty, Operation};

/// Submitted-answer value recorded when the learner's input was not an integer.
pub const UNPARSEABLE_ANSWER: i64 = -99999;

/// One logged attempt at a puzzle, with its outcome.
///
/// Fields are read-only; `correct` is derived from the two answers at
/// construction and can never disagree with them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRecord {
    question: String,
    correct_answer: i64,
    #[serde(rename = "user_answer")]
    submitted_answer: i64,
    correct: bool,
    #[serde(rename = "time_taken")]
    elapsed_secs: f64,
    difficulty: Difficulty,
    operation: Operation,
}

impl TrialRecord {
    pub fn new(
        question: impl Into<String>,
        correct_answer: i64,
        submitted_answer: i64,
        elapsed_secs: f64,
        difficulty: Difficulty,
        operation: Operation,
    ) -> Self {
        Self {
            question: question.into(),
            correct_answer,
            submitted_answer,
            correct: submitted_answer == correct_answer,
            elapsed_secs,
            difficulty,
            operation,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn correct_answer(&self) -> i64 {
        self.correct_answer
    }

    pub fn submitted_answer(&self) -> i64 {
        self.submitted_answer
    }

    pub fn is_correct(&self) -> bool {
        self.correct
    }

    /// Seconds the learner took to answer.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Whether the submitted answer was the unparseable sentinel.
    pub fn was_unparseable(&self) -> bool {
        self.submitted_answer == UNPARSEABLE_ANSWER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correctness_is_derived() {
        let hit = TrialRecord::new("2 + 3", 5, 5, 1.2, Difficulty::Easy, Operation::Addition);
        assert!(hit.is_correct());

        let miss = TrialRecord::new("2 + 3", 5, 6, 1.2, Difficulty::Easy, Operation::Addition);
        assert!(!miss.is_correct());
    }

    #[test]
    fn sentinel_is_incorrect_for_ordinary_answers() {
        let trial = TrialRecord::new(
            "7 × 3",
            21,
            UNPARSEABLE_ANSWER,
            4.0,
            Difficulty::Medium,
            Operation::Multiplication,
        );
        assert!(!trial.is_correct());
        assert!(trial.was_unparseable());
    }

    #[test]
    fn sentinel_matching_the_answer_counts_as_correct() {
        // Correctness is purely submitted == correct, sentinel included.
        let trial = TrialRecord::new(
            "odd",
            UNPARSEABLE_ANSWER,
            UNPARSEABLE_ANSWER,
            0.5,
            Difficulty::Hard,
            Operation::Subtraction,
        );
        assert!(trial.is_correct());
    }

    #[test]
    fn serializes_with_export_field_names() {
        let trial = TrialRecord::new("9 - 4", 5, 5, 2.5, Difficulty::Easy, Operation::Subtraction);
        let json = serde_json::to_value(&trial).unwrap();
        assert_eq!(json["user_answer"], 5);
        assert_eq!(json["time_taken"], 2.5);
        assert_eq!(json["difficulty"], "Easy");
        assert_eq!(json["operation"], "subtraction");
        assert_eq!(json["correct"], true);
    }
}
