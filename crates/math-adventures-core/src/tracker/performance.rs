//! Append-only performance log with windowed statistics.
//!
//! Every statistic is a linear scan over the log, recomputed on each call.
//! Nothing is cached, so any value can be checked by recomputing it from
//! [`PerformanceTracker::trials`].

use std::collections::BTreeMap;

use serde::Serialize;

use super::summary::SessionSummary;
use super::trial::TrialRecord;
use crate::difficulty::{Difficulty, Operation};

/// Accuracy and pacing over the most recent trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowSummary {
    /// Fraction correct in the window (0.0 when empty)
    pub accuracy: f64,
    /// Mean elapsed seconds, `None` when the window is empty
    pub average_time: Option<f64>,
    /// Number of trials actually in the window
    pub size: usize,
}

/// Ordered log of every answered question in a session.
#[derive(Debug, Clone, Default)]
pub struct PerformanceTracker {
    trials: Vec<TrialRecord>,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one answered question. Never fails.
    pub fn log_trial(
        &mut self,
        question: impl Into<String>,
        correct_answer: i64,
        submitted_answer: i64,
        elapsed_secs: f64,
        difficulty: Difficulty,
        operation: Operation,
    ) -> &TrialRecord {
        self.trials.push(TrialRecord::new(
            question,
            correct_answer,
            submitted_answer,
            elapsed_secs,
            difficulty,
            operation,
        ));
        &self.trials[self.trials.len() - 1]
    }

    /// Full log in chronological order.
    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// The most recent `n` trials (all of them if fewer exist).
    pub fn recent(&self, n: usize) -> &[TrialRecord] {
        let start = self.trials.len().saturating_sub(n);
        &self.trials[start..]
    }

    /// All-time fraction of correct answers.
    pub fn accuracy(&self) -> f64 {
        accuracy_of(&self.trials)
    }

    /// All-time mean elapsed seconds.
    pub fn average_time(&self) -> f64 {
        mean_time_of(&self.trials).unwrap_or(0.0)
    }

    /// Fraction correct among the last `n` trials.
    pub fn last_n_accuracy(&self, n: usize) -> f64 {
        accuracy_of(self.recent(n))
    }

    /// Mean elapsed seconds among the last `n` trials.
    pub fn last_n_average_time(&self, n: usize) -> f64 {
        mean_time_of(self.recent(n)).unwrap_or(0.0)
    }

    /// Windowed accuracy and pacing in one pass, keeping "no data" distinct
    /// from a zero average.
    pub fn window_summary(&self, n: usize) -> WindowSummary {
        let window = self.recent(n);
        WindowSummary {
            accuracy: accuracy_of(window),
            average_time: mean_time_of(window),
            size: window.len(),
        }
    }

    /// Number of trials logged at each difficulty. Only levels that occur
    /// appear as keys.
    pub fn counts_by_difficulty(&self) -> BTreeMap<Difficulty, usize> {
        let mut counts = BTreeMap::new();
        for trial in &self.trials {
            *counts.entry(trial.difficulty()).or_insert(0) += 1;
        }
        counts
    }

    pub fn counts_by_operation(&self) -> BTreeMap<Operation, usize> {
        let mut counts = BTreeMap::new();
        for trial in &self.trials {
            *counts.entry(trial.operation()).or_insert(0) += 1;
        }
        counts
    }

    /// Fraction correct per difficulty level.
    pub fn accuracy_by_difficulty(&self) -> BTreeMap<Difficulty, f64> {
        let mut groups: BTreeMap<Difficulty, (usize, usize)> = BTreeMap::new();
        for trial in &self.trials {
            let entry = groups.entry(trial.difficulty()).or_insert((0, 0));
            entry.1 += 1;
            if trial.is_correct() {
                entry.0 += 1;
            }
        }
        groups
            .into_iter()
            .map(|(level, (hits, total))| (level, hits as f64 / total as f64))
            .collect()
    }

    /// Ladder position (1 = Easy, 2 = Medium, 3 = Hard) of every trial in
    /// order, for charting difficulty transitions.
    pub fn difficulty_trajectory(&self) -> Vec<u8> {
        self.trials
            .iter()
            .map(|t| t.difficulty().index() as u8 + 1)
            .collect()
    }

    /// Snapshot of the session for reporting.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total: self.len(),
            correct: self.trials.iter().filter(|t| t.is_correct()).count(),
            accuracy: self.accuracy(),
            average_time: self.average_time(),
            counts_by_difficulty: self.counts_by_difficulty(),
            accuracy_by_difficulty: self.accuracy_by_difficulty(),
            counts_by_operation: self.counts_by_operation(),
            trajectory: self.difficulty_trajectory(),
            recent: self.recent(SessionSummary::RECENT_ATTEMPTS).to_vec(),
        }
    }
}

fn accuracy_of(trials: &[TrialRecord]) -> f64 {
    if trials.is_empty() {
        return 0.0;
    }
    let hits = trials.iter().filter(|t| t.is_correct()).count();
    hits as f64 / trials.len() as f64
}

fn mean_time_of(trials: &[TrialRecord]) -> Option<f64> {
    if trials.is_empty() {
        return None;
    }
    let total: f64 = trials.iter().map(|t| t.elapsed_secs()).sum();
    Some(total / trials.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(tracker: &mut PerformanceTracker, correct: bool, secs: f64, level: Difficulty) {
        let submitted = if correct { 10 } else { 11 };
        tracker.log_trial("5 + 5", 10, submitted, secs, level, Operation::Addition);
    }

    #[test]
    fn empty_tracker_yields_neutral_values() {
        let tracker = PerformanceTracker::new();
        assert_eq!(tracker.accuracy(), 0.0);
        assert_eq!(tracker.average_time(), 0.0);
        assert_eq!(tracker.last_n_accuracy(5), 0.0);
        assert_eq!(tracker.last_n_average_time(5), 0.0);
        assert!(tracker.counts_by_difficulty().is_empty());

        let window = tracker.window_summary(5);
        assert_eq!(window.size, 0);
        assert!(window.average_time.is_none());
    }

    #[test]
    fn accuracy_is_exact_fraction() {
        let mut tracker = PerformanceTracker::new();
        log(&mut tracker, true, 1.0, Difficulty::Easy);
        log(&mut tracker, false, 1.0, Difficulty::Easy);
        log(&mut tracker, true, 1.0, Difficulty::Easy);
        assert_eq!(tracker.accuracy(), 2.0 / 3.0);
    }

    #[test]
    fn window_only_sees_recent_trials() {
        let mut tracker = PerformanceTracker::new();
        for _ in 0..5 {
            log(&mut tracker, false, 10.0, Difficulty::Easy);
        }
        for _ in 0..5 {
            log(&mut tracker, true, 2.0, Difficulty::Medium);
        }
        assert_eq!(tracker.last_n_accuracy(5), 1.0);
        assert_eq!(tracker.last_n_average_time(5), 2.0);
        assert_eq!(tracker.accuracy(), 0.5);
        assert_eq!(tracker.average_time(), 6.0);
    }

    #[test]
    fn short_log_window_covers_everything() {
        let mut tracker = PerformanceTracker::new();
        log(&mut tracker, true, 3.0, Difficulty::Easy);
        log(&mut tracker, false, 5.0, Difficulty::Easy);
        assert_eq!(tracker.last_n_accuracy(5), tracker.accuracy());
        assert_eq!(tracker.last_n_average_time(5), tracker.average_time());
    }

    #[test]
    fn zero_window_is_neutral() {
        let mut tracker = PerformanceTracker::new();
        log(&mut tracker, true, 3.0, Difficulty::Easy);
        assert_eq!(tracker.last_n_accuracy(0), 0.0);
        assert!(tracker.window_summary(0).average_time.is_none());
    }

    #[test]
    fn counts_by_difficulty_sum_to_len() {
        let mut tracker = PerformanceTracker::new();
        log(&mut tracker, true, 1.0, Difficulty::Easy);
        log(&mut tracker, true, 1.0, Difficulty::Hard);
        log(&mut tracker, false, 1.0, Difficulty::Hard);

        let counts = tracker.counts_by_difficulty();
        assert_eq!(counts.get(&Difficulty::Easy), Some(&1));
        assert_eq!(counts.get(&Difficulty::Hard), Some(&2));
        assert!(!counts.contains_key(&Difficulty::Medium));
        assert_eq!(counts.values().sum::<usize>(), tracker.len());
    }

    #[test]
    fn accuracy_by_difficulty_groups_levels() {
        let mut tracker = PerformanceTracker::new();
        log(&mut tracker, true, 1.0, Difficulty::Easy);
        log(&mut tracker, false, 1.0, Difficulty::Medium);
        log(&mut tracker, true, 1.0, Difficulty::Medium);

        let by_level = tracker.accuracy_by_difficulty();
        assert_eq!(by_level[&Difficulty::Easy], 1.0);
        assert_eq!(by_level[&Difficulty::Medium], 0.5);
    }

    #[test]
    fn trajectory_follows_insertion_order() {
        let mut tracker = PerformanceTracker::new();
        log(&mut tracker, true, 1.0, Difficulty::Easy);
        log(&mut tracker, true, 1.0, Difficulty::Medium);
        log(&mut tracker, true, 1.0, Difficulty::Hard);
        log(&mut tracker, false, 1.0, Difficulty::Medium);
        assert_eq!(tracker.difficulty_trajectory(), vec![1, 2, 3, 2]);
    }
}
