//! Arithmetic puzzle generation.
//!
//! Operand ranges widen with difficulty. Subtraction never goes negative and
//! division always has an integer quotient.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::difficulty::{Difficulty, Operation};

/// A question ready to be shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub question: String,
    pub answer: i64,
    pub difficulty: Difficulty,
    pub operation: Operation,
}

/// Build one puzzle at the given level.
pub fn generate_puzzle<R: Rng + ?Sized>(
    rng: &mut R,
    difficulty: Difficulty,
    operation: Operation,
) -> Puzzle {
    let (a, b, answer): (i64, i64, i64) = match operation {
        Operation::Addition => {
            let (a, b): (i64, i64) = match difficulty {
                Difficulty::Easy => (rng.gen_range(1..=9), rng.gen_range(1..=9)),
                Difficulty::Medium => (rng.gen_range(10..=49), rng.gen_range(5..=49)),
                Difficulty::Hard => (rng.gen_range(50..=199), rng.gen_range(10..=99)),
            };
            (a, b, a + b)
        }
        Operation::Subtraction => {
            let (x, y): (i64, i64) = match difficulty {
                Difficulty::Easy => (rng.gen_range(2..=9), rng.gen_range(1..=8)),
                Difficulty::Medium => (rng.gen_range(10..=80), rng.gen_range(1..=49)),
                Difficulty::Hard => (rng.gen_range(80..=199), rng.gen_range(10..=79)),
            };
            let (a, b) = (x.max(y), x.min(y));
            (a, b, a - b)
        }
        Operation::Multiplication => {
            let (a, b): (i64, i64) = match difficulty {
                Difficulty::Easy => (rng.gen_range(1..=5), rng.gen_range(1..=5)),
                Difficulty::Medium => (rng.gen_range(3..=12), rng.gen_range(2..=12)),
                Difficulty::Hard => (rng.gen_range(10..=25), rng.gen_range(5..=15)),
            };
            (a, b, a * b)
        }
        Operation::Division => {
            let (divisor, quotient): (i64, i64) = match difficulty {
                Difficulty::Easy => (rng.gen_range(1..=5), rng.gen_range(1..=9)),
                Difficulty::Medium => (rng.gen_range(2..=12), rng.gen_range(2..=12)),
                Difficulty::Hard => (rng.gen_range(5..=20), rng.gen_range(5..=25)),
            };
            (divisor * quotient, divisor, quotient)
        }
    };

    Puzzle {
        question: format!("{a} {} {b}", operation.symbol()),
        answer,
        difficulty,
        operation,
    }
}

/// Seedable puzzle source restricted to a set of operations.
#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    rng: Mcg128Xsl64,
    operations: Vec<Operation>,
}

impl PuzzleGenerator {
    /// An empty `operations` list allows every operation.
    pub fn new(operations: Vec<Operation>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        let operations = if operations.is_empty() {
            Operation::ALL.to_vec()
        } else {
            operations
        };
        Self { rng, operations }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Puzzle at `difficulty` with a randomly chosen allowed operation.
    pub fn next(&mut self, difficulty: Difficulty) -> Puzzle {
        let operation = self
            .operations
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Operation::Addition);
        generate_puzzle(&mut self.rng, difficulty, operation)
    }

    /// Puzzle with a fixed operation.
    pub fn next_with(&mut self, difficulty: Difficulty, operation: Operation) -> Puzzle {
        generate_puzzle(&mut self.rng, difficulty, operation)
    }
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}
