//! The three-level difficulty ladder and the arithmetic operation kinds.
//!
//! ```text
//! Easy (0) <-> Medium (1) <-> Hard (2)
//! ```
//!
//! `step_up`/`step_down` move one rung and clamp at the ends.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal difficulty level.
///
/// Serialized as its label; deserialization goes through [`FromStr`], so any
/// casing is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All levels, bottom to top.
    pub const LADDER: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Ordinal index on the ladder (0, 1 or 2).
    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Map any integer onto the ladder, clamping out-of-range values to the
    /// nearest end.
    pub fn from_index_clamped(index: i64) -> Self {
        let top = (Self::LADDER.len() - 1) as i64;
        Self::LADDER[index.clamp(0, top) as usize]
    }

    /// One level harder; `Hard` stays `Hard`.
    pub fn step_up(self) -> Self {
        Self::from_index_clamped(self.index() as i64 + 1)
    }

    /// One level easier; `Easy` stays `Easy`.
    pub fn step_down(self) -> Self {
        Self::from_index_clamped(self.index() as i64 - 1)
    }

    /// Number of rungs between two levels.
    pub fn distance(self, other: Difficulty) -> usize {
        self.index().abs_diff(other.index())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Arithmetic operation a puzzle exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        }
    }

    /// Infix symbol used in question text.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "addition" | "add" => Ok(Operation::Addition),
            "subtraction" | "sub" => Ok(Operation::Subtraction),
            "multiplication" | "mul" => Ok(Operation::Multiplication),
            "division" | "div" => Ok(Operation::Division),
            other => Err(format!("unknown operation: {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_is_totally_ordered() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
    }

    #[test]
    fn steps_clamp_at_ends() {
        assert_eq!(Difficulty::Hard.step_up(), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.step_down(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.step_up(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.step_down(), Difficulty::Medium);
    }

    #[test]
    fn from_index_clamps_out_of_range() {
        assert_eq!(Difficulty::from_index_clamped(-4), Difficulty::Easy);
        assert_eq!(Difficulty::from_index_clamped(1), Difficulty::Medium);
        assert_eq!(Difficulty::from_index_clamped(17), Difficulty::Hard);
    }

    #[test]
    fn index_roundtrips_through_ladder() {
        for level in Difficulty::LADDER {
            assert_eq!(Difficulty::from_index_clamped(level.index() as i64), level);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(" hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!("div".parse::<Operation>().unwrap(), Operation::Division);
    }

    #[test]
    fn serde_uses_labels() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"Medium\"");
        assert_eq!(
            serde_json::to_string(&Operation::Multiplication).unwrap(),
            "\"multiplication\""
        );
    }

    #[test]
    fn deserialize_ignores_case() {
        assert_eq!(serde_json::from_str::<Difficulty>("\"medium\"").unwrap(), Difficulty::Medium);
        assert_eq!(serde_json::from_str::<Difficulty>("\"Hard\"").unwrap(), Difficulty::Hard);
        assert_eq!(serde_json::from_str::<Operation>("\"Addition\"").unwrap(), Operation::Addition);
        assert!(serde_json::from_str::<Difficulty>("\"extreme\"").is_err());
    }
}
