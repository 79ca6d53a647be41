//! One-shot difficulty decisions from the command line.

use clap::Subcommand;
use math_adventures_core::{Difficulty, DifficultyPolicy, EngineKind, PolicyEngine};
use serde::Serialize;
use std::path::PathBuf;

use super::load_config;

#[derive(Subcommand)]
pub enum PolicyAction {
    /// Decide the next level from a performance summary
    Decide {
        /// Current level
        #[arg(short, long)]
        current: Difficulty,
        /// Recent accuracy in [0, 1]
        #[arg(short, long)]
        accuracy: f64,
        /// Recent average seconds per question (omit when no trials yet)
        #[arg(short = 't', long)]
        avg_time: Option<f64>,
        /// Use this model artifact instead of the configured engine
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// Config file (default: ~/.config/math-adventures/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct Decision {
    engine: &'static str,
    current: Difficulty,
    accuracy: f64,
    avg_time: Option<f64>,
    next: Difficulty,
}

pub fn run(action: PolicyAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PolicyAction::Decide {
            current,
            accuracy,
            avg_time,
            model,
            config,
        } => {
            if !(0.0..=1.0).contains(&accuracy) {
                return Err(format!("accuracy must be between 0 and 1, got {accuracy}").into());
            }
            if let Some(secs) = avg_time {
                if !secs.is_finite() || secs < 0.0 {
                    return Err(format!("avg-time must be a non-negative number, got {secs}").into());
                }
            }

            let mut cfg = load_config(config.as_deref())?;
            if let Some(path) = model {
                cfg.policy.engine = EngineKind::Model;
                cfg.policy.model_path = Some(path);
            }
            let engine = PolicyEngine::from_config(&cfg.policy)?;
            let next = engine.next_difficulty(current, accuracy, avg_time);

            let decision = Decision {
                engine: engine.kind(),
                current,
                accuracy,
                avg_time,
                next,
            };
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
    }
    Ok(())
}
