mod config;

pub use config::{Config, EngineKind, PolicyConfig, SessionConfig, MAX_QUESTIONS_RANGE};

use std::path::PathBuf;

/// Returns `~/.config/math-adventures[-dev]/` based on MATH_ADVENTURES_ENV.
///
/// Set MATH_ADVENTURES_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MATH_ADVENTURES_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("math-adventures-dev")
    } else {
        base_dir.join("math-adventures")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
