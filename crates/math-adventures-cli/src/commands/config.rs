//! Configuration CLI commands.
//!
//! Keys are dotted paths into `config.toml`, e.g. `session.max_questions`
//! or `policy.up_threshold`. `config keys` lists them all.

use clap::Subcommand;
use math_adventures_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value
    Get {
        /// Dotted key, e.g. "session.start_difficulty" or "policy.engine"
        key: String,
    },
    /// Validate and store one value
    Set {
        /// Dotted key, e.g. "session.operations" or "policy.window_size"
        key: String,
        /// Labels in any case ("medium", "Model"); lists as "addition,division";
        /// an empty string clears "policy.model_path"
        value: String,
    },
    /// Print the whole config as JSON
    List,
    /// List every settable key
    Keys,
    /// Print the config file location
    Path,
    /// Overwrite the config file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let Some(value) = config.get(&key) else {
                return Err(format!(
                    "unknown key: {key} (valid keys: {})",
                    Config::keys().join(", ")
                )
                .into());
            };
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Keys => {
            for key in Config::keys() {
                println!("{key}");
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
