pub mod config;
pub mod model;
pub mod play;
pub mod policy;
pub mod puzzle;

use std::path::Path;

use math_adventures_core::{Config, ConfigError};

/// Load an explicit config file, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
