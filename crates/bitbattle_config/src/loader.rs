//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::BitbattleConfig;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "bitbattle.toml";

const MAX_TABLE_COLUMNS: usize = 13;

/// Loads and validates a `bitbattle.toml` configuration from a directory.
///
/// Reads `<dir>/bitbattle.toml`, parses it, and validates its values.
pub fn load_config(dir: &Path) -> Result<BitbattleConfig, ConfigError> {
    let content = std::fs::read_to_string(dir.join(CONFIG_FILE))?;
    load_config_from_str(&content)
}

/// Parses and validates a `bitbattle.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<BitbattleConfig, ConfigError> {
    let config: BitbattleConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &BitbattleConfig) -> Result<(), ConfigError> {
    for (field, value) in [
        ("table.inputs", config.table.inputs),
        ("table.outputs", config.table.outputs),
    ] {
        if !(1..=MAX_TABLE_COLUMNS).contains(&value) {
            return Err(ConfigError::ValidationError(format!(
                "{field} must be between 1 and {MAX_TABLE_COLUMNS}, got {value}"
            )));
        }
    }
    for (field, value) in [
        ("scoring.gate_weight", config.scoring.gate_weight),
        ("scoring.path_weight", config.scoring.path_weight),
        ("scoring.duration_weight", config.scoring.duration_weight),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{field} must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}
