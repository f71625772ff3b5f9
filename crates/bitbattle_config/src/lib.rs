//! Parsing and validation of `bitbattle.toml` configuration files.
//!
//! This crate reads the sandbox configuration and produces a strongly-typed
//! [`BitbattleConfig`] covering runner pacing, score weights, the
//! truth-table generator shape, and per-kind gate budgets.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::*;
