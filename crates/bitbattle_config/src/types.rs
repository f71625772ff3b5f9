//! Configuration types deserialized from `bitbattle.toml`.

use serde::Deserialize;

/// Top-level configuration parsed from a `bitbattle.toml` file.
#[derive(Debug, Default, Deserialize)]
pub struct BitbattleConfig {
    /// Test runner pacing.
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Daily score weights.
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Default truth-table generator shape.
    #[serde(default)]
    pub table: TableConfig,
    /// Per-kind gate limits.
    #[serde(default)]
    pub budget: BudgetConfig,
}

/// Test runner pacing.
#[derive(Debug, Default, Deserialize)]
pub struct RunnerConfig {
    /// Pause between rows in milliseconds. Zero runs headless.
    #[serde(default)]
    pub row_delay_ms: u64,
}

/// Numerators of the daily score terms.
#[derive(Debug, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the gate-count term.
    #[serde(default = "default_weight")]
    pub gate_weight: f64,
    /// Weight of the longest-path term.
    #[serde(default = "default_weight")]
    pub path_weight: f64,
    /// Weight of the duration term.
    #[serde(default = "default_weight")]
    pub duration_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            gate_weight: default_weight(),
            path_weight: default_weight(),
            duration_weight: default_weight(),
        }
    }
}

fn default_weight() -> f64 {
    100.0
}

/// Shape of generated truth tables.
#[derive(Debug, Deserialize)]
pub struct TableConfig {
    /// Number of input columns.
    #[serde(default = "default_inputs")]
    pub inputs: usize,
    /// Number of output columns.
    #[serde(default = "default_outputs")]
    pub outputs: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            inputs: default_inputs(),
            outputs: default_outputs(),
        }
    }
}

fn default_inputs() -> usize {
    3
}

fn default_outputs() -> usize {
    2
}

/// Per-kind gate limits. A missing key leaves that kind unlimited.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetConfig {
    /// Limit on AND gates.
    #[serde(default)]
    pub and: Option<usize>,
    /// Limit on OR gates.
    #[serde(default)]
    pub or: Option<usize>,
    /// Limit on NOT gates.
    #[serde(default)]
    pub not: Option<usize>,
    /// Limit on XOR gates.
    #[serde(default)]
    pub xor: Option<usize>,
}
