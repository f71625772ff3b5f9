//! Shared helpers for locating configuration and reading circuit files.

use std::path::{Path, PathBuf};

use bitbattle_config::{BitbattleConfig, CONFIG_FILE};
use bitbattle_netlist::{Netlist, NetlistSnapshot};
use bitbattle_sim::{GateBudget, ScoreWeights};
use tracing::debug;

use crate::GlobalArgs;

/// Loads the configuration selected by `--config`.
///
/// A file path is parsed directly; a directory is searched for
/// `bitbattle.toml`. Without `--config`, the current directory is tried and
/// defaults are used when it holds no configuration file.
pub fn load_config(global: &GlobalArgs) -> Result<BitbattleConfig, Box<dyn std::error::Error>> {
    let config = match global.config {
        Some(ref path) => {
            let p = PathBuf::from(path);
            if p.is_file() {
                bitbattle_config::load_config_from_str(&std::fs::read_to_string(&p)?)?
            } else {
                bitbattle_config::load_config(&p)?
            }
        }
        None => {
            let dir = std::env::current_dir()?;
            if dir.join(CONFIG_FILE).is_file() {
                bitbattle_config::load_config(&dir)?
            } else {
                debug!("no {CONFIG_FILE} in {}, using defaults", dir.display());
                BitbattleConfig::default()
            }
        }
    };
    Ok(config)
}

/// Reads an editor circuit JSON file into a netlist.
pub fn read_circuit(path: &Path) -> Result<Netlist, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(NetlistSnapshot::from_json(&text)?.into_netlist()?)
}

/// The gate budget configured under `[budget]`.
pub fn budget(config: &BitbattleConfig) -> GateBudget {
    GateBudget {
        and: config.budget.and,
        or: config.budget.or,
        not: config.budget.not,
        xor: config.budget.xor,
    }
}

/// The daily score weights configured under `[scoring]`.
pub fn weights(config: &BitbattleConfig) -> ScoreWeights {
    ScoreWeights {
        gate: config.scoring.gate_weight,
        path: config.scoring.path_weight,
        duration: config.scoring.duration_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config,
        }
    }

    #[test]
    fn load_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "[table]\ninputs = 4\n").unwrap();
        let config = load_config(&global(Some(path.to_str().unwrap().to_string()))).unwrap();
        assert_eq!(config.table.inputs, 4);
    }

    #[test]
    fn load_config_from_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[budget]\nxor = 1\n").unwrap();
        let config = load_config(&global(Some(tmp.path().to_str().unwrap().to_string()))).unwrap();
        let budget = budget(&config);
        assert_eq!(budget.xor, Some(1));
        assert_eq!(budget.and, None);
    }

    #[test]
    fn weights_follow_scoring_section() {
        let config =
            bitbattle_config::load_config_from_str("[scoring]\npath_weight = 40.0\n").unwrap();
        let w = weights(&config);
        assert_eq!(w.path, 40.0);
        assert_eq!(w.gate, 100.0);
    }

    #[test]
    fn missing_config_dir_errors() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&global(Some(tmp.path().to_str().unwrap().to_string())));
        assert!(result.is_err());
    }

    #[test]
    fn read_circuit_from_editor_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("circuit.json");
        fs::write(
            &path,
            r#"{"gates":[{"x":0,"y":0,"type":"INPUT","id":"A","inputs":[],"output":{"x":20,"y":0}}],"wires":[]}"#,
        )
        .unwrap();
        let netlist = read_circuit(&path).unwrap();
        assert_eq!(netlist.gate_count(), 1);
    }
}
