// crates/timely-cli/src/config.rs
//
// Runtime configuration for the `timely` CLI.
// Loaded from a TOML file or populated with defaults.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Directory holding the RocksDB tables and the persisted ledger.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Account the contract runs as. Administrative actions must be
    /// authorized by it, and it is the sender of every reward transfer.
    #[serde(default = "default_contract_account")]
    pub contract_account: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    "~/.timely/data".to_string()
}

fn default_contract_account() -> String {
    "timelyreward".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            contract_account: default_contract_account(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        let config: CliConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// `data_dir` with a leading `~` resolved.
    pub fn data_dir_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_dir, "~/.timely/data");
        assert_eq!(config.contract_account, "timelyreward");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_override() {
        let config: CliConfig = toml::from_str(
            r#"
            contract_account = "ezstake"
            data_dir = "/var/lib/timely"
            "#,
        )
        .unwrap();
        assert_eq!(config.contract_account, "ezstake");
        assert_eq!(config.data_dir_path(), PathBuf::from("/var/lib/timely"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
        assert_eq!(expand_tilde("/abs/dir"), PathBuf::from("/abs/dir"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(CliConfig::load("/nonexistent/timely/config.toml").is_err());
    }
}
