//! TOML configuration
//!
//! Every field has a default, so an empty file (or no file at all) gives a
//! working setup that reads `puzzles/puzzles.json` and judges with geth's
//! `evm` tool.

use crate::bridge::DEFAULT_CALL_DATA;
use crate::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Account the resolved code is deployed to
pub const DEFAULT_ADDRESS: &str = "0xffffffffffffffffffffffffffffffffffffffff";

pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

pub const DEFAULT_CORPUS: &str = "puzzles/puzzles.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    pub program: String,
    pub args: Vec<String>,
    pub address: String,
    /// Hex without prefix
    pub call_data: String,
    pub gas_limit: u64,
    /// Case-insensitive substrings of runner output that mean the call reverted
    pub failure_markers: Vec<String>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        BridgeSettings {
            program: "evm".to_string(),
            args: [
                "--code",
                "{code}",
                "--input",
                "{calldata}",
                "--gas",
                "{gas}",
                "--receiver",
                "{address}",
                "run",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            address: DEFAULT_ADDRESS.to_string(),
            call_data: DEFAULT_CALL_DATA.to_string(),
            gas_limit: DEFAULT_GAS_LIMIT,
            failure_markers: vec!["error".to_string(), "revert".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub corpus: PathBuf,
    /// Fixed seed for a repeatable puzzle order
    pub seed: Option<u64>,
    pub color: ColorMode,
    pub bridge: BridgeSettings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            corpus: PathBuf::from(DEFAULT_CORPUS),
            seed: None,
            color: ColorMode::default(),
            bridge: BridgeSettings::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
