//! Daemon configuration: listen port, cache TTL, the model chain, and the
//! predefined question list.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "/etc/turingd/config.toml";
const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Questions detected by `/results` when none is given explicitly
    pub questions: Vec<String>,
    pub server: ServerConfig,
    pub cache: CacheConfig,
    /// Prediction models in chain order; order is fixed for the process
    pub models: Vec<ModelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub latency_ms: u64,
    pub success_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("Invalid default config")
    }
}

pub fn load_config() -> Result<Config> {
    load_from(Path::new(CONFIG_FILE))
}

/// Load from `path`, falling back to the compiled-in defaults when the file
/// does not exist.
pub fn load_from(path: &Path) -> Result<Config> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}
