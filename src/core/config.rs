//! # Configuration
//!
//! Centralizes startup settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mnemo/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover the options.
//! This is distinct from the persisted user settings (`core::persist`):
//! config says where the server is, settings say how the user likes the UI.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MnemoConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Identity sent with each request; the server scopes memory per user.
    pub user_id: Option<String>,
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Concrete values after collapsing the hierarchy.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub user_id: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Returns the path to `~/.mnemo/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mnemo").join("config.toml"))
}

/// Load config from `~/.mnemo/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and returns
/// `MnemoConfig::default()`. If it exists but is malformed, returns
/// `ConfigError::Parse`.
pub fn load_config() -> Result<MnemoConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MnemoConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MnemoConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: MnemoConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Mnemo Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:5000"   # Or set MNEMO_SERVER_URL

# [chat]
# user_id = "alice"                    # Or set MNEMO_USER_ID
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

/// Resolve the final config: defaults → config file → env vars → CLI.
pub fn resolve(config: &MnemoConfig, cli_server: Option<&str>) -> ResolvedConfig {
    let base_url = cli_server
        .map(|s| s.to_string())
        .or_else(|| std::env::var("MNEMO_SERVER_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let user_id = std::env::var("MNEMO_USER_ID")
        .ok()
        .or_else(|| config.chat.user_id.clone());

    ResolvedConfig { base_url, user_id }
}
