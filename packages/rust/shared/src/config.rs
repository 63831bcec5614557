//! Application configuration for mailsplit.
//!
//! User config lives at `~/.mailsplit/mailsplit.toml`.
//! CLI flags override environment, which overrides the config file, which
//! overrides defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{MailsplitError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "mailsplit.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".mailsplit";

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://groq-email-backend.onrender.com/generate-emails";

// ---------------------------------------------------------------------------
// Config structs (matching mailsplit.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation endpoint settings.
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Output layout settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// `[endpoint]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL the prompt is POSTed to.
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    /// Request timeout in seconds. Generation can be slow on cold starts.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT.into()
}
fn default_timeout_secs() -> u64 {
    60
}

/// `[display]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show subject line options before the five message cards.
    #[serde(default = "default_true")]
    pub subject_first: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            subject_first: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Client config (runtime, merged from config + env + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Validated generation endpoint.
    pub endpoint: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Build from the file config with an optional endpoint override (flag or
    /// env). Without an override the file's URL is validated; with one, the
    /// file's URL is never parsed, so a broken file value cannot block it.
    pub fn resolve(config: &AppConfig, endpoint_override: Option<&str>) -> Result<Self> {
        let endpoint = match endpoint_override {
            Some(url) => parse_endpoint(url)?,
            None => validate_endpoint(config)?,
        };

        Ok(Self {
            endpoint,
            timeout_secs: config.endpoint.timeout_secs,
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.mailsplit/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MailsplitError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.mailsplit/mailsplit.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MailsplitError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        MailsplitError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MailsplitError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MailsplitError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MailsplitError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the configured endpoint is an absolute http(s) URL.
pub fn validate_endpoint(config: &AppConfig) -> Result<Url> {
    parse_endpoint(&config.endpoint.url)
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| MailsplitError::config(format!("invalid endpoint URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(MailsplitError::config(format!(
            "endpoint URL must use http or https, got '{other}'"
        ))),
    }
}
