//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.aidboard/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::Resource;
use crate::table::format::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_DATE_FORMAT, DEFAULT_DATETIME_FORMAT};
use crate::table::options::DEFAULT_ITEMS_PER_PAGE;
use crate::table::{CellFormatter, ViewMode};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AidboardConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_resource: Option<String>,
    pub items_per_page: Option<usize>,
    pub view_mode: Option<ViewMode>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub currency_symbol: Option<String>,
    pub date_format: Option<String>,
    pub datetime_format: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub resource: Resource,
    pub items_per_page: usize,
    pub view_mode: ViewMode,
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub api_user: Option<String>,
    pub formatter: CellFormatter,
}

/// Values taken from command-line flags (None = not specified).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub resource: Option<Resource>,
    pub base_url: Option<String>,
    pub cards: bool,
}

// ============================================================================
// Error Type
// ============================================================================

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

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.aidboard`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".aidboard"))
}

/// Returns the path to `~/.aidboard/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.aidboard/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AidboardConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AidboardConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AidboardConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AidboardConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AidboardConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AidboardConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Aidboard Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_resource = "families"      # "families", "members", "registers", "supports"
# items_per_page = 10
# view_mode = "table"                # "table" or "cards"

# [api]
# base_url = "http://localhost:8000/api"   # Or set AIDBOARD_API_URL
# token = "..."                            # Or set AIDBOARD_API_TOKEN
# user = "treasurer"

# [display]
# currency_symbol = "$"
# date_format = "%b %d, %Y"
# datetime_format = "%b %d, %Y %H:%M"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AidboardConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Resource: CLI → env → config → default
    let resource = cli
        .resource
        .or_else(|| {
            std::env::var("AIDBOARD_RESOURCE")
                .ok()
                .and_then(|s| Resource::parse(&s))
        })
        .or_else(|| {
            config
                .general
                .default_resource
                .as_deref()
                .and_then(Resource::parse)
        })
        .unwrap_or_default();

    // Base URL: CLI → env → config → default
    let api_base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("AIDBOARD_API_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Token: env → config
    let api_token = std::env::var("AIDBOARD_API_TOKEN")
        .ok()
        .or_else(|| config.api.token.clone());

    let view_mode = if cli.cards {
        ViewMode::Cards
    } else {
        config.general.view_mode.unwrap_or_default()
    };

    let formatter = CellFormatter {
        currency_symbol: config
            .display
            .currency_symbol
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
        date_format: config
            .display
            .date_format
            .clone()
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
        datetime_format: config
            .display
            .datetime_format
            .clone()
            .unwrap_or_else(|| DEFAULT_DATETIME_FORMAT.to_string()),
    };

    ResolvedConfig {
        resource,
        items_per_page: config
            .general
            .items_per_page
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        view_mode,
        api_base_url,
        api_token,
        api_user: config.api.user.clone(),
        formatter,
    }
}
