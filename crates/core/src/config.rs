//! Config file parsing for `~/.config/book-metadata/config.toml`.
//!
//! Use `DaumProvider::from_config` with the `daum` section to build the provider,
//! and `lookup_options_from_config` for the per-search locale and placeholder cover.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lookup::daum::DEFAULT_SEARCH_URL;
use crate::lookup::LookupOptions;

/// Environment variable that overrides `daum.api_key`.
pub const API_KEY_ENV: &str = "KAKAO_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub generic_cover: String,
    #[serde(default)]
    pub daum: DaumConfig,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            generic_cover: String::new(),
            daum: DaumConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaumConfig {
    #[serde(default = "default_active")]
    pub active: bool,
    pub api_key: Option<String>,
    #[serde(default = "default_search_url")]
    pub search_url: String,
}

fn default_active() -> bool {
    true
}
fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

impl Default for DaumConfig {
    fn default() -> Self {
        Self {
            active: true,
            api_key: None,
            search_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

/// Load config from the default path, falling back to defaults when the file is
/// missing or unreadable. `KAKAO_API_KEY` overrides the configured key.
pub fn load_config() -> AppConfig {
    let mut cfg = match config_path() {
        Some(path) => match load_config_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                }
                AppConfig::default()
            }
        },
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut cfg);
    cfg
}

/// Load config from an explicit path. Errors are reported, not defaulted.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<AppConfig>(&content)?)
}

fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            cfg.daum.api_key = Some(key);
        }
    }
}

/// Return the default config file path (for init and show).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("book-metadata");
        p.push("config.toml");
        p
    })
}

/// Build per-search options from config.
pub fn lookup_options_from_config(cfg: &AppConfig) -> LookupOptions {
    LookupOptions {
        generic_cover: cfg.generic_cover.clone(),
        locale: cfg.locale.clone(),
    }
}
