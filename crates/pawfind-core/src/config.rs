//! Configuration management for pawfind.
//!
//! Loads configuration from `${PAWFIND_HOME}/config.toml` with defaults, then
//! applies environment overrides. The catalog base address is the only
//! required value; its absence is reported before any request is made.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::search::{DEFAULT_PAGE_SIZE, PAGE_SIZES};

/// Environment variable holding the catalog base address.
pub const BASE_URL_ENV: &str = "PAWFIND_API_BASE_URL";
/// Environment variable seeding the session credential.
pub const SESSION_TOKEN_ENV: &str = "PAWFIND_SESSION_TOKEN";

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for pawfind configuration.
    //!
    //! `PAWFIND_HOME` resolution order:
    //! 1. `PAWFIND_HOME` environment variable (if set)
    //! 2. `~/.config/pawfind` (default)

    use std::path::PathBuf;

    pub fn pawfind_home() -> PathBuf {
        if let Ok(home) = std::env::var("PAWFIND_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pawfind")
    }

    pub fn config_path() -> PathBuf {
        pawfind_home().join("config.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address of the catalog service.
    pub api_base_url: Option<String>,

    /// Results per page; must be one of the allowed sizes.
    pub page_size: u32,

    /// Optional session credential to seed the cookie jar with.
    pub session_token: Option<String>,

    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Optional log file (stderr otherwise).
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            session_token: None,
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default path, then applies environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies overrides from a variable lookup. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = non_empty(BASE_URL_ENV) {
            self.api_base_url = Some(url);
        }
        if let Some(token) = non_empty(SESSION_TOKEN_ENV) {
            self.session_token = Some(token);
        }
    }

    /// Resolves the catalog base address.
    ///
    /// Missing or malformed values are fatal configuration errors.
    pub fn api_base_url(&self) -> Result<Url> {
        let Some(raw) = self
            .api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
        else {
            bail!(
                "No catalog base address configured.\n\
                 Set {BASE_URL_ENV} or `api_base_url` in {}",
                paths::config_path().display()
            );
        };
        let url = Url::parse(raw).with_context(|| format!("Invalid api_base_url '{raw}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api_base_url must be an http(s) URL, got '{raw}'");
        }
        Ok(url)
    }

    /// Returns the configured page size if it is an allowed one.
    pub fn page_size(&self) -> Result<u32> {
        if PAGE_SIZES.contains(&self.page_size) {
            Ok(self.page_size)
        } else {
            bail!(
                "page_size {} is not allowed (expected one of {:?})",
                self.page_size,
                PAGE_SIZES
            )
        }
    }

    /// Returns the seeded session token, if any.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Writes the default template to `path`, refusing to overwrite.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
