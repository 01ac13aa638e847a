//! Configuration management for Conecta.
//!
//! Loads configuration from ${CONECTA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Conecta configuration and data directories.
    //!
    //! CONECTA_HOME resolution order:
    //! 1. CONECTA_HOME environment variable (if set)
    //! 2. ~/.config/conecta (default)

    use std::path::PathBuf;

    /// Returns the Conecta home directory.
    ///
    /// Checks CONECTA_HOME env var first, falls back to ~/.config/conecta
    pub fn conecta_home() -> PathBuf {
        if let Ok(home) = std::env::var("CONECTA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("conecta"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        conecta_home().join("config.toml")
    }

    /// Returns the path to the persisted session token file.
    pub fn auth_path() -> PathBuf {
        conecta_home().join("auth.json")
    }
}

/// Base-URL entry for one remote service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Optional base URL override (proxies, local backends, mock servers).
    pub base_url: Option<String>,
}

impl ServiceConfig {
    /// Returns the configured base URL if set and non-empty.
    pub fn effective_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API (authentication, ads, categories).
    pub api: ServiceConfig,

    /// ViaCEP postal-code lookup.
    pub viacep: ServiceConfig,

    /// IBGE geographic-division lookup.
    pub ibge: ServiceConfig,
}

impl Config {
    /// Default backend base URL (local development server).
    pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
    /// Default ViaCEP base URL.
    pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";
    /// Default IBGE localities base URL.
    pub const DEFAULT_IBGE_BASE_URL: &str = "https://servicodados.ibge.gov.br";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
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

    /// Resolves the backend API base URL.
    ///
    /// # Errors
    /// Returns an error if an override is set but not a valid URL.
    pub fn api_base_url(&self) -> Result<String> {
        resolve_base_url(
            self.api.effective_base_url(),
            "CONECTA_API_URL",
            Self::DEFAULT_API_BASE_URL,
            "backend API",
        )
    }

    /// Resolves the ViaCEP base URL.
    ///
    /// # Errors
    /// Returns an error if an override is set but not a valid URL.
    pub fn viacep_base_url(&self) -> Result<String> {
        resolve_base_url(
            self.viacep.effective_base_url(),
            "CONECTA_VIACEP_URL",
            Self::DEFAULT_VIACEP_BASE_URL,
            "ViaCEP",
        )
    }

    /// Resolves the IBGE base URL.
    ///
    /// # Errors
    /// Returns an error if an override is set but not a valid URL.
    pub fn ibge_base_url(&self) -> Result<String> {
        resolve_base_url(
            self.ibge.effective_base_url(),
            "CONECTA_IBGE_URL",
            Self::DEFAULT_IBGE_BASE_URL,
            "IBGE",
        )
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
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

/// Resolves a base URL with precedence: env > config > default.
///
/// # Arguments
/// * `config_base_url` - Value from config file (if present)
/// * `env_var` - Environment variable name (e.g., "`CONECTA_API_URL`")
/// * `default_url` - Default URL if neither env nor config is set
/// * `service_name` - Human-readable service name for error messages
///
/// # Errors
/// Returns an error if the winning value is not a well-formed URL.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
    service_name: &str,
) -> Result<String> {
    // Try env var first
    if let Ok(env_url) = std::env::var(env_var) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed, service_name)?;
            return Ok(trimmed.to_string());
        }
    }

    // Try config value
    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed, service_name)?;
            return Ok(trimmed.to_string());
        }
    }

    // Default
    Ok(default_url.to_string())
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str, service_name: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid {service_name} base URL: {url}"))?;
    Ok(())
}
