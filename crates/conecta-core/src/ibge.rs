//! IBGE locality client for the state/district filter dropdowns.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;

/// Brazilian federative unit.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Uf {
    pub id: u32,
    pub sigla: String,
    pub nome: String,
}

/// District within a federative unit.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct District {
    pub id: u64,
    pub nome: String,
}

/// HTTP client for the IBGE localities API.
pub struct IbgeClient {
    http: reqwest::Client,
    base_url: String,
}

impl IbgeClient {
    /// Creates a client against an explicit base URL.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the production API.
    /// - At runtime, panics if `CONECTA_BLOCK_REAL_API=1` and `base_url` is the production API.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();

        // Compile-time guard for unit tests
        #[cfg(test)]
        if base_url == Config::DEFAULT_IBGE_BASE_URL {
            panic!(
                "Tests must not use the production IBGE API!\n\
                 Set CONECTA_IBGE_URL to a mock server (e.g., wiremock).\n\
                 Found base_url: {base_url}"
            );
        }

        // Runtime guard for integration tests (set CONECTA_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        if std::env::var("CONECTA_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && base_url == Config::DEFAULT_IBGE_BASE_URL
        {
            panic!(
                "CONECTA_BLOCK_REAL_API=1 but trying to use the production IBGE API!\n\
                 Set CONECTA_IBGE_URL to a mock server.\n\
                 Found base_url: {base_url}"
            );
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Creates a client from resolved configuration.
    ///
    /// # Errors
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.ibge_base_url()?))
    }

    /// Lists every federative unit, ordered by name.
    ///
    /// # Errors
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn states(&self) -> Result<Vec<Uf>> {
        let url = format!("{}/api/v1/localidades/estados?orderBy=nome", self.base_url);
        debug!("fetching states");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to fetch states")?
            .error_for_status()
            .context("States request was rejected")?;

        response
            .json()
            .await
            .context("Failed to decode states response")
    }

    /// Lists the districts of one federative unit, ordered by name.
    ///
    /// # Errors
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn districts(&self, uf_sigla: &str) -> Result<Vec<District>> {
        let url = format!(
            "{}/api/v1/localidades/estados/{uf_sigla}/distritos?orderBy=nome",
            self.base_url
        );
        debug!(uf = uf_sigla, "fetching districts");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch districts for {uf_sigla}"))?
            .error_for_status()
            .with_context(|| format!("Districts request for {uf_sigla} was rejected"))?;

        response
            .json()
            .await
            .context("Failed to decode districts response")
    }
}
