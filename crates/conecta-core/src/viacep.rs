//! ViaCEP postal-code lookup client.
//!
//! `GET {base}/ws/{cep}/json/` returns the address for a CEP, or a payload
//! flagged `erro` when the code matches nothing.

use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::input::PostalCode;

/// Address fields returned by a successful lookup.
///
/// Either fully populated from a found CEP or absent entirely; there is no
/// partially-filled record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// Street.
    pub logradouro: String,
    /// District.
    pub bairro: String,
    /// City.
    pub localidade: String,
    /// State.
    pub estado: String,
}

/// ViaCEP response body. A not-found lookup still answers 200, with `erro`.
#[derive(Debug, Deserialize)]
struct ViaCepPayload {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    estado: String,
}

/// Failure while talking to the lookup service.
///
/// Callers surface every variant the same way; the split exists for logs and
/// tests.
#[derive(Debug)]
pub enum CepError {
    /// No response at all (connect, DNS, timeout).
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
    /// Body did not match the expected shape.
    Decode(String),
}

impl fmt::Display for CepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CepError::Transport(detail) => write!(f, "lookup request failed: {detail}"),
            CepError::Status(status) => write!(f, "lookup answered HTTP {status}"),
            CepError::Decode(detail) => write!(f, "lookup answered an unexpected body: {detail}"),
        }
    }
}

impl std::error::Error for CepError {}

/// HTTP client for the ViaCEP service.
pub struct CepClient {
    http: reqwest::Client,
    base_url: String,
}

impl CepClient {
    /// Creates a client against an explicit base URL.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the production service.
    /// - At runtime, panics if `CONECTA_BLOCK_REAL_API=1` and `base_url` is the production service.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Use `CONECTA_VIACEP_URL` env var or config to point to a mock server.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();

        // Compile-time guard for unit tests
        #[cfg(test)]
        if base_url == Config::DEFAULT_VIACEP_BASE_URL {
            panic!(
                "Tests must not use the production ViaCEP service!\n\
                 Set CONECTA_VIACEP_URL to a mock server (e.g., wiremock).\n\
                 Found base_url: {base_url}"
            );
        }

        // Runtime guard for integration tests (set CONECTA_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        if std::env::var("CONECTA_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && base_url == Config::DEFAULT_VIACEP_BASE_URL
        {
            panic!(
                "CONECTA_BLOCK_REAL_API=1 but trying to use the production ViaCEP service!\n\
                 Set CONECTA_VIACEP_URL to a mock server.\n\
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
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(config.viacep_base_url()?))
    }

    /// Looks up a CEP. `Ok(None)` means the service knows no such code.
    ///
    /// # Errors
    /// Returns [`CepError`] when no usable answer arrived (transport failure,
    /// error status, malformed body).
    pub async fn lookup(&self, code: &PostalCode) -> Result<Option<AddressRecord>, CepError> {
        let url = format!("{}/ws/{}/json/", self.base_url.trim_end_matches('/'), code);
        debug!(cep = %code, "looking up postal code");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CepError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CepError::Status(status.as_u16()));
        }

        let payload: ViaCepPayload = response
            .json()
            .await
            .map_err(|e| CepError::Decode(e.to_string()))?;

        if payload.erro {
            debug!(cep = %code, "postal code not found");
            return Ok(None);
        }

        Ok(Some(AddressRecord {
            logradouro: payload.logradouro,
            bairro: payload.bairro,
            localidade: payload.localidade,
            estado: payload.estado,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_decodes_found_response() {
        let body = r#"{
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "complemento": "de 612 a 1510 - lado par",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP",
            "estado": "São Paulo"
        }"#;

        let payload: ViaCepPayload = serde_json::from_str(body).unwrap();
        assert!(!payload.erro);
        assert_eq!(payload.logradouro, "Avenida Paulista");
        assert_eq!(payload.localidade, "São Paulo");
    }

    #[test]
    fn test_payload_decodes_not_found_response() {
        let payload: ViaCepPayload = serde_json::from_str(r#"{"erro": true}"#).unwrap();
        assert!(payload.erro);
        assert_eq!(payload.logradouro, "");
    }

    #[test]
    #[should_panic(expected = "production ViaCEP")]
    fn test_client_refuses_production_service_in_tests() {
        let _ = CepClient::new(Config::DEFAULT_VIACEP_BASE_URL);
    }
}
