//! Account flows: registration, login, logout.

use tracing::info;

use crate::address::AddressForm;
use crate::api::{ApiClient, ApiResult, Credentials, RegisterRequest, Session};
use crate::auth::TokenStore;
use crate::input::{ValidationError, phone_digits};

/// Registration form as filled by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub nome: String,
    pub username: String,
    pub senha: String,
    pub confirmar_senha: String,
    /// Phone as typed, possibly masked.
    pub telefone: String,
    pub endereco: AddressForm,
}

impl RegisterForm {
    /// Validates the form and builds the registration request.
    ///
    /// Checks run in order: phone digit count first, then password
    /// confirmation. The confirmation never leaves this function.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when the phone is not 11 digits or the
    /// passwords differ.
    pub fn into_request(self) -> Result<RegisterRequest, ValidationError> {
        let telefone = phone_digits(&self.telefone)?;

        if self.senha != self.confirmar_senha {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(RegisterRequest {
            nome: self.nome,
            username: self.username,
            senha: self.senha,
            telefone,
            cep: self.endereco.cep,
            logradouro: self.endereco.logradouro,
            numero: self.endereco.numero,
            complemento: self.endereco.complemento,
            bairro: self.endereco.bairro,
            cidade: self.endereco.cidade,
            estado: self.endereco.estado,
        })
    }
}

/// Logs in and stores the issued token.
///
/// Any stale token is cleared before the credentials go out, so the login
/// request itself is never sent with old credentials attached.
///
/// # Errors
/// Returns [`crate::api::ApiError`] if the backend rejects the credentials;
/// the store is left empty in that case.
pub async fn log_in(
    client: &ApiClient,
    tokens: &dyn TokenStore,
    credentials: &Credentials,
) -> ApiResult<Session> {
    tokens.clear();
    let session = client.login(credentials).await?;
    tokens.set(&session.access_token);
    info!("session established");
    Ok(session)
}

/// Discards the stored token. Returns whether one existed.
pub fn log_out(tokens: &dyn TokenStore) -> bool {
    let had_token = tokens.get().is_some();
    tokens.clear();
    if had_token {
        info!("session cleared");
    }
    had_token
}
