//! Address form state driven by postal-code lookups.
//!
//! The form owns every address field plus the lookup status (error message,
//! loading flag, requested focus). `resolve_cep` runs the whole blur-time
//! sequence: validate, mark loading, query, apply exactly one outcome, unmark
//! loading.

use tracing::warn;

use crate::input::PostalCode;
use crate::viacep::CepClient;

/// Lookup failed to produce a usable answer. Shown verbatim to the user.
pub const MSG_CEP_LOOKUP_FAILED: &str = "Erro ao buscar CEP. Tente novamente.";
/// The service knows no address for the given code. Shown verbatim to the user.
pub const MSG_CEP_NOT_FOUND: &str = "CEP não encontrado";

/// Form input that should receive focus after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// House-number input, targeted after a successful lookup so the user can
    /// continue with the one field the service cannot fill.
    Numero,
}

/// Address fields plus lookup status, as held by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    /// Message for the postal-code field, `None` when the last action was clean.
    pub error: Option<String>,
    /// True only while a lookup is in flight.
    pub loading: bool,
    /// Focus request for the UI to consume, set at most once per lookup.
    pub focus: Option<Field>,
}

impl AddressForm {
    /// Resolves the form's postal code and applies the outcome to the fields.
    ///
    /// Runs strictly in order: validate, enter loading, query, apply one of
    /// the three outcomes (found, not found, failed), leave loading. A code
    /// that is not 8 digits never reaches the network and leaves the loading
    /// flag untouched.
    pub async fn resolve_cep(&mut self, client: &CepClient) {
        let code = match PostalCode::parse(&self.cep) {
            Ok(code) => code,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        self.loading = true;
        self.error = None;

        match client.lookup(&code).await {
            Ok(Some(record)) => {
                self.logradouro = record.logradouro;
                self.bairro = record.bairro;
                self.cidade = record.localidade;
                self.estado = record.estado;
                self.focus = Some(Field::Numero);
            }
            Ok(None) => {
                self.error = Some(MSG_CEP_NOT_FOUND.to_string());
                self.clear_fields();
            }
            Err(e) => {
                warn!("postal code lookup failed: {e}");
                self.error = Some(MSG_CEP_LOOKUP_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    /// Empties every address field, including the code itself.
    fn clear_fields(&mut self) {
        self.cep = String::new();
        self.logradouro = String::new();
        self.numero = String::new();
        self.complemento = String::new();
        self.bairro = String::new();
        self.cidade = String::new();
        self.estado = String::new();
    }

    /// Takes the pending focus request, leaving `None` behind.
    pub fn take_focus(&mut self) -> Option<Field> {
        self.focus.take()
    }
}
