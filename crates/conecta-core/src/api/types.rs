//! Wire types for the backend REST API.
//!
//! Field names follow the backend's Portuguese JSON keys; the handful of
//! camelCase keys carry explicit renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub senha: String,
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
}

/// Registration request body. Password confirmation happens before this type
/// is built and never goes over the wire.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub nome: String,
    pub username: String,
    pub senha: String,
    /// Normalized 11-digit phone number.
    pub telefone: String,
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
}

/// Whether an ad offers a product or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdKind {
    Produto,
    Servico,
}

/// Ad category as listed by `GET /categoria`.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: u32,
    pub nome: String,
    pub tipo: AdKind,
}

/// Uploaded ad image. `url` is a bare filename unless it is absolute.
#[derive(Debug, Clone, Deserialize)]
pub struct AdImage {
    pub id: u64,
    pub url: String,
}

/// Seller shown alongside an ad. The feed omits the contact fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Seller {
    pub nome: String,
    pub cidade: String,
    pub estado: String,
    #[serde(default)]
    pub telefone: Option<String>,
}

/// Published ad, as returned by the feed and by `GET /anuncio/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Ad {
    pub id: u64,
    pub titulo: String,
    pub descricao: String,
    pub preco: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub categoria: Category,
    pub imagens: Vec<AdImage>,
    pub usuario: Seller,
}

/// Moderation state of one of the seller's own ads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AdStatus {
    Ativo,
    Pendente,
    Inativo,
}

/// Ad as returned by the seller's own-ads listing.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnAd {
    pub id: u64,
    pub titulo: String,
    pub descricao: String,
    pub preco: f64,
    pub localidade: String,
    pub status: AdStatus,
    pub imagens: Vec<AdImage>,
}

/// New ad request body.
#[derive(Debug, Clone, Serialize)]
pub struct AdDraft {
    pub titulo: String,
    pub descricao: String,
    pub preco: f64,
    pub tipo: AdKind,
    #[serde(rename = "categoriaId")]
    pub categoria_id: u32,
}

/// Ad update request body. The kind is fixed at creation and cannot change.
#[derive(Debug, Clone, Serialize)]
pub struct AdPatch {
    pub titulo: String,
    pub descricao: String,
    pub preco: f64,
    #[serde(rename = "categoriaId")]
    pub categoria_id: u32,
}

/// Response to ad creation and update; only the id is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedAd {
    pub id: u64,
}

/// Feed query parameters. Unset filters stay out of the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdFilter {
    #[serde(rename = "catId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
}
