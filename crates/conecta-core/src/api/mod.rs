//! Authenticated HTTP client for the ConectaNegócios backend.
//!
//! One client instance serves the whole process. Every request picks up the
//! stored bearer token when one exists; every 401 response clears the stored
//! token and notifies the configured [`UnauthorizedPolicy`] before the error
//! reaches the caller.

mod error;
mod types;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::auth::TokenStore;
use crate::config::Config;

pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use types::{
    Ad, AdDraft, AdFilter, AdImage, AdKind, AdPatch, AdStatus, Category, CreatedAd, Credentials,
    OwnAd, RegisterRequest, Seller, Session,
};

/// Most images accepted on a single ad; extras are silently dropped.
pub const MAX_AD_IMAGES: usize = 5;

/// Reaction to a 401 response, wired at the composition root.
///
/// Runs after the stored token has been cleared, once per unauthorized
/// response. The caller still receives the error for local handling.
pub trait UnauthorizedPolicy: Send + Sync {
    fn on_unauthorized(&self);
}

/// Policy that does nothing, for contexts with no session to tear down.
pub struct IgnoreUnauthorized;

impl UnauthorizedPolicy for IgnoreUnauthorized {
    fn on_unauthorized(&self) {}
}

/// In-memory image queued for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// MIME type guessed from the filename, limited to the accepted formats.
    fn mime_type(&self) -> Option<&'static str> {
        let ext = std::path::Path::new(&self.filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            _ => None,
        }
    }
}

/// Backend API client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    on_unauthorized: Arc<dyn UnauthorizedPolicy>,
}

impl ApiClient {
    /// Creates a client against an explicit base URL.
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
        on_unauthorized: Arc<dyn UnauthorizedPolicy>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens,
            on_unauthorized,
        }
    }

    /// Creates a client from resolved configuration.
    ///
    /// # Errors
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(
        config: &Config,
        tokens: Arc<dyn TokenStore>,
        on_unauthorized: Arc<dyn UnauthorizedPolicy>,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(config.api_base_url()?, tokens, on_unauthorized))
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers a new account. Never stores a token; the user logs in
    /// afterwards.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the backend rejects the registration.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.execute(self.http.post(self.url("/cadastrar")).json(request))
            .await?;
        Ok(())
    }

    /// Exchanges credentials for a session token. The caller decides whether
    /// to store it.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the credentials are rejected.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        self.post("/logar", credentials).await
    }

    /// Lists published ads matching the filter.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_ads(&self, filter: &AdFilter) -> ApiResult<Vec<Ad>> {
        let response = self
            .execute(self.http.get(self.url("/anuncio")).query(filter))
            .await?;
        decode(response).await
    }

    /// Fetches a single ad with seller contact details.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the ad does not exist or the request fails.
    pub async fn get_ad(&self, id: u64) -> ApiResult<Ad> {
        self.get(&format!("/anuncio/{id}")).await
    }

    /// Lists the authenticated seller's own ads.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the request fails.
    pub async fn my_ads(&self) -> ApiResult<Vec<OwnAd>> {
        self.get("/anuncio/meus-anuncios").await
    }

    /// Creates an ad and returns its id, for a follow-up image upload.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the backend rejects the draft.
    pub async fn create_ad(&self, draft: &AdDraft) -> ApiResult<CreatedAd> {
        self.post("/anuncio", draft).await
    }

    /// Updates an existing ad.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the backend rejects the update.
    pub async fn update_ad(&self, id: u64, patch: &AdPatch) -> ApiResult<CreatedAd> {
        let response = self
            .execute(self.http.patch(self.url(&format!("/anuncio/{id}"))).json(patch))
            .await?;
        decode(response).await
    }

    /// Deletes an ad and returns the refreshed own-ads listing.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete_ad(&self, id: u64) -> ApiResult<Vec<OwnAd>> {
        let response = self
            .execute(self.http.delete(self.url(&format!("/anuncio/{id}"))))
            .await?;
        decode(response).await
    }

    /// Attaches images to an ad as one multipart request. At most
    /// [`MAX_AD_IMAGES`] are sent.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the upload fails.
    pub async fn upload_ad_images(&self, id: u64, images: Vec<ImageUpload>) -> ApiResult<()> {
        let mut form = reqwest::multipart::Form::new();
        for image in images.into_iter().take(MAX_AD_IMAGES) {
            let mime = image.mime_type();
            let mut part =
                reqwest::multipart::Part::bytes(image.bytes).file_name(image.filename);
            if let Some(mime) = mime {
                part = part
                    .mime_str(mime)
                    .map_err(|e| ApiError::transport(e.to_string()))?;
            }
            form = form.part("imagens", part);
        }

        self.execute(
            self.http
                .post(self.url(&format!("/anuncio/{id}")))
                .multipart(form),
        )
        .await?;
        Ok(())
    }

    /// Lists the ad categories.
    ///
    /// # Errors
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.get("/categoria").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(self.http.get(self.url(path))).await?;
        decode(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        let response = self.execute(self.http.post(self.url(path)).json(body)).await?;
        decode(response).await
    }

    /// Sends one request with the stored token attached, intercepting error
    /// responses.
    ///
    /// A missing or unreadable token never blocks the request; it goes out
    /// without credentials. On 401 the stored token is cleared and the policy
    /// notified, in that order, before the error is returned.
    async fn execute(&self, request: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let request = match self.tokens.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::status(status.as_u16(), &body);
        if error.is_unauthorized() {
            warn!("unauthorized response, clearing stored token");
            self.tokens.clear();
            self.on_unauthorized.on_unauthorized();
        }
        Err(error)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    response
        .json()
        .await
        .map_err(|e| ApiError::decode(e.to_string()))
}
