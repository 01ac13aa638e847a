//! Ad creation and update handlers.
//!
//! Publishing is a two-step flow: the text fields go first, then images
//! (when given) are uploaded to the id the backend returned. A failure in
//! the second step leaves the text-only ad in place, and the message says
//! so.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use conecta_core::api::{AdDraft, AdKind, AdPatch, ApiClient, ApiError, ImageUpload};
use conecta_core::auth::TokenStore;

#[derive(clap::Args)]
pub struct PublishArgs {
    /// Ad title
    #[arg(long)]
    pub title: String,

    /// Full description
    #[arg(long)]
    pub description: String,

    /// Price in reais, e.g. 150.00
    #[arg(long)]
    pub price: f64,

    /// Kind of ad: produto or servico
    #[arg(long, value_name = "TIPO")]
    pub kind: String,

    /// Category id (see `conecta categories`)
    #[arg(long, value_name = "ID")]
    pub category: u32,

    /// Image file to attach; repeat for more, the first five are sent
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct EditArgs {
    /// The ad id
    #[arg(value_name = "ID")]
    pub id: u64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New price in reais
    #[arg(long)]
    pub price: Option<f64>,

    /// New category id
    #[arg(long, value_name = "ID")]
    pub category: Option<u32>,
}

pub async fn publish(client: &ApiClient, tokens: &dyn TokenStore, args: PublishArgs) -> Result<()> {
    super::auth::require_session(tokens)?;

    let kind = parse_kind(&args.kind)?;
    let images = load_images(&args.images)?;

    let draft = AdDraft {
        titulo: args.title,
        descricao: args.description,
        preco: args.price,
        tipo: kind,
        categoria_id: args.category,
    };

    let created = client
        .create_ad(&draft)
        .await
        .map_err(|e| anyhow!("Falha ao criar anúncio: {}", server_detail(&e)))?;

    if !images.is_empty() {
        println!("Anúncio criado! Enviando imagens...");
        client.upload_ad_images(created.id, images).await.map_err(|e| {
            anyhow!(
                "Anúncio de texto criado, mas falha ao enviar imagens: {}",
                server_detail(&e)
            )
        })?;
    }

    println!("Anúncio publicado com sucesso! (id {})", created.id);
    Ok(())
}

/// Fetches the current ad, merges the given flags over it and sends the
/// result back. Unset flags keep their current values.
pub async fn edit(client: &ApiClient, tokens: &dyn TokenStore, args: EditArgs) -> Result<()> {
    super::auth::require_session(tokens)?;

    let current = client
        .get_ad(args.id)
        .await
        .context("Não foi possível carregar os dados do anuncio. Tente novamente.")?;

    let patch = AdPatch {
        titulo: args.title.unwrap_or(current.titulo),
        descricao: args.description.unwrap_or(current.descricao),
        preco: args.price.unwrap_or(current.preco),
        categoria_id: args.category.unwrap_or(current.categoria.id),
    };

    let updated = client
        .update_ad(args.id, &patch)
        .await
        .map_err(|e| anyhow!("Falha ao atualizar anúncio: {}", server_detail(&e)))?;

    println!("Anúncio atualizado com sucesso! (id {})", updated.id);
    Ok(())
}

fn parse_kind(raw: &str) -> Result<AdKind> {
    match raw.to_lowercase().as_str() {
        "produto" => Ok(AdKind::Produto),
        "servico" | "serviço" => Ok(AdKind::Servico),
        _ => anyhow::bail!("Tipo inválido: {raw}. Use \"produto\" ou \"servico\"."),
    }
}

fn load_images(paths: &[PathBuf]) -> Result<Vec<ImageUpload>> {
    paths
        .iter()
        .map(|path| {
            let bytes =
                fs::read(path).with_context(|| format!("read image {}", path.display()))?;
            let filename = path
                .file_name()
                .map_or_else(|| "imagem".to_string(), |name| name.to_string_lossy().into_owned());
            Ok(ImageUpload { filename, bytes })
        })
        .collect()
}

/// Server-supplied message when there is one, the raw error otherwise.
fn server_detail(error: &ApiError) -> String {
    error
        .server_message()
        .unwrap_or_else(|| error.to_string())
}
