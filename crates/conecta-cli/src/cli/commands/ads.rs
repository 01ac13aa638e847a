//! Ad browsing and management handlers.

use anyhow::{Context, Result};
use comfy_table::Table;
use conecta_core::api::{AdFilter, ApiClient, OwnAd};
use conecta_core::auth::TokenStore;

use crate::output;

#[derive(clap::Args)]
pub struct AdsArgs {
    /// Search over titles and descriptions
    #[arg(short, long)]
    pub query: Option<String>,

    /// Filter by category id (see `conecta categories`)
    #[arg(long, value_name = "ID")]
    pub category: Option<u32>,

    /// Filter by full state name, e.g. "São Paulo" (see `conecta locations`)
    #[arg(long, value_name = "NOME")]
    pub state: Option<String>,

    /// Filter by city name
    #[arg(long, value_name = "NOME")]
    pub city: Option<String>,
}

pub async fn list(client: &ApiClient, args: &AdsArgs) -> Result<()> {
    let filter = AdFilter {
        category_id: args.category,
        q: args.query.clone(),
        cidade: args.city.clone(),
        estado: args.state.clone(),
    };

    let ads = client
        .list_ads(&filter)
        .await
        .context("Falha ao carregar os anúncios. Tente novamente.")?;

    if ads.is_empty() {
        println!("Nenhum anúncio encontrado.");
        println!("Tente mudar os filtros ou a localização.");
        return Ok(());
    }

    let mut table = output::table(&["ID", "Título", "Preço", "Categoria", "Local", "Publicado"]);
    for ad in &ads {
        table.add_row(vec![
            ad.id.to_string(),
            ad.titulo.clone(),
            output::price_brl(ad.preco),
            ad.categoria.nome.clone(),
            format!("{} - {}", ad.usuario.cidade, ad.usuario.estado),
            output::short_date(&ad.created_at),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(client: &ApiClient, id: u64) -> Result<()> {
    let ad = client
        .get_ad(id)
        .await
        .context("Anúncio não encontrado ou erro ao carregar.")?;

    println!("{}", ad.titulo);
    println!("{}", output::price_brl(ad.preco));
    println!("Publicado em {}", output::long_date(&ad.created_at));
    println!(
        "Categoria: {} ({})",
        ad.categoria.nome,
        output::kind_label(ad.categoria.tipo)
    );
    println!();
    println!("{}", ad.descricao);
    println!();
    println!("Vendedor: {}", ad.usuario.nome);
    println!("Local: {} - {}", ad.usuario.cidade, ad.usuario.estado);
    if let Some(telefone) = &ad.usuario.telefone {
        println!(
            "WhatsApp: {}",
            output::whatsapp_link(telefone, &ad.usuario.nome, &ad.titulo)
        );
    }

    println!();
    if ad.imagens.is_empty() {
        println!("Sem fotos disponíveis");
    } else {
        println!("Imagens:");
        for image in &ad.imagens {
            println!("  {}", output::image_url(client.base_url(), &image.url));
        }
    }
    Ok(())
}

pub async fn mine(client: &ApiClient, tokens: &dyn TokenStore) -> Result<()> {
    super::auth::require_session(tokens)?;

    let ads = client.my_ads().await.context("Erro ao buscar anuncios")?;

    println!("Meus Anúncios ({})", ads.len());
    if ads.is_empty() {
        println!("Nenhum anúncio encontrado.");
        return Ok(());
    }

    println!("{}", own_ads_table(&ads));
    Ok(())
}

pub async fn delete(client: &ApiClient, tokens: &dyn TokenStore, id: u64, yes: bool) -> Result<()> {
    super::auth::require_session(tokens)?;

    if !yes {
        anyhow::bail!("Tem certeza que deseja excluir o anúncio {id}? Confirme com --yes.");
    }

    let remaining = client
        .delete_ad(id)
        .await
        .context("Um erro ocorreu ao tentar deletar o anuncio")?;

    println!("Anúncio {id} excluído.");
    println!("Meus Anúncios ({})", remaining.len());
    if !remaining.is_empty() {
        println!("{}", own_ads_table(&remaining));
    }
    Ok(())
}

fn own_ads_table(ads: &[OwnAd]) -> Table {
    let mut table = output::table(&["ID", "Título", "Preço", "Localidade", "Status"]);
    for ad in ads {
        table.add_row(vec![
            ad.id.to_string(),
            ad.titulo.clone(),
            output::price_brl(ad.preco),
            ad.localidade.clone(),
            output::status_label(ad.status).to_string(),
        ]);
    }
    table
}
