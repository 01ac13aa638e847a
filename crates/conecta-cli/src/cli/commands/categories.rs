//! Category listing handler.

use anyhow::{Context, Result};
use conecta_core::api::ApiClient;

use crate::output;

pub async fn list(client: &ApiClient) -> Result<()> {
    let categories = client
        .list_categories()
        .await
        .context("Não foi possível carregar as categorias. Tente novamente.")?;

    let mut table = output::table(&["ID", "Nome", "Tipo"]);
    for category in &categories {
        table.add_row(vec![
            category.id.to_string(),
            category.nome.clone(),
            output::kind_label(category.tipo).to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
