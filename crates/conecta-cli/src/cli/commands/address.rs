//! Address lookup handlers: postal codes and IBGE locations.

use anyhow::{Context, Result};
use conecta_core::address::AddressForm;
use conecta_core::ibge::IbgeClient;
use conecta_core::viacep::CepClient;

use crate::output;

/// Runs the postal-code resolver and prints the resulting address fields,
/// the same ones the sign-up form autofills.
pub async fn cep(client: &CepClient, code: String) -> Result<()> {
    let mut form = AddressForm {
        cep: code,
        ..AddressForm::default()
    };

    form.resolve_cep(client).await;
    if let Some(message) = form.error {
        anyhow::bail!(message);
    }

    println!("CEP:        {}", form.cep);
    println!("Logradouro: {}", form.logradouro);
    println!("Bairro:     {}", form.bairro);
    println!("Cidade:     {}", form.cidade);
    println!("Estado:     {}", form.estado);
    Ok(())
}

pub async fn locations(client: &IbgeClient, uf: Option<&str>) -> Result<()> {
    match uf {
        Some(sigla) => {
            let districts = client
                .districts(sigla)
                .await
                .context("Erro ao buscar estados")?;
            for district in districts {
                println!("{}", district.nome);
            }
        }
        None => {
            let states = client.states().await.context("Erro ao buscar estados")?;
            let mut table = output::table(&["Sigla", "Nome"]);
            for state in states {
                table.add_row(vec![state.sigla, state.nome]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
