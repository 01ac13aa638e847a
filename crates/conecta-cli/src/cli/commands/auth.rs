//! Session command handlers.

use anyhow::{Context, Result};
use conecta_core::account;
use conecta_core::api::{ApiClient, Credentials};
use conecta_core::auth::{TokenStore, mask_token};

/// Refuses to run a seller command without a stored session.
pub fn require_session(tokens: &dyn TokenStore) -> Result<()> {
    if tokens.get().is_none() {
        anyhow::bail!("Você não está logado. Entre com `conecta login`.");
    }
    Ok(())
}

pub async fn login(
    client: &ApiClient,
    tokens: &dyn TokenStore,
    username: String,
    password: String,
) -> Result<()> {
    let credentials = Credentials {
        username,
        senha: password,
    };

    let session = account::log_in(client, tokens, &credentials)
        .await
        .context("Erro ao tentar fazer login. Tente novamente.")?;

    println!("Login realizado com sucesso.");
    println!("Sessão: {}", mask_token(&session.access_token));
    Ok(())
}

pub fn logout(tokens: &dyn TokenStore) -> Result<()> {
    if account::log_out(tokens) {
        println!("Sessão encerrada.");
    } else {
        println!("Nenhuma sessão ativa.");
    }
    Ok(())
}
