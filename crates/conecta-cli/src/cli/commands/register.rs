//! Account registration handler.
//!
//! Mirrors the sign-up form: the street, district, city and state fields
//! are not asked for, they come from the postal-code lookup.

use anyhow::{Context, Result};
use conecta_core::account::RegisterForm;
use conecta_core::address::AddressForm;
use conecta_core::api::ApiClient;
use conecta_core::input::format_phone;
use conecta_core::viacep::CepClient;

#[derive(clap::Args)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Username used to log in
    #[arg(long)]
    pub username: String,

    /// Password
    #[arg(long)]
    pub password: String,

    /// Password confirmation; must match --password
    #[arg(long, value_name = "PASSWORD")]
    pub confirm: String,

    /// Phone number with DDD, punctuation allowed (11 digits)
    #[arg(long)]
    pub phone: String,

    /// Postal code; the rest of the address is resolved from it
    #[arg(long)]
    pub cep: String,

    /// Street number
    #[arg(long)]
    pub number: String,

    /// Address complement (apartment, block, ...)
    #[arg(long, default_value = "")]
    pub complement: String,
}

pub async fn run(client: &ApiClient, cep_client: &CepClient, args: RegisterArgs) -> Result<()> {
    let mut endereco = AddressForm {
        cep: args.cep,
        numero: args.number,
        complemento: args.complement,
        ..AddressForm::default()
    };

    endereco.resolve_cep(cep_client).await;
    if let Some(message) = endereco.error.take() {
        anyhow::bail!(message);
    }

    let form = RegisterForm {
        nome: args.name,
        username: args.username,
        senha: args.password,
        confirmar_senha: args.confirm,
        telefone: args.phone,
        endereco,
    };

    let request = form.into_request()?;

    client
        .register(&request)
        .await
        .context("Erro ao cadastrar. Tente novamente.")?;

    println!("Cadastro realizado com sucesso!");
    println!("Telefone: {}", format_phone(&request.telefone));
    println!(
        "Endereço: {}, {} - {}, {} - {}",
        request.logradouro, request.numero, request.bairro, request.cidade, request.estado
    );
    println!("Entre com `conecta login`.");
    Ok(())
}
