//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use conecta_core::api::{ApiClient, UnauthorizedPolicy};
use conecta_core::auth::{FileTokenStore, TokenStore};
use conecta_core::config::Config;
use conecta_core::ibge::IbgeClient;
use conecta_core::viacep::CepClient;

mod commands;

#[derive(Parser)]
#[command(name = "conecta")]
#[command(version = "0.2")]
#[command(about = "ConectaNegócios marketplace from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Log out, discarding the stored session token
    Logout,

    /// Create an account (street, district, city and state autofill from --cep)
    Register(commands::register::RegisterArgs),

    /// Browse published ads
    Ads(commands::ads::AdsArgs),

    /// Show one ad, with seller contact
    Ad {
        /// The ad id
        #[arg(value_name = "ID")]
        id: u64,
    },

    /// List your own ads and their moderation status
    Mine,

    /// Publish a new ad, optionally with images
    Publish(commands::publish::PublishArgs),

    /// Update one of your ads
    Edit(commands::publish::EditArgs),

    /// Delete one of your ads
    Delete {
        /// The ad id
        #[arg(value_name = "ID")]
        id: u64,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// List ad categories
    Categories,

    /// Resolve an address from a postal code
    Cep {
        /// Postal code, punctuation allowed (e.g. 01310-100)
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// List states, or the districts of one
    Locations {
        /// Two-letter state code (e.g. SP) to list districts for
        #[arg(long, value_name = "UF")]
        uf: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    crate::logging::init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// What a rejected token does besides clearing the stored session: tell
/// the user it is gone and how to start a new one.
struct SessionNotice;

impl UnauthorizedPolicy for SessionNotice {
    fn on_unauthorized(&self) {
        eprintln!("Erro 401: Token inválido ou expirado.");
        eprintln!("Entre novamente com `conecta login`.");
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open_default());
    let client = ApiClient::from_config(&config, Arc::clone(&tokens), Arc::new(SessionNotice))
        .context("configure API client")?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&client, tokens.as_ref(), username, password).await
        }

        Commands::Logout => commands::auth::logout(tokens.as_ref()),

        Commands::Register(args) => {
            let cep_client = CepClient::from_config(&config).context("configure CEP client")?;
            commands::register::run(&client, &cep_client, args).await
        }

        Commands::Ads(args) => commands::ads::list(&client, &args).await,

        Commands::Ad { id } => commands::ads::show(&client, id).await,

        Commands::Mine => commands::ads::mine(&client, tokens.as_ref()).await,

        Commands::Publish(args) => commands::publish::publish(&client, tokens.as_ref(), args).await,

        Commands::Edit(args) => commands::publish::edit(&client, tokens.as_ref(), args).await,

        Commands::Delete { id, yes } => {
            commands::ads::delete(&client, tokens.as_ref(), id, yes).await
        }

        Commands::Categories => commands::categories::list(&client).await,

        Commands::Cep { code } => {
            let cep_client = CepClient::from_config(&config).context("configure CEP client")?;
            commands::address::cep(&cep_client, code).await
        }

        Commands::Locations { uf } => {
            let ibge = IbgeClient::from_config(&config).context("configure IBGE client")?;
            commands::address::locations(&ibge, uf.as_deref()).await
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
