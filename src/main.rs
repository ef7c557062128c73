//! product-details - Product detail viewer for a storefront catalog API

use anyhow::Result;
use clap::{Parser, Subcommand};
use product_details::catalog::ProductId;
use product_details::commands::{BrowseCommand, BrowseExit, QuantityClicks, ShowCommand};
use product_details::config::{Config, OutputFormat};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "product-details",
    version,
    about = "Product detail viewer for a storefront catalog API",
    long_about = "Fetches a product and its similar products from the catalog API and renders the details view."
)]
struct Cli {
    /// Catalog API base URL
    #[arg(long, global = true, env = "PDP_BASE_URL")]
    base_url: Option<String>,

    /// Bearer token for the catalog API
    #[arg(long, global = true, env = "PDP_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// File holding the bearer token
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    /// Route shown when a product cannot be displayed
    #[arg(long, global = true)]
    listing_route: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a product's details
    #[command(alias = "s")]
    Show {
        /// Product id
        id: ProductId,

        /// Times to press the quantity "+" control
        #[arg(long, default_value = "0")]
        increase: u32,

        /// Times to press the quantity "-" control
        #[arg(long, default_value = "0")]
        decrease: u32,
    },

    /// Browse interactively starting at a product
    #[command(alias = "b")]
    Browse {
        /// Product id
        id: ProductId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered views stay clean on stdout
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    if let Some(token_file) = cli.token_file {
        config.token_file = Some(token_file);
    }
    if let Some(route) = cli.listing_route {
        config.listing_route = route;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Show { id, increase, decrease } => {
            let cmd = ShowCommand::new(config);

            if std::io::stderr().is_terminal() {
                eprintln!("{}", cmd.loading_view());
            }

            let output = cmd.execute(id, QuantityClicks { increase, decrease }).await?;
            println!("{}", output);
        }

        Commands::Browse { id } => {
            let cmd = BrowseCommand::new(config);

            if let BrowseExit::Interrupted = cmd.execute(id).await? {
                eprintln!("Interrupted.");
            }
        }
    }

    Ok(())
}
