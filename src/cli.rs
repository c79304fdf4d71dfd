use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use deezer_proxy::api;
use deezer_proxy::clients::errors::Result;
use deezer_proxy::proxy::{CatalogProxy, ConfigBuilder};
use log::info;

#[derive(Parser)]
#[command(name = "deezer-proxy")]
#[command(version, about = "Proxy and reshape Deezer catalog responses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on, overrides DEEZER_PROXY_BIND
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Search tracks once and print the result as JSON
    Search { query: String },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => serve(bind).await?,
        Commands::Search { query } => search(&query).await?,
    }
    Ok(())
}

async fn serve(bind: Option<SocketAddr>) -> Result<()> {
    info!("Building config ...");
    let mut builder = ConfigBuilder::new();
    if let Some(addr) = bind {
        builder = builder.bind_address(addr);
    }
    let config = builder.build()?;
    let proxy = Arc::new(CatalogProxy::new(config.deezer));
    api::serve(proxy, config.bind_address).await
}

async fn search(query: &str) -> Result<()> {
    let config = ConfigBuilder::new().build()?;
    let proxy = CatalogProxy::new(config.deezer);
    let tracks = proxy.search_tracks(query).await?;
    println!("{}", serde_json::to_string_pretty(&tracks)?);
    Ok(())
}
