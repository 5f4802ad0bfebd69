//! Coinrelay CLI
//!
//! Command-line interface for the coinrelay market-data gateway.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coinrelay_api::{GatewayConfig, GatewayServer, RouteTable};

/// Coinrelay - caching reverse proxy for crypto market-data APIs
#[derive(Parser)]
#[command(name = "coinrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gateway server
    Serve {
        /// Port to listen on (overrides PORT from the environment)
        #[arg(short, long)]
        port: Option<u16>,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// List the proxied routes with their cache keys and TTLs
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "coinrelay=debug,tower_http=debug,info"
    } else {
        "coinrelay=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::Routes => cmd_routes(),
    }
}

/// Run the gateway server
async fn cmd_serve(port: Option<u16>, bind: &str) -> Result<()> {
    let mut config = GatewayConfig::from_env();
    if let Some(port) = port {
        config.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", bind, config.port)
        .parse()
        .context("Invalid bind address")?;

    println!("{}", "📡 Starting coinrelay gateway...".cyan().bold());
    println!("   {} {}", "Listening on:".dimmed(), addr);
    println!("   {} {}", "Environment:".dimmed(), config.env_tag);
    println!(
        "   {} {}",
        "Coinglass credential:".dimmed(),
        if config.coinglass_key.is_some() {
            "configured".green()
        } else {
            "missing (flow route disabled)".yellow()
        }
    );

    let server = GatewayServer::new(config);
    server.run(addr).await.context("Gateway server failed")?;

    Ok(())
}

/// List the proxied routes
fn cmd_routes() -> Result<()> {
    let table = RouteTable::standard();

    println!("{}", "📋 Proxied routes:".cyan().bold());
    for route in table.iter() {
        println!(
            "   {:<24} {} {:<20} {} {}s",
            route.path.yellow(),
            "key:".dimmed(),
            route.key_pattern,
            "ttl:".dimmed(),
            route.ttl.as_secs()
        );
    }
    println!("   {:<24} {}", "/api/health".yellow(), "never cached".dimmed());

    Ok(())
}
