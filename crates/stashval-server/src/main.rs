use std::path::Path;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stashval_cache::RedisTtlStore;
use stashval_engine::{FetchOrchestrator, HttpPricingApi, UpstreamInventoryClient};
use stashval_models::{load_or_init, ServerConfig};
use stashval_server::{get_data, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "stashval-server",
    about = "Inventory query service - serves cached per-item price payloads over HTTP"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/stashval-server.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config: ServerConfig = load_or_init(Path::new(&cli.config))
        .with_context(|| format!("Failed to load config: {}", cli.config))?;

    let store = Arc::new(
        RedisTtlStore::connect(&config.redis_url)
            .await
            .with_context(|| format!("Failed to connect to Redis at {}", config.redis_url))?,
    );
    let api =
        Arc::new(HttpPricingApi::new(&config.upstream).context("Failed to build upstream client")?);
    let source = Arc::new(UpstreamInventoryClient::new(api));
    let orchestrator = Arc::new(FetchOrchestrator::new(store, source, config.ttl_seconds()));

    let state = web::Data::new(AppState { orchestrator });

    tracing::info!(
        bind_addr = %config.bind_addr,
        ttl_seconds = config.ttl_seconds(),
        "Starting query endpoint"
    );

    HttpServer::new(move || App::new().app_data(state.clone()).service(get_data))
        .bind(&config.bind_addr)
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?
        .run()
        .await?;

    Ok(())
}
