use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use stashval::{HttpQueryClient, RequestDispatcher};
use stashval_engine::{HttpProfileSource, IdentityResolver};
use stashval_models::{load_or_init, FrontendConfig};

#[derive(Parser, Debug)]
#[command(
    name = "stashval",
    about = "Chat front-end - values Steam inventories from free-text account references"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/stashval.toml")]
    config: String,

    /// Handle a single message and exit instead of reading stdin
    #[arg(short, long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config: FrontendConfig = load_or_init(Path::new(&cli.config))
        .with_context(|| format!("Failed to load config: {}", cli.config))?;
    if config.transport_token.is_empty() {
        bail!("transport_token must be set in {}", cli.config);
    }

    let timeout = Duration::from_secs(config.timeout_seconds);
    let profiles =
        Arc::new(HttpProfileSource::new(timeout).context("Failed to build profile client")?);
    let query = Arc::new(
        HttpQueryClient::new(&config.server_url, timeout)
            .context("Failed to build query client")?,
    );
    let dispatcher = RequestDispatcher::new(IdentityResolver::new(profiles), query);

    if let Some(message) = &cli.message {
        for reply in dispatcher.dispatch(message).await {
            println!("{reply}");
        }
        return Ok(());
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received shutdown signal");
            cancel.cancel();
        });
    }

    tracing::info!(server_url = %config.server_url, "Reading messages from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => {
                match line.context("Failed to read message")? {
                    Some(message) if !message.trim().is_empty() => {
                        for reply in dispatcher.dispatch(&message).await {
                            println!("{reply}");
                        }
                    }
                    Some(_) => {}
                    None => break,
                }
            }
        }
    }

    Ok(())
}
