use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use warden_server::config::AppConfig;
use warden_server::{logging, wiring};

/// Endpoint security gateway.
#[derive(Debug, Parser)]
#[command(name = "warden-server", version)]
struct Cli {
    /// YAML configuration file (default: config/warden.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Active profile; overrides the configured one (DEVELOP, QA, PROD)
    #[arg(short, long)]
    profile: Option<String>,

    /// Print the effective configuration as JSON, secrets redacted, and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref(), cli.profile.as_deref())?;

    if cli.print_config {
        let rendered =
            serde_json::to_string_pretty(&cfg).context("failed to render configuration")?;
        println!("{rendered}");
        return Ok(());
    }

    logging::init(&cfg.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting warden-server");

    let gateway = wiring::build_gateway(&cfg)?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                return;
            }
            tracing::info!("Ctrl-C received, shutting down");
            cancel.cancel();
        }
    });

    gateway.serve(cancel).await
}
