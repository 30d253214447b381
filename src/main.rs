//! payroll-server binary.
//!
//! Loads the rates and company details from a configuration directory and
//! serves the payroll API over HTTP with an in-memory submission store.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Payroll run API server")]
struct Cli {
    /// Directory holding rates.yaml and company.yaml.
    #[arg(short, long, env = "PAYROLL_CONFIG", default_value = "config/default")]
    config: PathBuf,

    /// Address to listen on.
    #[arg(short, long, env = "PAYROLL_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    info!(
        config = %cli.config.display(),
        company = %config.company().name,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));

    let listener = TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(addr = %cli.bind, "Payroll server listening");

    axum::serve(listener, router)
        .await
        .context("server error")?;
    Ok(())
}
