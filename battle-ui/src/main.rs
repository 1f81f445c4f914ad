//! battle-ui - Battle of the albums
//!
//! Web page for picking two albums and comparing their crowd-sourced
//! ratings with Welch's t-test.
//!
//! Data source prefix resolution: FILE_SOURCE_PREFIX, then
//! `file_source_prefix` in the TOML config, then the current directory.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use battle_common::config::{
    resolve_source_prefix, TomlConfig, DEFAULT_BIND, DEFAULT_PORT, PREFIX_ENV_VAR,
};
use battle_common::Datasets;
use battle_ui::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for battle-ui
#[derive(Parser, Debug)]
#[command(name = "battle-ui")]
#[command(about = "Pick two albums and see which one is better")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "BATTLE_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, env = "BATTLE_BIND")]
    bind: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "BATTLE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "battle_ui=info,battle_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any data loading delay
    info!(
        "Starting Battle of the albums (battle-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = TomlConfig::load_or_default(args.config.as_deref());

    let prefix = resolve_source_prefix(PREFIX_ENV_VAR, &config);
    info!("Data source prefix: {:?}", prefix);

    // The page cannot render without its data: a failed load is fatal
    let datasets = Arc::new(Datasets::from_csv(prefix));
    if let Err(e) = datasets.preload() {
        error!("Failed to load datasets: {}", e);
        return Err(e).context("Failed to load datasets");
    }

    let state = AppState::new(datasets).context("Failed to build album lookup")?;
    info!("{} albums available for comparison", state.lookup.names().len());
    let app = build_router(state);

    let port = args.port.or(config.port).unwrap_or(DEFAULT_PORT);
    let bind = args
        .bind
        .or(config.bind)
        .unwrap_or_else(|| DEFAULT_BIND.to_string());
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("battle-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
