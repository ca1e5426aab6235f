//! recipes-api - HTTP service managing a collection of recipes
//!
//! Recipes live in memory and are mirrored to a single JSON file that is
//! rewritten after every change.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use recipes_common::config::{load_toml_config, Overrides, ServiceConfig, DEFAULT_LOG_LEVEL};
use recipes_common::{JsonFile, RecipeStore};
use recipes_api::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for recipes-api
#[derive(Parser, Debug)]
#[command(name = "recipes-api")]
#[command(about = "Recipe collection HTTP service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "RECIPES_PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(short, long, env = "RECIPES_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// JSON file holding the recipe collection
    #[arg(short, long, env = "RECIPES_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// TOML config file (defaults to <config_dir>/recipes/config.toml)
    #[arg(short, long, env = "RECIPES_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG wins; otherwise the config file level replaces this once loaded
    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    let (filter, filter_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting recipes-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let overrides = Overrides {
        port: args.port,
        bind_address: args.bind_address,
        data_file: args.data_file,
    };
    let config = ServiceConfig::resolve(overrides, load_toml_config(args.config.as_deref()));

    if !rust_log_set {
        filter_handle
            .reload(EnvFilter::new(&config.log_level))
            .context("Failed to apply configured log level")?;
    }

    info!("Data file: {}", config.data_file.display());
    let store = RecipeStore::open(JsonFile::new(&config.data_file));

    let app = build_router(AppState::new(store));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("recipes-api listening on http://{}", addr);

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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
