//! griot-archive - Cultural-heritage content archive service
//!
//! HTTP service exposing the content writer, reader/aggregator, moderation
//! workflow, report sub-workflow, and contributor statistics.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use griot_archive::db::settings::ListingLimits;
use griot_archive::{build_router, AppState};
use griot_common::config::{database_path, resolve_root_folder};
use griot_common::db::init::init_database;

/// Command-line arguments for griot-archive
#[derive(Parser, Debug)]
#[command(name = "griot-archive")]
#[command(about = "Cultural-heritage content archive service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "GRIOT_PORT")]
    port: u16,

    /// Root folder containing the archive database
    #[arg(short, long, env = "GRIOT_ROOT_FOLDER")]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "griot_archive=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting Griot Archive v{} on port {}",
        env!("CARGO_PKG_VERSION"),
        args.port
    );

    // Root folder resolution: CLI > env > config file > OS default
    let root_folder = resolve_root_folder(
        args.root_folder.as_deref(),
        "GRIOT_ROOT_FOLDER",
        Some("root_folder"),
    )
    .context("Failed to resolve root folder")?;
    info!("Root folder: {}", root_folder.display());

    let db_path = database_path(&root_folder);
    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let limits = ListingLimits::load(&pool)
        .await
        .context("Failed to load listing limits")?;
    info!(
        "Listing limits: default {}, max {}",
        limits.default_limit, limits.max_limit
    );

    let state = AppState::new(pool, limits);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

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
