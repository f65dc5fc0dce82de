//! imghost - A minimal image hosting server.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imghost::{config::Config, create_router, storage::ImageStore};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("imghost v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Upload directory: {}", config.upload_dir.display());
    if config.public_dir.is_dir() {
        info!("  Public directory: {}", config.public_dir.display());
    } else {
        info!(
            "  Public directory: {} (not found, skipped)",
            config.public_dir.display()
        );
    }
    info!(
        "  Limits: {} bytes per file, {} files per request",
        config.max_file_size, config.max_files
    );
    if config.cors_origins.is_none() {
        warn!("  CORS: any origin");
    }

    // Open (and create if needed) the storage directory
    let store = match ImageStore::open(&config.upload_dir).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open upload directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let router = create_router(store, config.router_config());

    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/images", addr);
    info!("    curl -F image=@cat.png http://{}/upload", addr);
    info!("");
    info!("  Upload page:");
    info!("    open http://{}/ui", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "imghost=debug,tower_http=debug"
    } else {
        "imghost=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
