//! esa-quiz - Celebrity tier matching service
//!
//! Serves the lifestyle quiz and matches a submitted score against public
//! figures discovered in Wikidata and ranked by news coverage.
//!
//! Default port: 5730

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use esa_common::config::{load_toml_config, ConfigResolver};
use esa_common::logging::init_tracing;
use tokio::signal;
use tracing::{error, info, warn};

use esa_quiz::config::QuizConfig;
use esa_quiz::AppState;

/// Command-line arguments for esa-quiz
#[derive(Parser, Debug)]
#[command(name = "esa-quiz")]
#[command(about = "Celebrity tier matching service")]
#[command(version)]
struct Args {
    /// Configuration file (overrides ESA_CONFIG and the default location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:5730
    #[arg(short, long, env = "ESA_BIND")]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ESA_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config comes first: it carries the logging settings
    let config_path = ConfigResolver::new("esa-quiz").resolve(args.config.as_deref());
    let config: QuizConfig = load_toml_config(config_path.as_deref())
        .context("Failed to load configuration")?;
    let config = config.with_overrides(args.bind, args.log_level);

    init_tracing(&config.logging).context("Failed to initialize logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        build_timestamp = env!("BUILD_TIMESTAMP"),
        build_profile = env!("BUILD_PROFILE"),
        "Starting esa-quiz"
    );

    match &config_path {
        Some(path) if path.exists() => info!("Configuration: {}", path.display()),
        Some(path) => warn!("Config file {} not found, using defaults", path.display()),
        None => info!("No configuration file found, using defaults"),
    }

    config.validate().context("Invalid configuration")?;

    let state = AppState::from_config(&config).context("Failed to build source clients")?;
    info!(
        knowledge_graph = %config.sources.knowledge_graph_url,
        nationality = %config.sources.nationality_qid,
        max_concurrency = config.pipeline.max_concurrency,
        "Source clients initialized"
    );

    let app = esa_quiz::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;
    info!("Listening on http://{}", config.bind);
    info!("Health check: http://{}/health", config.bind);

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
            error!("Failed to listen for Ctrl+C: {}", e);
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
            info!("Received terminate signal, shutting down");
        },
    }
}
