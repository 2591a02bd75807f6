//! folio-server - portfolio contact endpoint
//!
//! Settings resolve per value in priority order: command line, environment,
//! TOML config file, compiled default.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_common::config::{resolve_email_settings, resolve_setting, resolve_toml_config};
use folio_common::email::EmailJsClient;
use folio_server::{build_router, AppState};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "folio_server=info,folio_common=info,tower_http=info";

/// Command-line arguments for folio-server
#[derive(Parser, Debug)]
#[command(name = "folio-server")]
#[command(about = "Contact endpoint and static assets for the portfolio site")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "FOLIO_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, env = "FOLIO_BIND")]
    bind: Option<String>,

    /// Config file (default: platform config dir, then /etc/folio)
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Resume PDF served at /resume.pdf
    #[arg(long, env = "FOLIO_RESUME")]
    resume: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so its log level can apply
    let toml_config = resolve_toml_config(args.config.as_deref());
    let log_level = toml_config
        .as_ref()
        .ok()
        .and_then(|c| c.logging.level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before anything that can fail
    info!(
        "Starting folio-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let toml_config = toml_config.context("Failed to load configuration")?;

    let bind = resolve_setting(
        args.bind,
        "FOLIO_BIND",
        toml_config.bind_address.clone(),
        DEFAULT_BIND_ADDRESS.to_string(),
    );
    let port = resolve_setting(args.port, "FOLIO_PORT", toml_config.port, DEFAULT_PORT);

    let mut state = AppState::new().with_allowed_origins(toml_config.allowed_origins.clone());

    match args.resume.or(toml_config.resume_path.clone()) {
        Some(path) => {
            if !path.exists() {
                warn!("Resume file {} not found, /resume.pdf will 404", path.display());
            }
            info!("Serving resume from {}", path.display());
            state = state.with_resume(path);
        }
        None => info!("No resume configured"),
    }

    match resolve_email_settings(toml_config.email.clone()) {
        Some(settings) => {
            let client = EmailJsClient::new(&settings).context("Failed to build email client")?;
            info!(
                "Relaying contact submissions via {} to {}",
                client.send_url(),
                settings.to_email
            );
            state = state.with_relay(Arc::new(client), settings.to_email.clone());
        }
        None => info!("No email relay configured, submissions are logged only"),
    }

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("folio-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
