//! heir-server: HTTP front end for the inheritance calculator.
//!
//! Serves `POST /calculate` (and the older `/calculate-inheritance`) plus
//! `GET /health`. Settings come from `HEIR_*` environment variables;
//! command-line flags override them.

use anyhow::{Context, Result};
use clap::Parser;
use heir_core::VacantSidePolicy;
use heir_service::{router, AppState, LogFormat, ServiceConfig};
use tracing::info;

/// Heirloom calculation server.
#[derive(Parser, Debug)]
#[command(name = "heir-server", version, about = "Heirloom intestate succession calculator over HTTP")]
struct Args {
    /// Address to bind (overrides HEIR_BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format ("text" or "json")
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Vacant parent side handling ("accrue" or "retain")
    #[arg(long)]
    vacant_side: Option<VacantSidePolicy>,

    /// Allowed CORS origin, "*" for any
    #[arg(long)]
    allowed_origin: Option<String>,
}

impl Args {
    /// Layer the flags that were given over `config`.
    fn apply(self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(policy) = self.vacant_side {
            config.vacant_side = policy;
        }
        if let Some(origin) = self.allowed_origin {
            config.allowed_origin = origin;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.apply(ServiceConfig::from_env().context("Failed to load configuration")?);

    init_logging(&config.log_level, config.log_format);

    info!("Heirloom server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        bind = %config.bind_addr,
        vacant_side = %config.vacant_side,
        allowed_origin = %config.allowed_origin,
        "starting heir-server"
    );

    let bind_addr = config.bind_addr.clone();
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;

    info!("Listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("heir-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down..."),
        Err(e) => tracing::error!("failed to listen for Ctrl+C: {e}"),
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true))
            .init(),
    }
}
