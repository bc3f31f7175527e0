//! BlockFin Server
//!
//! Serves the AI-insights proxy, the simulated feature panels and their
//! event stream.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings
//! blockfin-server
//!
//! # Start with custom config
//! blockfin-server --config /path/to/config.toml
//!
//! # Upstream keys and environment overrides
//! OPENAI_API_KEY=sk-... DEEPSEEK_API_KEY=sk-... blockfin-server
//! BLOCKFIN__SERVER__PORT=8080 blockfin-server
//! ```
//!
//! Without an upstream key the routes served by that provider answer 500,
//! unless `llm.deterministic_fallback` is enabled for offline development.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use blockfin_api::{create_router, ApiConfig, AppState};
use blockfin_insights::InsightsService;
use blockfin_llm::{DeepSeekConfig, LLMRouter, LLMRouterBuilder, OpenAIConfig};

use crate::config::{LlmSettings, ServerConfig};

// =============================================================================
// CLI Arguments
// =============================================================================

/// BlockFin Server - AI insights proxy and simulated feature panels
#[derive(Parser, Debug)]
#[command(name = "blockfin-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "BLOCKFIN_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "BLOCKFIN_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "BLOCKFIN_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "BLOCKFIN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "BLOCKFIN_LOG_FORMAT")]
    log_format: Option<String>,

    /// Disable the Prometheus exporter
    #[arg(long)]
    no_metrics: bool,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut server_config = ServerConfig::load(args.config.as_deref())?;
    apply_args(&mut server_config, &args);

    init_logging(&server_config.logging);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting BlockFin server");

    let router = build_llm_router(&server_config.llm);
    tracing::info!(
        providers = ?router.kinds().iter().map(|k| k.to_string()).collect::<Vec<_>>(),
        "LLM providers registered"
    );

    let state = Arc::new(AppState::new(InsightsService::new(router)));
    let app = create_router(state.clone(), ApiConfig::from(&server_config.api));

    if server_config.metrics.enabled {
        start_metrics_server(&server_config.metrics)?;
    }

    let addr = server_config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(server_config.server.shutdown_timeout()))
        .await?;

    // Cancel any running panel timers
    state.panels.reset_all().await;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// CLI flags override file and environment configuration
fn apply_args(config: &mut ServerConfig, args: &Args) {
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref format) = args.log_format {
        config.logging.format = format.clone();
    }
    if args.no_metrics {
        config.metrics.enabled = false;
    }
}

// =============================================================================
// Initialization Functions
// =============================================================================

fn init_logging(config: &config::LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .init();
        }
    }
}

/// Providers from environment keys, with models and base URLs from config
fn build_llm_router(settings: &LlmSettings) -> LLMRouter {
    let mut builder = LLMRouterBuilder::new();

    match OpenAIConfig::from_env() {
        Some(mut openai) => {
            if let Some(ref model) = settings.openai_model {
                openai.model = model.clone();
            }
            if let Some(ref base_url) = settings.openai_base_url {
                openai.base_url = base_url.clone();
            }
            builder = builder.with_openai(openai);
        }
        None => tracing::warn!("OPENAI_API_KEY not set, OpenAI routes are unavailable"),
    }

    match DeepSeekConfig::from_env() {
        Some(mut deepseek) => {
            if let Some(ref model) = settings.deepseek_model {
                deepseek.model = model.clone();
            }
            if let Some(ref base_url) = settings.deepseek_base_url {
                deepseek.base_url = base_url.clone();
            }
            builder = builder.with_deepseek(deepseek);
        }
        None => tracing::warn!("No DeepSeek or OpenAI key set, DeepSeek routes are unavailable"),
    }

    if settings.deterministic_fallback {
        tracing::warn!("Deterministic fallback enabled, unconfigured routes answer offline");
        builder = builder.with_deterministic();
    }

    builder.build()
}

fn start_metrics_server(config: &config::MetricsConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(port = config.port, "Metrics exporter listening");
    Ok(())
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for Ctrl+C or SIGTERM, then allow in-flight requests to finish
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    tracing::info!(
        timeout_secs = timeout.as_secs(),
        "Waiting for in-flight requests to complete..."
    );

    tokio::time::sleep(timeout).await;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use blockfin_llm::ProviderKind;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["blockfin-server", "--port", "8080", "--no-metrics"]);
        assert_eq!(args.port, Some(8080));
        assert!(args.no_metrics);
    }

    #[test]
    fn test_args_override_config() {
        let mut config = ServerConfig::default();
        let args = Args::parse_from([
            "blockfin-server",
            "--host",
            "127.0.0.1",
            "--log-format",
            "json",
            "--no-metrics",
        ]);
        apply_args(&mut config, &args);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.format, "json");
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_development_config() {
        let config = ServerConfig::development();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_deterministic_provider_is_opt_in() {
        let router = build_llm_router(&LlmSettings::default());
        assert!(router.provider(ProviderKind::Deterministic).is_none());

        let router = build_llm_router(&LlmSettings {
            deterministic_fallback: true,
            ..Default::default()
        });
        assert!(router.provider(ProviderKind::Deterministic).is_some());
    }
}
