//! deltabeatd — the deltabeat daemon.
//!
//! Assembles the reporter subsystems in one process:
//! - Metric registry
//! - Periodic metrics-delta reporter
//! - Status endpoint
//!
//! On Ctrl-C the endpoint drains, the reporter stops, and the totals since
//! start are logged one last time.
//!
//! # Usage
//!
//! ```text
//! deltabeatd run --config /etc/deltabeat/deltabeat.toml --listen 0.0.0.0:9090
//! ```

mod settings;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use deltabeat_core::{HumanDuration, MetricRegistry};
use deltabeat_metrics::{MetricsReporter, StatusBoard};

use crate::settings::{RunArgs, Settings};

#[derive(Parser)]
#[command(name = "deltabeatd", about = "deltabeat metrics-delta reporter", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the reporter and the status endpoint until interrupted.
    Run(RunArgs),
    /// Print the effective settings and exit.
    CheckConfig(RunArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => {
            let settings = Settings::load(&args).context("loading configuration")?;
            init_tracing(&settings);
            run(settings).await
        }
        Command::CheckConfig(args) => {
            let settings = Settings::load(&args).context("loading configuration")?;
            println!("listen         = {}", settings.listen);
            println!("metrics        = {}", settings.metrics.enabled);
            println!("period         = {}", HumanDuration(settings.metrics.period));
            println!("report_totals  = {}", settings.metrics.report_totals);
            println!("log_level      = {}", settings.log_level);
            println!("log_json       = {}", settings.log_json);
            Ok(())
        }
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if settings.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    info!("deltabeat daemon starting");

    // ── Initialize subsystems ──────────────────────────────────

    let registry = MetricRegistry::new();
    registry.set_string("deltabeat.version", env!("CARGO_PKG_VERSION"));
    let board = StatusBoard::new();
    let reporter = Arc::new(MetricsReporter::new(
        registry,
        board.clone(),
        settings.metrics,
    ));
    info!(
        enabled = settings.metrics.enabled,
        period = ?settings.metrics.period,
        "metrics reporter initialized"
    );

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Start background tasks ─────────────────────────────────

    let reporter_handle = tokio::spawn({
        let reporter = reporter.clone();
        async move { reporter.run(shutdown_rx).await }
    });

    // ── Start status endpoint ──────────────────────────────────

    let router = deltabeat_api::build_router(board);
    let listener = tokio::net::TcpListener::bind(settings.listen)
        .await
        .with_context(|| format!("binding status endpoint on {}", settings.listen))?;
    info!(addr = %settings.listen, "status endpoint listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl-C, shutting down");
            }
            info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    // Wait for the reporter, then log totals since start.
    match reporter_handle.await {
        Ok(ticks) => info!(ticks, "metrics reporter stopped"),
        Err(e) => warn!(error = %e, "metrics reporter task failed"),
    }
    reporter.report_totals();

    info!("deltabeat daemon stopped");
    Ok(())
}
