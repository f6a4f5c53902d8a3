//! Effective daemon settings: defaults, then `deltabeat.toml`, then flags.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use deltabeat_core::config::parse_duration;
use deltabeat_core::{ConfigResult, DeltabeatConfig, MetricsLoggingConfig};

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Path to deltabeat.toml.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Status endpoint listen address.
    #[arg(long)]
    pub listen: Option<SocketAddr>,

    /// Metrics logging period ("30s", "500ms", "2m").
    #[arg(long, value_parser = parse_duration)]
    pub metrics_period: Option<Duration>,

    /// Disable periodic metrics logging and the totals report.
    #[arg(long)]
    pub no_metrics: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub listen: SocketAddr,
    pub metrics: MetricsLoggingConfig,
    pub log_level: String,
    pub log_json: bool,
}

impl Settings {
    /// Load the config file named by `args` (if any) and apply overrides.
    pub fn load(args: &RunArgs) -> ConfigResult<Self> {
        let file = match &args.config {
            Some(path) => DeltabeatConfig::from_file(path)?,
            None => DeltabeatConfig::default(),
        };
        Self::resolve(&file, args)
    }

    pub fn resolve(file: &DeltabeatConfig, args: &RunArgs) -> ConfigResult<Self> {
        let mut metrics = file.metrics_logging()?;
        if let Some(period) = args.metrics_period {
            metrics.period = period;
        }
        if args.no_metrics {
            metrics.enabled = false;
            metrics.report_totals = false;
        }

        let listen = match args.listen {
            Some(addr) => addr,
            None => file.status_listen()?,
        };

        Ok(Self {
            listen,
            metrics,
            log_level: file.log_level().to_string(),
            log_json: args.log_json || file.log_json(),
        })
    }
}
