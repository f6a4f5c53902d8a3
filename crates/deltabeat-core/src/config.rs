//! deltabeat.toml configuration parser.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default period of the metrics logging cycle.
pub const DEFAULT_METRICS_PERIOD: Duration = Duration::from_secs(30);

/// Default listen address of the status endpoint.
pub const DEFAULT_STATUS_LISTEN: &str = "0.0.0.0:9090";

/// Default tracing filter directive when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeltabeatConfig {
    pub logging: Option<LoggingConfig>,
    pub metrics: Option<MetricsConfig>,
    pub status: Option<StatusConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: Option<bool>,
    pub period: Option<String>,
    pub report_totals: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusConfig {
    pub listen: Option<String>,
}

/// Resolved settings for the metrics reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsLoggingConfig {
    /// Run the periodic delta cycle.
    pub enabled: bool,
    /// Interval between two samples.
    pub period: Duration,
    /// Log totals since start when the reporter stops.
    pub report_totals: bool,
}

impl Default for MetricsLoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period: DEFAULT_METRICS_PERIOD,
            report_totals: true,
        }
    }
}

impl DeltabeatConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Metrics reporter settings with defaults applied.
    ///
    /// `report_totals` follows `enabled` unless set explicitly.
    pub fn metrics_logging(&self) -> ConfigResult<MetricsLoggingConfig> {
        let Some(m) = &self.metrics else {
            return Ok(MetricsLoggingConfig::default());
        };
        let enabled = m.enabled.unwrap_or(true);
        let period = match &m.period {
            Some(p) => parse_duration(p)?,
            None => DEFAULT_METRICS_PERIOD,
        };
        Ok(MetricsLoggingConfig {
            enabled,
            period,
            report_totals: m.report_totals.unwrap_or(enabled),
        })
    }

    pub fn status_listen(&self) -> ConfigResult<SocketAddr> {
        let listen = self
            .status
            .as_ref()
            .and_then(|s| s.listen.as_deref())
            .unwrap_or(DEFAULT_STATUS_LISTEN);
        parse_listen(listen)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

/// Parse a duration string like "30s", "500ms", "2m". A bare number is
/// taken as seconds. Zero is rejected since it can't drive a timer.
pub fn parse_duration(s: &str) -> ConfigResult<Duration> {
    let trimmed = s.trim();
    let parsed = if let Some(ms) = trimmed.strip_suffix("ms") {
        ms.parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = trimmed.strip_suffix('s') {
        secs.parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = trimmed.strip_suffix('m') {
        mins
            .parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else if let Some(hours) = trimmed.strip_suffix('h') {
        hours
            .parse::<u64>()
            .ok()
            .and_then(|h| h.checked_mul(3600))
            .map(Duration::from_secs)
    } else {
        trimmed.parse::<u64>().ok().map(Duration::from_secs)
    };

    match parsed {
        Some(d) if !d.is_zero() => Ok(d),
        _ => Err(ConfigError::InvalidDuration(s.to_string())),
    }
}

pub fn parse_listen(s: &str) -> ConfigResult<SocketAddr> {
    s.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidAddress(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = DeltabeatConfig::parse("").unwrap();
        assert_eq!(config.metrics_logging().unwrap(), MetricsLoggingConfig::default());
        assert_eq!(config.status_listen().unwrap().port(), 9090);
        assert_eq!(config.log_level(), "info");
        assert!(!config.log_json());
    }

    #[test]
    fn test_parse_full() {
        let toml_str = r#"
[logging]
level = "debug"
json = true

[metrics]
enabled = true
period = "10s"
report_totals = false

[status]
listen = "127.0.0.1:9191"
"#;
        let config = DeltabeatConfig::parse(toml_str).unwrap();
        let metrics = config.metrics_logging().unwrap();
        assert!(metrics.enabled);
        assert_eq!(metrics.period, Duration::from_secs(10));
        assert!(!metrics.report_totals);
        assert_eq!(config.status_listen().unwrap().to_string(), "127.0.0.1:9191");
        assert_eq!(config.log_level(), "debug");
        assert!(config.log_json());
    }

    #[test]
    fn test_report_totals_follows_enabled() {
        let config = DeltabeatConfig::parse("[metrics]\nenabled = false\n").unwrap();
        let metrics = config.metrics_logging().unwrap();
        assert!(!metrics.enabled);
        assert!(!metrics.report_totals);
        assert_eq!(metrics.period, DEFAULT_METRICS_PERIOD);
    }

    #[test]
    fn test_invalid_period_rejected() {
        let config = DeltabeatConfig::parse("[metrics]\nperiod = \"soon\"\n").unwrap();
        assert!(matches!(
            config.metrics_logging(),
            Err(ConfigError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_invalid_listen_rejected() {
        let config = DeltabeatConfig::parse("[status]\nlisten = \"nowhere\"\n").unwrap();
        assert!(matches!(
            config.status_listen(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            DeltabeatConfig::parse("[metrics"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration(" 10 ").unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn parse_duration_rejects_zero_and_garbage() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-5s").is_err());
        assert!(parse_duration("5 days").is_err());
    }

    #[test]
    fn parse_duration_rejects_overflow() {
        assert!(matches!(
            parse_duration("307445734561825861m"),
            Err(ConfigError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("6000000000000000h"),
            Err(ConfigError::InvalidDuration(_))
        ));

        let config = DeltabeatConfig::parse("[metrics]\nperiod = \"6000000000000000h\"\n").unwrap();
        assert!(matches!(
            config.metrics_logging(),
            Err(ConfigError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        let err = DeltabeatConfig::from_file(Path::new("/nonexistent/deltabeat.toml"));
        assert!(matches!(err, Err(ConfigError::Io(_))));
    }
}
