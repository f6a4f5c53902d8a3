//! Metric value types shared by the registry, deltas, and formatters.

use std::fmt;
use std::time::Duration;

/// A single metric value, tagged by kind.
///
/// The registry keeps one namespace per kind; a delta entry carries the new
/// value for booleans and strings and the numeric difference for ints and
/// floats.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
}

/// Printable form: decimal numbers, `true`/`false`, strings verbatim.
impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Bool(b) => write!(f, "{b}"),
            MetricValue::Str(s) => f.write_str(s),
            MetricValue::Int(i) => write!(f, "{i}"),
            MetricValue::Float(v) => write_float(f, *v),
        }
    }
}

/// Shortest round-trip digits; exponent form (`1e+06`, `2.5e-07`) when the
/// decimal exponent is below -4 or at least 6.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "+Inf" } else { "-Inf" });
    }

    let sci = format!("{v:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..6).contains(&exp) {
        return write!(f, "{v}");
    }

    let sign = if exp < 0 { '-' } else { '+' };
    write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

impl From<bool> for MetricValue {
    fn from(v: bool) -> Self {
        MetricValue::Bool(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Str(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Str(v)
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Int(v)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

/// Displays a duration as hours, minutes and seconds: `1m30s`, `1h0m0s`,
/// `2.5s`. Sub-second values use the largest of `ms`, `µs`, `ns` that keeps
/// the integer part non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.as_nanos();
        if nanos == 0 {
            return f.write_str("0s");
        }
        if nanos < 1_000 {
            return write!(f, "{nanos}ns");
        }
        if nanos < 1_000_000 {
            return write_scaled(f, nanos, 1_000, "µs");
        }
        if nanos < 1_000_000_000 {
            return write_scaled(f, nanos, 1_000_000, "ms");
        }

        let secs = self.0.as_secs();
        let (hours, mins) = (secs / 3600, secs / 60 % 60);
        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if hours > 0 || mins > 0 {
            write!(f, "{mins}m")?;
        }
        let rest = u128::from(secs % 60) * 1_000_000_000 + u128::from(self.0.subsec_nanos());
        write_scaled(f, rest, 1_000_000_000, "s")
    }
}

/// `value / unit` with the remainder as a fraction, trailing zeros trimmed.
fn write_scaled(f: &mut fmt::Formatter<'_>, value: u128, unit: u128, suffix: &str) -> fmt::Result {
    let (whole, frac) = (value / unit, value % unit);
    write!(f, "{whole}")?;
    if frac > 0 {
        let width = unit.ilog10() as usize;
        let digits = format!("{frac:0width$}");
        write!(f, ".{}", digits.trim_end_matches('0'))?;
    }
    f.write_str(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_printable_form() {
        assert_eq!(MetricValue::Bool(true).to_string(), "true");
        assert_eq!(MetricValue::Bool(false).to_string(), "false");
        assert_eq!(MetricValue::Str("up".into()).to_string(), "up");
        assert_eq!(MetricValue::Int(-42).to_string(), "-42");
        assert_eq!(MetricValue::Float(1.5).to_string(), "1.5");
        assert_eq!(MetricValue::Float(3.0).to_string(), "3");
    }

    #[test]
    fn float_large_and_small_use_exponent() {
        let render = |v: f64| MetricValue::Float(v).to_string();
        assert_eq!(render(123456.0), "123456");
        assert_eq!(render(1e6), "1e+06");
        assert_eq!(render(1e21), "1e+21");
        assert_eq!(render(-2.5e10), "-2.5e+10");
        assert_eq!(render(0.0001), "0.0001");
        assert_eq!(render(0.00001), "1e-05");
        assert_eq!(render(1.5e-7), "1.5e-07");
        assert_eq!(render(1e100), "1e+100");
        assert_eq!(render(0.0), "0");
    }

    #[test]
    fn float_non_finite() {
        assert_eq!(MetricValue::Float(f64::INFINITY).to_string(), "+Inf");
        assert_eq!(MetricValue::Float(f64::NEG_INFINITY).to_string(), "-Inf");
        assert_eq!(MetricValue::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn human_duration_units() {
        let render = |d: Duration| HumanDuration(d).to_string();
        assert_eq!(render(Duration::ZERO), "0s");
        assert_eq!(render(Duration::from_secs(30)), "30s");
        assert_eq!(render(Duration::from_secs(90)), "1m30s");
        assert_eq!(render(Duration::from_secs(120)), "2m0s");
        assert_eq!(render(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(render(Duration::from_secs(3725)), "1h2m5s");
        assert_eq!(render(Duration::from_millis(1500)), "1.5s");
        assert_eq!(render(Duration::from_millis(500)), "500ms");
        assert_eq!(render(Duration::from_micros(1250)), "1.25ms");
        assert_eq!(render(Duration::from_nanos(2500)), "2.5µs");
        assert_eq!(render(Duration::from_nanos(42)), "42ns");
    }

    #[test]
    fn conversions_pick_the_variant() {
        assert_eq!(MetricValue::from(7i64), MetricValue::Int(7));
        assert_eq!(MetricValue::from("x"), MetricValue::Str("x".into()));
        assert_eq!(MetricValue::from(0.5), MetricValue::Float(0.5));
        assert_eq!(MetricValue::from(true), MetricValue::Bool(true));
    }
}
