//! Delta engine: what changed between two snapshots.

use std::collections::HashMap;

use deltabeat_core::{MetricValue, Snapshot};

/// Metrics that changed between two snapshots, keyed by name.
///
/// Booleans and strings map to their new value; ints and floats map to
/// `current - previous`. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    entries: HashMap<String, MetricValue>,
}

impl Delta {
    /// An empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `name`, replacing any earlier entry.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// The change recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.entries.get(name)
    }

    /// Number of changed metrics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metric names sorted ascending, byte-wise.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl<K: Into<String>, V: Into<MetricValue>> FromIterator<(K, V)> for Delta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut delta = Delta::new();
        for (k, v) in iter {
            delta.insert(k, v);
        }
        delta
    }
}

/// Compute the metrics that changed from `previous` to `current`.
///
/// A boolean or string missing from `previous` is always reported; a
/// missing int or float counts as zero. Names only present in `previous`
/// are not reported.
pub fn diff(previous: &Snapshot, current: &Snapshot) -> Delta {
    let mut out = Delta::new();

    for (name, &b) in &current.bools {
        if previous.bools.get(name) != Some(&b) {
            out.insert(name.as_str(), b);
        }
    }

    for (name, s) in &current.strings {
        if previous.strings.get(name) != Some(s) {
            out.insert(name.as_str(), s.as_str());
        }
    }

    for (name, &i) in &current.ints {
        let p = previous.ints.get(name).copied().unwrap_or(0);
        if p != i {
            out.insert(name.as_str(), i.wrapping_sub(p));
        }
    }

    for (name, &f) in &current.floats {
        let p = previous.floats.get(name).copied().unwrap_or(0.0);
        if p != f {
            out.insert(name.as_str(), f - p);
        }
    }

    out
}
