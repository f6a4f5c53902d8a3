//! MetricRegistry — process-wide store of named metrics, and the immutable
//! [`Snapshot`] captured from it.
//!
//! The registry keeps four disjoint namespaces (bool, string, int, float)
//! behind a single lock so that a capture always sees all of them at the
//! same instant.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

/// Point-in-time copy of every registered metric, partitioned by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub bools: BTreeMap<String, bool>,
    pub strings: BTreeMap<String, String>,
    pub ints: BTreeMap<String, i64>,
    pub floats: BTreeMap<String, f64>,
}

impl Snapshot {
    /// The all-zero baseline used for "totals since start" reports.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no metric of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.bools.is_empty()
            && self.strings.is_empty()
            && self.ints.is_empty()
            && self.floats.is_empty()
    }

    /// Total number of metrics across all kinds.
    pub fn len(&self) -> usize {
        self.bools.len() + self.strings.len() + self.ints.len() + self.floats.len()
    }
}

/// Anything that can produce a consistent [`Snapshot`].
///
/// The reporter polls through this trait so hosts can plug in their own
/// registry; [`MetricRegistry`] is the bundled implementation.
pub trait SnapshotSource: Send + Sync {
    fn capture(&self) -> Snapshot;
}

/// Thread-safe metric registry.
///
/// `Clone` hands out another handle to the same registry.
#[derive(Clone, Default)]
pub struct MetricRegistry {
    inner: Arc<RwLock<Snapshot>>,
}

impl MetricRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean metric, moving the name out of any other kind.
    pub fn set_bool(&self, name: &str, value: bool) {
        let mut m = self.write();
        unregister(&mut m, name);
        m.bools.insert(name.to_string(), value);
    }

    /// Set a string metric, moving the name out of any other kind.
    pub fn set_string(&self, name: &str, value: impl Into<String>) {
        let mut m = self.write();
        unregister(&mut m, name);
        m.strings.insert(name.to_string(), value.into());
    }

    /// Set an int metric, moving the name out of any other kind.
    pub fn set_int(&self, name: &str, value: i64) {
        let mut m = self.write();
        unregister(&mut m, name);
        m.ints.insert(name.to_string(), value);
    }

    /// Add `delta` to an int counter, registering it at zero first if needed.
    /// Returns the new value.
    pub fn add_int(&self, name: &str, delta: i64) -> i64 {
        let mut m = self.write();
        if let Some(v) = m.ints.get_mut(name) {
            *v = v.wrapping_add(delta);
            return *v;
        }
        unregister(&mut m, name);
        m.ints.insert(name.to_string(), delta);
        delta
    }

    /// Set a float metric, moving the name out of any other kind.
    pub fn set_float(&self, name: &str, value: f64) {
        let mut m = self.write();
        unregister(&mut m, name);
        m.floats.insert(name.to_string(), value);
    }

    /// Add `delta` to a float metric, registering it at zero first if needed.
    /// Returns the new value.
    pub fn add_float(&self, name: &str, delta: f64) -> f64 {
        let mut m = self.write();
        if let Some(v) = m.floats.get_mut(name) {
            *v += delta;
            return *v;
        }
        unregister(&mut m, name);
        m.floats.insert(name.to_string(), delta);
        delta
    }

    // Poisoned locks are read and written through; capture stays total.
    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl SnapshotSource for MetricRegistry {
    fn capture(&self) -> Snapshot {
        self.read().clone()
    }
}

/// Drop `name` from every namespace, keeping kinds disjoint.
fn unregister(m: &mut Snapshot, name: &str) {
    if m.bools.remove(name).is_some()
        || m.strings.remove(name).is_some()
        || m.ints.remove(name).is_some()
        || m.floats.remove(name).is_some()
    {
        trace!(%name, "metric changed kind");
    }
}
