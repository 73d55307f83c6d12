//! Memo caches of fund-local exposure maps, keyed by fund name.
//!
//! Entries are only ever added. A cache belongs to a single [`Dag`] snapshot
//! and must be discarded when the graph is rebuilt.
//!
//! [`Dag`]: crate::core::graph::Dag

use crate::core::exposure::ExposureMap;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::debug;

/// Single-owner memo cache.
#[derive(Debug, Clone, Default)]
pub struct MemoCache {
    inner: HashMap<String, Arc<ExposureMap>>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fund: &str) -> Option<Arc<ExposureMap>> {
        let value = self.inner.get(fund).cloned();
        if value.is_some() {
            debug!(fund, "Memo HIT");
        } else {
            debug!(fund, "Memo MISS");
        }
        value
    }

    pub fn put(&mut self, fund: &str, exposures: Arc<ExposureMap>) {
        debug!(fund, "Memo PUT");
        self.inner.insert(fund.to_string(), exposures);
    }

    pub fn contains(&self, fund: &str) -> bool {
        self.inner.contains_key(fund)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

type Slot = Arc<OnceLock<Arc<ExposureMap>>>;

/// Memo cache that can be shared between threads.
///
/// A fund's slot is claimed under the lock and filled outside it, so each fund
/// is expanded at most once even when several threads ask for it together.
/// Later requesters block on the slot until the first one finishes.
#[derive(Debug, Clone, Default)]
pub struct SharedMemoCache {
    inner: Arc<Mutex<HashMap<String, Slot>>>,
}

impl SharedMemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, fund: &str) -> Slot {
        // A poisoned map is still consistent: inserts are the only writes
        let mut slots = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(fund.to_string()).or_default())
    }

    pub fn get(&self, fund: &str) -> Option<Arc<ExposureMap>> {
        let slots = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(fund).and_then(|slot| slot.get().cloned())
    }

    /// Returns the cached map for `fund`, running `compute` to fill the slot
    /// if nobody has yet.
    pub fn get_or_compute<F>(&self, fund: &str, compute: F) -> Arc<ExposureMap>
    where
        F: FnOnce() -> ExposureMap,
    {
        let slot = self.slot(fund);
        if let Some(exposures) = slot.get() {
            debug!(fund, "Memo HIT");
            return Arc::clone(exposures);
        }

        Arc::clone(slot.get_or_init(|| {
            debug!(fund, "Memo MISS");
            Arc::new(compute())
        }))
    }

    /// Number of funds with a computed entry.
    pub fn len(&self) -> usize {
        let slots = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
