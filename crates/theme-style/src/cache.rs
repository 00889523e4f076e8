//! Style-sheet cache
//!
//! A [`StyleSheetCache`] belongs to a single consumer. It keeps one entry per
//! theme name holding the fingerprint of the inputs that produced the sheet
//! and the compiled sheet itself. An entry is reused only when the
//! fingerprint of the current inputs equals the stored one; otherwise the
//! sheet is compiled again and replaces the entry. Reuse hands back the same
//! `Arc`, which is what lets a rendering layer skip work when nothing
//! changed.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, trace};

use crate::fingerprint::Fingerprint;

/// Cache entry with metadata
#[derive(Debug)]
struct CacheEntry<S> {
    /// Fingerprint of the inputs the sheet was compiled from
    fingerprint: Fingerprint,
    /// The compiled sheet
    sheet: Arc<S>,
    /// When the sheet was compiled
    compiled_at: SystemTime,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that compiled a new sheet
    pub misses: u64,
}

/// Per-consumer cache of compiled style sheets keyed by theme name
pub struct StyleSheetCache<K, S> {
    entries: Mutex<HashMap<K, CacheEntry<S>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, S> Default for StyleSheetCache<K, S>
where
    K: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> StyleSheetCache<K, S>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached sheet for `name` if its fingerprint matches,
    /// otherwise compile, store, and return a new one
    pub fn get_or_compile<F>(&self, name: &K, fingerprint: Fingerprint, compile: F) -> Arc<S>
    where
        F: FnOnce() -> S,
    {
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(name) {
            if entry.fingerprint == fingerprint {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(theme.name = ?name, %fingerprint, "Style sheet cache hit");
                return Arc::clone(&entry.sheet);
            }
        }

        let sheet = Arc::new(compile());
        let previous = entries.insert(
            name.clone(),
            CacheEntry {
                fingerprint,
                sheet: Arc::clone(&sheet),
                compiled_at: SystemTime::now(),
            },
        );
        self.misses.fetch_add(1, Ordering::Relaxed);

        debug!(
            theme.name = ?name,
            %fingerprint,
            replaced = previous.is_some(),
            "Style sheet compiled"
        );

        sheet
    }

    /// The cached sheet for `name`, regardless of fingerprint
    pub fn get(&self, name: &K) -> Option<Arc<S>> {
        self.entries.lock().get(name).map(|e| Arc::clone(&e.sheet))
    }

    /// The stored fingerprint for `name`
    pub fn fingerprint(&self, name: &K) -> Option<Fingerprint> {
        self.entries.lock().get(name).map(|e| e.fingerprint)
    }

    /// When the sheet for `name` was compiled
    pub fn compiled_at(&self, name: &K) -> Option<SystemTime> {
        self.entries.lock().get(name).map(|e| e.compiled_at)
    }

    /// Whether a sheet is cached for `name`
    pub fn contains(&self, name: &K) -> bool {
        self.entries.lock().contains_key(name)
    }

    /// Remove the entry for `name`
    pub fn remove(&self, name: &K) -> bool {
        self.entries.lock().remove(name).is_some()
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of cached theme names
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Hit/miss counters since creation
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<K, S> Debug for StyleSheetCache<K, S>
where
    K: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.lock();
        f.debug_struct("StyleSheetCache")
            .field("themes", &entries.keys().collect::<Vec<_>>())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}
