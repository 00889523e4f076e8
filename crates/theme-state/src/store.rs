//! Theme store
//!
//! [`ThemeStore`] owns the named theme variants and the active selection.
//! The collection is held behind an `Arc` and replaced wholesale on every
//! update, so readers holding a previous collection are never disturbed.
//!
//! Selecting a name that has no entry is accepted; `current()` then returns
//! `None` until a registered name is selected or the name is added by an
//! update. Callers that need a theme must register every selectable name.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use serde_json::json;
//! use theme_state::ThemeStore;
//!
//! let mut themes = BTreeMap::new();
//! themes.insert("light".to_string(), json!({ "colors": { "background": "#FFF" } }));
//! themes.insert("dark".to_string(), json!({ "colors": { "background": "#000" } }));
//!
//! let store = ThemeStore::new("light".to_string(), themes);
//! store.set("dark".to_string());
//! assert_eq!(store.current().unwrap()["colors"]["background"], "#000");
//!
//! store.update(&json!({ "dark": { "colors": { "background": "green" } } })).unwrap();
//! assert_eq!(store.current().unwrap()["colors"]["background"], "green");
//! ```

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::broker::{Subscription, SubscriptionBroker};
use crate::merge::deep_merge;
use crate::{Result, ThemeData, ThemeKey};

/// Named theme variants
pub type ThemeCollection<K, T> = BTreeMap<K, T>;

/// Store of theme variants and the active selection
pub struct ThemeStore<K, T> {
    /// Active theme name
    name: RwLock<K>,
    /// Theme variants, replaced wholesale on update
    themes: RwLock<Arc<ThemeCollection<K, T>>>,
    /// Notification fan-out
    broker: SubscriptionBroker<K, ThemeCollection<K, T>>,
}

impl<K: ThemeKey, T: ThemeData> ThemeStore<K, T> {
    /// Create a store with an initial selection and theme variants
    pub fn new(name: K, themes: ThemeCollection<K, T>) -> Self {
        if !themes.contains_key(&name) {
            warn!(theme.name = ?name, "Initial theme name has no registered theme");
        }

        Self {
            name: RwLock::new(name),
            themes: RwLock::new(Arc::new(themes)),
            broker: SubscriptionBroker::new(),
        }
    }

    /// The active theme name
    pub fn name(&self) -> K {
        self.name.read().clone()
    }

    /// Look up a theme by name
    pub fn get(&self, name: &K) -> Option<T> {
        self.themes.read().get(name).cloned()
    }

    /// The theme for the active name, if registered
    pub fn current(&self) -> Option<T> {
        let name = self.name();
        self.get(&name)
    }

    /// Whether a theme is registered under `name`
    pub fn contains(&self, name: &K) -> bool {
        self.themes.read().contains_key(name)
    }

    /// The full theme collection
    pub fn themes(&self) -> Arc<ThemeCollection<K, T>> {
        Arc::clone(&self.themes.read())
    }

    /// Change the active theme name and notify selection listeners
    ///
    /// Theme content is untouched. The name is not validated.
    pub fn set(&self, name: K) {
        let previous = std::mem::replace(&mut *self.name.write(), name.clone());
        debug!(theme.from = ?previous, theme.to = ?name, "Theme selected");

        if !self.contains(&name) {
            warn!(theme.name = ?name, "Selected theme name has no registered theme");
        }

        self.broker.emit_selection_changed(&name);
    }

    /// Deep-merge a partial update into the collection and notify update listeners
    ///
    /// The merged collection replaces the previous one in a single step. If
    /// the merged document no longer deserializes into the theme type, the
    /// previous collection is kept and no notification is sent.
    pub fn update<P: Serialize + ?Sized>(&self, partial: &P) -> Result<()> {
        let partial = serde_json::to_value(partial)?;

        let updated = {
            let mut themes = self.themes.write();
            let mut merged = serde_json::to_value(&**themes)?;
            deep_merge(&mut merged, partial);

            let next: ThemeCollection<K, T> = serde_json::from_value(merged).map_err(|e| {
                warn!(error = %e, "Theme update rejected");
                e
            })?;

            let next = Arc::new(next);
            *themes = Arc::clone(&next);
            next
        };

        debug!(theme.count = updated.len(), "Themes updated");
        self.broker.emit_theme_updated(&updated);
        Ok(())
    }

    /// Listen for selection changes
    pub fn on_change_name<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&K) + Send + Sync + 'static,
    {
        self.broker.on_selection_changed(listener)
    }

    /// Listen for theme updates
    pub fn on_updated_theme<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ThemeCollection<K, T>) + Send + Sync + 'static,
    {
        self.broker.on_theme_updated(listener)
    }

    /// The notification broker
    pub fn broker(&self) -> &SubscriptionBroker<K, ThemeCollection<K, T>> {
        &self.broker
    }
}

impl<K: ThemeKey, T> std::fmt::Debug for ThemeStore<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("name", &*self.name.read())
            .field("themes", &self.themes.read().keys().collect::<Vec<_>>())
            .finish()
    }
}
