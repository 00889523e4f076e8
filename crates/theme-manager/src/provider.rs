//! Provider lifecycle
//!
//! A [`ThemeProvider`] is the bridge between a [`ThemeManager`] and a
//! rendering surface. Mounting subscribes to theme notifications and starts
//! the device tracker; whenever anything the surface propagates changes, the
//! provider updates its [`ThemeContextValue`] and calls the surface's
//! invalidation callback. Unmounting (or dropping the provider) tears all of
//! that down again.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use theme_device::{DeviceSnapshot, EdgeInsets, Rect, SafeArea};
use theme_state::{Subscription, ThemeData, ThemeKey};
use tracing::{debug, info};

use crate::manager::ThemeManager;

/// Invalidation callback run after the propagated value changes
pub type InvalidateCallback = Arc<dyn Fn() + Send + Sync>;

// =============================================================================
// Context Value
// =============================================================================

/// Values a rendering surface propagates to its descendants
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeContextValue<K, T> {
    /// Active theme name
    pub theme_name: K,
    /// Active theme, `None` when the name is not registered
    pub theme: Option<T>,
    /// Current device key
    pub device_key: String,
    /// Bumped on every theme update
    pub revision: u64,
}

#[derive(Debug)]
struct ProviderState<K> {
    theme_name: K,
    device_key: String,
    revision: u64,
}

// =============================================================================
// Provider
// =============================================================================

/// Mounted bridge between a manager and a rendering surface
pub struct ThemeProvider<K: ThemeKey, T: ThemeData> {
    manager: Arc<ThemeManager<K, T>>,
    state: Arc<RwLock<ProviderState<K>>>,
    invalidate: InvalidateCallback,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl<K: ThemeKey, T: ThemeData> ThemeProvider<K, T> {
    /// Mount without an invalidation callback
    pub fn mount(manager: Arc<ThemeManager<K, T>>) -> Self {
        Self::mount_with(manager, || {})
    }

    /// Mount and call `invalidate` whenever the propagated value changes
    pub fn mount_with<F>(manager: Arc<ThemeManager<K, T>>, invalidate: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let invalidate: InvalidateCallback = Arc::new(invalidate);
        let state = Arc::new(RwLock::new(ProviderState {
            theme_name: manager.name(),
            device_key: manager.device_key(),
            revision: 0,
        }));

        let on_name = {
            let state = Arc::clone(&state);
            let invalidate = Arc::clone(&invalidate);
            manager.on_change_name(move |name| {
                state.write().theme_name = name.clone();
                invalidate();
            })
        };

        let on_update = {
            let state = Arc::clone(&state);
            let invalidate = Arc::clone(&invalidate);
            manager.on_updated_theme(move |_| {
                state.write().revision += 1;
                invalidate();
            })
        };

        {
            let state = Arc::clone(&state);
            let invalidate = Arc::clone(&invalidate);
            manager.device().init(Some(Box::new(move |snapshot: &DeviceSnapshot| {
                state.write().device_key = snapshot.key();
                invalidate();
            })));
        }

        // init re-reads geometry without calling back
        state.write().device_key = manager.device_key();

        info!(theme.name = ?manager.name(), device.key = %manager.device_key(), "Theme provider mounted");

        Self {
            manager,
            state,
            invalidate,
            subscriptions: Mutex::new(vec![on_name, on_update]),
        }
    }

    /// The values to propagate
    pub fn context(&self) -> ThemeContextValue<K, T> {
        let state = self.state.read();
        ThemeContextValue {
            theme_name: state.theme_name.clone(),
            theme: self.manager.get(&state.theme_name),
            device_key: state.device_key.clone(),
            revision: state.revision,
        }
    }

    /// Forward new safe-area metrics to the device tracker
    ///
    /// The surface is invalidated only when the device key changed.
    pub fn set_safe_area(&self, insets: EdgeInsets, frame: Rect) {
        self.manager
            .device()
            .update_safe_area_insets(SafeArea::new(insets, frame));

        let key = self.manager.device_key();
        let changed = {
            let mut state = self.state.write();
            if state.device_key == key {
                false
            } else {
                state.device_key = key;
                true
            }
        };

        if changed {
            (self.invalidate)();
        }
    }

    /// The manager this provider is mounted on
    pub fn manager(&self) -> &Arc<ThemeManager<K, T>> {
        &self.manager
    }

    /// Tear down the provider
    pub fn unmount(self) {
        drop(self);
    }

    fn teardown(&self) {
        let subscriptions = std::mem::take(&mut *self.subscriptions.lock());
        for subscription in subscriptions {
            subscription.unsubscribe();
        }
        self.manager.remove_all_listeners();
        debug!("Theme provider unmounted");
    }
}

impl<K: ThemeKey, T: ThemeData> Drop for ThemeProvider<K, T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<K: ThemeKey, T: ThemeData> std::fmt::Debug for ThemeProvider<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("state", &*self.state.read())
            .field("subscriptions", &self.subscriptions.lock().len())
            .finish()
    }
}
