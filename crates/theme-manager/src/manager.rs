//! Theme and device state container
//!
//! [`ThemeManager`] owns the theme store and the device tracker and exposes
//! the read/write surface applications use. It is shared by `Arc`; style
//! sheets and providers hold a clone rather than reaching for a global.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use theme_device::{DesignDevice, DeviceSnapshot, DeviceTracker, ScaleFactors};
use theme_state::{Subscription, ThemeCollection, ThemeData, ThemeKey, ThemeStore};
use theme_style::{JsonStyleCompiler, ScaleRules, StyleCompiler};
use tracing::{debug, info};

use crate::config::ThemeOptions;
use crate::styles::{StyleContext, StyleSheet};
use crate::Result;

/// Shared theme state plus the device it renders on
pub struct ThemeManager<K, T> {
    store: ThemeStore<K, T>,
    device: DeviceTracker,
    auto_scale: AtomicBool,
    design_device: DesignDevice,
    scale_rules: ScaleRules,
}

impl<K: ThemeKey, T: ThemeData> ThemeManager<K, T> {
    /// Create a manager
    ///
    /// Fails when the configured design device cannot serve as a scale
    /// denominator.
    pub fn new(
        name: K,
        themes: ThemeCollection<K, T>,
        options: ThemeOptions,
        device: DeviceTracker,
    ) -> Result<Self> {
        options.validate()?;

        info!(
            theme.name = ?name,
            theme.count = themes.len(),
            auto_scale = options.auto_scale,
            design.width = options.dimensions_designed_device.width,
            design.height = options.dimensions_designed_device.height,
            "Theme manager created"
        );

        Ok(Self {
            store: ThemeStore::new(name, themes),
            device,
            auto_scale: AtomicBool::new(options.auto_scale),
            design_device: options.dimensions_designed_device,
            scale_rules: options.scale_rules,
        })
    }

    /// Active theme name
    pub fn name(&self) -> K {
        self.store.name()
    }

    /// Active theme, or `None` when the active name is not registered
    pub fn theme(&self) -> Option<T> {
        self.store.current()
    }

    /// Theme registered under `name`
    pub fn get(&self, name: &K) -> Option<T> {
        self.store.get(name)
    }

    /// Theme for an optional override name, falling back to the active one
    pub fn theme_for(&self, override_name: Option<&K>) -> Option<T> {
        match override_name {
            Some(name) => self.store.get(name),
            None => self.store.current(),
        }
    }

    /// Current theme collection
    pub fn themes(&self) -> Arc<ThemeCollection<K, T>> {
        self.store.themes()
    }

    /// Switch the active theme and notify selection listeners
    pub fn set(&self, name: K) {
        self.store.set(name);
    }

    /// Deep-merge a partial collection into the themes and notify update
    /// listeners
    pub fn update<P: Serialize + ?Sized>(&self, partial: &P) -> Result<()> {
        self.store.update(partial)?;
        Ok(())
    }

    /// Listen for selection changes
    pub fn on_change_name<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&K) + Send + Sync + 'static,
    {
        self.store.on_change_name(listener)
    }

    /// Listen for theme updates
    pub fn on_updated_theme<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ThemeCollection<K, T>) + Send + Sync + 'static,
    {
        self.store.on_updated_theme(listener)
    }

    /// Drop every theme listener and release the device registration
    pub fn remove_all_listeners(&self) {
        self.store.broker().remove_all();
        self.device.remove_listeners();
        debug!("All theme and device listeners removed");
    }

    /// The underlying theme store
    pub fn store(&self) -> &ThemeStore<K, T> {
        &self.store
    }

    /// The device tracker
    pub fn device(&self) -> &DeviceTracker {
        &self.device
    }

    /// Current device snapshot
    pub fn device_snapshot(&self) -> Arc<DeviceSnapshot> {
        self.device.snapshot()
    }

    /// Current device key
    pub fn device_key(&self) -> String {
        self.device.key()
    }

    /// Scale factors of the current screen against the design device
    pub fn scale(&self) -> ScaleFactors {
        ScaleFactors::between(self.design_device, self.device.snapshot().screen())
    }

    /// Change the default auto-scale policy
    pub fn set_auto_scale(&self, enabled: bool) {
        self.auto_scale.store(enabled, Ordering::Relaxed);
        debug!(auto_scale = enabled, "Auto-scale policy changed");
    }

    /// Default auto-scale policy
    pub fn auto_scale(&self) -> bool {
        self.auto_scale.load(Ordering::Relaxed)
    }

    /// Design device reference
    pub fn dimensions_designed_device(&self) -> DesignDevice {
        self.design_device
    }

    /// Scalable property allow-list
    pub fn scale_rules(&self) -> &ScaleRules {
        &self.scale_rules
    }

    /// Register a style producer compiled to JSON declarations
    pub fn create_style_sheet<F>(self: &Arc<Self>, producer: F) -> StyleSheet<K, T, JsonStyleCompiler>
    where
        F: Fn(&StyleContext<'_, T>) -> std::result::Result<serde_json::Value, theme_style::ColorError>
            + Send
            + Sync
            + 'static,
    {
        self.create_style_sheet_with(JsonStyleCompiler, producer)
    }

    /// Register a style producer with a custom compiler
    pub fn create_style_sheet_with<C, F>(self: &Arc<Self>, compiler: C, producer: F) -> StyleSheet<K, T, C>
    where
        C: StyleCompiler,
        F: Fn(&StyleContext<'_, T>) -> std::result::Result<serde_json::Value, theme_style::ColorError>
            + Send
            + Sync
            + 'static,
    {
        StyleSheet::new(Arc::clone(self), Arc::new(compiler), Arc::new(producer))
    }
}

impl<K: ThemeKey, T> std::fmt::Debug for ThemeManager<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager")
            .field("store", &self.store)
            .field("device", &self.device)
            .field("auto_scale", &self.auto_scale.load(Ordering::Relaxed))
            .field("design_device", &self.design_device)
            .finish()
    }
}
