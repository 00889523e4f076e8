//! Style producers and cached style sheets
//!
//! A producer is a pure function of a [`StyleContext`] returning a mapping of
//! style name to declaration. A [`StyleSheet`] binds one producer to a
//! manager and caches the compiled result per theme name. Each consumer
//! resolves through its own sheet; [`StyleSheet::fork`] gives another
//! consumer the same producer with a fresh cache.

use serde_json::Value;
use std::sync::Arc;
use theme_device::{DeviceSnapshot, ScaleFactors};
use theme_state::{ThemeData, ThemeKey};
use theme_style::{apply_scale, ColorError, ColorUtils, Fingerprint, ScaleKey, StyleCompiler, StyleSheetCache};
use tracing::trace;

use crate::manager::ThemeManager;
use crate::{Result, ThemeError};

/// Inputs handed to a style producer
pub struct StyleContext<'a, T> {
    /// The resolved theme
    pub theme: &'a T,
    /// Device geometry at resolve time
    pub device: &'a DeviceSnapshot,
    /// Scale factors against the design device
    pub scale: ScaleFactors,
    /// Color helpers
    pub utils: ColorUtils,
}

/// Shared style producer
pub type StyleProducer<T> =
    Arc<dyn Fn(&StyleContext<'_, T>) -> std::result::Result<Value, ColorError> + Send + Sync>;

/// Per-call overrides for resolving a style sheet
#[derive(Debug, Clone, PartialEq)]
pub struct UseStyleOptions<K> {
    /// Resolve against this theme instead of the active one
    pub override_theme_name: Option<K>,
    /// Scale or not regardless of the manager's default
    pub override_auto_scale: Option<bool>,
}

impl<K> Default for UseStyleOptions<K> {
    fn default() -> Self {
        Self {
            override_theme_name: None,
            override_auto_scale: None,
        }
    }
}

impl<K> UseStyleOptions<K> {
    /// No overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve against a specific theme
    pub fn theme_name(mut self, name: K) -> Self {
        self.override_theme_name = Some(name);
        self
    }

    /// Force scaling on or off
    pub fn auto_scale(mut self, enabled: bool) -> Self {
        self.override_auto_scale = Some(enabled);
        self
    }
}

/// A style producer bound to a manager, with its own compiled-sheet cache
pub struct StyleSheet<K, T, C: StyleCompiler> {
    manager: Arc<ThemeManager<K, T>>,
    compiler: Arc<C>,
    producer: StyleProducer<T>,
    cache: StyleSheetCache<K, C::Sheet>,
}

impl<K: ThemeKey, T: ThemeData, C: StyleCompiler> StyleSheet<K, T, C> {
    pub(crate) fn new(
        manager: Arc<ThemeManager<K, T>>,
        compiler: Arc<C>,
        producer: StyleProducer<T>,
    ) -> Self {
        Self {
            manager,
            compiler,
            producer,
            cache: StyleSheetCache::new(),
        }
    }

    /// Resolve against the active theme with the default scale policy
    pub fn resolve(&self) -> Result<Arc<C::Sheet>> {
        self.resolve_with(&UseStyleOptions::default())
    }

    /// Resolve the compiled sheet for the given overrides
    ///
    /// Returns the cached sheet (the same `Arc`) when the produced styles,
    /// the scale policy and factors, and the device key all match the
    /// previous resolve for that theme name; otherwise compiles and caches a
    /// new one. Toggling the default policy recompiles even at identity scale.
    pub fn resolve_with(&self, options: &UseStyleOptions<K>) -> Result<Arc<C::Sheet>> {
        let name = match &options.override_theme_name {
            Some(name) => name.clone(),
            None => self.manager.name(),
        };
        let theme = self
            .manager
            .get(&name)
            .ok_or_else(|| ThemeError::UnknownTheme(format!("{:?}", name)))?;

        let device = self.manager.device_snapshot();
        let scale = self.manager.scale();
        let default_scale = self.manager.auto_scale();
        let should_scale = options.override_auto_scale.unwrap_or(default_scale);

        let context = StyleContext {
            theme: &theme,
            device: &device,
            scale,
            utils: ColorUtils,
        };
        let mut styles = (self.producer)(&context)?;

        if should_scale {
            apply_scale(&mut styles, &scale, self.manager.scale_rules());
        }

        let fingerprint = Fingerprint::compute(
            &styles,
            ScaleKey::resolve(options.override_auto_scale, default_scale, scale),
            &device.key(),
        );
        trace!(theme.name = ?name, scaled = should_scale, %fingerprint, "Resolving style sheet");

        Ok(self
            .cache
            .get_or_compile(&name, fingerprint, || self.compiler.compile(&styles)))
    }

    /// The same producer and compiler with an empty cache
    pub fn fork(&self) -> Self {
        Self::new(
            Arc::clone(&self.manager),
            Arc::clone(&self.compiler),
            Arc::clone(&self.producer),
        )
    }

    /// The compiled-sheet cache
    pub fn cache(&self) -> &StyleSheetCache<K, C::Sheet> {
        &self.cache
    }

    /// The manager this sheet resolves against
    pub fn manager(&self) -> &Arc<ThemeManager<K, T>> {
        &self.manager
    }
}

impl<K: ThemeKey, T, C: StyleCompiler> std::fmt::Debug for StyleSheet<K, T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleSheet").field("cache", &self.cache).finish()
    }
}
