//! Reactive theming and device-adaptive styling for Adaptive Theme
//!
//! This crate assembles the theme store, the device tracker, and the
//! style-sheet cache into a single container, [`ThemeManager`].
//!
//! # Modules
//!
//! - [`config`] - Construction options and their on-disk form
//! - [`manager`] - The theme/device state container
//! - [`styles`] - Style producers and per-consumer cached style sheets
//! - [`provider`] - Mount/unmount lifecycle and propagated context values
//!
//! # Example
//!
//! ```rust,ignore
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//! use serde_json::json;
//! use theme_manager::{ThemeManager, ThemeOptions};
//!
//! let mut themes = BTreeMap::new();
//! themes.insert("light".to_string(), json!({ "colors": { "background": "#FFFFFF" } }));
//! themes.insert("dark".to_string(), json!({ "colors": { "background": "#000000" } }));
//!
//! let manager = Arc::new(ThemeManager::new("light".to_string(), themes, ThemeOptions::default(), device)?);
//!
//! let styles = manager.create_style_sheet(|ctx| {
//!     Ok(json!({
//!         "container": {
//!             "backgroundColor": ctx.theme["colors"]["background"],
//!             "padding": 16,
//!         }
//!     }))
//! });
//!
//! let sheet = styles.resolve()?;
//! manager.set("dark".to_string());
//! let dark_sheet = styles.resolve()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod manager;
pub mod provider;
pub mod styles;

#[cfg(test)]
mod fixtures;

use theme_state::StoreError;

pub use config::ThemeOptions;
pub use manager::ThemeManager;
pub use provider::{InvalidateCallback, ThemeContextValue, ThemeProvider};
pub use styles::{StyleContext, StyleProducer, StyleSheet, UseStyleOptions};

// Re-export the building blocks applications interact with
pub use theme_device::{
    DesignDevice, DeviceSnapshot, DeviceTracker, Dimensions, EdgeInsets, GeometrySource,
    Orientation, PlatformFacts, PlatformOs, PlatformProbe, Rect, SafeArea, ScaleFactors,
    StaticPlatform,
};
pub use theme_state::{Subscription, ThemeCollection, ThemeData, ThemeKey, Topic};
pub use theme_style::{
    hex_to_rgba, Axis, ColorError, ColorUtils, CompiledStyles, JsonStyleCompiler, ScaleRules,
    StyleCompiler,
};

/// Theme manager errors
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// No theme is registered under the requested name
    #[error("Theme not registered: {0}")]
    UnknownTheme(String),

    /// Design device dimensions must be finite and positive
    #[error("Invalid design device: {width}x{height}")]
    InvalidDesignDevice {
        /// Configured width
        width: f64,
        /// Configured height
        height: f64,
    },

    /// Theme store error
    #[error("Theme store error: {0}")]
    Store(#[from] StoreError),

    /// Color conversion error raised by a style producer
    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for theme manager operations
pub type Result<T> = std::result::Result<T, ThemeError>;
