//! Theme manager configuration
//!
//! Options are supplied at construction. Every field has a default, so a
//! partial JSON document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use theme_device::DesignDevice;
use theme_style::ScaleRules;

use crate::{Result, ThemeError};

/// Construction options for a [`crate::ThemeManager`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeOptions {
    /// Scale style values by default unless a call overrides it
    pub auto_scale: bool,
    /// Reference device the designs are drawn against
    pub dimensions_designed_device: DesignDevice,
    /// Style properties eligible for scaling
    pub scale_rules: ScaleRules,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            auto_scale: false,
            dimensions_designed_device: DesignDevice::default(),
            scale_rules: ScaleRules::default(),
        }
    }
}

impl ThemeOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default auto-scale policy
    pub fn auto_scale(mut self, enabled: bool) -> Self {
        self.auto_scale = enabled;
        self
    }

    /// Set the design device reference
    pub fn dimensions_designed_device(mut self, width: f64, height: f64) -> Self {
        self.dimensions_designed_device = DesignDevice::new(width, height);
        self
    }

    /// Set the scalable property allow-list
    pub fn scale_rules(mut self, rules: ScaleRules) -> Self {
        self.scale_rules = rules;
        self
    }

    /// Parse options from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Check that the design device can serve as a scale denominator
    pub fn validate(&self) -> Result<()> {
        let device = self.dimensions_designed_device;
        if device.is_valid() {
            Ok(())
        } else {
            Err(ThemeError::InvalidDesignDevice {
                width: device.width,
                height: device.height,
            })
        }
    }
}
