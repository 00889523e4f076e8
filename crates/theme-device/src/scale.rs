//! Scale factors relative to a design device
//!
//! Designs are drawn against a reference screen. Scale factors relate the
//! real screen to that reference per axis; they are plain arithmetic and are
//! recomputed on every read.

use serde::{Deserialize, Serialize};

use crate::geometry::Dimensions;

/// Reference screen the application's designs are drawn against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignDevice {
    /// Reference width
    pub width: f64,
    /// Reference height
    pub height: f64,
}

impl DesignDevice {
    /// Baseline reference width (iPhone X class)
    pub const DEFAULT_WIDTH: f64 = 375.0;

    /// Baseline reference height (iPhone X class)
    pub const DEFAULT_HEIGHT: f64 = 812.0;

    /// Create a design device reference
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for DesignDevice {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

/// Per-axis scale factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    /// Device width over design width
    pub horizontal: f64,
    /// Device height over design height
    pub vertical: f64,
    /// The smaller of the two axes
    pub symmetric: f64,
}

impl ScaleFactors {
    /// Identity scale
    pub const IDENTITY: ScaleFactors = ScaleFactors {
        horizontal: 1.0,
        vertical: 1.0,
        symmetric: 1.0,
    };

    /// Compute the factors relating a device screen to the design device
    pub fn between(design: DesignDevice, screen: Dimensions) -> Self {
        let horizontal = screen.width / design.width;
        let vertical = screen.height / design.height;

        Self {
            horizontal,
            vertical,
            symmetric: horizontal.min(vertical),
        }
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::IDENTITY
    }
}
