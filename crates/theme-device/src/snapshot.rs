//! Immutable device snapshot
//!
//! A [`DeviceSnapshot`] captures the device geometry at a point in time. The
//! tracker replaces snapshots wholesale; derived facts are pure functions of
//! the snapshot's fields.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{Dimensions, EdgeInsets, Rect, SafeArea};
use crate::platform::{PlatformFacts, PlatformOs};

/// Tablets have an aspect ratio below this value
const TABLET_MAX_ASPECT_RATIO: f64 = 1.6;

/// Tablets have a long window side of at least this many points
const TABLET_MIN_LONG_SIDE: f64 = 900.0;

/// Notched iPhones have a window side of at least this many points
const NOTCH_MIN_SIDE: f64 = 812.0;

/// Windows at most this wide count as small screens
const SMALL_SCREEN_MAX_WIDTH: f64 = 340.0;

/// Windows at most this tall count as short screens
const SHORT_SCREEN_MAX_HEIGHT: f64 = 600.0;

/// Device orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide
    Portrait,
    /// Wider than tall, or square
    Landscape,
}

impl Orientation {
    /// Classify window dimensions; a square window is landscape
    pub fn from_dimensions(height: f64, width: f64) -> Self {
        if width < height {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

/// Device geometry at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSnapshot {
    window: Dimensions,
    screen: Dimensions,
    insets: EdgeInsets,
    frame: Rect,
    platform: PlatformFacts,
}

impl DeviceSnapshot {
    /// Create a snapshot with zero insets and a frame covering the window
    pub fn new(window: Dimensions, screen: Dimensions, platform: PlatformFacts) -> Self {
        Self {
            window,
            screen,
            insets: EdgeInsets::default(),
            frame: Rect::from_dimensions(window),
            platform,
        }
    }

    /// A copy with new window/screen dimensions and the same safe area
    ///
    /// The frame is left as-is; it is refreshed only by safe-area updates.
    pub fn with_geometry(&self, window: Dimensions, screen: Dimensions) -> Self {
        Self {
            window,
            screen,
            ..self.clone()
        }
    }

    /// A copy with new safe-area data and the same window/screen geometry
    pub fn with_safe_area(&self, safe_area: SafeArea) -> Self {
        Self {
            insets: safe_area.insets.clamped(),
            frame: safe_area.frame,
            ..self.clone()
        }
    }

    // ========== Raw geometry ==========

    /// Window dimensions
    pub fn window(&self) -> Dimensions {
        self.window
    }

    /// Screen dimensions
    pub fn screen(&self) -> Dimensions {
        self.screen
    }

    /// Safe-area insets
    pub fn inset(&self) -> EdgeInsets {
        self.insets
    }

    /// Safe-area frame
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Static platform facts
    pub fn platform(&self) -> PlatformFacts {
        self.platform
    }

    // ========== Derived facts ==========

    /// Running on Android
    pub fn is_android(&self) -> bool {
        self.platform.os == PlatformOs::Android
    }

    /// Running on iOS
    pub fn is_ios(&self) -> bool {
        self.platform.os == PlatformOs::Ios
    }

    /// Window orientation
    pub fn orientation(&self) -> Orientation {
        Orientation::from_dimensions(self.window.height, self.window.width)
    }

    /// Window is landscape (including square)
    pub fn is_landscape(&self) -> bool {
        self.orientation() == Orientation::Landscape
    }

    /// Window is portrait
    pub fn is_portrait(&self) -> bool {
        self.orientation() == Orientation::Portrait
    }

    /// Long side over short side of the window
    pub fn screen_aspect_ratio(&self) -> f64 {
        if self.is_portrait() {
            self.window.height / self.window.width
        } else {
            self.window.width / self.window.height
        }
    }

    /// Pad-like devices, or large windows with a squarish aspect ratio
    pub fn is_tablet(&self) -> bool {
        self.platform.is_pad
            || (self.screen_aspect_ratio() < TABLET_MAX_ASPECT_RATIO
                && self.window.width.max(self.window.height) >= TABLET_MIN_LONG_SIDE)
    }

    /// Notched iPhone classification
    pub fn is_iphone_x(&self) -> bool {
        self.is_ios()
            && !self.platform.is_pad
            && !self.platform.is_tv
            && (self.window.height >= NOTCH_MIN_SIDE || self.window.width >= NOTCH_MIN_SIDE)
    }

    /// Narrow window
    pub fn is_small_screen(&self) -> bool {
        self.window.width <= SMALL_SCREEN_MAX_WIDTH
    }

    /// Short window
    pub fn is_short_screen(&self) -> bool {
        self.window.height <= SHORT_SCREEN_MAX_HEIGHT
    }

    /// Identity token for the geometry fields
    ///
    /// Two snapshots have the same key exactly when their screen, window,
    /// insets and frame agree.
    pub fn key(&self) -> String {
        let Self {
            window,
            screen,
            insets,
            frame,
            ..
        } = self;
        format!(
            "screen:{}x{}-window:{}x{}-insets:{},{},{},{}-frame:{},{},{}x{}",
            screen.width,
            screen.height,
            window.width,
            window.height,
            insets.top,
            insets.left,
            insets.right,
            insets.bottom,
            frame.x,
            frame.y,
            frame.width,
            frame.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(width: f64, height: f64, platform: PlatformFacts) -> DeviceSnapshot {
        let dims = Dimensions::new(width, height);
        DeviceSnapshot::new(dims, dims, platform)
    }

    fn ios() -> PlatformFacts {
        PlatformFacts {
            os: PlatformOs::Ios,
            is_pad: false,
            is_tv: false,
        }
    }

    // ==========================================================================
    // Orientation Tests
    // ==========================================================================

    #[test]
    fn test_orientation_classification() {
        assert_eq!(Orientation::from_dimensions(812.0, 375.0), Orientation::Portrait);
        assert_eq!(Orientation::from_dimensions(375.0, 812.0), Orientation::Landscape);
    }

    #[test]
    fn test_square_window_is_landscape() {
        assert_eq!(Orientation::from_dimensions(500.0, 500.0), Orientation::Landscape);

        let snapshot = phone(500.0, 500.0, ios());
        assert!(snapshot.is_landscape());
        assert!(!snapshot.is_portrait());
    }

    // ==========================================================================
    // Derived Fact Tests
    // ==========================================================================

    #[test]
    fn test_platform_family() {
        let snapshot = phone(375.0, 812.0, ios());
        assert!(snapshot.is_ios());
        assert!(!snapshot.is_android());
    }

    #[test]
    fn test_screen_aspect_ratio() {
        let portrait = phone(400.0, 800.0, ios());
        assert_eq!(portrait.screen_aspect_ratio(), 2.0);

        let landscape = phone(800.0, 400.0, ios());
        assert_eq!(landscape.screen_aspect_ratio(), 2.0);
    }

    #[test]
    fn test_tablet_classification() {
        // Phone proportions
        assert!(!phone(375.0, 812.0, ios()).is_tablet());
        // Large squarish window
        assert!(phone(1024.0, 768.0, PlatformFacts::default()).is_tablet());
        // Squarish but small
        assert!(!phone(600.0, 800.0, PlatformFacts::default()).is_tablet());
        // Pad flag wins regardless of geometry
        let pad = PlatformFacts {
            is_pad: true,
            ..ios()
        };
        assert!(phone(320.0, 640.0, pad).is_tablet());
    }

    #[test]
    fn test_iphone_x_classification() {
        assert!(phone(375.0, 812.0, ios()).is_iphone_x());
        assert!(phone(812.0, 375.0, ios()).is_iphone_x());
        assert!(!phone(375.0, 667.0, ios()).is_iphone_x());

        let android = PlatformFacts {
            os: PlatformOs::Android,
            ..ios()
        };
        assert!(!phone(375.0, 812.0, android).is_iphone_x());

        let pad = PlatformFacts {
            is_pad: true,
            ..ios()
        };
        assert!(!phone(834.0, 1194.0, pad).is_iphone_x());
    }

    #[test]
    fn test_small_and_short_screens() {
        let small = phone(320.0, 568.0, ios());
        assert!(small.is_small_screen());
        assert!(small.is_short_screen());

        let regular = phone(375.0, 812.0, ios());
        assert!(!regular.is_small_screen());
        assert!(!regular.is_short_screen());

        // Boundaries are inclusive
        assert!(phone(340.0, 600.0, ios()).is_small_screen());
        assert!(phone(340.0, 600.0, ios()).is_short_screen());
    }

    // ==========================================================================
    // Key Tests
    // ==========================================================================

    #[test]
    fn test_key_format() {
        let snapshot = phone(375.0, 812.0, ios());
        assert_eq!(
            snapshot.key(),
            "screen:375x812-window:375x812-insets:0,0,0,0-frame:0,0,375x812"
        );
    }

    #[test]
    fn test_key_tracks_every_geometry_field() {
        let base = phone(375.0, 812.0, ios());

        let rotated = base.with_geometry(Dimensions::new(812.0, 375.0), Dimensions::new(812.0, 375.0));
        assert_ne!(base.key(), rotated.key());

        let inset = base.with_safe_area(SafeArea::new(
            EdgeInsets::new(44.0, 0.0, 0.0, 34.0),
            base.frame(),
        ));
        assert_ne!(base.key(), inset.key());

        let framed = base.with_safe_area(SafeArea::new(
            EdgeInsets::default(),
            Rect::new(0.0, 20.0, 375.0, 792.0),
        ));
        assert_ne!(base.key(), framed.key());

        let same = base.with_safe_area(SafeArea::new(base.inset(), base.frame()));
        assert_eq!(base.key(), same.key());
    }

    #[test]
    fn test_with_geometry_preserves_safe_area() {
        let base = phone(375.0, 812.0, ios()).with_safe_area(SafeArea::new(
            EdgeInsets::new(44.0, 0.0, 0.0, 34.0),
            Rect::new(0.0, 0.0, 375.0, 812.0),
        ));
        let rotated = base.with_geometry(Dimensions::new(812.0, 375.0), Dimensions::new(812.0, 375.0));
        assert_eq!(rotated.inset(), base.inset());
        assert_eq!(rotated.frame(), base.frame());
        assert_eq!(rotated.window(), Dimensions::new(812.0, 375.0));
        assert!(rotated.key().ends_with("window:812x375-insets:44,0,0,34-frame:0,0,375x812"));
    }
}
