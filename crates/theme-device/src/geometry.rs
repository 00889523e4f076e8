//! Geometry value types and the platform geometry source
//!
//! The host platform supplies window/screen dimensions and a change event
//! source through [`GeometrySource`]. Safe-area insets and the safe-area frame
//! may come from a different host service, so they travel separately as
//! [`SafeArea`].

use serde::{Deserialize, Serialize};

/// Width and height in density-independent points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Dimensions {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Dimensions {
    /// Create new dimensions
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Safe-area insets on each edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EdgeInsets {
    /// Top inset
    pub top: f64,
    /// Left inset
    pub left: f64,
    /// Right inset
    pub right: f64,
    /// Bottom inset
    pub bottom: f64,
}

impl EdgeInsets {
    /// Create insets, clamping negative or NaN values to zero
    pub fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top: top.max(0.0),
            left: left.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
        }
    }

    /// Insets with every edge clamped to be non-negative
    pub fn clamped(self) -> Self {
        Self::new(self.top, self.left, self.right, self.bottom)
    }
}

/// A positioned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    /// Origin x
    pub x: f64,
    /// Origin y
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin covering the given dimensions
    pub fn from_dimensions(dimensions: Dimensions) -> Self {
        Self::new(0.0, 0.0, dimensions.width, dimensions.height)
    }
}

/// Safe-area data reported by the host's safe-area service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SafeArea {
    /// Insets on each edge
    pub insets: EdgeInsets,
    /// The safe-area frame
    pub frame: Rect,
}

impl SafeArea {
    /// Create safe-area data
    pub fn new(insets: EdgeInsets, frame: Rect) -> Self {
        Self { insets, frame }
    }
}

/// A geometry change reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryChange {
    /// New window dimensions
    pub window: Dimensions,
    /// New screen dimensions
    pub screen: Dimensions,
}

/// Callback invoked by a [`GeometrySource`] for each change event
pub type GeometryListener = Box<dyn Fn(GeometryChange) + Send + Sync>;

/// A live registration with a [`GeometrySource`]
pub trait GeometrySubscription: Send {
    /// Release the registration; the listener must not be invoked afterwards
    fn remove(self: Box<Self>);
}

/// Platform source of window/screen geometry
pub trait GeometrySource: Send + Sync {
    /// Current window dimensions
    fn window(&self) -> Dimensions;

    /// Current screen dimensions
    fn screen(&self) -> Dimensions;

    /// Safe-area metrics known before the safe-area service reports, if any
    fn initial_safe_area(&self) -> Option<SafeArea> {
        None
    }

    /// Register a listener for geometry changes
    fn add_change_listener(&self, listener: GeometryListener) -> Box<dyn GeometrySubscription>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insets_are_clamped() {
        let insets = EdgeInsets::new(-4.0, 0.0, 12.5, f64::NAN);
        assert_eq!(insets.top, 0.0);
        assert_eq!(insets.right, 12.5);
        assert_eq!(insets.bottom, 0.0);

        let raw = EdgeInsets {
            top: 44.0,
            left: -1.0,
            right: 0.0,
            bottom: 34.0,
        };
        assert_eq!(raw.clamped(), EdgeInsets::new(44.0, 0.0, 0.0, 34.0));
    }

    #[test]
    fn test_rect_from_dimensions() {
        let rect = Rect::from_dimensions(Dimensions::new(375.0, 812.0));
        assert_eq!(rect, Rect::new(0.0, 0.0, 375.0, 812.0));
    }
}
