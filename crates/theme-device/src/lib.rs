//! Device geometry tracking for Adaptive Theme
//!
//! This crate owns the live device facts the theming layer reacts to:
//! window and screen dimensions, safe-area insets, orientation, and the
//! platform classification. It also derives scale factors relating the
//! real device to a reference design device.
//!
//! # Modules
//!
//! - [`platform`] - Platform probing collaborator and resolved platform facts
//! - [`geometry`] - Geometry value types and the platform geometry source
//! - [`snapshot`] - Immutable device snapshot with derived facts
//! - [`tracker`] - Device state tracker that replaces snapshots on change
//! - [`scale`] - Design device reference and scale factors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod geometry;
pub mod platform;
pub mod scale;
pub mod snapshot;
pub mod tracker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use geometry::{
    Dimensions, EdgeInsets, GeometryChange, GeometryListener, GeometrySource,
    GeometrySubscription, Rect, SafeArea,
};
pub use platform::{PlatformFacts, PlatformOs, PlatformProbe, StaticPlatform};
pub use scale::{DesignDevice, ScaleFactors};
pub use snapshot::{DeviceSnapshot, Orientation};
pub use tracker::DeviceTracker;
