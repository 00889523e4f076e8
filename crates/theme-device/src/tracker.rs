//! Device state tracker
//!
//! [`DeviceTracker`] owns the current [`DeviceSnapshot`]. Platform geometry
//! events and safe-area updates each replace the snapshot wholesale, so a
//! reader holding an `Arc<DeviceSnapshot>` never observes a partial write.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use theme_device::{DeviceTracker, Dimensions, StaticPlatform};
//! use theme_device::test_utils::ManualGeometrySource;
//!
//! let source = Arc::new(ManualGeometrySource::new(Dimensions::new(375.0, 812.0)));
//! let tracker = DeviceTracker::new(source.clone(), &StaticPlatform::ios());
//! tracker.init(None);
//!
//! source.emit(Dimensions::new(812.0, 375.0));
//! assert!(tracker.snapshot().is_landscape());
//!
//! tracker.remove_listeners();
//! ```

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info};

use crate::geometry::{GeometryListener, GeometrySource, GeometrySubscription, SafeArea};
use crate::platform::{PlatformFacts, PlatformProbe};
use crate::snapshot::{DeviceSnapshot, Orientation};

/// Callback invoked after each geometry change with the new snapshot
pub type DeviceChangeCallback = Box<dyn Fn(&DeviceSnapshot) + Send + Sync>;

/// Tracker for live device geometry
pub struct DeviceTracker {
    /// Platform geometry source
    source: Arc<dyn GeometrySource>,
    /// Static platform facts copied into every snapshot
    platform: PlatformFacts,
    /// Current snapshot, replaced wholesale
    snapshot: Arc<RwLock<Arc<DeviceSnapshot>>>,
    /// The single live platform registration
    subscription: Mutex<Option<Box<dyn GeometrySubscription>>>,
}

impl DeviceTracker {
    /// Create a tracker reading initial geometry from the source
    pub fn new(source: Arc<dyn GeometrySource>, probe: &dyn PlatformProbe) -> Self {
        let platform = PlatformFacts::probe(probe);
        let mut snapshot = DeviceSnapshot::new(source.window(), source.screen(), platform);
        if let Some(safe_area) = source.initial_safe_area() {
            snapshot = snapshot.with_safe_area(safe_area);
        }

        Self {
            source,
            platform,
            snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
            subscription: Mutex::new(None),
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<DeviceSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Identity token of the current snapshot's geometry
    pub fn key(&self) -> String {
        self.snapshot.read().key()
    }

    /// Orientation of the current snapshot
    pub fn orientation(&self) -> Orientation {
        self.snapshot.read().orientation()
    }

    /// Static platform facts
    pub fn platform(&self) -> PlatformFacts {
        self.platform
    }

    /// Start listening for platform geometry changes
    ///
    /// Re-reads the current window and screen dimensions, then registers with
    /// the geometry source. Each change event replaces the snapshot and then
    /// invokes `on_change`. A registration left over from an earlier `init`
    /// is released before the new one is made, so at most one is ever live.
    pub fn init(&self, on_change: Option<DeviceChangeCallback>) {
        let mut subscription = self.subscription.lock();

        if let Some(previous) = subscription.take() {
            debug!("Releasing previous geometry subscription before re-init");
            previous.remove();
        }

        let (window, screen) = (self.source.window(), self.source.screen());
        {
            let mut current = self.snapshot.write();
            *current = Arc::new(current.with_geometry(window, screen));
        }

        let cell = Arc::clone(&self.snapshot);
        let listener: GeometryListener = Box::new(move |change| {
            let next = {
                let mut current = cell.write();
                let next = Arc::new(current.with_geometry(change.window, change.screen));
                *current = Arc::clone(&next);
                next
            };

            debug!(
                device.key = %next.key(),
                device.orientation = %next.orientation(),
                "Device geometry changed"
            );

            if let Some(callback) = &on_change {
                callback(&next);
            }
        });

        *subscription = Some(self.source.add_change_listener(listener));
        debug!(device.key = %self.key(), "Device tracker listening");
    }

    /// Replace the safe-area insets and frame, keeping window/screen geometry
    pub fn update_safe_area_insets(&self, safe_area: SafeArea) {
        let key = {
            let mut current = self.snapshot.write();
            let next = current.with_safe_area(safe_area);
            let key = next.key();
            *current = Arc::new(next);
            key
        };

        debug!(device.key = %key, "Safe area updated");
    }

    /// Whether a platform registration is live
    pub fn is_listening(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Release the platform registration; a no-op when none is live
    pub fn remove_listeners(&self) {
        if let Some(subscription) = self.subscription.lock().take() {
            subscription.remove();
            info!("Device tracker stopped listening");
        }
    }
}

impl Drop for DeviceTracker {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.get_mut().take() {
            subscription.remove();
        }
    }
}

impl std::fmt::Debug for DeviceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceTracker")
            .field("platform", &self.platform)
            .field("snapshot", &self.snapshot())
            .field("listening", &self.is_listening())
            .finish()
    }
}
