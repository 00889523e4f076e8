//! Test utilities for device tracking
//!
//! [`ManualGeometrySource`] is an in-memory [`GeometrySource`] whose change
//! events are emitted explicitly by the test.

#![allow(dead_code)] // Not every helper is used by every downstream test suite

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use crate::geometry::{
    Dimensions, GeometryChange, GeometryListener, GeometrySource, GeometrySubscription, SafeArea,
};

type ListenerMap = Mutex<BTreeMap<u64, Arc<GeometryListener>>>;

/// In-memory geometry source driven by the test
pub struct ManualGeometrySource {
    window: Mutex<Dimensions>,
    screen: Mutex<Dimensions>,
    initial_safe_area: Option<SafeArea>,
    listeners: Arc<ListenerMap>,
    next_id: Mutex<u64>,
}

impl ManualGeometrySource {
    /// A source whose window and screen share the given dimensions
    pub fn new(dimensions: Dimensions) -> Self {
        Self::with_window_and_screen(dimensions, dimensions)
    }

    /// A source with distinct window and screen dimensions
    pub fn with_window_and_screen(window: Dimensions, screen: Dimensions) -> Self {
        Self {
            window: Mutex::new(window),
            screen: Mutex::new(screen),
            initial_safe_area: None,
            listeners: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Mutex::new(0),
        }
    }

    /// Report initial safe-area metrics
    pub fn with_initial_safe_area(mut self, safe_area: SafeArea) -> Self {
        self.initial_safe_area = Some(safe_area);
        self
    }

    /// Change the reported dimensions without emitting an event
    pub fn set_dimensions(&self, dimensions: Dimensions) {
        *self.window.lock() = dimensions;
        *self.screen.lock() = dimensions;
    }

    /// Change the reported dimensions and emit a change event
    pub fn emit(&self, dimensions: Dimensions) {
        self.emit_change(GeometryChange {
            window: dimensions,
            screen: dimensions,
        });
    }

    /// Emit a change event with distinct window and screen dimensions
    pub fn emit_change(&self, change: GeometryChange) {
        *self.window.lock() = change.window;
        *self.screen.lock() = change.screen;

        let listeners: Vec<Arc<GeometryListener>> =
            self.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener(change);
        }
    }

    /// Number of live registrations
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl GeometrySource for ManualGeometrySource {
    fn window(&self) -> Dimensions {
        *self.window.lock()
    }

    fn screen(&self) -> Dimensions {
        *self.screen.lock()
    }

    fn initial_safe_area(&self) -> Option<SafeArea> {
        self.initial_safe_area
    }

    fn add_change_listener(&self, listener: GeometryListener) -> Box<dyn GeometrySubscription> {
        let id = {
            let mut next_id = self.next_id.lock();
            *next_id += 1;
            *next_id
        };
        self.listeners.lock().insert(id, Arc::new(listener));

        Box::new(ManualSubscription {
            listeners: Arc::downgrade(&self.listeners),
            id,
        })
    }
}

struct ManualSubscription {
    listeners: Weak<ListenerMap>,
    id: u64,
}

impl GeometrySubscription for ManualSubscription {
    fn remove(self: Box<Self>) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().remove(&self.id);
        }
    }
}
