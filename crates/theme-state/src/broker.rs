//! Typed subscription broker
//!
//! Two channels exist: selection changes (payload: the new theme name) and
//! theme updates (payload: the full theme collection after the merge).
//! Emission is synchronous; every listener registered before an emission is
//! invoked before the emitting call returns. Listeners run without any broker
//! lock held, so they may subscribe or unsubscribe re-entrantly.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

type SelectionListener<K> = Arc<dyn Fn(&K) + Send + Sync>;
type UpdateListener<C> = Arc<dyn Fn(&C) + Send + Sync>;

/// Broker channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The active theme name changed
    SelectionChanged,
    /// The theme collection was updated
    ThemeUpdated,
}

struct Channels<K, C> {
    selection: BTreeMap<u64, SelectionListener<K>>,
    updated: BTreeMap<u64, UpdateListener<C>>,
}

impl<K, C> Channels<K, C> {
    fn remove(&mut self, topic: Topic, id: u64) -> bool {
        match topic {
            Topic::SelectionChanged => self.selection.remove(&id).is_some(),
            Topic::ThemeUpdated => self.updated.remove(&id).is_some(),
        }
    }
}

/// Handle to a registered listener
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    topic: Topic,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// The channel this subscription listens on
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Remove the listener; other listeners are unaffected
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .finish()
    }
}

/// Fan-out of theme selection and update notifications
pub struct SubscriptionBroker<K, C> {
    channels: Arc<Mutex<Channels<K, C>>>,
    next_id: AtomicU64,
}

impl<K, C> Default for SubscriptionBroker<K, C>
where
    K: Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> SubscriptionBroker<K, C>
where
    K: Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Create a broker with no listeners
    pub fn new() -> Self {
        Self {
            channels: Arc::new(Mutex::new(Channels {
                selection: BTreeMap::new(),
                updated: BTreeMap::new(),
            })),
            next_id: AtomicU64::new(1),
        }
    }

    /// Listen for changes of the active theme name
    pub fn on_selection_changed<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&K) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.channels.lock().selection.insert(id, Arc::new(listener));
        debug!(broker.listener_id = id, "Selection listener registered");
        self.subscription(Topic::SelectionChanged, id)
    }

    /// Listen for updates of the theme collection
    pub fn on_theme_updated<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&C) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.channels.lock().updated.insert(id, Arc::new(listener));
        debug!(broker.listener_id = id, "Update listener registered");
        self.subscription(Topic::ThemeUpdated, id)
    }

    fn subscription(&self, topic: Topic, id: u64) -> Subscription {
        let channels: Weak<Mutex<Channels<K, C>>> = Arc::downgrade(&self.channels);
        Subscription {
            topic,
            release: Some(Box::new(move || {
                if let Some(channels) = channels.upgrade() {
                    if channels.lock().remove(topic, id) {
                        debug!(broker.listener_id = id, ?topic, "Listener removed");
                    }
                }
            })),
        }
    }

    /// Notify selection listeners of a new theme name
    pub fn emit_selection_changed(&self, name: &K) {
        let listeners: Vec<SelectionListener<K>> =
            self.channels.lock().selection.values().cloned().collect();
        for listener in listeners {
            listener(name);
        }
    }

    /// Notify update listeners with the updated collection
    pub fn emit_theme_updated(&self, themes: &C) {
        let listeners: Vec<UpdateListener<C>> =
            self.channels.lock().updated.values().cloned().collect();
        for listener in listeners {
            listener(themes);
        }
    }

    /// Number of listeners on a channel
    pub fn listener_count(&self, topic: Topic) -> usize {
        let channels = self.channels.lock();
        match topic {
            Topic::SelectionChanged => channels.selection.len(),
            Topic::ThemeUpdated => channels.updated.len(),
        }
    }

    /// Remove every listener on every channel
    pub fn remove_all(&self) {
        let mut channels = self.channels.lock();
        let removed = channels.selection.len() + channels.updated.len();
        channels.selection.clear();
        channels.updated.clear();
        info!(broker.removed = removed, "All theme listeners removed");
    }
}

impl<K, C> fmt::Debug for SubscriptionBroker<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = self.channels.lock();
        f.debug_struct("SubscriptionBroker")
            .field("selection_listeners", &channels.selection.len())
            .field("update_listeners", &channels.updated.len())
            .finish()
    }
}
