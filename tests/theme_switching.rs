//! Theme Switching Integration Tests
//!
//! End-to-end tests for selection, partial updates, and listener lifecycle
//! on an assembled theme manager.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use theme_device::test_utils::ManualGeometrySource;
use theme_manager::{
    DeviceTracker, Dimensions, GeometrySource, StaticPlatform, ThemeManager, ThemeOptions,
    ThemeProvider, Topic,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Colors {
    background: String,
    text: String,
    accent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Theme {
    colors: Colors,
    spacing: Vec<u32>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn theme(background: &str, text: &str, accent: &str) -> Theme {
    Theme {
        colors: Colors {
            background: background.to_string(),
            text: text.to_string(),
            accent: accent.to_string(),
        },
        spacing: vec![4, 8, 16],
    }
}

fn setup() -> (Arc<ThemeManager<String, Theme>>, Arc<ManualGeometrySource>) {
    init_tracing();

    let mut themes = BTreeMap::new();
    themes.insert("light".to_string(), theme("#FFFFFF", "#111111", "#0066FF"));
    themes.insert("dark".to_string(), theme("#000000", "#EEEEEE", "#3399FF"));

    let source = Arc::new(ManualGeometrySource::new(Dimensions::new(375.0, 812.0)));
    let device = DeviceTracker::new(
        Arc::clone(&source) as Arc<dyn GeometrySource>,
        &StaticPlatform::ios(),
    );
    let manager =
        ThemeManager::new("light".to_string(), themes, ThemeOptions::default(), device).unwrap();

    (Arc::new(manager), source)
}

/// Test that every selection listener sees each switch in order
#[test]
fn test_switching_notifies_in_order() {
    let (manager, _source) = setup();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let _first = manager.on_change_name(move |name| sink.lock().unwrap().push(format!("a:{name}")));
    let sink = Arc::clone(&seen);
    let _second = manager.on_change_name(move |name| sink.lock().unwrap().push(format!("b:{name}")));

    manager.set("dark".to_string());
    manager.set("light".to_string());

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["a:dark", "b:dark", "a:light", "b:light"]
    );
    assert_eq!(manager.name(), "light");
}

/// Test that a listener may read the manager while being notified
#[test]
fn test_listener_can_read_manager() {
    let (manager, _source) = setup();
    let observed = Arc::new(Mutex::new(None));

    let reader = Arc::clone(&manager);
    let sink = Arc::clone(&observed);
    let _sub = manager.on_change_name(move |_| {
        *sink.lock().unwrap() = reader.theme().map(|t| t.colors.background);
    });

    manager.set("dark".to_string());
    assert_eq!(*observed.lock().unwrap(), Some("#000000".to_string()));
}

/// Test partial updates: nested merge, array replacement, null skipping
#[test]
fn test_partial_update_semantics() {
    let (manager, _source) = setup();

    manager
        .update(&json!({
            "dark": {
                "colors": { "accent": "#FF00FF", "text": null },
                "spacing": [2, 4]
            }
        }))
        .unwrap();

    let dark = manager.get(&"dark".to_string()).unwrap();
    assert_eq!(dark.colors.accent, "#FF00FF");
    assert_eq!(dark.colors.text, "#EEEEEE");
    assert_eq!(dark.colors.background, "#000000");
    assert_eq!(dark.spacing, vec![2, 4]);

    // Untouched theme is unchanged
    assert_eq!(manager.get(&"light".to_string()), Some(theme("#FFFFFF", "#111111", "#0066FF")));
}

/// Test that an update may register a complete new theme
#[test]
fn test_update_adds_theme() {
    let (manager, _source) = setup();

    manager
        .update(&json!({
            "sepia": {
                "colors": { "background": "#F4ECD8", "text": "#5B4636", "accent": "#A0522D" },
                "spacing": [4, 8]
            }
        }))
        .unwrap();

    assert_eq!(manager.themes().len(), 3);
    manager.set("sepia".to_string());
    assert_eq!(manager.theme().unwrap().colors.background, "#F4ECD8");
}

/// Test that an update that cannot form a theme leaves state untouched
#[test]
fn test_rejected_update_emits_nothing() {
    let (manager, _source) = setup();
    let updates = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&updates);
    let _sub = manager.on_updated_theme(move |_| *sink.lock().unwrap() += 1);

    let result = manager.update(&json!({ "sepia": { "colors": { "background": "#F4ECD8" } } }));

    assert!(result.is_err());
    assert_eq!(manager.themes().len(), 2);
    assert_eq!(*updates.lock().unwrap(), 0);
}

/// Test unsubscribing one listener leaves the others registered
#[test]
fn test_unsubscribe_is_targeted() {
    let (manager, _source) = setup();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let first = manager.on_change_name(move |_| sink.lock().unwrap().push("first"));
    let sink = Arc::clone(&seen);
    let _second = manager.on_change_name(move |_| sink.lock().unwrap().push("second"));

    first.unsubscribe();
    manager.set("dark".to_string());

    assert_eq!(*seen.lock().unwrap(), vec!["second"]);
    assert_eq!(manager.store().broker().listener_count(Topic::SelectionChanged), 1);
}

/// Test full provider lifecycle across switches, updates, and rotation
#[test]
fn test_provider_lifecycle() {
    let (manager, source) = setup();
    let renders = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&renders);
    let provider = ThemeProvider::mount_with(Arc::clone(&manager), move || {
        *sink.lock().unwrap() += 1;
    });

    // Phase 1: selection
    manager.set("dark".to_string());
    assert_eq!(provider.context().theme_name, "dark");

    // Phase 2: update
    manager.update(&json!({ "dark": { "colors": { "accent": "#00FF00" } } })).unwrap();
    let context = provider.context();
    assert_eq!(context.revision, 1);
    assert_eq!(context.theme.unwrap().colors.accent, "#00FF00");

    // Phase 3: rotation
    source.emit(Dimensions::new(812.0, 375.0));
    assert!(provider.context().device_key.starts_with("screen:812x375-window:812x375"));
    assert!(manager.device_snapshot().is_landscape());

    assert_eq!(*renders.lock().unwrap(), 3);

    // Phase 4: teardown
    provider.unmount();
    assert_eq!(source.listener_count(), 0);
    manager.set("light".to_string());
    assert_eq!(*renders.lock().unwrap(), 3);
}

/// Test that teardown silences every previously registered listener
#[test]
fn test_no_notifications_after_teardown() {
    let (manager, source) = setup();
    let events = Arc::new(Mutex::new(0));

    let sink = Arc::clone(&events);
    let _name = manager.on_change_name(move |_| *sink.lock().unwrap() += 1);
    let sink = Arc::clone(&events);
    let _updated = manager.on_updated_theme(move |_| *sink.lock().unwrap() += 1);
    manager.device().init(None);

    manager.remove_all_listeners();
    manager.set("dark".to_string());
    manager.update(&json!({ "dark": { "colors": { "text": "#FAFAFA" } } })).unwrap();
    source.emit(Dimensions::new(812.0, 375.0));

    assert_eq!(*events.lock().unwrap(), 0);
    assert_eq!(source.listener_count(), 0);
    // State itself still changes
    assert_eq!(manager.theme().unwrap().colors.text, "#FAFAFA");
}
