//! Shared test fixtures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use theme_device::test_utils::ManualGeometrySource;
use theme_device::{DeviceTracker, Dimensions, GeometrySource, StaticPlatform};

use crate::{Result, ThemeManager, ThemeOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub text: String,
}

pub fn palette(background: &str, text: &str) -> Palette {
    Palette {
        background: background.to_string(),
        text: text.to_string(),
    }
}

pub type TestManager = Arc<ThemeManager<String, Palette>>;

pub fn manager_with(options: ThemeOptions) -> Result<(TestManager, Arc<ManualGeometrySource>)> {
    let mut themes = BTreeMap::new();
    themes.insert("light".to_string(), palette("#FFFFFF", "#000000"));
    themes.insert("dark".to_string(), palette("#000000", "#FFFFFF"));

    let source = Arc::new(ManualGeometrySource::new(Dimensions::new(375.0, 812.0)));
    let device = DeviceTracker::new(
        Arc::clone(&source) as Arc<dyn GeometrySource>,
        &StaticPlatform::ios(),
    );

    let manager = ThemeManager::new("light".to_string(), themes, options, device)?;
    Ok((Arc::new(manager), source))
}

pub fn manager() -> (TestManager, Arc<ManualGeometrySource>) {
    manager_with(ThemeOptions::default()).unwrap()
}
