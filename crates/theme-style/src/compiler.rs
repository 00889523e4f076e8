//! Style-sheet compilation
//!
//! The rendering engine owns the real compilation step; the theming layer
//! only needs something that turns a raw style mapping into an
//! engine-native handle. [`JsonStyleCompiler`] is a pass-through
//! implementation for hosts that consume plain JSON.

use serde_json::{Map, Value};
use tracing::warn;

/// Turns a raw style mapping into an engine-native style sheet
///
/// Compilation must be pure: the same mapping always yields an equivalent
/// sheet.
pub trait StyleCompiler: Send + Sync {
    /// The compiled handle
    type Sheet: Send + Sync + 'static;

    /// Compile a mapping of style name to style declaration
    fn compile(&self, styles: &Value) -> Self::Sheet;
}

/// Compiler that keeps the mapping as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStyleCompiler;

/// A style sheet held as JSON declarations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledStyles {
    styles: Map<String, Value>,
}

impl CompiledStyles {
    /// The declaration registered under `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.styles.get(name)
    }

    /// Style names in the sheet
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Number of styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the sheet has no styles
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// The underlying declarations
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.styles
    }
}

impl StyleCompiler for JsonStyleCompiler {
    type Sheet = CompiledStyles;

    fn compile(&self, styles: &Value) -> CompiledStyles {
        match styles {
            Value::Object(map) => CompiledStyles { styles: map.clone() },
            _ => {
                warn!("Style mapping is not an object, compiling an empty sheet");
                CompiledStyles::default()
            }
        }
    }
}
