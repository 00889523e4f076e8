//! Device-adaptive scaling of style values
//!
//! Numeric values under allow-listed property names are multiplied by the
//! scale factor of their axis: width-like properties by the horizontal
//! factor, height-like properties by the vertical factor, and everything else
//! on the list by the symmetric factor. Nested objects (such as
//! `shadowOffset`) and arrays are walked; non-numeric values are left alone.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeSet;
use theme_device::ScaleFactors;

/// Scaled values are rounded to this many decimal places
const DECIMAL_PLACES: i32 = 2;

const HORIZONTAL_PROPERTIES: &[&str] = &[
    "width",
    "minWidth",
    "maxWidth",
    "left",
    "right",
    "start",
    "end",
    "marginLeft",
    "marginRight",
    "marginStart",
    "marginEnd",
    "marginHorizontal",
    "paddingLeft",
    "paddingRight",
    "paddingStart",
    "paddingEnd",
    "paddingHorizontal",
    "borderLeftWidth",
    "borderRightWidth",
    "columnGap",
];

const VERTICAL_PROPERTIES: &[&str] = &[
    "height",
    "minHeight",
    "maxHeight",
    "top",
    "bottom",
    "marginTop",
    "marginBottom",
    "marginVertical",
    "paddingTop",
    "paddingBottom",
    "paddingVertical",
    "borderTopWidth",
    "borderBottomWidth",
    "rowGap",
];

const SYMMETRIC_PROPERTIES: &[&str] = &[
    "fontSize",
    "lineHeight",
    "letterSpacing",
    "margin",
    "padding",
    "gap",
    "borderWidth",
    "borderRadius",
    "borderTopLeftRadius",
    "borderTopRightRadius",
    "borderBottomLeftRadius",
    "borderBottomRightRadius",
    "shadowRadius",
];

/// Scaling axis of a style property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Scaled by the horizontal factor
    Horizontal,
    /// Scaled by the vertical factor
    Vertical,
    /// Scaled by the symmetric factor
    Symmetric,
}

impl Axis {
    /// The factor for this axis
    pub fn factor(&self, scale: &ScaleFactors) -> f64 {
        match self {
            Axis::Horizontal => scale.horizontal,
            Axis::Vertical => scale.vertical,
            Axis::Symmetric => scale.symmetric,
        }
    }
}

/// Allow-list of scalable style properties, per axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleRules {
    /// Width-like properties
    pub horizontal: BTreeSet<String>,
    /// Height-like properties
    pub vertical: BTreeSet<String>,
    /// Properties scaled by the smaller axis
    pub symmetric: BTreeSet<String>,
}

impl Default for ScaleRules {
    fn default() -> Self {
        let set = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            horizontal: set(HORIZONTAL_PROPERTIES),
            vertical: set(VERTICAL_PROPERTIES),
            symmetric: set(SYMMETRIC_PROPERTIES),
        }
    }
}

impl ScaleRules {
    /// Rules that scale nothing
    pub fn empty() -> Self {
        Self {
            horizontal: BTreeSet::new(),
            vertical: BTreeSet::new(),
            symmetric: BTreeSet::new(),
        }
    }

    /// Add a property on the given axis, removing it from the others
    pub fn with_property(mut self, name: impl Into<String>, axis: Axis) -> Self {
        let name = name.into();
        self.without_property(&name);
        match axis {
            Axis::Horizontal => self.horizontal.insert(name),
            Axis::Vertical => self.vertical.insert(name),
            Axis::Symmetric => self.symmetric.insert(name),
        };
        self
    }

    /// Stop scaling a property
    pub fn without_property(&mut self, name: &str) {
        self.horizontal.remove(name);
        self.vertical.remove(name);
        self.symmetric.remove(name);
    }

    /// The axis a property scales on, if it is allow-listed
    pub fn axis(&self, name: &str) -> Option<Axis> {
        if self.horizontal.contains(name) {
            Some(Axis::Horizontal)
        } else if self.vertical.contains(name) {
            Some(Axis::Vertical)
        } else if self.symmetric.contains(name) {
            Some(Axis::Symmetric)
        } else {
            None
        }
    }
}

/// Multiply a value by a factor and round to two decimals
///
/// A factor of exactly 1 returns the value unchanged.
pub fn scale_value(value: f64, factor: f64) -> f64 {
    if factor == 1.0 {
        return value;
    }
    let precision = 10f64.powi(DECIMAL_PLACES);
    (value * factor * precision).round() / precision
}

/// Scale allow-listed numeric values in place
pub fn apply_scale(styles: &mut Value, scale: &ScaleFactors, rules: &ScaleRules) {
    match styles {
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                match (rules.axis(key), value) {
                    (Some(axis), Value::Number(number)) => {
                        if let Some(scaled) = scale_number(number, axis.factor(scale)) {
                            *number = scaled;
                        }
                    }
                    (_, nested) => apply_scale(nested, scale, rules),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                apply_scale(item, scale, rules);
            }
        }
        _ => {}
    }
}

fn scale_number(number: &Number, factor: f64) -> Option<Number> {
    if factor == 1.0 {
        return None;
    }
    Number::from_f64(scale_value(number.as_f64()?, factor))
}
