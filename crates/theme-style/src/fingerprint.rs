//! Content fingerprints for style-sheet cache validation
//!
//! A [`Fingerprint`] is a SHA-256 digest over a canonical walk of a JSON
//! value: object members are visited in sorted key order and every node is
//! tagged with its kind, so structurally equal mappings hash identically no
//! matter how they were built. Numbers are hashed by value, so `16` and
//! `16.0` are the same.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use theme_device::ScaleFactors;

/// Scale component of a cache key
///
/// An explicit per-call auto-scale override is keyed by its flag; otherwise
/// the default policy and the current scale factors are used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleKey {
    /// Per-call override of the auto-scale policy
    Override(bool),
    /// No override; the default policy and the current factors
    Default {
        /// Default auto-scale policy at resolve time
        enabled: bool,
        /// Current scale factors
        factors: ScaleFactors,
    },
}

impl ScaleKey {
    /// Key for an optional per-call override
    pub fn resolve(override_auto_scale: Option<bool>, default_enabled: bool, scale: ScaleFactors) -> Self {
        match override_auto_scale {
            Some(flag) => ScaleKey::Override(flag),
            None => ScaleKey::Default {
                enabled: default_enabled,
                factors: scale,
            },
        }
    }
}

/// SHA-256 content digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Digest of a single JSON value
    pub fn of_value(value: &Value) -> Self {
        let mut hasher = Sha256::new();
        feed_value(&mut hasher, value);
        Self(hasher.finalize().into())
    }

    /// Digest of the inputs that determine a compiled style sheet
    pub fn compute(styles: &Value, scale_key: ScaleKey, device_key: &str) -> Self {
        let mut hasher = Sha256::new();

        feed_value(&mut hasher, styles);

        match scale_key {
            ScaleKey::Override(flag) => {
                hasher.update([b'o', flag as u8]);
            }
            ScaleKey::Default { enabled, factors } => {
                hasher.update([b'f', enabled as u8]);
                for factor in [factors.horizontal, factors.vertical, factors.symmetric] {
                    feed_f64(&mut hasher, factor);
                }
            }
        }

        feed_str(&mut hasher, device_key);

        Self(hasher.finalize().into())
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", &self.to_hex()[..12])
    }
}

fn feed_value(hasher: &mut Sha256, value: &Value) {
    match value {
        Value::Null => hasher.update([b'n']),
        Value::Bool(b) => hasher.update([b'b', *b as u8]),
        Value::Number(n) => {
            hasher.update([b'#']);
            match n.as_f64() {
                Some(f) => feed_f64(hasher, f),
                None => feed_str(hasher, &n.to_string()),
            }
        }
        Value::String(s) => {
            hasher.update([b's']);
            feed_str(hasher, s);
        }
        Value::Array(items) => {
            hasher.update([b'a']);
            hasher.update((items.len() as u64).to_le_bytes());
            for item in items {
                feed_value(hasher, item);
            }
        }
        Value::Object(map) => {
            hasher.update([b'o']);
            hasher.update((map.len() as u64).to_le_bytes());
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (key, item) in entries {
                feed_str(hasher, key);
                feed_value(hasher, item);
            }
        }
    }
}

fn feed_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn feed_f64(hasher: &mut Sha256, f: f64) {
    // -0.0 and 0.0 are the same style value
    let f = if f == 0.0 { 0.0 } else { f };
    hasher.update(f.to_bits().to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_insertion_order_does_not_matter() {
        let mut forward = Map::new();
        forward.insert("width".into(), json!(10));
        forward.insert("color".into(), json!("red"));
        let mut backward = Map::new();
        backward.insert("color".into(), json!("red"));
        backward.insert("width".into(), json!(10));

        assert_eq!(
            Fingerprint::of_value(&Value::Object(forward)),
            Fingerprint::of_value(&Value::Object(backward))
        );
    }

    #[test]
    fn test_content_changes_fingerprint() {
        let a = json!({ "box": { "width": 10 } });
        let b = json!({ "box": { "width": 11 } });
        let c = json!({ "box": { "width": "10" } });
        assert_ne!(Fingerprint::of_value(&a), Fingerprint::of_value(&b));
        assert_ne!(Fingerprint::of_value(&a), Fingerprint::of_value(&c));
    }

    #[test]
    fn test_integer_and_float_forms_match() {
        assert_eq!(
            Fingerprint::of_value(&json!({ "w": 16 })),
            Fingerprint::of_value(&json!({ "w": 16.0 }))
        );
    }

    #[test]
    fn test_structure_is_unambiguous() {
        // Same leaf strings, different nesting
        let a = json!({ "ab": "c" });
        let b = json!({ "a": "bc" });
        assert_ne!(Fingerprint::of_value(&a), Fingerprint::of_value(&b));

        let c = json!([["x"], "y"]);
        let d = json!([["x", "y"]]);
        assert_ne!(Fingerprint::of_value(&c), Fingerprint::of_value(&d));
    }

    #[test]
    fn test_compute_covers_scale_and_device() {
        let styles = json!({ "box": { "width": 10 } });
        let device = "screen:375x812-window:375x812";
        let base = Fingerprint::compute(&styles, ScaleKey::Default { enabled: false, factors: ScaleFactors::IDENTITY }, device);

        assert_eq!(
            base,
            Fingerprint::compute(&styles, ScaleKey::Default { enabled: false, factors: ScaleFactors::IDENTITY }, device)
        );
        assert_ne!(
            base,
            Fingerprint::compute(&styles, ScaleKey::Override(true), device)
        );
        assert_ne!(
            Fingerprint::compute(&styles, ScaleKey::Override(true), device),
            Fingerprint::compute(&styles, ScaleKey::Override(false), device)
        );
        assert_ne!(
            base,
            Fingerprint::compute(
                &styles,
                ScaleKey::Default { enabled: false, factors: ScaleFactors::IDENTITY },
                "screen:812x375-window:812x375"
            )
        );
    }

    #[test]
    fn test_default_policy_changes_fingerprint() {
        let styles = json!({ "box": { "width": 10 } });
        let key = |enabled| ScaleKey::Default { enabled, factors: ScaleFactors::IDENTITY };

        assert_ne!(
            Fingerprint::compute(&styles, key(true), "device"),
            Fingerprint::compute(&styles, key(false), "device")
        );
    }

    #[test]
    fn test_scale_key_resolution() {
        let scale = ScaleFactors::IDENTITY;
        assert_eq!(ScaleKey::resolve(Some(false), true, scale), ScaleKey::Override(false));
        assert_eq!(
            ScaleKey::resolve(None, true, scale),
            ScaleKey::Default { enabled: true, factors: scale }
        );
    }

    #[test]
    fn test_hex_rendering() {
        let fingerprint = Fingerprint::of_value(&json!(null));
        assert_eq!(fingerprint.to_hex().len(), 64);
        assert_eq!(fingerprint.to_string(), fingerprint.to_hex());
    }
}
