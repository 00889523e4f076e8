//! Deep merge of JSON documents
//!
//! Objects merge key by key at every nesting level with the incoming value
//! winning. Arrays and scalars are replaced wholesale. `null` in the
//! incoming document means "not provided" and leaves the target untouched.

use serde_json::Value;

/// Merge `incoming` into `target` in place
pub fn deep_merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (_, Value::Null) => {}
        (Value::Object(target), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match target.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        if !value.is_null() {
                            target.insert(key, strip_nulls(value));
                        }
                    }
                }
            }
        }
        (target, incoming) => *target = strip_nulls(incoming),
    }
}

/// Drop `null` members from objects so new subtrees follow the same rule
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_preserves_untouched_fields() {
        let mut target = json!({
            "light": { "colors": { "background": "#FFF", "text": "#000" }, "spacing": 4 },
            "dark": { "colors": { "background": "#000", "text": "#FFF" }, "spacing": 4 }
        });

        deep_merge(&mut target, json!({ "light": { "colors": { "background": "red" } } }));

        assert_eq!(
            target,
            json!({
                "light": { "colors": { "background": "red", "text": "#000" }, "spacing": 4 },
                "dark": { "colors": { "background": "#000", "text": "#FFF" }, "spacing": 4 }
            })
        );
    }

    #[test]
    fn test_arrays_replace_wholesale() {
        let mut target = json!({ "stops": [1, 2, 3] });
        deep_merge(&mut target, json!({ "stops": [9] }));
        assert_eq!(target, json!({ "stops": [9] }));
    }

    #[test]
    fn test_scalar_and_object_replacement() {
        let mut target = json!({ "shadow": "none" });
        deep_merge(&mut target, json!({ "shadow": { "radius": 4 } }));
        assert_eq!(target, json!({ "shadow": { "radius": 4 } }));

        deep_merge(&mut target, json!({ "shadow": "none" }));
        assert_eq!(target, json!({ "shadow": "none" }));
    }

    #[test]
    fn test_null_is_skipped() {
        let mut target = json!({ "colors": { "background": "#FFF" } });
        deep_merge(
            &mut target,
            json!({ "colors": { "background": null, "accent": null, "border": { "a": null, "b": 1 } } }),
        );
        assert_eq!(
            target,
            json!({ "colors": { "background": "#FFF", "border": { "b": 1 } } })
        );
    }

    #[test]
    fn test_new_keys_are_added() {
        let mut target = json!({ "light": { "color": "black" } });
        deep_merge(&mut target, json!({ "sepia": { "color": "brown" } }));
        assert_eq!(
            target,
            json!({ "light": { "color": "black" }, "sepia": { "color": "brown" } })
        );
    }
}
