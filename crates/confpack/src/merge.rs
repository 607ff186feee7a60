//! Deep replace-merge over configuration mappings.
//!
//! This is the single merge used everywhere in the crate: per-extension
//! config files are folded with it, a provider's output is folded over the
//! directory output with it, and each extension's contribution is folded
//! into the final configuration with it.

use serde_json::Value;

use crate::reader::ConfigMap;

/// Merge `overlay` into `base`, overlay values winning on conflict.
///
/// For a key present on both sides: if both values are objects, they are
/// merged recursively (union of sub-keys, overlay winning per key); any
/// other combination replaces the base value wholesale. Arrays are values,
/// not mappings, so an overlay array replaces a base array entirely. Keys
/// absent from the overlay are left untouched.
pub fn merge_into(base: &mut ConfigMap, overlay: ConfigMap) {
    for (key, value) in overlay {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = base.get_mut(&key) {
                merge_into(existing, incoming);
                continue;
            }
            base.insert(key, Value::Object(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

/// Merge two mappings into a new one, `overlay` winning on conflict.
pub fn merged(base: ConfigMap, overlay: ConfigMap) -> ConfigMap {
    let mut result = base;
    merge_into(&mut result, overlay);
    result
}
