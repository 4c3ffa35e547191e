//! Item fingerprint derivation.
//!
//! Deduplication across scans needs an identity that survives the item
//! moving on screen. Preference order: content description (the most stable
//! handle on accessibility-friendly trees), then visible text, then a
//! positional key as the last resort - position only identifies an item
//! within a single scan, but an item with no stable attributes cannot be
//! tracked across scrolls anyway.

use std::collections::BTreeMap;

use fingertip_core_types::ElementRect;

/// Attribute carrying the accessibility content description.
pub const CONTENT_DESC: &str = "content-desc";

/// Attribute carrying the visible text.
pub const TEXT: &str = "text";

/// Derive the stable identity for an item from its probed attributes and
/// first-seen rect. Deterministic: same inputs, same fingerprint.
pub fn derive(attributes: &BTreeMap<String, String>, rect: &ElementRect) -> String {
    if let Some(desc) = non_empty(attributes, CONTENT_DESC) {
        return format!("desc:{desc}");
    }
    if let Some(text) = non_empty(attributes, TEXT) {
        return format!("text:{text}");
    }
    format!(
        "pos:{}:{}:{}x{}",
        rect.x, rect.y, rect.width, rect.height
    )
}

fn non_empty<'a>(attributes: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    attributes
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
