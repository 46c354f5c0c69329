/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Token template materialization.
//!
//! A template is a JSON document shaped like a [`ScopedClaims`] payload. An
//! ordered list of `key=value` overrides is applied to it, where `key` is a
//! dot-path (`scope.app.channels.0.name`) and `value` is written as a JSON
//! string. Intermediate objects are created as needed; a numeric segment
//! indexes into an array, and `-1` or the array length appends to it.

use serde_json::{Map, Value};
use skyway_token_types::ScopedClaims;
use tracing::debug;

use super::TokenError;

/// Apply `overrides` to `template` and parse the result into [`ScopedClaims`].
///
/// Fields not present in the claim model are dropped.
pub fn materialize(template: &str, overrides: &[String]) -> Result<ScopedClaims, TokenError> {
    let document = apply_overrides(template, overrides)?;
    serde_json::from_value(document).map_err(|e| TokenError::Template(e.to_string()))
}

/// Apply `overrides` in order and return the modified JSON document.
pub fn apply_overrides(template: &str, overrides: &[String]) -> Result<Value, TokenError> {
    let mut document: Value =
        serde_json::from_str(template).map_err(|e| TokenError::Template(e.to_string()))?;

    for entry in overrides {
        let (key, value) = split_override(entry)
            .ok_or_else(|| TokenError::Template(format!("invalid value: {entry}")))?;

        set_path(&mut document, key, Value::String(value.to_string())).ok_or_else(|| {
            TokenError::Template(format!("failed to set value. key: {key}, value: {value}"))
        })?;
        debug!(key, value, "Set value");
    }

    Ok(document)
}

/// Split `key=value`. Entries with no `=` or more than one are rejected.
pub(crate) fn split_override(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Some((key, value)),
        _ => None,
    }
}

fn set_path(root: &mut Value, path: &str, value: Value) -> Option<()> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }

    let (last, parents) = segments.split_last()?;
    let mut node = root;
    for segment in parents {
        node = child(node, segment)?;
    }
    *child(node, last)? = value;
    Some(())
}

/// Step into `segment`, creating the slot if it does not exist yet.
/// Scalars on the path are replaced by an empty object.
///
/// In an array only existing indexes, `len` and `-1` are addressable; the
/// last two append a new element.
fn child<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    if node.is_array() {
        let items = node.as_array_mut()?;
        let index = if segment == "-1" {
            items.len()
        } else {
            segment.parse::<usize>().ok()?
        };
        if index > items.len() {
            return None;
        }
        if index == items.len() {
            items.push(Value::Null);
        }
        return items.get_mut(index);
    }

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    node.as_object_mut()
        .map(|map| map.entry(segment).or_insert(Value::Null))
}
