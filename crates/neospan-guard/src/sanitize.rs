//! Recursive result sanitization.
//!
//! Query results routinely carry subtrees that are expensive to ship
//! to a language model and carry little interpretive value; vector
//! embeddings, large adjacency lists. The sanitizer walks a result
//! value depth-first and elides them *entirely*: an oversized list is
//! dropped rather than truncated, so the caller is never shown a
//! misleadingly partial list.
//!
//! The walk is a match over the tagged [`Value`] variants (mapping,
//! sequence, scalar); absence is signalled with `None`.

use serde_json::{Map, Value};

/// Sequences whose original length reaches this limit are elided.
pub const DEFAULT_LIST_SIZE_LIMIT: usize = 52;

/// Sanitize a result value with the default list size limit.
pub fn sanitize(value: &Value) -> Option<Value> {
    sanitize_with_limit(value, DEFAULT_LIST_SIZE_LIMIT)
}

/// Sanitize a result value, eliding sequences with original length
/// `>= list_size_limit`.
///
/// Rules, applied depth-first:
///
/// - scalars pass through verbatim;
/// - a mapping is rebuilt key by key: scalar values are always kept,
///   nested mappings are kept only if non-empty after sanitization,
///   nested sequences are kept only if their original length is under
///   the limit and their sanitized form is non-empty;
/// - a sequence with original length `>= list_size_limit` collapses to
///   absent (`None`); otherwise its elements are sanitized and the
///   empty or absent ones dropped.
///
/// Idempotent: output never contains a sequence at or over the limit,
/// so the collapse condition cannot re-trigger on a second pass.
pub fn sanitize_with_limit(value: &Value, list_size_limit: usize) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, nested) in map {
                match nested {
                    Value::Object(_) => {
                        if let Some(clean) = sanitize_with_limit(nested, list_size_limit) {
                            if !is_empty_container(&clean) {
                                out.insert(key.clone(), clean);
                            }
                        }
                    }
                    Value::Array(items) => {
                        if items.len() < list_size_limit {
                            if let Some(clean) = sanitize_with_limit(nested, list_size_limit) {
                                if !is_empty_container(&clean) {
                                    out.insert(key.clone(), clean);
                                }
                            }
                        }
                        // Oversized: the key is dropped entirely.
                    }
                    _ => {
                        out.insert(key.clone(), nested.clone());
                    }
                }
            }
            Some(Value::Object(out))
        }
        Value::Array(items) => {
            if items.len() >= list_size_limit {
                return None;
            }
            let kept: Vec<Value> = items
                .iter()
                .filter_map(|item| sanitize_with_limit(item, list_size_limit))
                .filter(|clean| !is_empty_container(clean))
                .collect();
            Some(Value::Array(kept))
        }
        scalar => Some(scalar.clone()),
    }
}

/// An emptied mapping or sequence carries no information; enclosing
/// containers drop it.
fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

// ============================================================================
// Tests
// ============================================================================
