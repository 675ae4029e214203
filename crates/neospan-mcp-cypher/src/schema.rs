//! Schema introspection pruning.
//!
//! `apoc.meta.schema()` returns a verbose per-label description with
//! internal bookkeeping the caller does not need. [`clean_schema`]
//! rebuilds it keeping only the interpretable parts: entity type and
//! count, labels, property `type`/`indexed` flags, and relationship
//! direction/labels/properties. Empty substructures are dropped.

use serde_json::{Map, Value};

/// Rebuild a raw `apoc.meta.schema()` mapping, keeping only the
/// fields worth returning to a client.
pub fn clean_schema(schema: &Map<String, Value>) -> Map<String, Value> {
    let mut cleaned = Map::new();

    for (key, entry) in schema {
        let Some(entry) = entry.as_object() else {
            continue;
        };

        let mut new_entry = Map::new();
        if let Some(kind) = entry.get("type") {
            new_entry.insert("type".to_string(), kind.clone());
        }
        if let Some(count) = entry.get("count") {
            new_entry.insert("count".to_string(), count.clone());
        }

        if let Some(labels) = entry.get("labels").and_then(Value::as_array) {
            if !labels.is_empty() {
                new_entry.insert("labels".to_string(), Value::Array(labels.clone()));
            }
        }

        if let Some(props) = entry.get("properties").and_then(Value::as_object) {
            let clean_props = clean_properties(props);
            if !clean_props.is_empty() {
                new_entry.insert("properties".to_string(), Value::Object(clean_props));
            }
        }

        if let Some(rels) = entry.get("relationships").and_then(Value::as_object) {
            let mut rels_out = Map::new();
            for (rel_name, rel) in rels {
                let Some(rel) = rel.as_object() else {
                    continue;
                };

                let mut cr = Map::new();
                if let Some(direction) = rel.get("direction") {
                    cr.insert("direction".to_string(), direction.clone());
                }
                if let Some(rlabels) = rel.get("labels").and_then(Value::as_array) {
                    if !rlabels.is_empty() {
                        cr.insert("labels".to_string(), Value::Array(rlabels.clone()));
                    }
                }
                if let Some(rprops) = rel.get("properties").and_then(Value::as_object) {
                    let clean_rprops = clean_properties(rprops);
                    if !clean_rprops.is_empty() {
                        cr.insert("properties".to_string(), Value::Object(clean_rprops));
                    }
                }

                if !cr.is_empty() {
                    rels_out.insert(rel_name.clone(), Value::Object(cr));
                }
            }

            if !rels_out.is_empty() {
                new_entry.insert("relationships".to_string(), Value::Object(rels_out));
            }
        }

        cleaned.insert(key.clone(), Value::Object(new_entry));
    }

    cleaned
}

/// Keep only the `indexed` and `type` fields of each property; drop
/// properties where neither is present.
fn clean_properties(props: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (name, info) in props {
        let Some(info) = info.as_object() else {
            continue;
        };
        let mut cp = Map::new();
        if let Some(indexed) = info.get("indexed") {
            cp.insert("indexed".to_string(), indexed.clone());
        }
        if let Some(kind) = info.get("type") {
            cp.insert("type".to_string(), kind.clone());
        }
        if !cp.is_empty() {
            out.insert(name.clone(), Value::Object(cp));
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_keeps_type_count_and_labels() {
        let raw = as_map(json!({
            "Person": {
                "type": "node",
                "count": 42,
                "labels": ["Actor"],
                "leftover": "dropped"
            }
        }));
        let cleaned = clean_schema(&raw);
        let person = cleaned["Person"].as_object().unwrap();
        assert_eq!(person["type"], "node");
        assert_eq!(person["count"], 42);
        assert_eq!(person["labels"], json!(["Actor"]));
        assert!(!person.contains_key("leftover"));
    }

    #[test]
    fn test_count_is_optional() {
        let raw = as_map(json!({ "Person": { "type": "node" } }));
        let cleaned = clean_schema(&raw);
        assert!(!cleaned["Person"].as_object().unwrap().contains_key("count"));
    }

    #[test]
    fn test_properties_keep_only_indexed_and_type() {
        let raw = as_map(json!({
            "Movie": {
                "type": "node",
                "properties": {
                    "title": { "indexed": true, "type": "STRING", "existence": false },
                    "junk": { "existence": false }
                }
            }
        }));
        let cleaned = clean_schema(&raw);
        let props = cleaned["Movie"]["properties"].as_object().unwrap();
        assert_eq!(props["title"], json!({ "indexed": true, "type": "STRING" }));
        // A property with neither field is dropped entirely.
        assert!(!props.contains_key("junk"));
    }

    #[test]
    fn test_empty_substructures_dropped() {
        let raw = as_map(json!({
            "Movie": {
                "type": "node",
                "labels": [],
                "properties": {},
                "relationships": {}
            }
        }));
        let cleaned = clean_schema(&raw);
        let movie = cleaned["Movie"].as_object().unwrap();
        assert!(!movie.contains_key("labels"));
        assert!(!movie.contains_key("properties"));
        assert!(!movie.contains_key("relationships"));
    }

    #[test]
    fn test_relationships_cleaned_recursively() {
        let raw = as_map(json!({
            "Person": {
                "type": "node",
                "relationships": {
                    "ACTED_IN": {
                        "direction": "out",
                        "labels": ["Movie"],
                        "properties": {
                            "role": { "type": "STRING", "array": false }
                        },
                        "count": 7
                    },
                    "EMPTY": {}
                }
            }
        }));
        let cleaned = clean_schema(&raw);
        let rels = cleaned["Person"]["relationships"].as_object().unwrap();
        let acted = rels["ACTED_IN"].as_object().unwrap();
        assert_eq!(acted["direction"], "out");
        assert_eq!(acted["labels"], json!(["Movie"]));
        assert_eq!(acted["properties"]["role"], json!({ "type": "STRING" }));
        assert!(!acted.contains_key("count"));
        assert!(!rels.contains_key("EMPTY"));
    }
}
