//! Entity resolution from parsed graph elements
//!
//! Maps a graph element's `@type` tag (single string or compound list) onto
//! the closed set of entity variants. The most specific known type wins;
//! elements with unrecognized types still become contextual entities, and
//! the full `@type` value is preserved verbatim for round-trip.

use serde_json::{Map, Value};

use crate::entity::{Entity, EntityKind};
use crate::error::CrateError;
use crate::id::{canonical_dataset_id, canonical_file_id};
use crate::vocab;

/// Build an entity from one element of a metadata document's `@graph`
///
/// Fails with a metadata error when the element is not an object, has no
/// string `@id`, or carries an uninterpretable `@type`.
pub fn entity_from_graph_element(element: &Value) -> Result<Entity, CrateError> {
    let object = element.as_object().ok_or_else(|| {
        CrateError::Metadata(format!("Graph element is not an object: {element}"))
    })?;

    let id = object
        .get("@id")
        .and_then(Value::as_str)
        .ok_or_else(|| CrateError::Metadata("Graph element has no string @id".to_string()))?;
    if id.is_empty() {
        return Err(CrateError::Metadata(
            "Graph element has an empty @id".to_string(),
        ));
    }

    let types = parse_types(object.get("@type"))?;
    let kind = resolve_kind(id, &types);

    let id = match kind {
        EntityKind::Dataset => canonical_dataset_id(id),
        EntityKind::File => canonical_file_id(id),
        _ => id.to_string(),
    };

    let mut properties = Map::new();
    for (key, value) in object {
        if key != "@id" {
            properties.insert(key.clone(), value.clone());
        }
    }

    Ok(Entity::from_parts(id, kind, properties))
}

/// Interpret an `@type` value as a list of type names
///
/// Accepts a single string, a list of strings, or nothing. Every other
/// shape is a metadata error.
fn parse_types(value: Option<&Value>) -> Result<Vec<String>, CrateError> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::String(t)) => Ok(vec![t.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(String::from).ok_or_else(|| {
                    CrateError::Metadata(format!(
                        "@type list contains a non-string element: {item}"
                    ))
                })
            })
            .collect(),
        Some(other) => Err(CrateError::Metadata(format!(
            "@type must be a string or list of strings, got: {other}"
        ))),
    }
}

/// Pick the most specific known variant for a type list
///
/// Reserved IDs take precedence so the metadata descriptor and preview
/// keep their fixed roles regardless of declared type.
fn resolve_kind(id: &str, types: &[String]) -> EntityKind {
    if id == vocab::METADATA_ID {
        return EntityKind::Metadata;
    }
    if id == vocab::PREVIEW_ID {
        return EntityKind::Preview;
    }
    if types.iter().any(|t| t == "Dataset") {
        EntityKind::Dataset
    } else if types.iter().any(|t| t == "File") {
        EntityKind::File
    } else if types.iter().any(|t| t == "Person") {
        EntityKind::Person
    } else {
        EntityKind::Contextual
    }
}
