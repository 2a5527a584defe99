//! Rendering the entity graph back into a JSON-LD document
//!
//! Output mirrors the deserialized form: the context verbatim, graph
//! elements in entity insertion order, property keys in insertion order.
//! A document read with `initialise` serializes back to the same text
//! modulo a single trailing newline.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tracing::debug;

use crate::entity::Entity;
use crate::error::CrateError;
use crate::rocrate::RoCrate;
use crate::vocab;

/// Build the complete JSON-LD document for a crate
pub fn to_jsonld(rocrate: &RoCrate) -> Value {
    let graph: Vec<Value> = rocrate.entities().map(Entity::to_json).collect();
    json!({
        "@context": rocrate.context(),
        "@graph": graph
    })
}

/// Serialize a crate to a JSON string
pub fn to_json_string(rocrate: &RoCrate, pretty: bool) -> Result<String, CrateError> {
    let document = to_jsonld(rocrate);
    if pretty {
        Ok(serde_json::to_string_pretty(&document)?)
    } else {
        Ok(serde_json::to_string(&document)?)
    }
}

/// Write the metadata document into a directory
pub fn write_metadata(rocrate: &RoCrate, dir: impl AsRef<Path>) -> Result<(), CrateError> {
    let dir = dir.as_ref();
    let mut text = to_json_string(rocrate, true)?;
    text.push('\n');
    fs::write(dir.join(vocab::METADATA_ID), text)?;
    debug!("wrote {} into {}", vocab::METADATA_ID, dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_to_jsonld_has_context_and_graph() {
        let rocrate = RoCrate::new();
        let document = to_jsonld(&rocrate);

        assert_eq!(
            document.get("@context"),
            Some(&json!("https://w3id.org/ro/crate/1.1/context"))
        );
        assert_eq!(document["@graph"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_graph_order_matches_insertion_order() {
        let mut rocrate = RoCrate::new();
        rocrate.add(Entity::file("z.txt")).unwrap();
        rocrate.add(Entity::file("a.txt")).unwrap();

        let document = to_jsonld(&rocrate);
        let ids: Vec<&str> = document["@graph"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["@id"].as_str())
            .collect();

        assert_eq!(
            ids,
            [
                "ro-crate-metadata.json",
                "./",
                "ro-crate-preview.html",
                "z.txt",
                "a.txt"
            ]
        );
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let document = json!({
            "@context": "https://w3id.org/ro/crate/1.1/context",
            "@graph": [
                {
                    "@id": "ro-crate-metadata.json",
                    "@type": "CreativeWork",
                    "conformsTo": {"@id": "https://w3id.org/ro/crate/1.1"},
                    "about": {"@id": "./"}
                },
                {
                    "@id": "./",
                    "@type": "Dataset",
                    "name": "Round trip",
                    "datePublished": "2024-05-01",
                    "hasPart": [{"@id": "data/"}, {"@id": "data/observations.csv"}]
                },
                {
                    "@id": "ro-crate-preview.html",
                    "@type": "CreativeWork",
                    "about": {"@id": "./"}
                },
                {
                    "@id": "data/",
                    "@type": "Dataset"
                },
                {
                    "@id": "data/observations.csv",
                    "@type": ["File", "SoftwareSourceCode"],
                    "encodingFormat": "text/csv",
                    "author": {"@id": "https://orcid.org/0000-0001"}
                },
                {
                    "@id": "https://orcid.org/0000-0001",
                    "@type": "Person",
                    "name": "Alice"
                }
            ]
        });

        let dir = tempdir().unwrap();
        let mut input = serde_json::to_string_pretty(&document).unwrap();
        input.push('\n');
        fs::write(dir.path().join("ro-crate-metadata.json"), &input).unwrap();

        let rocrate = crate::read::read_crate(dir.path()).unwrap();
        let output = to_json_string(&rocrate, true).unwrap();

        assert_eq!(output, input.trim_end());
    }

    #[test]
    fn test_write_metadata_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();

        let mut original = RoCrate::new();
        let mut file = Entity::file("data.csv");
        file.set_property("name", "Data").unwrap();
        original.add(file).unwrap();
        write_metadata(&original, dir.path()).unwrap();

        let reread = crate::read::read_crate(dir.path()).unwrap();
        write_metadata(&reread, out.path()).unwrap();

        let first = fs::read_to_string(dir.path().join("ro-crate-metadata.json")).unwrap();
        let second = fs::read_to_string(out.path().join("ro-crate-metadata.json")).unwrap();
        assert_eq!(first, second);
    }
}
