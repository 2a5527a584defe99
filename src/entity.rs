//! Entity model for the crate graph
//!
//! An entity is one identified node in the metadata graph: a stable `@id`,
//! a kind tag, and an insertion-ordered property map. The property map
//! holds `@type` and everything else from the entity's JSON-LD fragment;
//! `@id` lives outside the map and is immutable after construction.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::CrateError;
use crate::id::{canonical_dataset_id, canonical_file_id, is_remote_id};
use crate::vocab;

/// Closed set of entity variants
///
/// Unknown `@type` tags resolve to `Contextual`; the raw type list is kept
/// in the properties so nothing is dropped on round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Payload is a single regular file
    File,
    /// Payload is a directory
    Dataset,
    /// Pure metadata node, no payload
    Person,
    /// The crate's self-descriptive entity
    Metadata,
    /// The crate's HTML preview entity
    Preview,
    /// Generic fallback for every other node
    Contextual,
}

/// A single node in the crate graph
#[derive(Debug, Clone)]
pub struct Entity {
    id: String,
    kind: EntityKind,
    properties: Map<String, Value>,
    source: Option<PathBuf>,
    dest_path: Option<PathBuf>,
}

impl Entity {
    fn with_default_type(id: String, kind: EntityKind, type_value: Value) -> Self {
        let mut properties = Map::new();
        properties.insert("@type".to_string(), type_value);
        Self {
            id,
            kind,
            properties,
            source: None,
            dest_path: None,
        }
    }

    /// A file entity; the ID is canonicalized from the source string
    pub fn file(source: impl AsRef<str>) -> Self {
        let source = source.as_ref();
        let mut entity =
            Self::with_default_type(canonical_file_id(source), EntityKind::File, json!("File"));
        entity.source = Some(PathBuf::from(source));
        entity
    }

    /// A dataset entity; local IDs get a trailing slash, remote URIs don't
    pub fn dataset(source: impl AsRef<str>) -> Self {
        let source = source.as_ref();
        let mut entity = Self::with_default_type(
            canonical_dataset_id(source),
            EntityKind::Dataset,
            json!("Dataset"),
        );
        entity.source = Some(PathBuf::from(source));
        entity
    }

    /// A person entity; the ID is taken as given (usually an ORCID or fragment)
    pub fn person(id: impl Into<String>) -> Self {
        Self::with_default_type(id.into(), EntityKind::Person, json!("Person"))
    }

    /// The root dataset entity ("./")
    pub fn root_dataset() -> Self {
        Self::with_default_type(
            vocab::ROOT_ID.to_string(),
            EntityKind::Dataset,
            json!("Dataset"),
        )
    }

    /// The crate's metadata descriptor entity
    pub fn metadata() -> Self {
        let mut entity = Self::with_default_type(
            vocab::METADATA_ID.to_string(),
            EntityKind::Metadata,
            json!("CreativeWork"),
        );
        entity
            .properties
            .insert("conformsTo".to_string(), json!({"@id": vocab::PROFILE}));
        entity
            .properties
            .insert("about".to_string(), json!({"@id": vocab::ROOT_ID}));
        entity
    }

    /// The crate's HTML preview entity
    pub fn preview() -> Self {
        let mut entity = Self::with_default_type(
            vocab::PREVIEW_ID.to_string(),
            EntityKind::Preview,
            json!("CreativeWork"),
        );
        entity
            .properties
            .insert("about".to_string(), json!({"@id": vocab::ROOT_ID}));
        entity
    }

    /// A generic contextual entity with no default type
    pub fn contextual(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Contextual,
            properties: Map::new(),
            source: None,
            dest_path: None,
        }
    }

    /// Construct from a pre-built property map (factory use)
    pub(crate) fn from_parts(id: String, kind: EntityKind, properties: Map<String, Value>) -> Self {
        Self {
            id,
            kind,
            properties,
            source: None,
            dest_path: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Filesystem path the payload is read from at write time
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: impl Into<PathBuf>) {
        self.source = Some(source.into());
    }

    /// Relative destination overriding the ID-derived path at write time
    pub fn dest_path(&self) -> Option<&Path> {
        self.dest_path.as_deref()
    }

    pub fn set_dest_path(&mut self, dest_path: impl Into<PathBuf>) {
        self.dest_path = Some(dest_path.into());
    }

    /// Insert or overwrite a property
    ///
    /// New keys keep first-seen order; overwritten keys keep their original
    /// position. `@id` is rejected: identity never changes after construction.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), CrateError> {
        let key = key.into();
        if key == "@id" {
            return Err(CrateError::ImmutableId);
        }
        self.properties.insert(key, value.into());
        Ok(())
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// The entity's `@type` as a list of type names
    pub fn types(&self) -> Vec<String> {
        match self.properties.get("@type") {
            Some(Value::String(t)) => vec![t.clone()],
            Some(Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => vec![],
        }
    }

    /// Copy every property from `other` onto this entity
    ///
    /// Incoming values overwrite per key; keys absent from `other` are left
    /// untouched. The stored entity's identity is retained.
    pub(crate) fn merge_from(&mut self, other: &Entity) {
        for (key, value) in &other.properties {
            self.properties.insert(key.clone(), value.clone());
        }
        if other.source.is_some() {
            self.source.clone_from(&other.source);
        }
        if other.dest_path.is_some() {
            self.dest_path.clone_from(&other.dest_path);
        }
    }

    /// The entity's JSON-LD fragment: `@id` first, then all properties in
    /// insertion order
    pub fn to_json(&self) -> Value {
        let mut out = Map::with_capacity(self.properties.len() + 1);
        out.insert("@id".to_string(), Value::String(self.id.clone()));
        for (key, value) in &self.properties {
            out.insert(key.clone(), value.clone());
        }
        Value::Object(out)
    }

    /// Relative destination under an output directory at write time,
    /// or None for entities with no local payload
    pub(crate) fn payload_destination(&self) -> Option<PathBuf> {
        if let Some(dest) = &self.dest_path {
            return Some(dest.clone());
        }
        if is_remote_id(&self.id) {
            return None;
        }
        match self.kind {
            EntityKind::File => Some(PathBuf::from(&self.id)),
            EntityKind::Dataset => Some(PathBuf::from(self.id.trim_end_matches('/'))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_has_no_trailing_slash() {
        let file = Entity::file("my-test-file.txt");
        assert_eq!(file.id(), "my-test-file.txt");
        assert_eq!(file.kind(), EntityKind::File);
        assert_eq!(file.property("@type"), Some(&json!("File")));
    }

    #[test]
    fn test_dataset_id_ends_with_slash() {
        let dataset = Entity::dataset("my-data-dir");
        assert_eq!(dataset.id(), "my-data-dir/");
        assert_eq!(dataset.kind(), EntityKind::Dataset);
    }

    #[test]
    fn test_dataset_id_remote_source_untouched() {
        let dataset = Entity::dataset("https://workflowhub.eu/workflows/471?version=1");
        assert_eq!(dataset.id(), "https://workflowhub.eu/workflows/471?version=1");
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata = Entity::metadata();
        assert_eq!(metadata.id(), "ro-crate-metadata.json");
        assert_eq!(metadata.property("@type"), Some(&json!("CreativeWork")));
        assert_eq!(
            metadata.property("about"),
            Some(&json!({"@id": "./"}))
        );
        assert_eq!(
            metadata.property("conformsTo"),
            Some(&json!({"@id": "https://w3id.org/ro/crate/1.1"}))
        );
    }

    #[test]
    fn test_set_property_preserves_key_order() {
        let mut entity = Entity::person("#alice");
        entity.set_property("name", "Alice").unwrap();
        entity.set_property("affiliation", "Uni").unwrap();
        // Overwriting keeps the original position
        entity.set_property("name", "Alice Smith").unwrap();

        let keys: Vec<&String> = entity.properties().keys().collect();
        assert_eq!(keys, ["@type", "name", "affiliation"]);
        assert_eq!(entity.property("name"), Some(&json!("Alice Smith")));
    }

    #[test]
    fn test_set_property_rejects_id() {
        let mut entity = Entity::person("#alice");
        let result = entity.set_property("@id", "#bob");
        assert!(matches!(result, Err(CrateError::ImmutableId)));
        assert_eq!(entity.id(), "#alice");
    }

    #[test]
    fn test_to_json_puts_id_first() {
        let mut entity = Entity::file("data.csv");
        entity.set_property("name", "Data file").unwrap();

        let json = entity.to_json();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["@id", "@type", "name"]);
    }

    #[test]
    fn test_merge_from_overwrites_per_key() {
        let mut stored = Entity::file("file.txt");
        stored.set_property("name", "original").unwrap();
        stored.set_property("encodingFormat", "text/plain").unwrap();

        let mut incoming = Entity::file("file.txt");
        incoming.set_property("name", "updated").unwrap();

        stored.merge_from(&incoming);

        assert_eq!(stored.property("name"), Some(&json!("updated")));
        // Keys absent from the incoming entity stay
        assert_eq!(
            stored.property("encodingFormat"),
            Some(&json!("text/plain"))
        );
    }

    #[test]
    fn test_types_compound() {
        let mut entity = Entity::file("alignment.knime");
        entity
            .set_property("@type", json!(["File", "SoftwareSourceCode"]))
            .unwrap();
        assert_eq!(entity.types(), ["File", "SoftwareSourceCode"]);
    }

    #[test]
    fn test_payload_destination() {
        let file = Entity::file("sub/data.csv");
        assert_eq!(file.payload_destination(), Some(PathBuf::from("sub/data.csv")));

        let dataset = Entity::dataset("sub");
        assert_eq!(dataset.payload_destination(), Some(PathBuf::from("sub")));

        let remote = Entity::dataset("https://example.org/data");
        assert_eq!(remote.payload_destination(), None);

        let person = Entity::person("#alice");
        assert_eq!(person.payload_destination(), None);

        let mut redirected = Entity::file("data.csv");
        redirected.set_dest_path("ext/data.csv");
        assert_eq!(
            redirected.payload_destination(),
            Some(PathBuf::from("ext/data.csv"))
        );
    }
}
