//! Reading a crate from a metadata document on disk
//!
//! `initialise` validates the directory, parses the metadata document, and
//! populates the entity graph. Parsing and validation complete over a
//! temporary list before anything is committed, so a failing read never
//! leaves a partially populated crate.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::entity::EntityKind;
use crate::error::CrateError;
use crate::factory::entity_from_graph_element;
use crate::id::is_remote_id;
use crate::rocrate::RoCrate;
use crate::vocab;

impl RoCrate {
    /// Replace this crate's graph with the one described by
    /// `dir/ro-crate-metadata.json`
    ///
    /// Structural absence (missing directory, not a directory, missing
    /// metadata file) is a read error; content violating the JSON-LD
    /// contract is a metadata error. Either way the crate is unchanged.
    pub fn initialise(&mut self, dir: impl AsRef<Path>) -> Result<(), CrateError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            let reason = if dir.exists() {
                "not a directory"
            } else {
                "no such directory"
            };
            return Err(CrateError::Read {
                path: dir.display().to_string(),
                reason: reason.to_string(),
            });
        }

        let metadata_path = dir.join(vocab::METADATA_ID);
        if !metadata_path.is_file() {
            return Err(CrateError::Read {
                path: dir.display().to_string(),
                reason: format!("no {} found", vocab::METADATA_ID),
            });
        }

        let content = fs::read_to_string(&metadata_path).map_err(|e| CrateError::Read {
            path: metadata_path.display().to_string(),
            reason: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Err(CrateError::Metadata(
                "Metadata file is empty".to_string(),
            ));
        }

        let document: Value = serde_json::from_str(&content)
            .map_err(|e| CrateError::Metadata(format!("Metadata is not valid JSON: {e}")))?;
        let object = document.as_object().ok_or_else(|| {
            CrateError::Metadata("Metadata document is not a JSON object".to_string())
        })?;

        let context = object
            .get("@context")
            .cloned()
            .ok_or_else(|| CrateError::Metadata("Metadata document has no @context".to_string()))?;
        let graph = object
            .get("@graph")
            .and_then(Value::as_array)
            .ok_or_else(|| CrateError::Metadata("Metadata document has no @graph list".to_string()))?;

        // Parse every element before touching the crate
        let mut parsed = Vec::with_capacity(graph.len());
        for element in graph {
            parsed.push(entity_from_graph_element(element)?);
        }

        // The document must describe itself and its root
        if !parsed.iter().any(|e| e.id() == vocab::ROOT_ID) {
            return Err(CrateError::Metadata(
                "Graph has no root dataset entity (\"./\")".to_string(),
            ));
        }
        if !parsed.iter().any(|e| e.id() == vocab::METADATA_ID) {
            return Err(CrateError::Metadata(
                "Graph has no metadata descriptor entity".to_string(),
            ));
        }
        if !parsed.iter().any(|e| e.id() == vocab::PREVIEW_ID) {
            return Err(CrateError::Metadata(
                "Graph has no preview entity".to_string(),
            ));
        }

        // Local payload entities keep a source under the crate directory so
        // a later save can copy them out
        for entity in &mut parsed {
            match entity.kind() {
                EntityKind::File | EntityKind::Dataset if !is_remote_id(entity.id()) => {
                    entity.set_source(dir.join(entity.id().trim_end_matches('/')));
                }
                _ => {}
            }
        }

        debug!(
            entities = parsed.len(),
            "initialised crate from {}",
            dir.display()
        );
        self.replace_graph(context, parsed);
        Ok(())
    }
}

/// Read a crate from a directory containing a metadata document
pub fn read_crate(dir: impl AsRef<Path>) -> Result<RoCrate, CrateError> {
    let mut rocrate = RoCrate::new();
    rocrate.initialise(dir)?;
    Ok(rocrate)
}
