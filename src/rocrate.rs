//! The crate entity graph
//!
//! `RoCrate` exclusively owns the mapping from ID to entity. Adding an
//! entity whose ID is already present merges properties into the stored
//! record instead of inserting a duplicate, so there is at most one entity
//! object per ID. Insertion order is preserved for serialization.

use std::collections::HashMap;

use serde_json::Value;

use crate::entity::Entity;
use crate::error::CrateError;
use crate::vocab;

/// The root container holding the full entity graph for one RO-Crate
#[derive(Debug)]
pub struct RoCrate {
    entities: HashMap<String, Entity>,
    order: Vec<String>,
    context: Value,
}

impl RoCrate {
    /// An empty crate with the three reserved entities: metadata
    /// descriptor, root dataset, and preview
    pub fn new() -> Self {
        let mut rocrate = Self {
            entities: HashMap::new(),
            order: Vec::new(),
            context: Value::String(vocab::CONTEXT.to_string()),
        };
        rocrate.insert_or_merge(Entity::metadata());
        rocrate.insert_or_merge(Entity::root_dataset());
        rocrate.insert_or_merge(Entity::preview());
        rocrate
    }

    /// Add an entity, merging into the stored record on ID collision
    ///
    /// On collision every property of the incoming entity overwrites the
    /// stored one per key; keys the incoming entity doesn't carry are left
    /// untouched. Re-adding the same entity is a non-destructive update.
    pub fn add(&mut self, entity: Entity) -> Result<(), CrateError> {
        if entity.id().is_empty() {
            return Err(CrateError::EmptyId);
        }
        self.insert_or_merge(entity);
        Ok(())
    }

    /// Add several entities in order
    pub fn add_all(&mut self, entities: impl IntoIterator<Item = Entity>) -> Result<(), CrateError> {
        for entity in entities {
            self.add(entity)?;
        }
        Ok(())
    }

    pub(crate) fn insert_or_merge(&mut self, entity: Entity) {
        match self.entities.get_mut(entity.id()) {
            Some(existing) => existing.merge_from(&entity),
            None => {
                self.order.push(entity.id().to_string());
                self.entities.insert(entity.id().to_string(), entity);
            }
        }
    }

    /// Drop all entities and install a new context and graph (deserializer use)
    pub(crate) fn replace_graph(&mut self, context: Value, entities: Vec<Entity>) {
        self.entities.clear();
        self.order.clear();
        self.context = context;
        for entity in entities {
            self.insert_or_merge(entity);
        }
    }

    /// Exact, case-sensitive lookup by ID
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// All entity IDs in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The metadata descriptor entity, if present
    pub fn metadata(&self) -> Option<&Entity> {
        self.entities.get(vocab::METADATA_ID)
    }

    /// The preview entity, if present
    pub fn preview(&self) -> Option<&Entity> {
        self.entities.get(vocab::PREVIEW_ID)
    }

    /// The root dataset entity ("./"), if present
    pub fn root_dataset(&self) -> Option<&Entity> {
        self.entities.get(vocab::ROOT_ID)
    }

    /// The document's `@context`, preserved verbatim across read/write
    pub fn context(&self) -> &Value {
        &self.context
    }

    pub fn set_context(&mut self, context: Value) {
        self.context = context;
    }
}

impl Default for RoCrate {
    fn default() -> Self {
        Self::new()
    }
}
