//! RO-Crate Packaging Library
//!
//! This library implements the RO-Crate packaging model: an in-memory
//! graph of typed entities that can be read from a JSON-LD metadata
//! document, mutated, re-serialized, and materialized to disk as a
//! directory or zip archive containing the referenced payload files.
//!
//! # Overview
//!
//! An RO-Crate is a directory with a `ro-crate-metadata.json` document
//! describing its contents as a flat `@graph` of entities. This library
//! covers:
//!
//! 1. Reading and validating a metadata document into an entity graph
//! 2. Mutating the graph (add entities, set properties, merge on ID)
//! 3. Serializing the graph back out with stable ordering
//! 4. Packaging payload files into an output directory or archive
//! 5. Bootstrapping a crate from an arbitrary directory tree
//!
//! # Usage
//!
//! ## Read, inspect, and package an existing crate
//!
//! ```ignore
//! use rocrate_package::read_crate;
//!
//! let rocrate = read_crate("path/to/crate")?;
//! for entity in rocrate.entities() {
//!     println!("{}", entity.id());
//! }
//! rocrate.save("packaged", true)?; // writes packaged.zip
//! ```
//!
//! ## Build a crate from scratch
//!
//! ```ignore
//! use rocrate_package::{Entity, RoCrate};
//!
//! let mut rocrate = RoCrate::new();
//! let mut file = Entity::file("data/observations.csv");
//! file.set_property("name", "Observations")?;
//! rocrate.add(file)?;
//! rocrate.save("out", false)?;
//! ```
//!
//! ## Turn a plain directory into a crate
//!
//! ```ignore
//! use rocrate_package::RoCrate;
//!
//! let mut rocrate = RoCrate::new();
//! rocrate.convert("path/to/data")?;
//! ```

pub mod entity;
pub mod error;
pub mod factory;
pub mod id;
pub mod package;
pub mod preview;
pub mod read;
pub mod rocrate;
pub mod serialize;
pub mod vocab;

// Re-export main types for convenience
pub use crate::entity::{Entity, EntityKind};
pub use crate::error::CrateError;
pub use crate::factory::entity_from_graph_element;
pub use crate::preview::render_preview;
pub use crate::read::read_crate;
pub use crate::rocrate::RoCrate;
pub use crate::serialize::{to_json_string, to_jsonld, write_metadata};
