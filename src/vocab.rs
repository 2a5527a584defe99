//! Vocabulary constants for the RO-Crate packaging model
//!
//! Reserved entity identifiers and the crate profile/context URLs.

/// Standard metadata descriptor filename and entity ID
pub const METADATA_ID: &str = "ro-crate-metadata.json";

/// Standard preview document filename and entity ID
pub const PREVIEW_ID: &str = "ro-crate-preview.html";

/// Root dataset entity ID
pub const ROOT_ID: &str = "./";

/// RO-Crate JSON-LD context URL
pub const CONTEXT: &str = "https://w3id.org/ro/crate/1.1/context";

/// RO-Crate profile URL (value of the descriptor's conformsTo)
pub const PROFILE: &str = "https://w3id.org/ro/crate/1.1";
