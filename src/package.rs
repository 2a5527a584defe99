//! Materializing a crate to disk
//!
//! `save` copies payload data into an output directory (or a zip archive)
//! and writes the metadata document. Dataset directories and every
//! directory implied by a file destination are created before any file
//! payload is copied. `convert` is the inverse bootstrap: walk a plain
//! directory and register its contents as crate entities.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::entity::{Entity, EntityKind};
use crate::error::CrateError;
use crate::preview::render_preview;
use crate::rocrate::RoCrate;
use crate::serialize::write_metadata;
use crate::vocab;

impl RoCrate {
    /// Materialize the crate under `out_dir`, or as `<out_dir>.zip`
    ///
    /// Payloads are copied, never moved; the graph is not mutated. An
    /// already-existing file destination is an error rather than a silent
    /// overwrite. With `zip` the assembled tree is archived and the loose
    /// staging directory removed.
    pub fn save(&self, out_dir: impl AsRef<Path>, zip: bool) -> Result<(), CrateError> {
        let out_dir = out_dir.as_ref();
        fs::create_dir_all(out_dir)?;

        // Datasets first: every destination directory must exist before
        // any file payload copy is attempted
        for entity in self.entities() {
            let Some(rel) = entity.payload_destination() else {
                continue;
            };
            match entity.kind() {
                EntityKind::Dataset => fs::create_dir_all(out_dir.join(&rel))?,
                EntityKind::File => {
                    if let Some(parent) = rel.parent() {
                        if !parent.as_os_str().is_empty() {
                            fs::create_dir_all(out_dir.join(parent))?;
                        }
                    }
                }
                _ => {}
            }
        }

        for entity in self.entities() {
            if entity.kind() != EntityKind::File {
                continue;
            }
            let Some(rel) = entity.payload_destination() else {
                continue;
            };
            let Some(source) = entity.source() else {
                debug!("file entity {} has no source, skipping payload", entity.id());
                continue;
            };
            let dest = out_dir.join(&rel);
            if dest.exists() {
                return Err(CrateError::DestinationExists(dest));
            }
            fs::copy(source, &dest)?;
            debug!("copied {} to {}", source.display(), dest.display());
        }

        write_metadata(self, out_dir)?;

        if zip {
            let archive_path = zip_directory(out_dir)?;
            fs::remove_dir_all(out_dir)?;
            info!("packaged crate into {}", archive_path.display());
        } else {
            info!("packaged crate into {}", out_dir.display());
        }
        Ok(())
    }

    /// Turn an arbitrary directory into a crate in place
    ///
    /// Walks the tree rooted at `dir`, registers a dataset entity for every
    /// directory and a file entity for every file (the metadata and preview
    /// documents themselves excepted), links them from the root dataset,
    /// then writes fresh metadata and preview documents into `dir`.
    pub fn convert(&mut self, dir: impl AsRef<Path>) -> Result<(), CrateError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CrateError::Read {
                path: dir.display().to_string(),
                reason: "no such directory".to_string(),
            });
        }

        let mut part_ids = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            let rel = entry
                .path()
                .strip_prefix(dir)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let rel = rel.to_string_lossy().replace('\\', "/");
            if rel == vocab::METADATA_ID || rel == vocab::PREVIEW_ID {
                continue;
            }

            let mut entity = if entry.file_type().is_dir() {
                Entity::dataset(&rel)
            } else {
                Entity::file(&rel)
            };
            entity.set_source(entry.path());
            part_ids.push(entity.id().to_string());
            self.add(entity)?;
        }

        if let Some(root) = self.get_mut(vocab::ROOT_ID) {
            link_parts(root, &part_ids)?;
        }

        write_metadata(self, dir)?;
        fs::write(dir.join(vocab::PREVIEW_ID), render_preview(self))?;
        info!(
            entities = part_ids.len(),
            "converted {} into a crate",
            dir.display()
        );
        Ok(())
    }
}

/// Add `{"@id": ...}` references to the root dataset's hasPart,
/// skipping references already present
fn link_parts(root: &mut Entity, part_ids: &[String]) -> Result<(), CrateError> {
    if part_ids.is_empty() {
        return Ok(());
    }
    let mut has_part: Vec<Value> = match root.property("hasPart") {
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
        None => Vec::new(),
    };
    for id in part_ids {
        let reference = json!({"@id": id});
        if !has_part.contains(&reference) {
            has_part.push(reference);
        }
    }
    root.set_property("hasPart", Value::Array(has_part))
}

/// Compress a directory tree into `<dir>.zip`, preserving relative paths
fn zip_directory(dir: &Path) -> Result<PathBuf, CrateError> {
    let archive_path = PathBuf::from(format!("{}.zip", dir.display()));
    let file = fs::File::create(&archive_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let name = rel.to_string_lossy().replace('\\', "/");
        if entry.file_type().is_dir() {
            writer.add_directory(format!("{name}/"), options)?;
        } else {
            writer.start_file(name, options)?;
            writer.write_all(&fs::read(entry.path())?)?;
        }
    }

    writer.finish()?;
    Ok(archive_path)
}
