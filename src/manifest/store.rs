//! Backing-document persistence
//!
//! The manifest on disk is shared mutable state with no locking discipline.
//! `persist_partial` is read-fresh, merge, write-whole: the patch is overlaid
//! onto the document as it currently exists on disk, not onto any in-memory
//! view, so keys this crate never modeled survive a rewrite. Two overlapping
//! updates can still lose the first writer's patch, and a `create` racing an
//! update can resurrect overwritten defaults; that window is accepted. The
//! whole-file write goes through a temp file and rename, so no reader ever
//! observes a torn document.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Map, Value};

/// Errors from reading or writing the backing document
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Manifest root is not a JSON object")]
    NotAnObject,
}

/// Read and parse the whole backing document
pub fn read_document(path: &Path) -> Result<Map<String, Value>, StoreError> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

/// Write the whole backing document (temp file + rename)
pub fn write_document(path: &Path, document: &Map<String, Value>) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(document)?;

    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"))?;

    let temp_path = parent.join(format!(".{}.tmp", uuid::Uuid::new_v4()));
    fs::write(&temp_path, &json)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Overlay a patch onto the document as stored on disk, then write it back.
///
/// Last write wins per patch key; every other key is preserved verbatim.
pub fn persist_partial(path: &Path, patch: &Map<String, Value>) -> Result<(), StoreError> {
    let mut document = read_document(path)?;
    for (key, value) in patch {
        document.insert(key.clone(), value.clone());
    }
    write_document(path, &document)
}
