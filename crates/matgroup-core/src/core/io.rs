//! Reading entry files and writing structure-group documents.
//!
//! Entries are exchanged as JSON: an array of objects carrying an id and an
//! elemental composition. Documents are written back as pretty-printed JSON
//! so they can be inspected or loaded into a document store downstream.

use crate::core::models::composition::Composition;
use crate::core::models::entry::StructureEntry;
use crate::core::models::ids::EntryId;
use crate::core::models::structure_group::StructureGroupDoc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// On-disk shape of one ungrouped entry.
#[derive(Debug, Serialize, Deserialize)]
struct EntryRecord {
    entry_id: EntryId,
    composition: Composition,
}

/// Reads a JSON entry file into structure entries.
///
/// The composition doubles as the structural payload, which is what the
/// compositional fallback matcher consumes; callers with a geometric backend
/// construct their entries directly instead of going through this reader.
pub fn read_entries(path: &Path) -> Result<Vec<StructureEntry<Composition>>, IoError> {
    let content = std::fs::read_to_string(path).map_err(|e| IoError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let records: Vec<EntryRecord> = serde_json::from_str(&content).map_err(|e| IoError::Json {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    Ok(records
        .into_iter()
        .map(|r| StructureEntry::new(r.entry_id, r.composition.clone(), r.composition))
        .collect())
}

/// Writes structure-group documents as pretty-printed JSON.
pub fn write_documents(documents: &[StructureGroupDoc], path: &Path) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(documents).map_err(|e| IoError::Json {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| IoError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}
