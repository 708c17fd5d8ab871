// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Structure document importer

use crate::error::{ExportError, Result};
use crate::model::{Structure, StructureSet};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A structure entry that could not be decoded
#[derive(Debug)]
pub struct RejectedStructure {
    /// Position in the document's structure list
    pub index: usize,
    pub name: Option<String>,
    pub error: ExportError,
}

/// Decoded structures plus the entries that were skipped
#[derive(Debug, Default)]
pub struct ParsedDocument {
    pub set: StructureSet,
    pub rejected: Vec<RejectedStructure>,
}

impl ParsedDocument {
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Decode a structure document.
///
/// Accepts the full document (`{"circuits": [...]}` or `{"structures": [...]}`),
/// a bare array of structures, or a single structure object. Each structure
/// is decoded on its own; a malformed entry is rejected without discarding
/// its siblings. Only a document that is not JSON, or has no recognizable
/// shape, is an error.
pub fn parse_structures(source: &str) -> Result<ParsedDocument> {
    let value: Value = serde_json::from_str(source)?;

    let (mut set, entries) = match value {
        Value::Array(entries) => (StructureSet::default(), entries),
        Value::Object(mut map) => match take_structure_list(&mut map) {
            Some(Value::Array(entries)) => {
                let metadata: StructureSet = serde_json::from_value(Value::Object(map))?;
                (metadata, entries)
            }
            Some(_) => {
                return Err(ExportError::MalformedInput(
                    "structure list must be an array".to_string(),
                ))
            }
            None => (StructureSet::default(), vec![Value::Object(map)]),
        },
        _ => {
            return Err(ExportError::MalformedInput(
                "expected a structure document, array or object".to_string(),
            ))
        }
    };

    let mut rejected = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned);

        match serde_json::from_value::<Structure>(entry) {
            Ok(structure) => {
                note_inconsistencies(&structure);
                set.structures.push(structure);
            }
            Err(err) => {
                let label = name.clone().unwrap_or_else(|| format!("#{}", index));
                tracing::warn!(structure = %label, error = %err, "skipping malformed structure");
                rejected.push(RejectedStructure {
                    index,
                    name,
                    error: ExportError::MalformedInput(format!("structure {}: {}", label, err)),
                });
            }
        }
    }

    Ok(ParsedDocument { set, rejected })
}

fn take_structure_list(map: &mut Map<String, Value>) -> Option<Value> {
    map.remove("circuits").or_else(|| map.remove("structures"))
}

/// Read and decode a structure file
pub fn import_structure_file(path: impl AsRef<Path>) -> Result<ParsedDocument> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_structures(&source)
}

/// Expand inputs into structure files. Directories are searched
/// recursively for `.json` files, sorted by path.
pub fn discover_structure_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(ExportError::Read {
                path: input.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            });
        }
    }

    Ok(files)
}

/// Declared metadata is informational only; mismatches are traced, not fatal
fn note_inconsistencies(structure: &Structure) {
    if let Some(count) = structure.block_count {
        if count != structure.voxel_count() {
            tracing::debug!(
                structure = %structure.name,
                declared = count,
                actual = structure.voxel_count(),
                "block_count differs from voxel count"
            );
        }
    }

    if let Some(bounds) = structure.bounds() {
        if !bounds.fits_within(&structure.dimensions) {
            tracing::debug!(
                structure = %structure.name,
                dimensions = ?structure.dimensions,
                min = ?bounds.min,
                max = ?bounds.max,
                "voxels extend beyond declared dimensions"
            );
        }
    }
}
