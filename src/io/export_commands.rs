// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Placement command exporter - one relative `setblock` per voxel

use super::writer::write_atomic;
use crate::error::Result;
use crate::model::{Structure, Voxel};
use std::fmt::Write;
use std::path::Path;

/// File name used for a structure's command list
pub fn file_name(structure_name: &str) -> String {
    format!("place_{}.mcfunction", structure_name)
}

/// Render a structure as a function file of `setblock` commands
pub fn render(structure: &Structure) -> Result<String> {
    let dims = &structure.dimensions;
    let mut out = String::new();

    writeln!(out, "# {}", structure.name)?;
    writeln!(out, "# {}", structure.description.as_deref().unwrap_or_default())?;
    writeln!(out, "# Dimensions: ({}, {}, {})", dims.x, dims.y, dims.z)?;
    writeln!(out, "# Block count: {}", structure.voxel_count())?;
    writeln!(out)?;

    for voxel in &structure.voxels {
        writeln!(
            out,
            "setblock ~{} ~{} ~{} {}{}",
            voxel.x(),
            voxel.y(),
            voxel.z(),
            voxel.material,
            block_state(voxel)
        )?;
    }

    Ok(out)
}

/// `[key=value,...]` in document order, or nothing when there are no properties
fn block_state(voxel: &Voxel) -> String {
    match &voxel.properties {
        Some(properties) if !properties.is_empty() => {
            let pairs: Vec<String> = properties
                .iter()
                .map(|(key, value)| match value {
                    serde_json::Value::String(s) => format!("{}={}", key, s),
                    other => format!("{}={}", key, other),
                })
                .collect();
            format!("[{}]", pairs.join(","))
        }
        _ => String::new(),
    }
}

/// Export structure to a command file
pub fn export(structure: &Structure, path: &Path) -> Result<()> {
    let content = render(structure)?;
    write_atomic(path, content.as_bytes())
}
