// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! DXF exporter - one `3DFACE` entity per voxel face, layered by material

use super::writer::write_atomic;
use crate::error::{ExportError, Result};
use crate::geometry::{Cube, Face, FaceDirection};
use crate::model::Structure;
use crate::utils::format_real;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;
use std::str::FromStr;

/// Which voxel faces become `3DFACE` entities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireframeFaces {
    /// Only the -Y face of each voxel (a floor plan of the footprint)
    #[default]
    Bottom,
    /// All six faces
    All,
}

impl WireframeFaces {
    pub fn directions(self) -> &'static [FaceDirection] {
        match self {
            WireframeFaces::Bottom => &[FaceDirection::Bottom],
            WireframeFaces::All => &FaceDirection::ALL,
        }
    }
}

impl FromStr for WireframeFaces {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bottom" => Ok(WireframeFaces::Bottom),
            "all" => Ok(WireframeFaces::All),
            other => Err(ExportError::MalformedInput(format!(
                "unknown wireframe face selection `{}` (expected bottom or all)",
                other
            ))),
        }
    }
}

/// Render a structure as DXF text
pub fn render(structure: &Structure, faces: WireframeFaces) -> Result<String> {
    let mut out = String::new();

    out.push_str("0\nSECTION\n2\nHEADER\n0\nENDSEC\n");
    out.push_str("0\nSECTION\n2\nENTITIES\n");

    for voxel in &structure.voxels {
        let cube = Cube::from_voxel(voxel);
        for direction in faces.directions() {
            write_face(&mut out, &voxel.material, &cube.face(*direction))?;
        }
    }

    out.push_str("0\nENDSEC\n0\nEOF\n");
    Ok(out)
}

fn write_face(out: &mut String, layer: &str, face: &Face) -> std::fmt::Result {
    writeln!(out, "0\n3DFACE")?;
    writeln!(out, "8\n{}", layer)?;
    // Corner i uses group codes 1i / 2i / 3i for x / y / z
    for (i, corner) in face.corners.iter().enumerate() {
        writeln!(
            out,
            "1{i}\n{}\n2{i}\n{}\n3{i}\n{}",
            format_real(corner.x),
            format_real(corner.y),
            format_real(corner.z),
            i = i
        )?;
    }
    Ok(())
}

/// Export structure to a DXF file
pub fn export(structure: &Structure, path: &Path, faces: WireframeFaces) -> Result<()> {
    let content = render(structure, faces)?;
    write_atomic(path, content.as_bytes())
}
