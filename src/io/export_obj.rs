// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! OBJ exporter with companion MTL material file

use super::writer::write_atomic;
use crate::error::{ExportError, Result};
use crate::geometry::{Cube, FaceDirection};
use crate::model::{obj_material_name, MaterialRegistry, Rgb, Structure};
use crate::utils::{format_point, format_real};
use std::fmt::Write;
use std::path::Path;

/// Geometry and material text for one structure
#[derive(Debug, Clone, PartialEq)]
pub struct ObjOutput {
    pub obj: String,
    pub mtl: String,
    /// File name the `mtllib` line refers to
    pub mtl_file_name: String,
}

/// Render a structure as OBJ + MTL.
///
/// `stem` is the geometry file's own stem; the `mtllib` reference is
/// `<stem>.mtl`, independent of the structure name.
pub fn render(structure: &Structure, stem: &str) -> Result<ObjOutput> {
    let registry = MaterialRegistry::global();
    let mtl_file_name = format!("{}.mtl", stem);

    // First-seen order, keyed by OBJ material name
    let mut materials: Vec<(String, Rgb)> = Vec::new();

    let mut obj = String::new();
    writeln!(obj, "# {} - voxel structure", structure.name)?;
    writeln!(obj, "mtllib {}", mtl_file_name)?;

    for voxel in &structure.voxels {
        for corner in &Cube::from_voxel(voxel).corners {
            writeln!(obj, "v {}", format_point(corner))?;
        }
    }

    let mut current_material: Option<usize> = None;
    for (voxel_index, voxel) in structure.voxels.iter().enumerate() {
        let name = obj_material_name(&voxel.material);
        let material_index = match materials.iter().position(|(known, _)| *known == name) {
            Some(index) => index,
            None => {
                materials.push((name, registry.color(&voxel.material)));
                materials.len() - 1
            }
        };

        if current_material != Some(material_index) {
            writeln!(obj, "usemtl {}", materials[material_index].0)?;
            current_material = Some(material_index);
        }

        let base = voxel_index * 8 + 1;
        for direction in FaceDirection::ALL {
            let [a, b, c, d] = direction.corner_indices().map(|i| base + i);
            writeln!(obj, "f {} {} {} {}", a, b, c, d)?;
        }
    }

    let mut mtl = String::new();
    writeln!(mtl, "# Materials for {}", structure.name)?;
    for (name, color) in &materials {
        let [r, g, b] = color.normalized();
        let rgb = format!("{} {} {}", format_real(r), format_real(g), format_real(b));
        writeln!(mtl, "newmtl {}", name)?;
        writeln!(mtl, "Ka {}", rgb)?;
        writeln!(mtl, "Kd {}", rgb)?;
        writeln!(mtl, "Ks 0.5 0.5 0.5")?;
        writeln!(mtl, "Ns 100")?;
        writeln!(mtl)?;
    }

    Ok(ObjOutput {
        obj,
        mtl,
        mtl_file_name,
    })
}

/// Export structure to an OBJ file; the MTL file is written next to it
/// with the same stem.
pub fn export(structure: &Structure, path: &Path) -> Result<()> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            ExportError::MalformedInput(format!("output path {} has no file stem", path.display()))
        })?;

    let output = render(structure, stem)?;
    write_atomic(path, output.obj.as_bytes())?;
    write_atomic(&path.with_extension("mtl"), output.mtl.as_bytes())
}
