// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL exporter - two facets per voxel face, no shared vertices

use super::writer::write_atomic;
use crate::error::{ExportError, Result};
use crate::geometry::Cube;
use crate::model::Structure;
use crate::utils::{format_point, format_vector};
use nalgebra::{Point3, Vector3};
use std::fmt::Write;
use std::path::Path;

/// One STL triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub normal: Vector3<f64>,
    pub vertices: [Point3<f64>; 3],
}

/// Triangulate every face of every voxel, in structure order
pub fn facets(structure: &Structure) -> Vec<Facet> {
    let mut facets = Vec::with_capacity(structure.voxel_count() * 12);
    for voxel in &structure.voxels {
        for face in Cube::from_voxel(voxel).faces() {
            for vertices in face.triangles() {
                facets.push(Facet {
                    normal: face.normal,
                    vertices,
                });
            }
        }
    }
    facets
}

/// Render a structure as ASCII STL
pub fn render_ascii(structure: &Structure) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "solid {}", structure.name)?;

    for facet in facets(structure) {
        writeln!(out, "  facet normal {}", format_vector(&facet.normal))?;
        writeln!(out, "    outer loop")?;
        for vertex in &facet.vertices {
            writeln!(out, "      vertex {}", format_point(vertex))?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }

    writeln!(out, "endsolid {}", structure.name)?;

    Ok(out)
}

/// Render a structure as binary STL
pub fn render_binary(structure: &Structure) -> Result<Vec<u8>> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let to_vertex = |p: &Point3<f64>| StlVertex::new([p.x as f32, p.y as f32, p.z as f32]);

    let triangles: Vec<StlTriangle> = facets(structure)
        .iter()
        .map(|facet| StlTriangle {
            normal: Normal::new([
                facet.normal.x as f32,
                facet.normal.y as f32,
                facet.normal.z as f32,
            ]),
            vertices: [
                to_vertex(&facet.vertices[0]),
                to_vertex(&facet.vertices[1]),
                to_vertex(&facet.vertices[2]),
            ],
        })
        .collect();

    let mut bytes = Vec::with_capacity(84 + triangles.len() * 50);
    stl_io::write_stl(&mut bytes, triangles.iter()).map_err(|e| ExportError::encode("stl", e))?;

    Ok(bytes)
}

/// Export structure to an STL file
pub fn export(structure: &Structure, path: &Path, binary: bool) -> Result<()> {
    if binary {
        write_atomic(path, &render_binary(structure)?)
    } else {
        write_atomic(path, render_ascii(structure)?.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dimensions, Voxel};

    fn single_block() -> Structure {
        Structure::new("single_block", Dimensions::new(1, 1, 1))
            .with_voxel(Voxel::new([0, 0, 0], "test:stone"))
    }

    #[test]
    fn test_twelve_facets_per_voxel() {
        let structure = single_block().with_voxel(Voxel::new([0, 1, 0], "test:stone"));
        assert_eq!(facets(&structure).len(), 24);
    }

    #[test]
    fn test_ascii_framing() -> Result<()> {
        let stl = render_ascii(&single_block())?;
        let lines: Vec<&str> = stl.lines().collect();

        assert_eq!(lines.first(), Some(&"solid single_block"));
        assert_eq!(lines.last(), Some(&"endsolid single_block"));
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.trim_start().starts_with("facet normal"))
                .count(),
            12
        );
        assert_eq!(lines.iter().filter(|l| l.trim() == "endfacet").count(), 12);
        Ok(())
    }

    #[test]
    fn test_first_facet_text() -> Result<()> {
        let stl = render_ascii(&single_block())?;
        let expected = "solid single_block\n  facet normal 0 0 -1\n    outer loop\n      \
                        vertex 1 0 0\n      vertex 0 0 0\n      vertex 0 1 0\n    endloop\n  endfacet\n";
        assert!(stl.starts_with(expected), "{}", stl);
        Ok(())
    }

    #[test]
    fn test_empty_structure_is_framing_only() -> Result<()> {
        let stl = render_ascii(&Structure::new("empty", Dimensions::default()))?;
        assert_eq!(stl, "solid empty\nendsolid empty\n");
        Ok(())
    }

    #[test]
    fn test_binary_layout() -> Result<()> {
        let bytes = render_binary(&single_block())?;
        assert_eq!(bytes.len(), 84 + 12 * 50);
        assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 12);
        Ok(())
    }
}
