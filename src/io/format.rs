// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export format dispatch

use super::export_dxf::WireframeFaces;
use super::{export_commands, export_dxf, export_obj, export_stl, export_svg};
use crate::error::{ExportError, Result};
use crate::model::Structure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// DXF quad faces, layered by material
    #[serde(rename = "dxf")]
    Wireframe,
    /// STL triangles with normals
    #[serde(rename = "stl")]
    TriangulatedMesh,
    /// OBJ quads grouped by material, plus MTL
    #[serde(rename = "obj")]
    GroupedPolygonMesh,
    /// SVG top-down plan
    #[serde(rename = "svg")]
    RasterProjection,
    /// `setblock` placement commands
    #[serde(rename = "mcfunction")]
    Commands,
}

impl ExportFormat {
    /// Formats produced when none are requested
    pub const DEFAULT: [ExportFormat; 4] = [
        ExportFormat::Wireframe,
        ExportFormat::TriangulatedMesh,
        ExportFormat::GroupedPolygonMesh,
        ExportFormat::RasterProjection,
    ];

    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Wireframe,
        ExportFormat::TriangulatedMesh,
        ExportFormat::GroupedPolygonMesh,
        ExportFormat::RasterProjection,
        ExportFormat::Commands,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Wireframe => "dxf",
            ExportFormat::TriangulatedMesh => "stl",
            ExportFormat::GroupedPolygonMesh => "obj",
            ExportFormat::RasterProjection => "svg",
            ExportFormat::Commands => "mcfunction",
        }
    }

    /// Tools that read the format
    pub fn description(self) -> &'static str {
        match self {
            ExportFormat::Wireframe => "AutoCAD, LibreCAD",
            ExportFormat::TriangulatedMesh => "3D printing, FreeCAD, Cura",
            ExportFormat::GroupedPolygonMesh => "Blender, Maya, 3ds Max (with .mtl)",
            ExportFormat::RasterProjection => "Vector graphics, 2D top-down view",
            ExportFormat::Commands => "Minecraft function file",
        }
    }

    /// Primary file name for an artifact with the given stem
    pub fn file_name(self, stem: &str) -> String {
        match self {
            ExportFormat::Commands => export_commands::file_name(stem),
            _ => format!("{}.{}", stem, self.extension()),
        }
    }

    /// Serialize a structure entirely in memory.
    ///
    /// Returns every file the format produces, named from `stem`.
    pub fn render(
        self,
        structure: &Structure,
        stem: &str,
        options: &ExportOptions,
    ) -> Result<Vec<Artifact>> {
        let file_name = self.file_name(stem);
        let artifacts = match self {
            ExportFormat::Wireframe => vec![Artifact::new(
                file_name,
                export_dxf::render(structure, options.wireframe_faces)?,
            )],
            ExportFormat::TriangulatedMesh => {
                let bytes = if options.stl_binary {
                    export_stl::render_binary(structure)?
                } else {
                    export_stl::render_ascii(structure)?.into_bytes()
                };
                vec![Artifact::new(file_name, bytes)]
            }
            ExportFormat::GroupedPolygonMesh => {
                let output = export_obj::render(structure, stem)?;
                vec![
                    Artifact::new(file_name, output.obj),
                    Artifact::new(output.mtl_file_name, output.mtl),
                ]
            }
            ExportFormat::RasterProjection => {
                vec![Artifact::new(file_name, export_svg::render(structure)?)]
            }
            ExportFormat::Commands => {
                vec![Artifact::new(file_name, export_commands::render(structure)?)]
            }
        };
        Ok(artifacts)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "dxf" | "wireframe" => Ok(ExportFormat::Wireframe),
            "stl" | "mesh" => Ok(ExportFormat::TriangulatedMesh),
            "obj" => Ok(ExportFormat::GroupedPolygonMesh),
            "svg" | "plan" => Ok(ExportFormat::RasterProjection),
            "mcfunction" | "commands" => Ok(ExportFormat::Commands),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Format-specific switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    #[serde(default)]
    pub wireframe_faces: WireframeFaces,
    /// Write STL as binary instead of ASCII
    #[serde(default)]
    pub stl_binary: bool,
}

/// One serialized file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dimensions, Voxel};

    #[test]
    fn test_parse_formats() {
        assert_eq!("STL".parse::<ExportFormat>().unwrap(), ExportFormat::TriangulatedMesh);
        assert_eq!(".svg".parse::<ExportFormat>().unwrap(), ExportFormat::RasterProjection);
        assert!(matches!(
            "step".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_obj_renders_two_artifacts() -> Result<()> {
        let structure = Structure::new("gate", Dimensions::new(1, 1, 1))
            .with_voxel(Voxel::new([0, 0, 0], "minecraft:stone"));
        let artifacts =
            ExportFormat::GroupedPolygonMesh.render(&structure, "gate", &ExportOptions::default())?;

        let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["gate.obj", "gate.mtl"]);
        Ok(())
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportFormat::Wireframe.file_name("cnot"), "cnot.dxf");
        assert_eq!(ExportFormat::Commands.file_name("cnot"), "place_cnot.mcfunction");
    }

    #[test]
    fn test_options_from_toml() {
        let options: ExportOptions = toml::from_str("wireframe_faces = \"all\"").unwrap();
        assert_eq!(options.wireframe_faces, WireframeFaces::All);
        assert!(!options.stl_binary);
    }
}
