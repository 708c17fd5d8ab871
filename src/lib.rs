// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! voxcad
//!
//! Exports voxel structures (named sets of unit cells tagged with material
//! ids) to CAD formats: DXF faces, STL triangles, OBJ/MTL material-grouped
//! quads and an SVG top-down plan. Every format is built from the same
//! per-voxel cube geometry.

pub mod cli;
pub mod config;
pub mod error;
pub mod exporter;
pub mod geometry;
pub mod io;
pub mod model;
pub mod utils;

pub use config::ExportConfig;
pub use error::{ExportError, Result};
pub use exporter::{ExportReport, ExportTask, Exporter, TaskOutcome, WrittenFile};
pub use geometry::{Cube, Face, FaceDirection};
pub use io::{
    import_structure_file, parse_structures, Artifact, ExportFormat, ExportOptions, ParsedDocument,
    WireframeFaces,
};
pub use model::{Dimensions, MaterialRegistry, Rgb, Structure, StructureSet, Voxel};

/// Serialize one structure in one format, entirely in memory.
///
/// Artifacts are named after the structure.
pub fn export_structure(
    structure: &Structure,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<Vec<Artifact>> {
    structure.validate()?;
    format.render(structure, &structure.name, options)
}
