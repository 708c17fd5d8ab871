// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - importing structure documents and exporting geometry

pub mod export_commands;
pub mod export_dxf;
pub mod export_obj;
pub mod export_stl;
pub mod export_svg;
mod format;
mod importer;
mod writer;

pub use export_dxf::WireframeFaces;
pub use export_obj::ObjOutput;
pub use export_stl::Facet;
pub use format::{Artifact, ExportFormat, ExportOptions};
pub use importer::{
    discover_structure_files, import_structure_file, parse_structures, ParsedDocument,
    RejectedStructure,
};
pub use writer::write_atomic;
