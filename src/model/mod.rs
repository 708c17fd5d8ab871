// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Voxel model - structures, voxels and the material color table

mod material;
mod structure;

pub use material::{obj_material_name, MaterialRegistry, Rgb, DEFAULT_COLOR};
pub use structure::{Dimensions, Structure, StructureSet, Voxel};
