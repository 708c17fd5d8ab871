// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - voxel cube construction and bounds

mod bbox;
mod cube;

pub use bbox::VoxelBounds;
pub use cube::{Cube, Face, FaceDirection, CELL_SIZE};
