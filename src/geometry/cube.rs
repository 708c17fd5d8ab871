// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Unit cube geometry for a single voxel
//!
//! Corners use the conventional ordering
//! `(0,0,0) (1,0,0) (1,1,0) (0,1,0) (0,0,1) (1,0,1) (1,1,1) (0,1,1)`
//! offset by the voxel position. Every face quad is wound counter-clockwise
//! when seen from outside, so the right-hand rule yields its outward normal.

use crate::model::Voxel;
use crate::utils::calculate_triangle_normal;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Edge length of one voxel
pub const CELL_SIZE: f64 = 1.0;

const CORNER_OFFSETS: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// One of the six sides of a voxel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceDirection {
    /// -Z
    Front,
    /// +Z
    Back,
    /// -X
    Left,
    /// +X
    Right,
    /// +Y
    Top,
    /// -Y
    Bottom,
}

impl FaceDirection {
    /// Fixed emission order shared by every serializer
    pub const ALL: [FaceDirection; 6] = [
        FaceDirection::Front,
        FaceDirection::Back,
        FaceDirection::Left,
        FaceDirection::Right,
        FaceDirection::Top,
        FaceDirection::Bottom,
    ];

    pub fn normal(self) -> Vector3<f64> {
        match self {
            FaceDirection::Front => Vector3::new(0.0, 0.0, -1.0),
            FaceDirection::Back => Vector3::new(0.0, 0.0, 1.0),
            FaceDirection::Left => Vector3::new(-1.0, 0.0, 0.0),
            FaceDirection::Right => Vector3::new(1.0, 0.0, 0.0),
            FaceDirection::Top => Vector3::new(0.0, 1.0, 0.0),
            FaceDirection::Bottom => Vector3::new(0.0, -1.0, 0.0),
        }
    }

    /// Indices into the cube's eight corners, in outward winding order
    pub fn corner_indices(self) -> [usize; 4] {
        match self {
            FaceDirection::Front => [1, 0, 3, 2],
            FaceDirection::Back => [4, 5, 6, 7],
            FaceDirection::Left => [0, 4, 7, 3],
            FaceDirection::Right => [5, 1, 2, 6],
            FaceDirection::Top => [3, 7, 6, 2],
            FaceDirection::Bottom => [0, 1, 5, 4],
        }
    }
}

/// Planar quad with its outward unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub direction: FaceDirection,
    pub corners: [Point3<f64>; 4],
    pub normal: Vector3<f64>,
}

impl Face {
    /// Split on the first-to-third corner diagonal. Both triangles keep the
    /// quad's winding.
    pub fn triangles(&self) -> [[Point3<f64>; 3]; 2] {
        let [a, b, c, d] = self.corners;
        [[a, b, c], [a, c, d]]
    }

    /// Normal implied by the corner winding
    pub fn winding_normal(&self) -> Vector3<f64> {
        calculate_triangle_normal(&self.corners[0], &self.corners[1], &self.corners[2])
    }
}

/// Corners of one voxel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    pub position: [i32; 3],
    pub corners: [Point3<f64>; 8],
}

impl Cube {
    pub fn new(position: [i32; 3]) -> Self {
        let origin = Point3::new(
            f64::from(position[0]),
            f64::from(position[1]),
            f64::from(position[2]),
        );
        let corners = CORNER_OFFSETS.map(|[dx, dy, dz]| {
            Point3::new(
                origin.x + dx * CELL_SIZE,
                origin.y + dy * CELL_SIZE,
                origin.z + dz * CELL_SIZE,
            )
        });
        Self { position, corners }
    }

    pub fn from_voxel(voxel: &Voxel) -> Self {
        Self::new(voxel.position)
    }

    pub fn face(&self, direction: FaceDirection) -> Face {
        Face {
            direction,
            corners: direction.corner_indices().map(|i| self.corners[i]),
            normal: direction.normal(),
        }
    }

    /// All six faces in [`FaceDirection::ALL`] order
    pub fn faces(&self) -> [Face; 6] {
        FaceDirection::ALL.map(|direction| self.face(direction))
    }
}
