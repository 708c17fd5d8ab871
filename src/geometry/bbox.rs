// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use crate::model::{Dimensions, Voxel};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Inclusive integer bounds of the cells occupied by a voxel set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxelBounds {
    pub min: Point3<i32>,
    pub max: Point3<i32>,
}

impl VoxelBounds {
    pub fn new(min: Point3<i32>, max: Point3<i32>) -> Self {
        Self { min, max }
    }

    /// `None` for an empty voxel set
    pub fn from_voxels(voxels: &[Voxel]) -> Option<Self> {
        let (first, rest) = voxels.split_first()?;
        let start = Point3::from(first.position);
        let mut bounds = Self::new(start, start);
        for voxel in rest {
            bounds.expand_to_include(&Point3::from(voxel.position));
        }
        Some(bounds)
    }

    pub fn expand_to_include(&mut self, point: &Point3<i32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Number of cells spanned along each axis
    pub fn extent(&self) -> Vector3<i64> {
        Vector3::new(
            i64::from(self.max.x) - i64::from(self.min.x) + 1,
            i64::from(self.max.y) - i64::from(self.min.y) + 1,
            i64::from(self.max.z) - i64::from(self.min.z) + 1,
        )
    }

    /// Whether every occupied cell lies in `[0, dims)` on each axis
    pub fn fits_within(&self, dimensions: &Dimensions) -> bool {
        self.min.x >= 0
            && self.min.y >= 0
            && self.min.z >= 0
            && i64::from(self.max.x) < i64::from(dimensions.x)
            && i64::from(self.max.y) < i64::from(dimensions.y)
            && i64::from(self.max.z) < i64::from(dimensions.z)
    }
}
