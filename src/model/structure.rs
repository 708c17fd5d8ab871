// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Structure and voxel representation

use crate::error::{ExportError, Result};
use crate::geometry::VoxelBounds;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A unit cell at an integer grid position, tagged with a material id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voxel {
    #[serde(rename = "pos")]
    pub position: [i32; 3],
    #[serde(rename = "block")]
    pub material: String,
    /// Block state properties in document order; ignored by geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbt: Option<Value>,
}

impl Voxel {
    pub fn new(position: [i32; 3], material: impl Into<String>) -> Self {
        Self {
            position,
            material: material.into(),
            properties: None,
            nbt: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn x(&self) -> i32 {
        self.position[0]
    }

    pub fn y(&self) -> i32 {
        self.position[1]
    }

    pub fn z(&self) -> i32 {
        self.position[2]
    }
}

/// Declared bounding extents in cell units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Dimensions {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// A named, ordered collection of voxels plus declared dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub dimensions: Dimensions,
    /// Voxel count as recorded by the producer of the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_count: Option<usize>,
    #[serde(rename = "blocks", alias = "voxels")]
    pub voxels: Vec<Voxel>,
}

impl Structure {
    pub fn new(name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            description: None,
            dimensions,
            block_count: None,
            voxels: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_voxel(mut self, voxel: Voxel) -> Self {
        self.voxels.push(voxel);
        self
    }

    pub fn push(&mut self, voxel: Voxel) {
        self.voxels.push(voxel);
    }

    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Integer bounds actually occupied by voxels
    pub fn bounds(&self) -> Option<VoxelBounds> {
        VoxelBounds::from_voxels(&self.voxels)
    }

    /// Voxels grouped by y level, levels in ascending order.
    /// Voxels within a level keep structure order.
    pub fn levels(&self) -> BTreeMap<i32, Vec<&Voxel>> {
        let mut levels: BTreeMap<i32, Vec<&Voxel>> = BTreeMap::new();
        for voxel in &self.voxels {
            levels.entry(voxel.y()).or_default().push(voxel);
        }
        levels
    }

    /// Check that the structure can be exported.
    ///
    /// The name becomes a file stem and is written inside line-based formats
    /// (`solid <name>`, `# <name>`), so it must be non-empty and free of path
    /// separators and control characters.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ExportError::MalformedInput(
                "structure name is empty".to_string(),
            ));
        }
        if self.name.contains(|c: char| c == '/' || c == '\\' || c.is_control())
            || self.name == "."
            || self.name == ".."
        {
            return Err(ExportError::MalformedInput(format!(
                "structure name {:?} cannot be used as a file name",
                self.name
            )));
        }
        if let Some((index, _)) = self
            .voxels
            .iter()
            .enumerate()
            .find(|(_, voxel)| voxel.material.trim().is_empty())
        {
            return Err(ExportError::MalformedInput(format!(
                "voxel {} of `{}` has no material id",
                index, self.name
            )));
        }
        Ok(())
    }
}

/// A decoded structure document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "circuits", alias = "structures")]
    pub structures: Vec<Structure>,
}

impl StructureSet {
    pub fn new(structures: Vec<Structure>) -> Self {
        Self {
            structures,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voxel_decodes_from_document_shape() {
        let voxel: Voxel = serde_json::from_str(
            r#"{"pos": [1, 2, 3], "block": "minecraft:lever", "properties": {"face": "floor"}}"#,
        )
        .unwrap();

        assert_eq!(voxel.position, [1, 2, 3]);
        assert_eq!(voxel.material, "minecraft:lever");
        assert_eq!(
            voxel.properties.unwrap().get("face"),
            Some(&Value::from("floor"))
        );
    }

    #[test]
    fn test_structure_missing_dimensions_is_rejected() {
        let result: std::result::Result<Structure, _> =
            serde_json::from_str(r#"{"name": "x", "blocks": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_levels_are_grouped_by_y() {
        let structure = Structure::new("levels", Dimensions::new(2, 3, 1))
            .with_voxel(Voxel::new([0, 2, 0], "minecraft:glass"))
            .with_voxel(Voxel::new([0, 0, 0], "minecraft:stone"))
            .with_voxel(Voxel::new([1, 2, 0], "minecraft:lever"));

        let levels = structure.levels();
        let keys: Vec<i32> = levels.keys().copied().collect();
        assert_eq!(keys, vec![0, 2]);
        assert_eq!(levels[&2].len(), 2);
        assert_eq!(levels[&2][0].material, "minecraft:glass");
    }

    #[test]
    fn test_validate_rejects_unusable_names() {
        let empty = Structure::new("  ", Dimensions::default());
        assert!(matches!(empty.validate(), Err(ExportError::MalformedInput(_))));

        let nested = Structure::new("../escape", Dimensions::default());
        assert!(nested.validate().is_err());

        for name in ["two\nlines", "tab\tbed", "bell\u{7}", "cr\r"] {
            let structure = Structure::new(name, Dimensions::default());
            assert!(
                matches!(structure.validate(), Err(ExportError::MalformedInput(_))),
                "{:?}",
                name
            );
        }

        let fine = Structure::new("pauli_x", Dimensions::default());
        assert!(fine.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_material() {
        let structure = Structure::new("blank", Dimensions::new(1, 1, 1))
            .with_voxel(Voxel::new([0, 0, 0], ""));
        assert!(structure.validate().is_err());
    }
}
