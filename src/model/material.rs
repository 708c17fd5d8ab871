// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Material color table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Flat 8-bit RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled into [0, 1]
    pub fn normalized(&self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Color used for any material missing from the table
pub const DEFAULT_COLOR: Rgb = Rgb::new(128, 128, 128);

const MATERIAL_COLORS: &[(&str, Rgb)] = &[
    ("minecraft:redstone_wire", Rgb::new(255, 0, 0)),
    ("minecraft:redstone_torch", Rgb::new(255, 100, 0)),
    ("minecraft:lever", Rgb::new(139, 69, 19)),
    ("minecraft:stone", Rgb::new(128, 128, 128)),
    ("minecraft:comparator", Rgb::new(200, 50, 50)),
    ("minecraft:repeater", Rgb::new(180, 40, 40)),
    ("minecraft:sticky_piston", Rgb::new(100, 150, 100)),
    ("minecraft:hopper", Rgb::new(80, 80, 80)),
    ("minecraft:chest", Rgb::new(165, 115, 64)),
    ("minecraft:dropper", Rgb::new(100, 100, 100)),
    ("minecraft:glass", Rgb::new(200, 200, 255)),
    ("minecraft:redstone_lamp", Rgb::new(255, 200, 100)),
    ("minecraft:redstone_block", Rgb::new(200, 0, 0)),
];

/// Read-only mapping from material id to display color.
///
/// Lookups never fail: a miss returns [`DEFAULT_COLOR`].
#[derive(Debug, Clone)]
pub struct MaterialRegistry {
    colors: HashMap<&'static str, Rgb>,
}

impl MaterialRegistry {
    fn builtin() -> Self {
        Self {
            colors: MATERIAL_COLORS.iter().copied().collect(),
        }
    }

    /// Process-wide registry, built on first use
    pub fn global() -> &'static MaterialRegistry {
        static REGISTRY: OnceLock<MaterialRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::builtin)
    }

    pub fn color(&self, material: &str) -> Rgb {
        match self.colors.get(material) {
            Some(color) => *color,
            None => {
                tracing::debug!(material, "unknown material, using default color");
                DEFAULT_COLOR
            }
        }
    }

    pub fn contains(&self, material: &str) -> bool {
        self.colors.contains_key(material)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Material name used in OBJ/MTL files: the `minecraft:` namespace is
/// dropped and any remaining `:` becomes `_`.
pub fn obj_material_name(material: &str) -> String {
    material.replace("minecraft:", "").replace(':', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_material_color() {
        let registry = MaterialRegistry::global();
        assert_eq!(registry.color("minecraft:lever"), Rgb::new(139, 69, 19));
        assert!(registry.contains("minecraft:glass"));
        assert_eq!(registry.len(), MATERIAL_COLORS.len());
    }

    #[test]
    fn test_unknown_material_falls_back_to_gray() {
        let registry = MaterialRegistry::global();
        assert_eq!(registry.color("test:stone"), DEFAULT_COLOR);
        assert_eq!(registry.color(""), DEFAULT_COLOR);
    }

    #[test]
    fn test_normalized_channels() {
        let [r, g, b] = Rgb::new(255, 0, 51).normalized();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_obj_material_name() {
        assert_eq!(obj_material_name("minecraft:redstone_wire"), "redstone_wire");
        assert_eq!(obj_material_name("test:stone"), "test_stone");
        assert_eq!(obj_material_name("plain"), "plain");
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1,2,3)");
    }
}
