// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SVG exporter - top-down plan view of a structure

use super::writer::write_atomic;
use crate::error::{ExportError, Result};
use crate::model::{Dimensions, MaterialRegistry, Structure, Voxel};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Pixel edge length of one cell
pub const CELL_PIXELS: i64 = 50;

/// Blank border around the grid on each side
pub const CANVAS_PADDING: i64 = 50;

const BACKGROUND: &str = "#f0f0f0";

/// Material id fragments that get a text label
const LABELED_MATERIALS: [&str; 3] = ["torch", "lever", "comparator"];

/// Canvas size in pixels; height follows the z axis (plan view)
pub fn canvas_size(dimensions: &Dimensions) -> (i64, i64) {
    (
        i64::from(dimensions.x) * CELL_PIXELS + 2 * CANVAS_PADDING,
        i64::from(dimensions.z) * CELL_PIXELS + 2 * CANVAS_PADDING,
    )
}

/// Short label for control blocks: up to four characters of the name
/// after the namespace.
pub fn label_for(material: &str) -> Option<String> {
    if !LABELED_MATERIALS.iter().any(|m| material.contains(m)) {
        return None;
    }
    let name = material.split(':').nth(1).unwrap_or(material);
    Some(name.chars().take(4).collect())
}

/// Render a structure as an SVG document.
///
/// Levels are painted from lowest to highest y, so the highest voxel at
/// each (x, z) cell is painted last and stays visible.
pub fn render(structure: &Structure) -> Result<String> {
    let registry = MaterialRegistry::global();
    let (width, height) = canvas_size(&structure.dimensions);
    let (width, height) = (width.to_string(), height.to_string());

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("width", width.as_str()));
    svg.push_attribute(("height", height.as_str()));
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    writer.write_event(Event::Start(svg)).map_err(xml_error)?;

    writer
        .write_event(Event::Start(BytesStart::new("title")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(&structure.name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("title")))
        .map_err(xml_error)?;

    let mut background = BytesStart::new("rect");
    background.push_attribute(("width", width.as_str()));
    background.push_attribute(("height", height.as_str()));
    background.push_attribute(("fill", BACKGROUND));
    writer.write_event(Event::Empty(background)).map_err(xml_error)?;

    for (_, level) in structure.levels() {
        for voxel in level {
            write_cell(&mut writer, voxel, registry)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .map_err(xml_error)?;

    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(xml_error)
}

fn write_cell(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    voxel: &Voxel,
    registry: &MaterialRegistry,
) -> Result<()> {
    let x = CANVAS_PADDING + i64::from(voxel.x()) * CELL_PIXELS;
    let y = CANVAS_PADDING + i64::from(voxel.z()) * CELL_PIXELS;
    let size = CELL_PIXELS.to_string();
    let fill = registry.color(&voxel.material).to_string();

    let mut rect = BytesStart::new("rect");
    rect.push_attribute(("x", x.to_string().as_str()));
    rect.push_attribute(("y", y.to_string().as_str()));
    rect.push_attribute(("width", size.as_str()));
    rect.push_attribute(("height", size.as_str()));
    rect.push_attribute(("fill", fill.as_str()));
    rect.push_attribute(("stroke", "black"));
    rect.push_attribute(("stroke-width", "1"));
    writer
        .write_event(Event::Empty(rect))
        .map_err(xml_error)?;

    if let Some(label) = label_for(&voxel.material) {
        let mut text = BytesStart::new("text");
        text.push_attribute(("x", (x + CELL_PIXELS / 2).to_string().as_str()));
        text.push_attribute(("y", (y + 30).to_string().as_str()));
        text.push_attribute(("text-anchor", "middle"));
        text.push_attribute(("font-size", "10"));
        writer
            .write_event(Event::Start(text))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Text(BytesText::new(&label)))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("text")))
            .map_err(xml_error)?;
    }

    Ok(())
}

fn xml_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::encode("svg", err)
}

/// Export structure to an SVG file
pub fn export(structure: &Structure, path: &Path) -> Result<()> {
    let content = render(structure)?;
    write_atomic(path, content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Voxel;
    use quick_xml::Reader;

    /// (x, y, fill) of every cell rect, in paint order
    fn cell_rects(svg: &str) -> Vec<(String, String, String)> {
        let mut reader = Reader::from_str(svg);
        let mut rects = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Empty(e) if e.name().as_ref() == b"rect" => {
                    let attr = |key: &str| {
                        e.try_get_attribute(key)
                            .unwrap()
                            .map(|a| a.unescape_value().unwrap().into_owned())
                    };
                    if let (Some(x), Some(y), Some(fill)) = (attr("x"), attr("y"), attr("fill")) {
                        rects.push((x, y, fill));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        rects
    }

    #[test]
    fn test_canvas_size_uses_x_and_z() {
        assert_eq!(canvas_size(&Dimensions::new(3, 9, 2)), (250, 200));
        assert_eq!(canvas_size(&Dimensions::new(1, 1, 1)), (150, 150));
    }

    #[test]
    fn test_highest_level_is_painted_last() -> Result<()> {
        let structure = Structure::new("stack", Dimensions::new(1, 3, 1))
            .with_voxel(Voxel::new([0, 2, 0], "minecraft:redstone_wire"))
            .with_voxel(Voxel::new([0, 0, 0], "minecraft:stone"))
            .with_voxel(Voxel::new([0, 1, 0], "minecraft:glass"));

        let rects = cell_rects(&render(&structure)?);
        let last_at_cell = rects
            .iter()
            .filter(|(x, y, _)| x == "50" && y == "50")
            .last()
            .unwrap();
        assert_eq!(last_at_cell.2, "rgb(255,0,0)");
        Ok(())
    }

    #[test]
    fn test_labels_for_control_blocks() {
        assert_eq!(label_for("minecraft:redstone_torch").as_deref(), Some("reds"));
        assert_eq!(label_for("minecraft:lever").as_deref(), Some("leve"));
        assert_eq!(label_for("lever").as_deref(), Some("leve"));
        assert_eq!(label_for("minecraft:stone"), None);
    }

    #[test]
    fn test_document_shape() -> Result<()> {
        let structure = Structure::new("a<b", Dimensions::new(2, 1, 1))
            .with_voxel(Voxel::new([1, 0, 0], "minecraft:comparator"))
            .with_voxel(Voxel::new([0, 0, 0], "mod:unknown"));
        let svg = render(&structure)?;

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains("<title>a&lt;b</title>"));
        assert!(svg.contains("fill=\"#f0f0f0\""));
        assert!(svg.contains(">comp</text>"));
        assert!(svg.contains("fill=\"rgb(128,128,128)\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(cell_rects(&svg).len(), 2);
        Ok(())
    }
}
