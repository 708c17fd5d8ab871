// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export configuration

use crate::io::{ExportFormat, ExportOptions, WireframeFaces};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "voxcad.toml";

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Destination directory for all artifacts
    pub output_dir: PathBuf,
    /// Formats to produce for every structure
    pub formats: Vec<ExportFormat>,
    /// Faces emitted by the DXF exporter
    pub wireframe_faces: WireframeFaces,
    /// Write STL as binary instead of ASCII
    pub stl_binary: bool,
    /// Maximum parallel workers
    pub parallelism: Option<usize>,
    /// Verbose output
    pub verbose: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("cad_exports"),
            formats: ExportFormat::DEFAULT.to_vec(),
            wireframe_faces: WireframeFaces::Bottom,
            stl_binary: false,
            parallelism: None, // Auto-detect
            verbose: false,
        }
    }
}

impl ExportConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ExportConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.with_env_overrides()
    }

    /// Apply `VOXCAD_*` environment variables on top of this configuration
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(output_dir) = lookup("VOXCAD_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        if let Some(formats) = lookup("VOXCAD_FORMATS") {
            self.formats = parse_format_list(&formats)
                .context("Invalid VOXCAD_FORMATS")?;
        }

        if let Some(faces) = lookup("VOXCAD_WIREFRAME_FACES") {
            self.wireframe_faces = faces
                .parse()
                .context("Invalid VOXCAD_WIREFRAME_FACES")?;
        }

        if let Some(parallelism) = lookup("VOXCAD_PARALLELISM") {
            self.parallelism = parallelism.parse().ok();
        }

        if let Some(verbose) = lookup("VOXCAD_VERBOSE") {
            self.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(self)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Serializer switches derived from this configuration
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            wireframe_faces: self.wireframe_faces,
            stl_binary: self.stl_binary,
        }
    }
}

/// Parse a comma-separated format list such as `stl,obj`
pub fn parse_format_list(list: &str) -> Result<Vec<ExportFormat>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<ExportFormat>().map_err(anyhow::Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_formats() {
        let config = ExportConfig::default();
        assert_eq!(config.formats, ExportFormat::DEFAULT.to_vec());
        assert_eq!(config.options(), ExportOptions::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "formats = [\"stl\", \"mcfunction\"]\nstl_binary = true\n")?;

        let config = ExportConfig::from_file(&path)?;
        assert_eq!(
            config.formats,
            vec![ExportFormat::TriangulatedMesh, ExportFormat::Commands]
        );
        assert!(config.stl_binary);
        assert_eq!(config.output_dir, PathBuf::from("cad_exports"));
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("saved.toml");
        let config = ExportConfig {
            wireframe_faces: WireframeFaces::All,
            parallelism: Some(4),
            ..ExportConfig::default()
        };

        config.save(&path)?;
        assert_eq!(ExportConfig::from_file(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let env: HashMap<&str, &str> = [
            ("VOXCAD_OUTPUT_DIR", "out"),
            ("VOXCAD_FORMATS", "svg, dxf"),
            ("VOXCAD_WIREFRAME_FACES", "all"),
            ("VOXCAD_PARALLELISM", "3"),
        ]
        .into_iter()
        .collect();

        let config = ExportConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))?;

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(
            config.formats,
            vec![ExportFormat::RasterProjection, ExportFormat::Wireframe]
        );
        assert_eq!(config.wireframe_faces, WireframeFaces::All);
        assert_eq!(config.parallelism, Some(3));
        Ok(())
    }

    #[test]
    fn test_bad_format_override_is_an_error() {
        let result = ExportConfig::default().with_overrides(|key| {
            (key == "VOXCAD_FORMATS").then(|| "stl,step".to_string())
        });
        assert!(result.is_err());
    }
}
