// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for loading and exporting structures

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the export pipeline.
///
/// An unknown material is deliberately absent: it resolves to the default
/// color instead of failing.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Structure data is missing required fields or cannot name an output file
    #[error("malformed structure data: {0}")]
    MalformedInput(String),

    /// JSON structure document could not be decoded
    #[error("failed to decode structure document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Requested output format is not supported
    #[error("unknown export format `{0}` (expected one of: dxf, stl, obj, svg, mcfunction)")]
    UnknownFormat(String),

    /// Reading an input file failed
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an output artifact failed
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A serializer could not encode its output
    #[error("failed to encode {format} output: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("failed to format output text")]
    Format(#[from] std::fmt::Error),

    #[error("failed to start export workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl ExportError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn encode(format: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            format,
            message: err.to_string(),
        }
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, ExportError>;
