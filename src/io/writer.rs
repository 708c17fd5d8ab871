// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scoped artifact writes

use crate::error::{ExportError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

/// Mode requested for exported files, before the process umask applies
#[cfg(unix)]
const ARTIFACT_MODE: u32 = 0o644;

/// Write `bytes` to `path` all at once.
///
/// Content goes to a temporary file in the destination directory which is
/// then renamed over `path`, so readers never observe a partial file. On
/// unix the file is created as `0644` (subject to the umask) rather than the
/// owner-only mode temporary files normally get.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    builder.prefix(".voxcad-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(ARTIFACT_MODE));
    }

    let mut file = builder
        .tempfile_in(dir)
        .map_err(|e| ExportError::write(path, e))?;
    file.write_all(bytes)
        .map_err(|e| ExportError::write(path, e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| ExportError::write(path, e))?;
    file.persist(path)
        .map_err(|e| ExportError::write(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_replaces_content() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_atomic(&path, b"first")?;
        write_atomic(&path, b"second")?;

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_a_write_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_readable_by_others() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.svg");
        write_atomic(&path, b"<svg/>")?;

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_ne!(mode, 0o600);
        assert_eq!(mode & 0o444, 0o444, "mode {:o}", mode);
        assert_eq!(mode & 0o111, 0);
        Ok(())
    }
}
