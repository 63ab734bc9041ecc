//! Snapshots of the files found in a target directory.
//!
//! A [`FileRecord`] is taken once per run and never mutated afterwards;
//! classification and grouping only ever read it.

use crate::config::CompiledFilters;
use crate::file_organizer::{OrganizeError, OrganizeResult};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only description of a single file in the target directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    /// The full path to the file.
    pub path: PathBuf,
    /// The file name, including its extension.
    pub name: String,
    /// Lowercase extension with its leading dot, or `""` when there is none.
    pub extension: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, in local time.
    pub modified: DateTime<Local>,
}

impl FileRecord {
    /// Builds a record from in-memory values, without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>, size: u64, modified: DateTime<Local>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = extension_of(&path);

        Self {
            path,
            name,
            extension,
            size,
            modified,
        }
    }

    /// Reads size and modification time of `path` and builds its record.
    pub fn from_path(path: &Path) -> OrganizeResult<Self> {
        let metadata = fs::metadata(path).map_err(|e| OrganizeError::MetadataReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let modified = metadata
            .modified()
            .map_err(|e| OrganizeError::MetadataReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self::new(path, metadata.len(), DateTime::<Local>::from(modified)))
    }
}

/// Returns the lowercase extension of `path` with a leading dot.
///
/// Leading dots of hidden files do not count as an extension, so `.bashrc`
/// yields `""`, while a trailing dot (`notes.`) yields `"."`.
///
/// # Examples
///
/// ```
/// use dirsort::file_record::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("Photo.JPG")), ".jpg");
/// assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
/// assert_eq!(extension_of(Path::new("Makefile")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Lists the files directly inside `base_path`, sorted by name.
///
/// Subdirectories are skipped, as are entries rejected by `filters` and
/// symlinks whose target no longer exists. Any other failure to list the
/// directory or read a file's metadata aborts the scan.
pub fn scan_directory(
    base_path: &Path,
    filters: &CompiledFilters,
) -> OrganizeResult<Vec<FileRecord>> {
    let read_failed = |e: std::io::Error| OrganizeError::DirectoryReadFailed {
        path: base_path.to_path_buf(),
        source: e,
    };

    let mut records = Vec::new();
    for entry in fs::read_dir(base_path).map_err(read_failed)? {
        let entry = entry.map_err(read_failed)?;
        let path = entry.path();

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(_) if entry.file_type().is_ok_and(|t| t.is_symlink()) => continue,
            Err(e) => {
                return Err(OrganizeError::MetadataReadFailed { path, source: e });
            }
        };

        if metadata.is_file()
            && !filters.is_config_file(&path)
            && filters.should_include(Path::new(&entry.file_name()))
        {
            records.push(FileRecord::from_path(&path)?);
        }
    }

    records.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(records)
}
