//! Moving planned files into their destination folders.
//!
//! This module provides the [`FileMover`] capability consumed by the
//! organizer, its filesystem implementation [`FileOrganizer`], and
//! [`execute_plan`], which walks a [`Grouping`] and moves every file.

use crate::grouping::Grouping;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Represents a single completed file move.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// The original path of the file before organization.
    pub original_path: PathBuf,
    /// The new path of the file after organization.
    pub new_path: PathBuf,
    /// The destination folder name.
    pub folder: String,
}

/// Errors that can occur while scanning or organizing a directory.
#[derive(Debug)]
pub enum OrganizeError {
    /// Failed to list the target directory.
    DirectoryReadFailed { path: PathBuf, source: io::Error },
    /// Failed to read the metadata of a listed file.
    MetadataReadFailed { path: PathBuf, source: io::Error },
    /// Failed to create a destination directory.
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
    /// Failed to move a file into its destination directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
    /// The base directory path is invalid or doesn't exist.
    InvalidBasePath { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryReadFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::MetadataReadFailed { path, source } => {
                write!(f, "Failed to read metadata of {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryReadFailed { source, .. }
            | Self::MetadataReadFailed { source, .. }
            | Self::DirectoryCreationFailed { source, .. }
            | Self::InvalidBasePath { source, .. } => Some(source),
            Self::FileMoveFailure { source_error, .. } => Some(source_error),
        }
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// The filesystem capability the organizer needs: create a folder, move a
/// file into it.
pub trait FileMover {
    /// Creates `folder_path` and any missing parents. Succeeds if it exists.
    fn ensure_folder(&mut self, folder_path: &Path) -> OrganizeResult<()>;

    /// Moves `source` into `folder_path`, keeping its file name, and returns
    /// the new path. An existing file of the same name may be overwritten.
    fn move_file(&mut self, source: &Path, folder_path: &Path) -> OrganizeResult<PathBuf>;
}

/// Moves files on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileOrganizer;

impl FileMover for FileOrganizer {
    fn ensure_folder(&mut self, folder_path: &Path) -> OrganizeResult<()> {
        fs::create_dir_all(folder_path).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: folder_path.to_path_buf(),
            source: e,
        })
    }

    fn move_file(&mut self, source: &Path, folder_path: &Path) -> OrganizeResult<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: source.to_path_buf(),
                destination: folder_path.to_path_buf(),
                source_error: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;
        let destination = folder_path.join(file_name);

        let moved = match fs::rename(source, &destination) {
            // rename cannot cross filesystems; copy and remove instead
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                fs::copy(source, &destination).and_then(|_| fs::remove_file(source))
            }
            other => other,
        };

        moved.map_err(|e| OrganizeError::FileMoveFailure {
            source: source.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        Ok(destination)
    }
}

/// Moves every file of `grouping` into `base_path/<folder>`.
///
/// Groups are processed in order; each destination folder is ensured before
/// its files move. `on_moved` is called after each successful move. The
/// first failure stops the run: files already moved stay where they are.
///
/// # Examples
///
/// ```no_run
/// use dirsort::file_organizer::{FileOrganizer, execute_plan};
/// use dirsort::grouping::Grouping;
/// use std::path::Path;
///
/// let grouping = Grouping::new();
/// let moved = execute_plan(Path::new("/path/to/base"), &grouping, &mut FileOrganizer, |op| {
///     println!("Moved {} to {}", op.original_path.display(), op.folder);
/// });
/// assert!(moved.is_ok());
/// ```
pub fn execute_plan<M: FileMover>(
    base_path: &Path,
    grouping: &Grouping,
    mover: &mut M,
    mut on_moved: impl FnMut(&Operation),
) -> OrganizeResult<Vec<Operation>> {
    if !base_path.is_dir() {
        return Err(OrganizeError::InvalidBasePath {
            path: base_path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "base path is not a directory"),
        });
    }

    let mut operations = Vec::with_capacity(grouping.file_count());
    for group in grouping.groups() {
        let folder_path = base_path.join(&group.folder);
        mover.ensure_folder(&folder_path)?;

        for record in &group.files {
            let new_path = mover.move_file(&record.path, &folder_path)?;
            let operation = Operation {
                original_path: record.path.clone(),
                new_path,
                folder: group.folder.clone(),
            };
            on_moved(&operation);
            operations.push(operation);
        }
    }

    Ok(operations)
}
