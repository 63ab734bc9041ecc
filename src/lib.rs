//! dirsort - sort the files of a directory into named subfolders
//!
//! Files are classified by type, modification date, or size; each label is
//! matched against an ordered list of destination folders (exactly, loosely,
//! or by date), undersized groups are merged into "Other", and the files are
//! then moved. Filtering rules and run defaults can be set in a TOML
//! configuration file.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod file_organizer;
pub mod file_record;
pub mod grouping;
pub mod output;
pub mod resolver;

pub use classifier::{SizeBand, Strategy, TypeCategory, classify};
pub use config::{CompiledFilters, Config, ConfigError};
pub use file_organizer::{FileMover, FileOrganizer, OrganizeError, execute_plan};
pub use file_record::FileRecord;
pub use grouping::{Grouping, auto_folder_names, plan};
pub use resolver::{FolderResolver, is_date_match};

pub use cli::{OrganizeCommand, OrganizeOptions, run_cli};
