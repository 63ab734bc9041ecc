//! Command-line orchestration for dirsort.
//!
//! This module ties the pieces of a run together:
//! - Configuration loading and command-line overrides
//! - Directory scanning and filtering
//! - Folder name derivation when none are given
//! - Planning (classify, resolve, group, merge)
//! - Moving files, or printing the plan for a dry run

use crate::classifier::Strategy;
use crate::config::{CompiledFilters, Config, OrganizeSettings};
use crate::file_organizer::{FileOrganizer, Operation, OrganizeResult, execute_plan};
use crate::file_record::scan_directory;
use crate::grouping::{self, Grouping};
use crate::output::{OutputFormatter, file_word};
use std::path::Path;

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeCommand {
    /// Move the files into their folders.
    Organize,
    /// Print the plan without touching the filesystem.
    DryRun {
        /// Print the plan as JSON instead of text.
        json: bool,
    },
}

/// Values given on the command line. Unset values fall back to the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub strategy: Option<Strategy>,
    pub folders: Vec<String>,
    pub min_items_per_folder: Option<usize>,
    pub no_auto_name: bool,
}

/// Everything a run needs to know besides the directory itself.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizeOptions {
    pub strategy: Strategy,
    /// Ordered destination folders. Empty means auto-naming, or raw labels
    /// when `auto_name` is off.
    pub folders: Vec<String>,
    pub min_items_per_folder: usize,
    pub auto_name: bool,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self::from_settings(&OrganizeSettings::default(), &Overrides::default())
    }
}

impl OrganizeOptions {
    /// Merges configured settings with command-line overrides.
    ///
    /// Folders given on the command line replace the configured list as a
    /// whole. Blank folder names are dropped.
    pub fn from_settings(settings: &OrganizeSettings, overrides: &Overrides) -> Self {
        let folders = match non_blank(&overrides.folders) {
            folders if folders.is_empty() => non_blank(&settings.folders),
            folders => folders,
        };

        Self {
            strategy: overrides.strategy.unwrap_or(settings.strategy),
            folders,
            min_items_per_folder: overrides
                .min_items_per_folder
                .unwrap_or(settings.min_items_per_folder),
            auto_name: settings.auto_name && !overrides.no_auto_name,
        }
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

fn non_blank(folders: &[String]) -> Vec<String> {
    folders
        .iter()
        .filter(|folder| !folder.trim().is_empty())
        .cloned()
        .collect()
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Every move, in the order it happened.
    pub operations: Vec<Operation>,
}

impl RunSummary {
    /// Number of files moved into each folder, in move order.
    pub fn folder_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for operation in &self.operations {
            match counts.iter_mut().find(|(folder, _)| *folder == operation.folder) {
                Some((_, count)) => *count += 1,
                None => counts.push((operation.folder.clone(), 1)),
            }
        }
        counts
    }
}

/// Runs the CLI application with the given command and directory path.
///
/// Configuration is looked up in the default locations; see
/// [`run_cli_with_config`].
///
/// # Examples
///
/// ```no_run
/// use dirsort::cli::{OrganizeCommand, Overrides, run_cli};
/// use std::path::Path;
///
/// let result = run_cli(OrganizeCommand::Organize, Path::new("/path/to/directory"), &Overrides::default());
/// match result {
///     Ok(()) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(
    command: OrganizeCommand,
    dir_path: &Path,
    overrides: &Overrides,
) -> Result<(), String> {
    run_cli_with_config(command, dir_path, overrides, None)
}

/// Runs the CLI application with an optional configuration file.
///
/// # Arguments
///
/// * `command` - Organize, or dry run
/// * `dir_path` - The directory to sort
/// * `overrides` - Command-line values taking precedence over the configuration
/// * `config_path` - Optional path to a configuration file
pub fn run_cli_with_config(
    command: OrganizeCommand,
    dir_path: &Path,
    overrides: &Overrides,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let config =
        Config::load(config_path).map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;
    let options = OrganizeOptions::from_settings(&config.organize, overrides);

    match command {
        OrganizeCommand::Organize => {
            let summary =
                organize_directory(dir_path, &options, &filters).map_err(|e| e.to_string())?;
            if !summary.operations.is_empty() {
                OutputFormatter::summary_table(&summary.folder_counts());
            }
            Ok(())
        }
        OrganizeCommand::DryRun { json } => {
            let grouping =
                plan_directory(dir_path, &options, &filters).map_err(|e| e.to_string())?;
            if json {
                let text = serde_json::to_string_pretty(&grouping)
                    .map_err(|e| format!("Error serializing plan: {}", e))?;
                println!("{}", text);
            } else {
                print_dry_run(dir_path, &options, &grouping);
            }
            Ok(())
        }
    }
}

/// Scans `base_path` and works out where each file goes, without moving
/// anything.
///
/// With no folders given and auto-naming on, folder names are derived from
/// the files first.
pub fn plan_directory(
    base_path: &Path,
    options: &OrganizeOptions,
    filters: &CompiledFilters,
) -> OrganizeResult<Grouping> {
    let records = scan_directory(base_path, filters)?;

    let folders = if options.folders.is_empty() && options.auto_name {
        grouping::auto_folder_names(&records, options.strategy, options.min_items_per_folder)
    } else {
        options.folders.clone()
    };

    Ok(grouping::plan(
        records,
        options.strategy,
        folders,
        options.min_items_per_folder,
    ))
}

/// Sorts the files of `base_path` into subfolders.
///
/// Prints one line when the run starts and one per moved file. Stops at the
/// first filesystem error; files moved before it stay moved.
pub fn organize_directory(
    base_path: &Path,
    options: &OrganizeOptions,
    filters: &CompiledFilters,
) -> OrganizeResult<RunSummary> {
    OutputFormatter::info(&format!(
        "Organizing {} by {}...",
        base_path.display(),
        options.strategy
    ));

    let grouping = plan_directory(base_path, options, filters)?;
    if grouping.is_empty() {
        OutputFormatter::warning("No files found to organize.");
        return Ok(RunSummary::default());
    }

    let pb = OutputFormatter::create_progress_bar(grouping.file_count() as u64);
    let result = execute_plan(base_path, &grouping, &mut FileOrganizer, |operation| {
        let name = operation
            .original_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.suspend(|| {
            OutputFormatter::success(&format!("Moved {} to {}/", name, operation.folder))
        });
        pb.inc(1);
    });
    pb.finish_and_clear();

    Ok(RunSummary {
        operations: result?,
    })
}

fn print_dry_run(base_path: &Path, options: &OrganizeOptions, grouping: &Grouping) {
    OutputFormatter::dry_run_notice(&format!(
        "Analyzing {} by {}",
        base_path.display(),
        options.strategy
    ));

    if grouping.is_empty() {
        OutputFormatter::warning("No files found to organize.");
        return;
    }

    for group in grouping.groups() {
        OutputFormatter::header(&format!(
            "{}/ ({} {})",
            group.folder,
            group.files.len(),
            file_word(group.files.len())
        ));
        for record in &group.files {
            OutputFormatter::plain(&format!("  → {}", record.name));
        }
    }

    let counts: Vec<(String, usize)> = grouping
        .groups()
        .iter()
        .map(|g| (g.folder.clone(), g.files.len()))
        .collect();
    OutputFormatter::summary_table(&counts);

    OutputFormatter::dry_run_notice("No files were modified.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_organizer::OrganizeError;
    use std::path::PathBuf;

    #[test]
    fn test_options_default_to_settings() {
        let settings = OrganizeSettings {
            strategy: Strategy::ByDate,
            folders: vec!["2024".to_string()],
            min_items_per_folder: 2,
            auto_name: true,
        };
        let options = OrganizeOptions::from_settings(&settings, &Overrides::default());

        assert_eq!(options.strategy, Strategy::ByDate);
        assert_eq!(options.folders, vec!["2024"]);
        assert_eq!(options.min_items_per_folder, 2);
        assert!(options.auto_name);
    }

    #[test]
    fn test_overrides_win_over_settings() {
        let settings = OrganizeSettings {
            folders: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };
        let overrides = Overrides {
            strategy: Some(Strategy::BySize),
            folders: vec!["Big".to_string()],
            min_items_per_folder: Some(4),
            no_auto_name: true,
        };
        let options = OrganizeOptions::from_settings(&settings, &overrides);

        assert_eq!(options.strategy, Strategy::BySize);
        assert_eq!(options.folders, vec!["Big"]);
        assert_eq!(options.min_items_per_folder, 4);
        assert!(!options.auto_name);
    }

    #[test]
    fn test_blank_folder_names_are_dropped() {
        let settings = OrganizeSettings {
            folders: vec!["".to_string(), "Images".to_string()],
            ..Default::default()
        };
        let options = OrganizeOptions::from_settings(&settings, &Overrides::default());
        assert_eq!(options.folders, vec!["Images"]);

        let overrides = Overrides {
            folders: vec![" ".to_string(), "".to_string()],
            ..Default::default()
        };
        let options = OrganizeOptions::from_settings(&settings, &overrides);
        assert_eq!(options.folders, vec!["Images"]);
    }

    #[test]
    fn test_plan_never_targets_a_blank_folder() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.png"), "x").unwrap();
        std::fs::write(dir.path().join("b.mp3"), "x").unwrap();
        let overrides = Overrides {
            folders: vec!["".to_string(), "Images".to_string()],
            ..Default::default()
        };
        let options = OrganizeOptions::from_settings(&OrganizeSettings::default(), &overrides);
        let filters = Config::default().compile().unwrap();

        let grouping = plan_directory(dir.path(), &options, &filters).unwrap();

        assert!(grouping.get("").is_none());
        assert_eq!(grouping.get("Images").map(|g| g.files.len()), Some(2));
    }

    #[test]
    fn test_folder_counts_in_move_order() {
        let op = |folder: &str, name: &str| Operation {
            original_path: PathBuf::from(name),
            new_path: PathBuf::from(folder).join(name),
            folder: folder.to_string(),
        };
        let summary = RunSummary {
            operations: vec![op("images", "a"), op("docs", "b"), op("images", "c")],
        };

        assert_eq!(
            summary.folder_counts(),
            vec![("images".to_string(), 2), ("docs".to_string(), 1)]
        );
    }

    #[test]
    fn test_plan_directory_missing_directory() {
        let filters = Config::default().compile().unwrap();
        let result = plan_directory(
            Path::new("/non/existent/path"),
            &OrganizeOptions::default(),
            &filters,
        );
        assert!(matches!(result, Err(OrganizeError::DirectoryReadFailed { .. })));
    }
}
