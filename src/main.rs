use clap::Parser;
use dirsort::classifier::Strategy;
use dirsort::cli::{OrganizeCommand, Overrides, run_cli_with_config};
use dirsort::output::OutputFormatter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Sort the files of a directory into named subfolders.
#[derive(Parser, Debug)]
#[command(name = "dirsort", version, about)]
struct Args {
    /// Directory whose files should be sorted
    directory: PathBuf,

    /// How files are sorted [default: type]
    #[arg(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Destination folder name, in priority order. Repeat for more folders
    #[arg(short, long = "folder", value_name = "NAME")]
    folders: Vec<String>,

    /// Merge folders receiving fewer files than this into "Other" [default: 1]
    #[arg(short, long, value_name = "N")]
    min_items: Option<usize>,

    /// Without folders, name them after each file's label instead of deriving a list
    #[arg(long)]
    no_auto_name: bool,

    /// Show what would be moved without changing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    json: bool,

    /// Path to a configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let command = if args.dry_run {
        OrganizeCommand::DryRun { json: args.json }
    } else {
        OrganizeCommand::Organize
    };
    let overrides = Overrides {
        strategy: args.strategy,
        folders: args.folders,
        min_items_per_folder: args.min_items,
        no_auto_name: args.no_auto_name,
    };

    match run_cli_with_config(command, &args.directory, &overrides, args.config.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
