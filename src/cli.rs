//! Command-line interface module for foldersort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Folder prompting and shortcut resolution
//! - Confirmation before touching the filesystem
//! - Progress display and the final summary

use crate::config::Config;
use crate::organizer::{FileOutcome, OrganizeProgress, Organizer, validate_target};
use crate::output::OutputFormatter;
use clap::Parser;
use dialoguer::{Confirm, Input};
use indicatif::ProgressBar;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Sort the files of a folder into subfolders by file type.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "foldersort", version, about)]
pub struct Cli {
    /// Folder to organize, or one of the shortcuts downloads, desktop, documents (docs).
    /// Prompted for when omitted.
    pub folder: Option<String>,

    /// Show what would be moved without changing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not ask for confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the result as JSON instead of the summary.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level implied by `-v` flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Runs the CLI with parsed arguments.
///
/// Returns `Ok(())` when the run finishes or the user backs out, and an error
/// message when the folder is invalid or the run cannot proceed.
///
/// # Examples
///
/// ```no_run
/// use foldersort::cli::{Cli, run_cli};
///
/// let cli = Cli {
///     folder: Some("downloads".to_string()),
///     yes: true,
///     ..Default::default()
/// };
/// if let Err(e) = run_cli(&cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<(), String> {
    run_cli_with_output(cli, &mut io::stdout())
}

/// Like [`run_cli`], but writes the `--json` document to `out`.
///
/// With `--json` nothing else is written to stdout: the folder details and
/// any notices go to stderr, and `out` receives exactly one JSON value.
pub fn run_cli_with_output<W: Write>(cli: &Cli, out: &mut W) -> Result<(), String> {
    let input = match &cli.folder {
        Some(folder) => folder.trim().to_string(),
        None => {
            let input = prompt_folder()?;
            if input.eq_ignore_ascii_case("exit") {
                OutputFormatter::plain("Goodbye!");
                return Ok(());
            }
            input
        }
    };

    let folder = resolve_shortcut(&input, home_dir().as_deref());
    validate_target(&folder).map_err(|e| e.to_string())?;

    let file_count = count_files(&folder)?;
    if cli.json {
        OutputFormatter::status(&format!("Selected folder: {}", folder.display()));
        OutputFormatter::status(&format!("Contains {} files", file_count));
    } else {
        OutputFormatter::info(&format!("Selected folder: {}", folder.display()));
        OutputFormatter::plain(&format!("Contains {} files", file_count));
    }

    if file_count == 0 {
        if cli.json {
            OutputFormatter::status("This folder is empty! Nothing to organize.");
        } else {
            OutputFormatter::warning("This folder is empty! Nothing to organize.");
        }
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let table = config.category_table().map_err(|e| e.to_string())?;
    let filters = config
        .compile_filters()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    if !cli.dry_run && !cli.yes && !confirm()? {
        OutputFormatter::status("Cancelled. No files were moved.");
        return Ok(());
    }

    let organizer = Organizer::new(table).filters(filters).dry_run(cli.dry_run);
    info!("organizing {}", folder.display());

    let outcome = if cli.json {
        organizer.organize(&folder)
    } else {
        if cli.dry_run {
            OutputFormatter::dry_run_notice("Analyzing files...");
        } else {
            OutputFormatter::info("Organizing files...");
        }
        let mut reporter = ProgressReporter::new(cli.dry_run);
        let outcome = organizer.organize_with_progress(&folder, &mut reporter);
        reporter.finish();
        outcome
    };
    let result = outcome.map_err(|e| e.to_string())?;

    if cli.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        writeln!(out, "{}", json).map_err(|e| format!("Failed to write result: {}", e))?;
        return Ok(());
    }

    OutputFormatter::summary(&folder, &result);
    if !result.dry_run {
        OutputFormatter::folder_contents(&folder_contents(&folder));
    }
    if result.failed_count > 0 {
        OutputFormatter::error("Some files could not be moved. Please review errors above.");
    }

    Ok(())
}

/// Maps the well-known folder shortcuts onto `home`; anything else is taken
/// as a path.
///
/// Recognised (case-insensitive): `downloads`/`download`, `desktop`,
/// `documents`/`docs`.
pub fn resolve_shortcut(input: &str, home: Option<&Path>) -> PathBuf {
    let trimmed = input.trim();
    let folder = match trimmed.to_lowercase().as_str() {
        "downloads" | "download" => Some("Downloads"),
        "desktop" => Some("Desktop"),
        "documents" | "docs" => Some("Documents"),
        _ => None,
    };

    match (folder, home) {
        (Some(folder), Some(home)) => home.join(folder),
        _ => PathBuf::from(trimmed),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

fn prompt_folder() -> Result<String, String> {
    OutputFormatter::header("Examples:");
    if let Some(home) = home_dir() {
        OutputFormatter::plain(&format!("  Downloads: {}", home.join("Downloads").display()));
        OutputFormatter::plain(&format!("  Desktop:   {}", home.join("Desktop").display()));
    }
    OutputFormatter::plain("  Custom:    /home/user/myfolder");

    let input: String = Input::new()
        .with_prompt("Enter the folder path to organize (or 'exit' to quit)")
        .interact_text()
        .map_err(|e| format!("Failed to read folder: {}", e))?;
    Ok(input.trim().to_string())
}

fn confirm() -> Result<bool, String> {
    Confirm::new()
        .with_prompt("Proceed with organization?")
        .default(false)
        .interact()
        .map_err(|e| format!("Failed to read confirmation: {}", e))
}

/// Number of regular files directly inside `folder`.
fn count_files(folder: &Path) -> Result<usize, String> {
    let entries = fs::read_dir(folder)
        .map_err(|e| format!("Error reading directory {}: {}", folder.display(), e))?;
    Ok(entries
        .flatten()
        .filter(|entry| entry.path().is_file())
        .count())
}

/// File counts of every non-hidden subfolder, sorted by name. Empty folders
/// are left out.
pub fn folder_contents(folder: &Path) -> Vec<(String, usize)> {
    let Ok(entries) = fs::read_dir(folder) else {
        return Vec::new();
    };

    let mut contents: Vec<(String, usize)> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }
            let count = count_files(&entry.path()).ok()?;
            (count > 0).then_some((name, count))
        })
        .collect();
    contents.sort();
    contents
}

/// Drives a progress bar from organizer notifications and prints one line
/// per outcome above it.
struct ProgressReporter {
    bar: Option<ProgressBar>,
    dry_run: bool,
}

impl ProgressReporter {
    fn new(dry_run: bool) -> Self {
        Self { bar: None, dry_run }
    }

    fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl OrganizeProgress for ProgressReporter {
    fn on_scan(&mut self, candidates: usize) {
        debug!("{} files to process", candidates);
        self.bar = Some(OutputFormatter::create_progress_bar(candidates as u64));
    }

    fn on_outcome(&mut self, outcome: &FileOutcome) {
        let line = OutputFormatter::outcome_line(outcome, self.dry_run);
        match &self.bar {
            Some(bar) => {
                bar.println(line);
                bar.inc(1);
            }
            None => println!("{}", line),
        }
    }
}
