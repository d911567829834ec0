//! Console output for the CLI.
//!
//! Everything the user sees goes through [`OutputFormatter`], so the wording
//! and colours live in one place.

use crate::organizer::{FileOutcome, MoveResult, SkipReason};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Formats CLI messages, progress bars and the run summary.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a plain message to stderr, keeping stdout free for JSON.
    pub fn status(message: &str) {
        eprintln!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar over `total` files.
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// One line describing what happened to a file.
    pub fn outcome_line(outcome: &FileOutcome, dry_run: bool) -> String {
        match outcome {
            FileOutcome::Moved {
                source,
                destination,
                category,
            } => {
                let renamed = if source.file_name() != destination.file_name() {
                    format!(" as {}", display_name(destination))
                } else {
                    String::new()
                };
                let verb = if dry_run { "Would move" } else { "Moved" };
                format!(
                    "{} {}: {} → {}/{}",
                    "✓".green(),
                    verb,
                    display_name(source),
                    category,
                    renamed
                )
            }
            FileOutcome::Failed {
                source,
                category,
                reason,
                ..
            } => format!(
                "{} Failed to move {} to {}/: {}",
                "✗".red(),
                display_name(source),
                category,
                reason
            ),
            FileOutcome::Skipped { source, reason } => {
                let why = match reason {
                    SkipReason::Hidden => "hidden file",
                    SkipReason::Excluded => "excluded by configuration",
                };
                format!(
                    "{} Skipped: {} ({})",
                    "⏭".yellow(),
                    display_name(source),
                    why
                )
            }
        }
    }

    /// Prints the end-of-run summary.
    pub fn summary(target: &Path, result: &MoveResult) {
        let rule = "=".repeat(RULE_WIDTH);
        println!("\n{}", rule);
        if result.dry_run {
            Self::dry_run_notice("Organization preview complete. No files were modified.");
        } else {
            println!("{}", "Organization complete!".green().bold());
        }
        println!("{}", rule);

        println!("Organized folder: {}", target.display());
        let moved_label = if result.dry_run {
            "Files to move"
        } else {
            "Files moved"
        };
        println!("{}: {}", moved_label, result.moved_count.to_string().green());
        if result.skipped_count > 0 {
            println!(
                "Files skipped: {} (hidden files)",
                result.skipped_count.to_string().yellow()
            );
        }
        if result.excluded_count > 0 {
            println!(
                "Files excluded: {} (configuration rules)",
                result.excluded_count.to_string().yellow()
            );
        }
        if result.failed_count > 0 {
            println!(
                "Files failed: {}",
                result.failed_count.to_string().red().bold()
            );
        }

        if !result.newly_created_categories.is_empty() {
            let label = if result.dry_run {
                "New folders to create"
            } else {
                "New folders created"
            };
            println!(
                "\n{}: {}",
                label,
                result.newly_created_categories.join(", ")
            );
        }

        let distribution: Vec<_> = result.nonzero_counts().collect();
        if !distribution.is_empty() {
            Self::header("File distribution:");
            let width = distribution
                .iter()
                .map(|c| c.category.len())
                .max()
                .unwrap_or(0);
            for bucket in distribution {
                println!(
                    "  {:<width$} | {} {}",
                    bucket.category,
                    bucket.count.to_string().green(),
                    plural(bucket.count),
                    width = width
                );
            }
        }
    }

    /// Prints how many files each subfolder holds after the run.
    pub fn folder_contents(contents: &[(String, usize)]) {
        if contents.is_empty() {
            return;
        }

        Self::header("Current folder contents:");
        for (folder, count) in contents {
            println!("  {}: {} total {}", folder, count, plural(*count));
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plain_line(outcome: &FileOutcome, dry_run: bool) -> String {
        colored::control::set_override(false);
        OutputFormatter::outcome_line(outcome, dry_run)
    }

    #[test]
    fn test_moved_line_mentions_rename() {
        let line = plain_line(
            &FileOutcome::Moved {
                source: PathBuf::from("/d/a.png"),
                destination: PathBuf::from("/d/Images/a_1.png"),
                category: "Images".to_string(),
            },
            false,
        );
        assert!(line.contains("Moved: a.png → Images/ as a_1.png"), "{}", line);
    }

    #[test]
    fn test_dry_run_line() {
        let line = plain_line(
            &FileOutcome::Moved {
                source: PathBuf::from("/d/notes.txt"),
                destination: PathBuf::from("/d/Documents/notes.txt"),
                category: "Documents".to_string(),
            },
            true,
        );
        assert!(line.contains("Would move: notes.txt → Documents/"), "{}", line);
        assert!(!line.contains(" as "));
    }

    #[test]
    fn test_failed_and_skipped_lines() {
        let failed = plain_line(
            &FileOutcome::Failed {
                source: PathBuf::from("/d/b.png"),
                destination: PathBuf::from("/d/Images/b.png"),
                category: "Images".to_string(),
                reason: "permission denied".to_string(),
            },
            false,
        );
        assert!(failed.contains("Failed to move b.png to Images/: permission denied"));

        let skipped = plain_line(
            &FileOutcome::Skipped {
                source: PathBuf::from("/d/.bashrc"),
                reason: SkipReason::Hidden,
            },
            false,
        );
        assert!(skipped.contains("Skipped: .bashrc (hidden file)"));
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1), "file");
        assert_eq!(plural(0), "files");
        assert_eq!(plural(2), "files");
    }
}
