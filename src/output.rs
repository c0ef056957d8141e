//! Output formatting and styling module.
//!
//! All user-facing text goes through `OutputFormatter`, so the CLI narration,
//! the final summary, and error reporting share one look.

use crate::classifier::{Decision, DirectoryEntry};
use crate::file_organizer::{MoveEvent, RunSummary};
use colored::*;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// ```no_run
    /// use dirsort::output::OutputFormatter;
    /// OutputFormatter::success("Sorting is done!");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

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

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Narrates the classifier's decision for one entry.
    pub fn decision(entry: &DirectoryEntry, decision: &Decision) {
        Self::plain(&format!("Processing element: '{}'", entry.name));
        match decision {
            Decision::Directory => Self::plain(&format!(
                "  '{}' is an existing directory, skipping",
                entry.name
            )),
            Decision::Assign(label) => Self::plain(&format!(
                "  '{}' planned for '{}'",
                entry.name, label
            )),
            Decision::Unmatched => Self::plain(&format!(
                "  '{}' matches nothing, leaving it in place",
                entry.name
            )),
            Decision::Ignored => Self::warning(&format!(
                "'{}' is neither a file nor a directory, ignoring",
                entry.name
            )),
        }
    }

    /// Narrates one step of the move phase.
    pub fn move_event(event: &MoveEvent<'_>) {
        match event {
            MoveEvent::FolderCreated { label, .. } => {
                Self::info(&format!("Creating a new directory '{}'", label))
            }
            MoveEvent::FolderReused { label, .. } => {
                Self::plain(&format!("Using existing directory '{}'", label))
            }
            MoveEvent::Moved { label, from, .. } => {
                let name = from
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                Self::plain(&format!("  '{}' moved into '{}'", name, label))
            }
            MoveEvent::Skipped { path } => Self::warning(&format!(
                "Skipping '{}': no longer a file",
                path.display()
            )),
        }
    }

    /// Prints a table of planned files per destination folder.
    ///
    /// Rows keep the order given, which is the order folders are processed.
    pub fn plan_table(rows: &[(&str, usize)]) {
        Self::header("PLAN");

        let width = rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0)
            .max(6); // At least "Folder" width

        println!("{:<width$} | {}", "Folder".bold(), "Files".bold(), width = width);
        println!("{}", "-".repeat(width + 10));

        for (label, count) in rows {
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                label,
                count.to_string().green(),
                file_word,
                width = width
            );
        }
        println!("{}", "-".repeat(width + 10));
    }

    /// Prints the final one-line summary.
    pub fn summary(summary: &RunSummary) {
        Self::success(&summary_line(summary));
    }
}

/// Renders the final summary sentence.
///
/// ```
/// use dirsort::file_organizer::RunSummary;
/// use dirsort::output::summary_line;
///
/// let summary = RunSummary { files_moved: 3, folders_created: 2 };
/// assert_eq!(summary_line(&summary), "3 files moved into 2 new folders");
/// ```
pub fn summary_line(summary: &RunSummary) -> String {
    format!(
        "{} files moved into {} new folders",
        summary.files_moved, summary.folders_created
    )
}
