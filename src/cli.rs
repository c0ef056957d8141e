//! Command-line interface module for dirsort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Configuration loading
//! - Orchestrating the list, classify, and move phases
//! - Verbose narration

use crate::classifier::{Classifier, SortMode};
use crate::config::SortConfig;
use crate::file_organizer::{FileOrganizer, OrganizeError, OrganizeResult, RunSummary, list_entries};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Sort the files of a directory into category folders.
#[derive(Debug, Clone, Parser)]
#[command(name = "dirsort", version, about)]
pub struct Cli {
    /// Path pointing to the directory that you want to be sorted
    pub path: PathBuf,

    /// Sort files with these base names into a folder of the same name instead of by extension
    #[arg(short, long = "name", num_args = 1.., value_name = "NAME")]
    pub names: Option<Vec<String>>,

    /// Show detailed output during processing
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML configuration file with run settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Options for a single sorting run, independent of how they were parsed.
#[derive(Debug, Clone, Default)]
pub struct SortOptions {
    /// Base names to sort by; `None` sorts by extension.
    pub names: Option<Vec<String>>,
    pub verbose: bool,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

impl From<&Cli> for SortOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            names: cli.names.clone(),
            verbose: cli.verbose,
            config: cli.config.clone(),
        }
    }
}

/// Runs a full sort of `dir_path` and returns the counters.
///
/// This function:
/// 1. Loads the configuration file, if one was named
/// 2. Lists the directory once
/// 3. Classifies every entry
/// 4. Creates missing folders and moves the assigned files
///
/// # Errors
///
/// Returns `OrganizeError::EmptyDirectory` when the directory has no entries,
/// and any listing, configuration, folder creation, or move error as-is.
///
/// # Examples
///
/// ```no_run
/// use dirsort::cli::{SortOptions, run_cli};
/// use std::path::Path;
///
/// match run_cli(Path::new("/path/to/Downloads"), &SortOptions::default()) {
///     Ok(summary) => println!("{} files moved", summary.files_moved),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(dir_path: &Path, options: &SortOptions) -> OrganizeResult<RunSummary> {
    let config = SortConfig::load(options.config.as_deref())?;
    let verbose = options.verbose || config.sort.verbose;

    let entries = list_entries(dir_path)?;
    if entries.is_empty() {
        return Err(OrganizeError::EmptyDirectory {
            path: dir_path.to_path_buf(),
        });
    }

    if verbose {
        OutputFormatter::info(&format!("Sorting contents of: {}", dir_path.display()));
    }

    let classifier = Classifier::new(SortMode::from_names(options.names.clone()));
    let classification = classifier.classify_with(&entries, |entry, decision| {
        if verbose {
            OutputFormatter::decision(entry, decision);
        }
    });

    if verbose && !classification.assignment.is_empty() {
        let rows: Vec<_> = classification
            .assignment
            .iter()
            .map(|(label, paths)| (label, paths.len()))
            .collect();
        OutputFormatter::plan_table(&rows);
    }

    FileOrganizer::apply_with(dir_path, &classification, |event| {
        if verbose {
            OutputFormatter::move_event(&event);
        }
    })
}

/// Maps a run's result to the process exit status: 0 on success, 1 on any
/// error, including an empty directory.
pub fn exit_status(result: &OrganizeResult<RunSummary>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Prints the summary line or the error, then returns the exit status.
pub fn report(result: &OrganizeResult<RunSummary>) -> u8 {
    match result {
        Ok(summary) => OutputFormatter::summary(summary),
        Err(e) => OutputFormatter::error(&e.to_string()),
    }
    exit_status(result)
}
