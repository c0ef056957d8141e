//! dirsort - sort the top-level files of a directory into category folders
//!
//! Files are classified by extension against a fixed category table, or by
//! base name against a caller-supplied list, then moved into a subfolder named
//! after their label. Subdirectories are never touched, and the pass is not
//! recursive.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;

pub use classifier::{Assignment, Classification, Classifier, Decision, DirectoryEntry, SortMode};
pub use config::{ConfigError, SortConfig};
pub use file_category::CategoryTable;
pub use file_organizer::{FileOrganizer, OrganizeError, RunSummary};

pub use cli::{Cli, SortOptions, exit_status, run_cli};
