//! Decides where each entry of a directory listing should go.
//!
//! Classification is a pure pass over a listing snapshot: directories are
//! recorded so the mover can reuse them, files are assigned to a destination
//! label (or left alone), and nothing touches the filesystem.

use crate::file_category::{CategoryTable, split_file_name};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// What a listed path turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Neither a file nor a directory after following links (broken symlinks,
    /// sockets, fifos).
    Other,
}

/// One item of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// The entry's file name.
    pub name: String,
    /// The full path to the entry.
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
        }
    }
}

/// Explicit base names to sort by, in the order the caller gave them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    names: Vec<String>,
}

impl NameFilter {
    /// Builds a filter, or `None` when no names were given.
    pub fn new<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            None
        } else {
            Some(Self { names })
        }
    }

    /// Returns the first requested name equal to `base_name`.
    ///
    /// Matching is exact and case-sensitive on every platform.
    pub fn label_for(&self, base_name: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|name| name.as_str() == base_name)
            .map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// How files are matched to destination labels.
#[derive(Debug, Clone)]
pub enum SortMode {
    /// Match extensions against a category table.
    Extensions(CategoryTable),
    /// Match base names against an explicit list; the table is not consulted.
    Names(NameFilter),
}

impl SortMode {
    /// Picks name matching when any names were supplied, the built-in table
    /// otherwise.
    pub fn from_names(names: Option<Vec<String>>) -> Self {
        match names.and_then(NameFilter::new) {
            Some(filter) => SortMode::Names(filter),
            None => SortMode::Extensions(CategoryTable::builtin()),
        }
    }
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::Extensions(CategoryTable::builtin())
    }
}

/// The outcome for a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// An existing subdirectory; recorded, never moved.
    Directory,
    /// A file destined for the folder with this label.
    Assign(String),
    /// A file that matched no category or requested name.
    Unmatched,
    /// Neither a file nor a directory.
    Ignored,
}

/// Ordered mapping from destination label to the files assigned to it.
///
/// Labels keep the order in which they were first assigned, and each label's
/// files keep the order in which they were encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    groups: Vec<(String, Vec<PathBuf>)>,
    index: HashMap<String, usize>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `path` under `label`. Returns true when the label is new.
    pub fn push(&mut self, label: &str, path: PathBuf) -> bool {
        if let Some(&slot) = self.index.get(label) {
            self.groups[slot].1.push(path);
            return false;
        }

        self.index.insert(label.to_string(), self.groups.len());
        self.groups.push((label.to_string(), vec![path]));
        true
    }

    /// Files assigned to `label`, if any.
    pub fn get(&self, label: &str) -> Option<&[PathBuf]> {
        self.index
            .get(label)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Iterates labels with their files in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.groups
            .iter()
            .map(|(label, paths)| (label.as_str(), paths.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(label, _)| label.as_str())
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of assigned files across all labels.
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|(_, paths)| paths.len()).sum()
    }
}

/// Result of classifying a listing.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub assignment: Assignment,
    /// Names of entries that already are subdirectories of the target.
    pub directories: HashSet<String>,
}

/// Maps directory entries to destination labels.
pub struct Classifier {
    mode: SortMode,
}

impl Classifier {
    pub fn new(mode: SortMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> &SortMode {
        &self.mode
    }

    /// Decides the fate of a single entry.
    pub fn decide(&self, entry: &DirectoryEntry) -> Decision {
        match entry.kind {
            EntryKind::Directory => Decision::Directory,
            EntryKind::Other => Decision::Ignored,
            EntryKind::File => {
                let (base_name, extension) = split_file_name(&entry.name);
                let label = match &self.mode {
                    SortMode::Extensions(table) => table.category_for(extension),
                    SortMode::Names(filter) => filter.label_for(base_name),
                };

                match label {
                    Some(label) => Decision::Assign(label.to_string()),
                    None => Decision::Unmatched,
                }
            }
        }
    }

    /// Classifies a whole listing.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::classifier::{Classifier, DirectoryEntry, EntryKind, SortMode};
    ///
    /// let entries = vec![
    ///     DirectoryEntry::new("run.sh", "/tmp/x/run.sh", EntryKind::File),
    ///     DirectoryEntry::new("old", "/tmp/x/old", EntryKind::Directory),
    /// ];
    /// let result = Classifier::new(SortMode::default()).classify(&entries);
    ///
    /// assert_eq!(result.assignment.labels().collect::<Vec<_>>(), vec!["System Files"]);
    /// assert!(result.directories.contains("old"));
    /// ```
    pub fn classify(&self, entries: &[DirectoryEntry]) -> Classification {
        self.classify_with(entries, |_, _| {})
    }

    /// Classifies a listing, reporting every decision to `on_decision` as it
    /// is made.
    pub fn classify_with<F>(&self, entries: &[DirectoryEntry], mut on_decision: F) -> Classification
    where
        F: FnMut(&DirectoryEntry, &Decision),
    {
        let mut classification = Classification::default();

        for entry in entries {
            let decision = self.decide(entry);
            log::debug!("{} -> {:?}", entry.name, decision);

            match &decision {
                Decision::Directory => {
                    classification.directories.insert(entry.name.clone());
                }
                Decision::Assign(label) => {
                    classification
                        .assignment
                        .push(label, entry.path.clone());
                }
                Decision::Unmatched | Decision::Ignored => {}
            }

            on_decision(entry, &decision);
        }

        classification
    }
}
