/// Realizes a classification on disk.
///
/// This module lists the target directory, creates the destination folders a
/// classification calls for, and moves each assigned file into place. Work is
/// not transactional: the first fatal error stops the run and leaves whatever
/// was already moved where it is.
use crate::classifier::{Classification, DirectoryEntry, EntryKind};
use crate::config::ConfigError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while sorting a directory.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target path is missing, unreadable, or not a directory.
    InvalidBasePath { path: PathBuf, source: io::Error },
    /// The target directory has no entries at all.
    EmptyDirectory { path: PathBuf },
    /// Failed to create a destination folder.
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
    /// Failed to move a file into its destination folder.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
    /// A file with the same name already sits in the destination folder.
    DestinationExists {
        source: PathBuf,
        destination: PathBuf,
    },
    /// The configuration file could not be loaded.
    Config(ConfigError),
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid directory {}: {}", path.display(), source)
            }
            Self::EmptyDirectory { .. } => write!(f, "The directory is empty!"),
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
            Self::DestinationExists {
                source,
                destination,
            } => {
                write!(
                    f,
                    "Refusing to move {}: {} already exists",
                    source.display(),
                    destination.display()
                )
            }
            Self::Config(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for OrganizeError {}

impl From<ConfigError> for OrganizeError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

/// Result type for sorting operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Counters produced by a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_moved: usize,
    pub folders_created: usize,
}

/// Progress reported while a classification is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent<'a> {
    /// A new destination folder was created.
    FolderCreated { label: &'a str, path: &'a Path },
    /// The destination already existed as a subdirectory.
    FolderReused { label: &'a str, path: &'a Path },
    /// A file was moved into its destination folder.
    Moved {
        label: &'a str,
        from: &'a Path,
        to: &'a Path,
    },
    /// A listed file was no longer a file at move time.
    Skipped { path: &'a Path },
}

/// Lists the immediate entries of `base_path`, sorted by name.
///
/// Symlinks are followed when deciding whether an entry is a file or a
/// directory; anything that resolves to neither is reported as
/// `EntryKind::Other`.
pub fn list_entries(base_path: &Path) -> OrganizeResult<Vec<DirectoryEntry>> {
    let invalid = |source: io::Error| OrganizeError::InvalidBasePath {
        path: base_path.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(base_path).map_err(invalid)? {
        let entry = entry.map_err(invalid)?;
        let path = entry.path();
        let kind = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_dir() => EntryKind::Directory,
            Ok(metadata) if metadata.is_file() => EntryKind::File,
            _ => EntryKind::Other,
        };

        entries.push(DirectoryEntry::new(
            entry.file_name().to_string_lossy().into_owned(),
            path,
            kind,
        ));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Creates destination folders and moves files into them.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Applies a classification under `base_path`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::classifier::{Classifier, SortMode};
    /// use dirsort::file_organizer::{FileOrganizer, list_entries};
    /// use std::path::Path;
    ///
    /// let base = Path::new("/path/to/Downloads");
    /// let entries = list_entries(base)?;
    /// let classification = Classifier::new(SortMode::default()).classify(&entries);
    /// let summary = FileOrganizer::apply(base, &classification)?;
    /// println!("{} files moved", summary.files_moved);
    /// # Ok::<(), dirsort::file_organizer::OrganizeError>(())
    /// ```
    pub fn apply(base_path: &Path, classification: &Classification) -> OrganizeResult<RunSummary> {
        Self::apply_with(base_path, classification, |_| {})
    }

    /// Applies a classification, reporting progress to `on_event`.
    ///
    /// Labels are processed in assignment order. A label that names an
    /// existing subdirectory reuses it; any other label gets a fresh folder,
    /// and failing to create it aborts the run. Files that stopped being files
    /// since the listing was taken are skipped and not counted.
    pub fn apply_with<F>(
        base_path: &Path,
        classification: &Classification,
        mut on_event: F,
    ) -> OrganizeResult<RunSummary>
    where
        F: FnMut(MoveEvent<'_>),
    {
        if !base_path.is_dir() {
            return Err(OrganizeError::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "not an existing directory"),
            });
        }

        let mut summary = RunSummary::default();

        for (label, paths) in classification.assignment.iter() {
            let folder = base_path.join(label);

            if classification.directories.contains(label) {
                on_event(MoveEvent::FolderReused {
                    label,
                    path: &folder,
                });
            } else {
                fs::create_dir(&folder).map_err(|e| OrganizeError::DirectoryCreationFailed {
                    path: folder.clone(),
                    source: e,
                })?;
                summary.folders_created += 1;
                on_event(MoveEvent::FolderCreated {
                    label,
                    path: &folder,
                });
            }

            for path in paths {
                if !path.is_file() {
                    log::debug!("{} is no longer a file, skipping", path.display());
                    on_event(MoveEvent::Skipped { path });
                    continue;
                }

                let destination = Self::move_into(path, &folder)?;
                summary.files_moved += 1;
                on_event(MoveEvent::Moved {
                    label,
                    from: path,
                    to: &destination,
                });
            }
        }

        Ok(summary)
    }

    /// Moves `file_path` into `folder`, keeping its file name.
    ///
    /// Never overwrites: if the destination name is taken the move fails with
    /// `OrganizeError::DestinationExists`. A rename across filesystems falls
    /// back to copying and removing the original.
    ///
    /// Returns the file's new path.
    pub fn move_into(file_path: &Path, folder: &Path) -> OrganizeResult<PathBuf> {
        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: folder.to_path_buf(),
                source_error: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let destination = folder.join(file_name);

        if fs::symlink_metadata(&destination).is_ok() {
            return Err(OrganizeError::DestinationExists {
                source: file_path.to_path_buf(),
                destination,
            });
        }

        let moved = match fs::rename(file_path, &destination) {
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                log::warn!(
                    "rename of {} crosses devices, copying instead",
                    file_path.display()
                );
                copy_then_remove(file_path, &destination)
            }
            other => other,
        };

        moved.map_err(|e| OrganizeError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        Ok(destination)
    }
}

fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    copy_then(from, to, |source| fs::remove_file(source))
}

/// Copies `from` to `to`, then runs `remove_source` on `from`. If either step
/// fails the copy at `to` is deleted, so the source stays the only copy.
fn copy_then<R>(from: &Path, to: &Path, remove_source: R) -> io::Result<()>
where
    R: FnOnce(&Path) -> io::Result<()>,
{
    if let Err(e) = fs::copy(from, to) {
        let _ = fs::remove_file(to);
        return Err(e);
    }
    if let Err(e) = remove_source(from) {
        let _ = fs::remove_file(to);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Classifier, SortMode};
    use std::fs;
    use tempfile::TempDir;

    fn classify(base_path: &Path) -> Classification {
        let entries = list_entries(base_path).expect("Failed to list directory");
        Classifier::new(SortMode::default()).classify(&entries)
    }

    #[test]
    fn test_list_entries_kinds_and_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("b.txt"), "b").expect("Failed to write file");
        fs::write(base_path.join("a.png"), "a").expect("Failed to write file");
        fs::create_dir(base_path.join("old")).expect("Failed to create directory");

        let entries = list_entries(base_path).expect("Failed to list directory");
        let summary: Vec<_> = entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.kind))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("a.png", EntryKind::File),
                ("b.txt", EntryKind::File),
                ("old", EntryKind::Directory),
            ]
        );
        assert_eq!(entries[0].path, base_path.join("a.png"));
    }

    #[test]
    fn test_list_entries_invalid_base_path() {
        let result = list_entries(Path::new("/non/existent/path"));
        assert!(matches!(result, Err(OrganizeError::InvalidBasePath { .. })));
    }

    #[test]
    fn test_list_entries_on_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("plain.txt");
        fs::write(&file_path, "x").expect("Failed to write file");

        let result = list_entries(&file_path);
        assert!(matches!(result, Err(OrganizeError::InvalidBasePath { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_entries_broken_symlink_is_other() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        std::os::unix::fs::symlink(base_path.join("missing.png"), base_path.join("link.png"))
            .expect("Failed to create symlink");

        let entries = list_entries(base_path).expect("Failed to list directory");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Other);
    }

    #[test]
    fn test_apply_creates_folders_and_moves() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("a.png"), "png").expect("Failed to write file");
        fs::write(base_path.join("b.jpg"), "jpg").expect("Failed to write file");
        fs::write(base_path.join("notes.md"), "md").expect("Failed to write file");

        let summary =
            FileOrganizer::apply(base_path, &classify(base_path)).expect("Failed to apply");

        assert_eq!(
            summary,
            RunSummary {
                files_moved: 3,
                folders_created: 2,
            }
        );
        assert!(base_path.join("Images").join("a.png").is_file());
        assert!(base_path.join("Images").join("b.jpg").is_file());
        assert!(base_path.join("Documents").join("notes.md").is_file());
        assert!(!base_path.join("a.png").exists());
    }

    #[test]
    fn test_apply_reuses_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::create_dir(base_path.join("Images")).expect("Failed to create directory");
        fs::write(base_path.join("a.png"), "png").expect("Failed to write file");

        let mut events = Vec::new();
        let summary = FileOrganizer::apply_with(base_path, &classify(base_path), |event| {
            events.push(format!("{:?}", event));
        })
        .expect("Failed to apply");

        assert_eq!(summary.folders_created, 0);
        assert_eq!(summary.files_moved, 1);
        assert!(events[0].starts_with("FolderReused"));
        assert!(base_path.join("Images").join("a.png").is_file());
    }

    #[test]
    fn test_apply_skips_vanished_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("a.png"), "png").expect("Failed to write file");
        fs::write(base_path.join("gone.png"), "png").expect("Failed to write file");
        let classification = classify(base_path);
        fs::remove_file(base_path.join("gone.png")).expect("Failed to remove file");

        let mut skipped = Vec::new();
        let summary = FileOrganizer::apply_with(base_path, &classification, |event| {
            if let MoveEvent::Skipped { path } = event {
                skipped.push(path.to_path_buf());
            }
        })
        .expect("Stale entries should not be fatal");

        assert_eq!(summary.files_moved, 1);
        assert_eq!(summary.folders_created, 1);
        assert_eq!(skipped, vec![base_path.join("gone.png")]);
    }

    #[test]
    fn test_apply_skips_file_replaced_by_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("odd.txt"), "txt").expect("Failed to write file");
        let classification = classify(base_path);
        fs::remove_file(base_path.join("odd.txt")).expect("Failed to remove file");
        fs::create_dir(base_path.join("odd.txt")).expect("Failed to create directory");

        let summary = FileOrganizer::apply(base_path, &classification).expect("Failed to apply");

        assert_eq!(summary.files_moved, 0);
        assert!(base_path.join("odd.txt").is_dir());
        assert!(base_path.join("Documents").is_dir());
    }

    #[test]
    fn test_apply_folder_creation_failure_is_fatal() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("song.mp3"), "mp3").expect("Failed to write file");
        let classification = classify(base_path);
        // A plain file now occupies the folder name.
        fs::write(base_path.join("Audios"), "not a folder").expect("Failed to write file");

        let result = FileOrganizer::apply(base_path, &classification);

        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
        assert!(base_path.join("song.mp3").is_file());
    }

    #[test]
    fn test_move_into_refuses_to_overwrite() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        let folder = base_path.join("Documents");
        fs::create_dir(&folder).expect("Failed to create directory");
        fs::write(folder.join("notes.md"), "old").expect("Failed to write file");
        fs::write(base_path.join("notes.md"), "new").expect("Failed to write file");

        let result = FileOrganizer::move_into(&base_path.join("notes.md"), &folder);

        assert!(matches!(
            result,
            Err(OrganizeError::DestinationExists { .. })
        ));
        let kept = fs::read_to_string(folder.join("notes.md")).expect("Failed to read file");
        assert_eq!(kept, "old");
        assert!(base_path.join("notes.md").is_file());
    }

    #[test]
    fn test_move_into_returns_new_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        let folder = base_path.join("report");
        fs::create_dir(&folder).expect("Failed to create directory");
        fs::write(base_path.join("report.pdf"), "pdf").expect("Failed to write file");

        let destination = FileOrganizer::move_into(&base_path.join("report.pdf"), &folder)
            .expect("Failed to move file");

        assert_eq!(destination, folder.join("report.pdf"));
        assert!(destination.is_file());
    }

    #[test]
    fn test_copy_then_remove_moves_the_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("clip.mp4");
        let to = temp_dir.path().join("moved.mp4");
        fs::write(&from, "video").expect("Failed to write file");

        copy_then_remove(&from, &to).expect("Copy fallback failed");

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).expect("Failed to read file"), "video");
    }

    #[test]
    fn test_copy_fallback_cleans_up_when_source_cannot_be_removed() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("clip.mp4");
        let to = temp_dir.path().join("moved.mp4");
        fs::write(&from, "video").expect("Failed to write file");

        let result = copy_then(&from, &to, |_| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        });

        assert_eq!(
            result.map_err(|e| e.kind()),
            Err(io::ErrorKind::PermissionDenied)
        );
        assert!(from.is_file());
        assert!(!to.exists());
    }

    #[test]
    fn test_empty_directory_message() {
        let error = OrganizeError::EmptyDirectory {
            path: PathBuf::from("/tmp/empty"),
        };
        assert_eq!(error.to_string(), "The directory is empty!");
    }

    #[test]
    fn test_apply_invalid_base_path() {
        let result = FileOrganizer::apply(
            Path::new("/non/existent/path"),
            &Classification::default(),
        );
        assert!(matches!(result, Err(OrganizeError::InvalidBasePath { .. })));
    }
}
