//! Built-in extension categories used by the default sort mode.
//!
//! The table is ordered: categories are scanned top to bottom and the first one
//! listing a file's extension wins. `.sh` appears under both "System Files" and
//! "Programming files", so it always lands in "System Files".
//!
//! # Examples
//!
//! ```
//! use dirsort::file_category::CategoryTable;
//!
//! let table = CategoryTable::builtin();
//! assert_eq!(table.category_for(".png"), Some("Images"));
//! assert_eq!(table.category_for(".sh"), Some("System Files"));
//! assert_eq!(table.category_for(".xyz"), None);
//! ```

/// A single named category and the extensions it claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// The label, which doubles as the destination folder name.
    pub label: &'static str,
    /// Lowercase extensions including the leading dot.
    pub extensions: &'static [&'static str],
}

/// An ordered, immutable list of categories.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTable {
    categories: &'static [Category],
}

static BUILTIN_CATEGORIES: &[Category] = &[
    Category {
        label: "System Files",
        extensions: &[
            ".exe", ".dll", ".sys", ".drv", ".ini", ".bat", ".cmd", ".msi", ".vxd", ".iso", ".sh",
            ".bash", ".service", ".plist", ".dmg", ".run", ".deb", ".rpm", ".so",
        ],
    },
    Category {
        label: "Documents",
        extensions: &[".txt", ".docx", ".doc", ".pdf", ".md", ".odt"],
    },
    Category {
        label: "Presentations",
        extensions: &[".pptx"],
    },
    Category {
        label: "Tables",
        extensions: &[".xlsx", ".csv", ".tsv"],
    },
    Category {
        label: "Audios",
        extensions: &[".mp3", ".wav", ".flac", ".ogg", ".m4a", ".aiff"],
    },
    Category {
        label: "Videos",
        extensions: &[".mp4", ".avi", ".mov", ".mkv", ".webm"],
    },
    Category {
        label: "Images",
        extensions: &[
            ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".heic", ".svg", ".tiff",
        ],
    },
    Category {
        label: "Fonts",
        extensions: &[".ttf", ".otf", ".fon", ".dfont"],
    },
    Category {
        label: "Programming files",
        extensions: &[
            ".c", ".cpp", ".h", ".py", ".java", ".js", ".ts", ".sh", ".rb", ".php", ".html",
            ".htm", ".css", ".json", ".xml", ".sql", ".rs", ".go", ".pl", ".yml", ".yaml",
            ".swift",
        ],
    },
];

impl CategoryTable {
    /// Returns the built-in table.
    pub fn builtin() -> Self {
        Self {
            categories: BUILTIN_CATEGORIES,
        }
    }

    /// Categories in tie-break order.
    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    /// Returns the label of the first category listing `extension`.
    ///
    /// The comparison is case-insensitive. `extension` must include the leading
    /// dot; an empty extension never matches.
    pub fn category_for(&self, extension: &str) -> Option<&'static str> {
        if extension.is_empty() {
            return None;
        }

        let extension = extension.to_lowercase();
        self.categories
            .iter()
            .find(|category| category.extensions.contains(&extension.as_str()))
            .map(|category| category.label)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Splits a file name into its base name and extension.
///
/// The extension runs from the last `.` to the end of the name and keeps the
/// dot. Leading dots never start an extension, so hidden files such as
/// `.bashrc` have an empty one.
///
/// ```
/// use dirsort::file_category::split_file_name;
///
/// assert_eq!(split_file_name("notes.md"), ("notes", ".md"));
/// assert_eq!(split_file_name("archive.tar.gz"), ("archive.tar", ".gz"));
/// assert_eq!(split_file_name(".bashrc"), (".bashrc", ""));
/// assert_eq!(split_file_name("Makefile"), ("Makefile", ""));
/// ```
pub fn split_file_name(name: &str) -> (&str, &str) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();

    match name[leading_dots..].rfind('.') {
        Some(index) => name.split_at(leading_dots + index),
        None => (name, ""),
    }
}
