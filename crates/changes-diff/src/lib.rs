//! Unified diff parsing for `changes-render`.
//!
//! Parses `git diff`-style text into files and hunks, prints hunks back to the line-oriented
//! form the highlighter consumes, and classifies each file as added, removed, renamed or
//! modified.
mod parser;

use thiserror::Error;

pub use parser::FileDiff;
pub use parser::Hunk;
pub use parser::parse_file_diff;
pub use parser::parse_multi_file_diff;
pub use parser::print_hunk;
pub use parser::print_hunks;

const DEV_NULL: &str = "/dev/null";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: malformed hunk header {header:?}")]
    MalformedHunkHeader { line: usize, header: String },

    #[error("line {line}: hunk appears before any file header")]
    HunkOutsideFile { line: usize },

    #[error(
        "hunk at line {line} ends early: {missing_orig} original and {missing_new} new lines missing"
    )]
    TruncatedHunk {
        line: usize,
        missing_orig: u32,
        missing_new: u32,
    },

    #[error("line {line}: unexpected line inside hunk: {content:?}")]
    UnexpectedLine { line: usize, content: String },

    #[error("expected exactly one file in diff, found {found}")]
    FileCount { found: usize },

    #[error("file diff has neither an original nor a new name")]
    NoFileNames,
}

/// What happened to a file, with `a/` and `b/` prefixes removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileChange {
    Modified { path: String },
    Renamed { from: String, to: String },
    Added { path: String },
    Removed { path: String },
}

impl FileChange {
    /// The displayed path: the new name, or the old one for removed files.
    pub fn path(&self) -> &str {
        match self {
            Self::Modified { path } | Self::Added { path } | Self::Removed { path } => path,
            Self::Renamed { to, .. } => to,
        }
    }

    /// Escaped HTML title. Removed files are struck through.
    pub fn title_html(&self) -> String {
        match self {
            Self::Modified { path } | Self::Added { path } => {
                html_escape::encode_text(path).into_owned()
            }
            Self::Renamed { from, to } => {
                html_escape::encode_text(&format!("{from} -> {to}")).into_owned()
            }
            Self::Removed { path } => format!("<s>{}</s>", html_escape::encode_text(path)),
        }
    }
}

impl FileDiff {
    pub fn change(&self) -> Result<FileChange, ParseError> {
        let old = self
            .orig_name
            .strip_prefix("a/")
            .unwrap_or(&self.orig_name);
        let new = self.new_name.strip_prefix("b/").unwrap_or(&self.new_name);
        let old_missing = old == DEV_NULL || old.is_empty();
        let new_missing = new == DEV_NULL || new.is_empty();
        match (old_missing, new_missing) {
            (false, false) if old == new => Ok(FileChange::Modified {
                path: new.to_string(),
            }),
            (false, false) => Ok(FileChange::Renamed {
                from: old.to_string(),
                to: new.to_string(),
            }),
            (true, false) => Ok(FileChange::Added {
                path: new.to_string(),
            }),
            (false, true) => Ok(FileChange::Removed {
                path: old.to_string(),
            }),
            (true, true) => Err(ParseError::NoFileNames),
        }
    }

    pub fn stats(&self) -> DiffStats {
        self.hunks.iter().map(Hunk::stats).sum()
    }
}

impl Hunk {
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for line in self.body.lines() {
            match line.as_bytes().first() {
                Some(b'+') => stats.added += 1,
                Some(b'-') => stats.removed += 1,
                _ => {}
            }
        }
        stats
    }
}

/// Added/removed line counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

impl std::ops::Add for DiffStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            added: self.added + rhs.added,
            removed: self.removed + rhs.removed,
        }
    }
}

impl std::iter::Sum for DiffStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, s| acc + s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(orig: &str, new: &str) -> FileDiff {
        FileDiff {
            orig_name: orig.to_string(),
            new_name: new.to_string(),
            ..FileDiff::default()
        }
    }

    #[test]
    fn classifies_file_changes() {
        assert_eq!(
            file("a/x.rs", "b/x.rs").change().unwrap(),
            FileChange::Modified {
                path: "x.rs".to_string()
            }
        );
        assert_eq!(
            file("a/x.rs", "b/y.rs").change().unwrap(),
            FileChange::Renamed {
                from: "x.rs".to_string(),
                to: "y.rs".to_string()
            }
        );
        assert_eq!(
            file("/dev/null", "b/new.rs").change().unwrap(),
            FileChange::Added {
                path: "new.rs".to_string()
            }
        );
        assert_eq!(
            file("a/old.rs", "/dev/null").change().unwrap(),
            FileChange::Removed {
                path: "old.rs".to_string()
            }
        );
        assert_eq!(
            file("/dev/null", "/dev/null").change(),
            Err(ParseError::NoFileNames)
        );
    }

    #[test]
    fn titles_are_escaped() {
        let renamed = FileChange::Renamed {
            from: "<a>.rs".to_string(),
            to: "b&c.rs".to_string(),
        };
        assert_eq!(renamed.title_html(), "&lt;a&gt;.rs -&gt; b&amp;c.rs");
        let removed = FileChange::Removed {
            path: "<x>".to_string(),
        };
        assert_eq!(removed.title_html(), "<s>&lt;x&gt;</s>");
        assert_eq!(removed.path(), "<x>");
    }

    #[test]
    fn counts_added_and_removed_lines() {
        let diff = "--- a/x\n+++ b/x\n@@ -1,2 +1,3 @@\n a\n-b\n+c\n+d\n@@ -9 +10 @@\n-e\n+f\n";
        let file = parse_file_diff(diff).unwrap();
        assert_eq!(
            file.stats(),
            DiffStats {
                added: 3,
                removed: 2
            }
        );
    }
}
