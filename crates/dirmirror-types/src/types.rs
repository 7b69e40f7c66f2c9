//! Core data types for dirmirror

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One unit of mirroring work: a source, a destination and its exclude patterns
///
/// Constructed once when a profile is loaded and validated, immutable afterwards.
/// The source is expected to exist when a run starts; the destination is created
/// on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BackupLocation {
    source: PathBuf,
    destination: PathBuf,
    exclude_patterns: Vec<String>,
}

impl BackupLocation {
    /// Create a new backup location
    pub fn new<S, D>(source: S, destination: D, exclude_patterns: Vec<String>) -> Self
    where
        S: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        Self {
            source: source.into(),
            destination: destination.into(),
            exclude_patterns,
        }
    }

    /// Path of the file or directory to mirror
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory receiving the mirrored copy
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Exclude patterns, matched existentially
    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }

    /// Path of `path` relative to this location's source root
    ///
    /// Paths outside the source root are returned unchanged.
    pub fn relative_to_source<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.source).unwrap_or(path)
    }
}

impl fmt::Display for BackupLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path:\t'{}'", self.source.display())?;
        writeln!(f, "Dest:\t'{}'", self.destination.display())?;
        writeln!(f, "Excludes:")?;
        if self.exclude_patterns.is_empty() {
            return writeln!(f, "\t[none]");
        }
        for pattern in &self.exclude_patterns {
            writeln!(f, "\t- '{}'", pattern)?;
        }
        Ok(())
    }
}

/// Outcome of processing a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChangeOutcome {
    /// Destination already current, nothing done
    Unchanged,
    /// Entry was missing at the destination and got copied
    Added,
    /// Source was newer than the destination copy and got copied over it
    Updated,
    /// Destination entry had no source counterpart and got deleted
    Removed,
}

impl ChangeOutcome {
    /// Whether this outcome counts as a change for end-of-run reporting
    pub fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_to_source() {
        let location = BackupLocation::new("/data/src", "/backup", Vec::new());

        assert_eq!(
            location.relative_to_source(Path::new("/data/src/a/b.txt")),
            Path::new("a/b.txt")
        );
        assert_eq!(
            location.relative_to_source(Path::new("/elsewhere/c.txt")),
            Path::new("/elsewhere/c.txt")
        );
    }

    #[test]
    fn test_display_lists_excludes() {
        let location = BackupLocation::new("/s", "/d", vec!["*.tmp".to_string()]);
        let text = location.to_string();

        assert!(text.contains("Path:\t'/s'"));
        assert!(text.contains("Dest:\t'/d'"));
        assert!(text.contains("- '*.tmp'"));

        let bare = BackupLocation::new("/s", "/d", Vec::new()).to_string();
        assert!(bare.contains("[none]"));
    }
}
