//! Tree fixtures and snapshots for mirror tests

use dirmirror_types::BackupLocation;
use filetime::FileTime;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};
use std::time::SystemTime;
use tempfile::TempDir;
use walkdir::WalkDir;

/// A temporary source tree and a (not yet created) destination next to it
pub struct MirrorFixture {
    temp_dir: TempDir,
    /// Source root, created empty
    pub source: PathBuf,
    /// Destination root, not created
    pub dest: PathBuf,
}

impl MirrorFixture {
    /// Create the fixture
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = temp_dir.path().join("source");
        let dest = temp_dir.path().join("dest");
        fs::create_dir_all(&source).expect("Failed to create source root");
        Self {
            temp_dir,
            source,
            dest,
        }
    }

    /// Root of the temporary directory
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Location mirroring the source root onto the destination root
    pub fn location(&self, exclude_patterns: &[&str]) -> BackupLocation {
        BackupLocation::new(
            &self.source,
            &self.dest,
            exclude_patterns.iter().map(|p| native(p)).collect(),
        )
    }

    /// Write `relative` below the source root with a fixed modification time
    pub fn source_file(&self, relative: &str, content: &str, unix_time: i64) -> PathBuf {
        write_file(&self.source.join(native(relative)), content, unix_time)
    }

    /// Write `relative` below the destination root with a fixed modification time
    pub fn dest_file(&self, relative: &str, content: &str, unix_time: i64) -> PathBuf {
        write_file(&self.dest.join(native(relative)), content, unix_time)
    }
}

impl Default for MirrorFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace `/` with the platform separator
pub fn native(text: &str) -> String {
    text.replace('/', MAIN_SEPARATOR_STR)
}

/// Write a file, creating its parents, and pin its modification time
pub fn write_file(path: &Path, content: &str, unix_time: i64) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write test file");
    filetime::set_file_mtime(path, FileTime::from_unix_time(unix_time, 0))
        .expect("Failed to set modification time");
    path.to_path_buf()
}

/// Set or clear the read-only attribute
pub fn set_read_only(path: &Path, read_only: bool) {
    let mut permissions = fs::metadata(path)
        .expect("Failed to read metadata")
        .permissions();
    permissions.set_readonly(read_only);
    fs::set_permissions(path, permissions).expect("Failed to set permissions");
}

/// Modification time of a file
pub fn mtime(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .expect("Failed to read modification time")
}

/// State of one entry in a [`snapshot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    /// A directory
    Directory {
        /// Read-only attribute
        read_only: bool,
    },
    /// A regular file
    File {
        /// File contents
        content: Vec<u8>,
        /// Modification time
        modified: SystemTime,
        /// Read-only attribute
        read_only: bool,
    },
}

/// Every entry below `root` keyed by its path relative to `root`
///
/// A missing root yields an empty snapshot.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, EntryState> {
    let mut entries = BTreeMap::new();
    if !root.exists() {
        return entries;
    }

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.expect("Failed to walk tree");
        let metadata = entry.metadata().expect("Failed to read metadata");
        let relative = entry
            .path()
            .strip_prefix(root)
            .expect("Walked outside the root")
            .to_path_buf();
        let read_only = metadata.permissions().readonly();

        let state = if metadata.is_dir() {
            EntryState::Directory { read_only }
        } else {
            EntryState::File {
                content: fs::read(entry.path()).expect("Failed to read file"),
                modified: metadata.modified().expect("Failed to read modification time"),
                read_only,
            }
        };
        entries.insert(relative, state);
    }
    entries
}

/// Relative paths of all regular files below `root`
pub fn file_paths(root: &Path) -> Vec<PathBuf> {
    snapshot(root)
        .into_iter()
        .filter(|(_, state)| matches!(state, EntryState::File { .. }))
        .map(|(path, _)| path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_of_missing_root_is_empty() {
        let fixture = MirrorFixture::new();
        assert!(snapshot(&fixture.dest).is_empty());
    }

    #[test]
    fn test_snapshot_records_files_and_directories() {
        let fixture = MirrorFixture::new();
        fixture.source_file("a/b.txt", "b", 1_000);

        let snapshot = snapshot(&fixture.source);

        assert_eq!(snapshot.len(), 2);
        assert!(matches!(
            snapshot.get(Path::new("a")),
            Some(EntryState::Directory { .. })
        ));
        match snapshot.get(&Path::new("a").join("b.txt")) {
            Some(EntryState::File {
                content, modified, ..
            }) => {
                assert_eq!(content, b"b");
                assert_eq!(
                    *modified,
                    SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000)
                );
            }
            other => panic!("unexpected entry: {other:?}"),
        }
    }
}
