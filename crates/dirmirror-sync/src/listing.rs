//! Read-only filesystem queries used by the mirror decisions
//!
//! Nothing in here mutates the filesystem, so these run identically in dry-run
//! and real mode.

use dirmirror_types::{Error, FsOperation, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Direct entries of a directory, split by kind and sorted by file name
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirListing {
    /// Regular files (symlinks resolving to files included)
    pub files: Vec<PathBuf>,
    /// Subdirectories (symlinks resolving to directories included)
    pub directories: Vec<PathBuf>,
}

/// List the direct files and subdirectories of `dir`
///
/// Symbolic links are classified by their target. Broken links and special
/// files (sockets, FIFOs, devices) are skipped.
pub fn list_directory(dir: &Path) -> Result<DirListing> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(FsOperation::ReadDirectory, dir, e))?;
    let mut listing = DirListing::default();

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(FsOperation::ReadDirectory, dir, e))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io(FsOperation::ReadMetadata, &path, e))?;

        let (is_file, is_dir) = if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(target) => (target.is_file(), target.is_dir()),
                Err(e) => {
                    warn!("Skipping unresolvable symlink {}: {}", path.display(), e);
                    continue;
                }
            }
        } else {
            (file_type.is_file(), file_type.is_dir())
        };

        if is_dir {
            listing.directories.push(path);
        } else if is_file {
            listing.files.push(path);
        } else {
            debug!("Skipping special file {}", path.display());
        }
    }

    listing.files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    listing
        .directories
        .sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(listing)
}

/// Last modification time of `path`
pub fn modified_time(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| Error::io(FsOperation::ReadMetadata, path, e))
}

/// Whether `path` itself is a symbolic link, without following it
pub fn is_symlink(path: &Path) -> Result<bool> {
    fs::symlink_metadata(path)
        .map(|metadata| metadata.file_type().is_symlink())
        .map_err(|e| Error::io(FsOperation::ReadMetadata, path, e))
}

/// Whether `path` carries the read-only attribute
///
/// On Unix this means the owner-write bit is missing.
pub fn is_read_only(path: &Path) -> Result<bool> {
    let metadata = fs::metadata(path).map_err(|e| Error::io(FsOperation::ReadMetadata, path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Ok(metadata.permissions().mode() & 0o200 == 0)
    }

    #[cfg(not(unix))]
    {
        Ok(metadata.permissions().readonly())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_directory_splits_and_sorts() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("b.txt"), b"b").unwrap();
        fs::write(root.join("a.txt"), b"a").unwrap();
        fs::create_dir(root.join("zeta")).unwrap();
        fs::create_dir(root.join("alpha")).unwrap();

        let listing = list_directory(root)?;

        assert_eq!(listing.files, vec![root.join("a.txt"), root.join("b.txt")]);
        assert_eq!(
            listing.directories,
            vec![root.join("alpha"), root.join("zeta")]
        );
        Ok(())
    }

    #[test]
    fn test_list_missing_directory_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let error = list_directory(&missing).unwrap_err();
        assert_eq!(error.path(), Some(missing.as_path()));
        assert!(error.to_string().contains("read directory"));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinks_follow_their_target() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("real.txt"), b"x").unwrap();
        fs::create_dir(root.join("real_dir")).unwrap();
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("real_dir"), root.join("link_dir")).unwrap();
        std::os::unix::fs::symlink(root.join("gone"), root.join("broken")).unwrap();

        let listing = list_directory(root)?;

        assert_eq!(
            listing.files,
            vec![root.join("link.txt"), root.join("real.txt")]
        );
        assert_eq!(
            listing.directories,
            vec![root.join("link_dir"), root.join("real_dir")]
        );
        Ok(())
    }

    #[test]
    #[cfg(unix)]
    fn test_is_symlink_does_not_follow() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("real.txt"), b"x").unwrap();
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("gone"), root.join("broken")).unwrap();

        assert!(!is_symlink(&root.join("real.txt"))?);
        assert!(is_symlink(&root.join("link.txt"))?);
        assert!(is_symlink(&root.join("broken"))?);
        assert!(is_symlink(&root.join("missing")).is_err());
        Ok(())
    }

    #[test]
    fn test_read_only_detection() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("locked.txt");
        fs::write(&file, b"x").unwrap();
        assert!(!is_read_only(&file)?);

        let mut permissions = fs::metadata(&file).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&file, permissions).unwrap();
        assert!(is_read_only(&file)?);
        Ok(())
    }
}
