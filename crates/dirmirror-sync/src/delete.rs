//! Recursive force-delete of destination subtrees
//!
//! Used once pruning has decided a destination directory has no source
//! counterpart. No exclusion filtering happens below that point.

use crate::listing::is_read_only;
use dirmirror_types::{Error, FsOperation, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Make `path` writable if it carries the read-only attribute
///
/// On Unix only the owner-write bit is added, other mode bits are kept.
pub fn clear_read_only(path: &Path) -> Result<()> {
    if !is_read_only(path)? {
        return Ok(());
    }

    let mut permissions = fs::metadata(path)
        .map_err(|e| Error::io(FsOperation::ReadMetadata, path, e))?
        .permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o200);
    }

    #[cfg(not(unix))]
    {
        permissions.set_readonly(false);
    }

    fs::set_permissions(path, permissions)
        .map_err(|e| Error::io(FsOperation::SetPermissions, path, e))?;
    debug!("Cleared read-only flag: {}", path.display());
    Ok(())
}

/// Delete `dir` and everything below it, clearing read-only flags first
///
/// The directory's own flag is cleared before its children are touched, since
/// on Unix the directory's write bit gates removal of its entries. Files go
/// first, then subdirectories, then the directory itself. Symbolic links are
/// removed as links and never followed.
pub fn delete_tree_forced(dir: &Path) -> Result<()> {
    let link = fs::symlink_metadata(dir)
        .map_err(|e| Error::io(FsOperation::ReadMetadata, dir, e))?
        .file_type()
        .is_symlink();
    if link {
        return remove_file(dir);
    }

    clear_read_only(dir)?;

    let mut subdirectories = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(FsOperation::ReadDirectory, dir, e))? {
        let entry = entry.map_err(|e| Error::io(FsOperation::ReadDirectory, dir, e))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io(FsOperation::ReadMetadata, &path, e))?;

        if file_type.is_dir() {
            subdirectories.push(path);
        } else {
            if !file_type.is_symlink() {
                clear_read_only(&path)?;
            }
            remove_file(&path)?;
        }
    }

    for subdirectory in subdirectories {
        delete_tree_forced(&subdirectory)?;
    }

    fs::remove_dir(dir).map_err(|e| Error::io(FsOperation::RemoveDirectory, dir, e))?;
    debug!("Deleted directory: {}", dir.display());
    Ok(())
}

fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(FsOperation::RemoveFile, path, e))?;
    debug!("Deleted: {}", path.display());
    Ok(())
}
