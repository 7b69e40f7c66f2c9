//! Filesystem capability implementations
//!
//! [`LocalOps`] performs the mutations, [`DryRunOps`] only logs what would
//! happen. The mirror decisions are identical for both.

use crate::delete;
use crate::listing::modified_time;
use dirmirror_types::{Error, FsOperation, MirrorOps, Result};
use filetime::FileTime;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Mutates the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOps;

impl MirrorOps for LocalOps {
    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| Error::io(FsOperation::CreateDirectory, dir, e))?;
        debug!("Created directory: {}", dir.display());
        Ok(())
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> Result<()> {
        fs::copy(source, destination)
            .map_err(|e| Error::io(FsOperation::CopyFile, destination, e))?;

        // Keep the source mtime so the next run sees equal timestamps
        let modified = modified_time(source)?;
        filetime::set_file_mtime(destination, FileTime::from_system_time(modified))
            .map_err(|e| Error::io(FsOperation::SetModifiedTime, destination, e))?;

        debug!("Copied: {} -> {}", source.display(), destination.display());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| Error::io(FsOperation::RemoveFile, path, e))?;
        debug!("Deleted: {}", path.display());
        Ok(())
    }

    fn remove_tree(&self, dir: &Path) -> Result<()> {
        delete::delete_tree_forced(dir)
    }

    fn clear_read_only(&self, path: &Path) -> Result<()> {
        delete::clear_read_only(path)
    }
}

/// Logs intended mutations without touching the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunOps;

impl MirrorOps for DryRunOps {
    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        debug!("DRY RUN: Would create directory {}", dir.display());
        Ok(())
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> Result<()> {
        debug!(
            "DRY RUN: Would copy {} -> {}",
            source.display(),
            destination.display()
        );
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        debug!("DRY RUN: Would delete {}", path.display());
        Ok(())
    }

    fn remove_tree(&self, dir: &Path) -> Result<()> {
        debug!("DRY RUN: Would delete directory tree {}", dir.display());
        Ok(())
    }

    fn clear_read_only(&self, path: &Path) -> Result<()> {
        debug!("DRY RUN: Would clear read-only flag of {}", path.display());
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// A single call received by [`RecordingOps`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum OpCall {
        CreateDir(PathBuf),
        Copy(PathBuf, PathBuf),
        RemoveFile(PathBuf),
        RemoveTree(PathBuf),
        ClearReadOnly(PathBuf),
    }

    /// Records calls and forwards them to an inner capability
    pub struct RecordingOps<O> {
        inner: O,
        calls: RefCell<Vec<OpCall>>,
    }

    impl<O: MirrorOps> RecordingOps<O> {
        pub fn new(inner: O) -> Self {
            Self {
                inner,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<OpCall> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: OpCall) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl<O: MirrorOps> MirrorOps for RecordingOps<O> {
        fn create_dir_all(&self, dir: &Path) -> Result<()> {
            self.record(OpCall::CreateDir(dir.to_path_buf()));
            self.inner.create_dir_all(dir)
        }

        fn copy_file(&self, source: &Path, destination: &Path) -> Result<()> {
            self.record(OpCall::Copy(source.to_path_buf(), destination.to_path_buf()));
            self.inner.copy_file(source, destination)
        }

        fn remove_file(&self, path: &Path) -> Result<()> {
            self.record(OpCall::RemoveFile(path.to_path_buf()));
            self.inner.remove_file(path)
        }

        fn remove_tree(&self, dir: &Path) -> Result<()> {
            self.record(OpCall::RemoveTree(dir.to_path_buf()));
            self.inner.remove_tree(dir)
        }

        fn clear_read_only(&self, path: &Path) -> Result<()> {
            self.record(OpCall::ClearReadOnly(path.to_path_buf()));
            self.inner.clear_read_only(path)
        }

        fn is_dry_run(&self) -> bool {
            self.inner.is_dry_run()
        }
    }
}
