//! Core traits for dirmirror operations
//!
//! The mirror core never talks to the console and never mutates the filesystem
//! directly. Decisions are reported through [`MirrorReporter`] and executed
//! through [`MirrorOps`], so a dry run is just a different `MirrorOps`.

use crate::Result;
use std::path::Path;

/// Sink for the decisions taken during a mirror run
///
/// Paths passed to the per-entry methods are relative to the source root of the
/// location being processed. A location whose source is a single file reports
/// that file's full source path instead.
pub trait MirrorReporter {
    /// A location is about to be processed
    fn report_location_start(&mut self, source: &Path);

    /// A file was missing at the destination and is copied
    fn report_added(&mut self, relative_path: &Path);

    /// A file is newer at the source and is copied over the destination copy
    fn report_updated(&mut self, relative_path: &Path);

    /// A destination file or directory has no source counterpart and is deleted
    fn report_removed(&mut self, relative_path: &Path);

    /// All locations were processed
    fn report_run_outcome(&mut self, changed: bool, dry_run: bool);
}

impl<R: MirrorReporter + ?Sized> MirrorReporter for &mut R {
    fn report_location_start(&mut self, source: &Path) {
        (**self).report_location_start(source);
    }

    fn report_added(&mut self, relative_path: &Path) {
        (**self).report_added(relative_path);
    }

    fn report_updated(&mut self, relative_path: &Path) {
        (**self).report_updated(relative_path);
    }

    fn report_removed(&mut self, relative_path: &Path) {
        (**self).report_removed(relative_path);
    }

    fn report_run_outcome(&mut self, changed: bool, dry_run: bool) {
        (**self).report_run_outcome(changed, dry_run);
    }
}

/// Filesystem mutations the mirror core performs
///
/// Every mutation site first calls [`MirrorOps::clear_read_only`] when the
/// target is read-only and then performs the mutation itself.
pub trait MirrorOps {
    /// Create `dir` and all of its missing ancestors
    fn create_dir_all(&self, dir: &Path) -> Result<()>;

    /// Copy `source` to `destination`, overwriting it
    fn copy_file(&self, source: &Path, destination: &Path) -> Result<()>;

    /// Delete a single file
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Delete a directory and everything below it, clearing read-only flags on the way
    fn remove_tree(&self, dir: &Path) -> Result<()>;

    /// Make `path` writable; a no-op when it already is
    fn clear_read_only(&self, path: &Path) -> Result<()>;

    /// Whether this implementation only records intent
    fn is_dry_run(&self) -> bool {
        false
    }
}
