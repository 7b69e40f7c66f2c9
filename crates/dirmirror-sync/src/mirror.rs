//! Directory mirror engine
//!
//! One level at a time: create the destination directory, sync the files,
//! prune destination files, prune destination directories, then descend into
//! the source subdirectories. Each call returns its own change flag and the
//! caller ORs them together.

use crate::entry::sync_file_if_newer;
use crate::exclude::{should_exclude_directory, should_exclude_file};
use crate::listing::{is_read_only, is_symlink, list_directory};
use dirmirror_types::{BackupLocation, ChangeOutcome, MirrorOps, MirrorReporter, Result};
use std::path::Path;

/// Mirrors the directory tree of one [`BackupLocation`]
pub struct DirectoryMirror<'a, O: ?Sized, R: ?Sized> {
    ops: &'a O,
    reporter: &'a mut R,
    location: &'a BackupLocation,
}

impl<'a, O, R> DirectoryMirror<'a, O, R>
where
    O: MirrorOps + ?Sized,
    R: MirrorReporter + ?Sized,
{
    /// Create a mirror for `location`, mutating through `ops`
    pub fn new(ops: &'a O, reporter: &'a mut R, location: &'a BackupLocation) -> Self {
        Self {
            ops,
            reporter,
            location,
        }
    }

    /// Mirror the location's source directory onto its destination
    pub fn mirror(&mut self) -> Result<bool> {
        let location = self.location;
        self.mirror_directory(location.source(), location.destination())
    }

    /// Mirror `source_dir` onto `dest_dir`, returning whether anything changed
    pub fn mirror_directory(&mut self, source_dir: &Path, dest_dir: &Path) -> Result<bool> {
        let location = self.location;
        let patterns = location.exclude_patterns();
        let mut changed = false;

        if !dest_dir.exists() {
            self.ops.create_dir_all(dest_dir)?;
            changed = true;
        }

        let source = list_directory(source_dir)?;

        for file in &source.files {
            if should_exclude_file(file, patterns) {
                continue;
            }
            let outcome = sync_file_if_newer(self.ops, file, dest_dir)?;
            self.report(outcome, file);
            changed |= outcome.is_change();
        }

        // A destination that was only planned in a dry run has nothing to prune
        if dest_dir.is_dir() {
            changed |= self.prune(source_dir, dest_dir)?;
        }

        for directory in &source.directories {
            if should_exclude_directory(directory, patterns) {
                continue;
            }
            let Some(name) = directory.file_name() else {
                continue;
            };
            changed |= self.mirror_directory(directory, &dest_dir.join(name))?;
        }

        Ok(changed)
    }

    /// Remove destination entries whose source counterpart is missing or excluded
///
/// A destination directory standing where the source has a file is left to
/// the file sync, which replaces it.
    fn prune(&mut self, source_dir: &Path, dest_dir: &Path) -> Result<bool> {
        let location = self.location;
        let patterns = location.exclude_patterns();
        let destination = list_directory(dest_dir)?;
        let mut changed = false;

        for file in &destination.files {
            let Some(name) = file.file_name() else {
                continue;
            };
            let counterpart = source_dir.join(name);
            if counterpart.is_file() && !should_exclude_file(&counterpart, patterns) {
                continue;
            }

            self.report(ChangeOutcome::Removed, &counterpart);
            // A link goes as a link, its target keeps its permissions
            if !is_symlink(file)? && is_read_only(file)? {
                self.ops.clear_read_only(file)?;
            }
            self.ops.remove_file(file)?;
            changed = true;
        }

        for directory in &destination.directories {
            let Some(name) = directory.file_name() else {
                continue;
            };
            let counterpart = source_dir.join(name);
            let kept = if counterpart.is_dir() {
                !should_exclude_directory(&counterpart, patterns)
            } else {
                // Already replaced by the file sync, or only planned in a dry run
                counterpart.is_file() && !should_exclude_file(&counterpart, patterns)
            };
            if kept {
                continue;
            }

            self.report(ChangeOutcome::Removed, &counterpart);
            self.ops.remove_tree(directory)?;
            changed = true;
        }

        Ok(changed)
    }

    fn report(&mut self, outcome: ChangeOutcome, source_path: &Path) {
        let relative = self.location.relative_to_source(source_path);
        match outcome {
            ChangeOutcome::Unchanged => {}
            ChangeOutcome::Added => self.reporter.report_added(relative),
            ChangeOutcome::Updated => self.reporter.report_updated(relative),
            ChangeOutcome::Removed => self.reporter.report_removed(relative),
        }
    }
}
