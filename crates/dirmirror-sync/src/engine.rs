//! Mirror orchestrator: runs every location of a profile in order

use crate::entry::sync_file_if_newer;
use crate::mirror::DirectoryMirror;
use crate::ops::{DryRunOps, LocalOps};
use dirmirror_types::{BackupLocation, ChangeOutcome, MirrorOps, MirrorReporter, Result};
use tracing::{debug, info};

/// Options for a mirror run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorOptions {
    /// Compute and report everything without mutating the filesystem
    pub dry_run: bool,
}

impl MirrorOptions {
    /// Options for a dry run
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

/// Mirror engine
#[derive(Debug, Clone, Default)]
pub struct MirrorEngine {
    options: MirrorOptions,
}

impl MirrorEngine {
    /// Create a new engine with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new engine with the given options
    pub fn with_options(options: MirrorOptions) -> Self {
        Self { options }
    }

    /// Engine options
    pub fn options(&self) -> &MirrorOptions {
        &self.options
    }

    /// Mirror every location, in order
    ///
    /// Every location is processed even when earlier ones changed nothing. The
    /// first error aborts the run, and no run outcome is reported then.
    pub fn run<R>(&self, locations: &[BackupLocation], reporter: &mut R) -> Result<bool>
    where
        R: MirrorReporter + ?Sized,
    {
        if self.options.dry_run {
            self.run_with_ops(&DryRunOps, locations, reporter)
        } else {
            self.run_with_ops(&LocalOps, locations, reporter)
        }
    }

    /// Mirror every location through a caller-supplied capability
    pub fn run_with_ops<O, R>(
        &self,
        ops: &O,
        locations: &[BackupLocation],
        reporter: &mut R,
    ) -> Result<bool>
    where
        O: MirrorOps + ?Sized,
        R: MirrorReporter + ?Sized,
    {
        let dry_run = ops.is_dry_run();
        let mut changed = false;

        for location in locations {
            info!(
                "Mirroring {} -> {}",
                location.source().display(),
                location.destination().display()
            );
            reporter.report_location_start(location.source());
            changed |= mirror_location(ops, reporter, location)?;
        }

        info!("Mirror run finished (changed: {}, dry run: {})", changed, dry_run);
        reporter.report_run_outcome(changed, dry_run);
        Ok(changed)
    }
}

/// Mirror `locations` onto their destinations
///
/// Returns whether anything changed (or would have, for a dry run).
pub fn run_mirror<R>(locations: &[BackupLocation], dry_run: bool, reporter: &mut R) -> Result<bool>
where
    R: MirrorReporter + ?Sized,
{
    MirrorEngine::with_options(MirrorOptions { dry_run }).run(locations, reporter)
}

fn mirror_location<O, R>(ops: &O, reporter: &mut R, location: &BackupLocation) -> Result<bool>
where
    O: MirrorOps + ?Sized,
    R: MirrorReporter + ?Sized,
{
    if !location.source().is_file() {
        return DirectoryMirror::new(ops, reporter, location).mirror();
    }

    // A single file: its own root is never excluded, and creating the
    // destination directory alone does not count as a change
    let destination = location.destination();
    if !destination.exists() {
        debug!("Creating destination {}", destination.display());
        ops.create_dir_all(destination)?;
    }

    let outcome = sync_file_if_newer(ops, location.source(), destination)?;
    match outcome {
        ChangeOutcome::Added => reporter.report_added(location.source()),
        ChangeOutcome::Updated => reporter.report_updated(location.source()),
        ChangeOutcome::Removed | ChangeOutcome::Unchanged => {}
    }
    Ok(outcome.is_change())
}
