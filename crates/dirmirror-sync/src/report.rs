//! Reporter implementations that do not depend on a terminal

use dirmirror_types::MirrorReporter;
use std::path::{Path, PathBuf};

/// Something a [`MirrorReporter`] was told during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    /// A location is about to be processed
    LocationStart(PathBuf),
    /// A file was added
    Added(PathBuf),
    /// A file was updated
    Updated(PathBuf),
    /// A file or directory was removed
    Removed(PathBuf),
    /// The run finished
    RunOutcome {
        /// Whether anything changed
        changed: bool,
        /// Whether the run was a dry run
        dry_run: bool,
    },
}

/// Per-run counts of reported changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Number of added files
    pub added: usize,
    /// Number of updated files
    pub updated: usize,
    /// Number of removed files and directories
    pub removed: usize,
}

impl ChangeSummary {
    /// Total number of reported changes
    pub fn total(&self) -> usize {
        self.added + self.updated + self.removed
    }
}

/// Keeps every event in order, for assertions and post-run inspection
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    events: Vec<MirrorEvent>,
}

impl RecordingReporter {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far
    pub fn events(&self) -> &[MirrorEvent] {
        &self.events
    }

    /// Consume the recorder, keeping only per-entry change events
    pub fn into_changes(self) -> Vec<MirrorEvent> {
        self.events
            .into_iter()
            .filter(|event| {
                matches!(
                    event,
                    MirrorEvent::Added(_) | MirrorEvent::Updated(_) | MirrorEvent::Removed(_)
                )
            })
            .collect()
    }

    /// Counts of the change events received so far
    pub fn summary(&self) -> ChangeSummary {
        let mut summary = ChangeSummary::default();
        for event in &self.events {
            match event {
                MirrorEvent::Added(_) => summary.added += 1,
                MirrorEvent::Updated(_) => summary.updated += 1,
                MirrorEvent::Removed(_) => summary.removed += 1,
                MirrorEvent::LocationStart(_) | MirrorEvent::RunOutcome { .. } => {}
            }
        }
        summary
    }
}

impl MirrorReporter for RecordingReporter {
    fn report_location_start(&mut self, source: &Path) {
        self.events
            .push(MirrorEvent::LocationStart(source.to_path_buf()));
    }

    fn report_added(&mut self, relative_path: &Path) {
        self.events.push(MirrorEvent::Added(relative_path.to_path_buf()));
    }

    fn report_updated(&mut self, relative_path: &Path) {
        self.events
            .push(MirrorEvent::Updated(relative_path.to_path_buf()));
    }

    fn report_removed(&mut self, relative_path: &Path) {
        self.events
            .push(MirrorEvent::Removed(relative_path.to_path_buf()));
    }

    fn report_run_outcome(&mut self, changed: bool, dry_run: bool) {
        self.events.push(MirrorEvent::RunOutcome { changed, dry_run });
    }
}
