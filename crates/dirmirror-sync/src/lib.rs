//! Timestamp-driven one-way directory mirroring for dirmirror
//!
//! This crate makes destination trees structurally and temporally consistent
//! with their sources:
//!
//! - **Exclusion**: literal and suffix exclude patterns for files and directories
//! - **Entry sync**: add missing files, overwrite strictly older ones
//! - **Pruning**: remove destination entries without a non-excluded source counterpart
//! - **Force delete**: remove whole destination subtrees, read-only entries included
//! - **Dry run**: identical decisions and reports with no filesystem mutation
//!
//! # Examples
//!
//! ```rust,no_run
//! use dirmirror_sync::{run_mirror, RecordingReporter};
//! use dirmirror_types::BackupLocation;
//!
//! # fn example() -> dirmirror_types::Result<()> {
//! let locations = vec![BackupLocation::new(
//!     "/home/me/docs",
//!     "/mnt/backup/docs",
//!     vec!["*.tmp".to_string()],
//! )];
//! let mut reporter = RecordingReporter::new();
//! let changed = run_mirror(&locations, true, &mut reporter)?;
//! println!("changes pending: {}", changed);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod delete;
pub mod engine;
pub mod entry;
pub mod exclude;
pub mod listing;
pub mod mirror;
pub mod ops;
pub mod report;

pub use delete::delete_tree_forced;
pub use engine::{run_mirror, MirrorEngine, MirrorOptions};
pub use entry::sync_file_if_newer;
pub use exclude::{should_exclude_directory, should_exclude_file, ExcludeRule};
pub use mirror::DirectoryMirror;
pub use ops::{DryRunOps, LocalOps};
pub use report::{ChangeSummary, MirrorEvent, RecordingReporter};
