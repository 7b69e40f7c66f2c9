//! Core type system and error handling for dirmirror
//!
//! This crate provides the foundational types shared by every dirmirror crate:
//!
//! - **Backup locations**: the `(source, destination, excludes)` unit of mirroring work
//! - **Change outcomes**: what happened to a single entry during a run
//! - **Error handling**: a fail-fast error taxonomy that keeps the failing path and OS message
//! - **Traits**: the reporting sink and the filesystem capability the engine mutates through
//!
//! # Features
//!
//! - `serde`: Enable serialization support for the plain data types
//!
//! # Examples
//!
//! ```rust
//! use dirmirror_types::{BackupLocation, ChangeOutcome};
//!
//! let location = BackupLocation::new("/home/me/docs", "/mnt/backup/docs", vec!["*.tmp".into()]);
//! assert_eq!(location.exclude_patterns().len(), 1);
//! assert!(ChangeOutcome::Added.is_change());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Error, ErrorKind, FsOperation};
pub use result::Result;
pub use traits::*;
pub use types::*;
