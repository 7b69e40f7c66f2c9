//! End-to-end tests for dirmirror
//!
//! The integration tests run whole mirror passes over real temporary trees.
//! The helpers they share live in [`test_utils`].

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Tree fixtures and snapshots shared by the integration tests
pub mod test_utils;
