//! Error types and handling for dirmirror
//!
//! A mirror run is fail-fast: the first error aborts the whole run, including
//! locations not processed yet. Errors therefore carry everything a caller needs
//! to present them (the failing operation, its target path and the OS message)
//! instead of being retried or accumulated.

use std::fmt;
use std::path::{Path, PathBuf};

/// Filesystem step that was being performed when an I/O error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FsOperation {
    /// Listing the entries of a directory
    ReadDirectory,
    /// Reading metadata (existence, kind, timestamps, permissions)
    ReadMetadata,
    /// Creating a directory and its missing ancestors
    CreateDirectory,
    /// Copying file contents
    CopyFile,
    /// Setting the modification time of a copied file
    SetModifiedTime,
    /// Changing permissions to clear the read-only flag
    SetPermissions,
    /// Removing a file
    RemoveFile,
    /// Removing an empty directory
    RemoveDirectory,
}

impl fmt::Display for FsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ReadDirectory => "read directory",
            Self::ReadMetadata => "read metadata of",
            Self::CreateDirectory => "create directory",
            Self::CopyFile => "copy file to",
            Self::SetModifiedTime => "set modification time of",
            Self::SetPermissions => "clear read-only flag of",
            Self::RemoveFile => "remove file",
            Self::RemoveDirectory => "remove directory",
        };
        f.write_str(text)
    }
}

/// Main error type for dirmirror operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A filesystem operation failed
    #[error("failed to {operation} '{path}': {source}")]
    Io {
        /// Operation that failed
        operation: FsOperation,
        /// Target path of the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// A backup profile could not be selected, loaded or validated
    #[error("{}", messages.join("; "))]
    Profile {
        /// Human-readable messages, one per problem
        messages: Vec<String>,
        /// Optional additional details (hints, underlying causes)
        details: Vec<String>,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Filesystem errors raised by the mirror core
    Io,
    /// Configuration errors
    Config,
    /// Profile selection, loading and validation errors
    Profile,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::Config { .. } => ErrorKind::Config,
            Self::Profile { .. } => ErrorKind::Profile,
        }
    }

    /// Create a new filesystem error for `operation` on `path`
    pub fn io(operation: FsOperation, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new profile error with a single message and an optional detail
    pub fn profile<S: Into<String>>(message: S, detail: Option<String>) -> Self {
        Self::Profile {
            messages: vec![message.into()],
            details: detail.into_iter().collect(),
        }
    }

    /// Target path of a filesystem error
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Messages to present to the user, most important first
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Io {
                operation, path, ..
            } => vec![format!("Failed to {} '{}'.", operation, path.display())],
            Self::Config { message } => vec![message.clone()],
            Self::Profile { messages, .. } => messages.clone(),
        }
    }

    /// Additional details to present below the messages
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::Io { source, .. } => vec![source.to_string()],
            Self::Config { .. } => Vec::new(),
            Self::Profile { details, .. } => details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    proptest! {
        #[test]
        fn test_io_error_keeps_path_and_os_message(
            name in "[a-z]{1,12}",
            message in "[a-zA-Z ]{1,40}"
        ) {
            let path = PathBuf::from("/backup").join(&name);
            let error = Error::io(
                FsOperation::RemoveFile,
                &path,
                std::io::Error::new(std::io::ErrorKind::Other, message.clone()),
            );

            prop_assert_eq!(error.path(), Some(path.as_path()));
            prop_assert!(error.messages()[0].contains(&name));
            prop_assert_eq!(error.details(), vec![message.clone()]);
            prop_assert!(error.to_string().contains(&message));
        }

        #[test]
        fn test_profile_error_presentation(
            messages in proptest::collection::vec("[a-z ]{1,20}", 1..5)
        ) {
            let error = Error::Profile { messages: messages.clone(), details: Vec::new() };

            prop_assert_eq!(error.kind(), ErrorKind::Profile);
            prop_assert_eq!(error.messages(), messages);
            prop_assert!(error.details().is_empty());
            prop_assert!(error.path().is_none());
        }
    }

    #[rstest]
    #[case(FsOperation::CopyFile, "failed to copy file to '/d/a.txt': boom")]
    #[case(FsOperation::RemoveDirectory, "failed to remove directory '/d/a.txt': boom")]
    #[case(FsOperation::SetPermissions, "failed to clear read-only flag of '/d/a.txt': boom")]
    fn test_io_error_display(#[case] operation: FsOperation, #[case] expected: &str) {
        let error = Error::io(
            operation,
            "/d/a.txt",
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        );
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_profile_error_with_detail() {
        let error = Error::profile("No profiles found", Some("Put a *.yaml file there".into()));

        assert_eq!(error.messages(), vec!["No profiles found".to_string()]);
        assert_eq!(error.details(), vec!["Put a *.yaml file there".to_string()]);
        assert_eq!(error.to_string(), "No profiles found");
    }

    #[test]
    fn test_config_error() {
        let error = Error::config("Log level must be one of: trace, debug, info, warn, error");

        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.details().is_empty());
        assert!(error.to_string().starts_with("Configuration error:"));
    }
}
