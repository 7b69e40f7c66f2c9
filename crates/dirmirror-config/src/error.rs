//! Error types for settings and profile management

use dirmirror_types::Error as DirmirrorError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error when reading or writing a settings or profile file
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A settings or profile file could not be parsed
    #[error("Failed to parse '{path}': {message}")]
    Parse {
        /// Path of the file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A profile failed validation; every problem found is listed
    #[error("{}", messages.join("; "))]
    Validation {
        /// One message per problem
        messages: Vec<String>,
    },

    /// A settings value is out of range
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Settings key
        key: String,
        /// Error message
        message: String,
    },

    /// The profile directory does not exist
    #[error("The profile directory '{path}' does not exist.")]
    ProfileDirectoryMissing {
        /// Expected directory
        path: PathBuf,
    },

    /// The profile directory contains no profile files
    #[error("No backup profiles found in '{path}'.")]
    NoProfiles {
        /// Scanned directory
        path: PathBuf,
    },

    /// No profile matches the requested name
    #[error("No backup profile named '{name}'.")]
    UnknownProfile {
        /// Requested name
        name: String,
        /// Names that do exist
        available: Vec<String>,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },

    /// Generic configuration error
    #[error("Configuration error: {message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl From<config::ConfigError> for ConfigError {
    fn from(error: config::ConfigError) -> Self {
        Self::Other {
            message: error.to_string(),
        }
    }
}

impl From<ConfigError> for DirmirrorError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Validation { messages } => DirmirrorError::Profile {
                messages,
                details: Vec::new(),
            },
            ConfigError::Io { ref source, .. } => {
                let detail = source.to_string();
                DirmirrorError::profile(error.to_string(), Some(detail))
            }
            ConfigError::Parse { ref path, ref message } => DirmirrorError::profile(
                format!("Failed to parse '{}'.", path.display()),
                Some(message.clone()),
            ),
            ConfigError::NoProfiles { .. } => DirmirrorError::profile(
                error.to_string(),
                Some(
                    "Put one backup profile per file (*.yaml, *.yml, *.toml or *.json) into that \
                     directory, or create one with 'dirmirror init <file>'."
                        .to_string(),
                ),
            ),
            ConfigError::UnknownProfile { ref available, .. } => {
                let detail = format!("Available profiles: {}", available.join(", "));
                DirmirrorError::profile(error.to_string(), Some(detail))
            }
            ConfigError::ProfileDirectoryMissing { .. } => {
                DirmirrorError::profile(error.to_string(), None)
            }
            ConfigError::InvalidValue { .. }
            | ConfigError::Serialization { .. }
            | ConfigError::Other { .. } => DirmirrorError::config(error.to_string()),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a validation error with a single message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            messages: vec![message.into()],
        }
    }

    /// Create a new invalid value error
    pub fn invalid_value<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a new other error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
