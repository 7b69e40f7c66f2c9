//! Settings and backup profile management for dirmirror
//!
//! This crate covers everything dirmirror reads from disk before a mirror run
//! starts:
//!
//! - **Settings**: where profiles live and how to log, layered from defaults,
//!   a settings file and `DIRMIRROR__*` environment variables
//! - **Profiles**: one YAML, TOML or JSON file per backup profile, validated
//!   as a whole so every problem is reported at once
//! - **Catalog**: discovery of the profile files in the profile directory
//!
//! # Examples
//!
//! ```rust,no_run
//! use dirmirror_config::{ProfileCatalog, ProfileLoader, SettingsLoader};
//!
//! # fn example() -> dirmirror_config::ConfigResult<()> {
//! let settings = SettingsLoader::load_default()?;
//! let catalog = ProfileCatalog::scan(&settings.profiles.directory)?;
//! let path = catalog.find("documents")?;
//! let profile = ProfileLoader::load(&path)?;
//! println!("{} location(s)", profile.locations.len());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod builder;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod profile;

pub use builder::SettingsBuilder;
pub use catalog::{ProfileCatalog, ProfileEntry};
pub use error::{ConfigError, ConfigResult};
pub use loader::SettingsLoader;
pub use profile::{BackupProfile, ProfileLoader};

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Backup profile discovery
    pub profiles: ProfilesSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Where backup profiles are looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilesSettings {
    /// Directory holding one file per backup profile
    pub directory: PathBuf,
}

impl Default for ProfilesSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("backup_profiles"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level used when neither `RUST_LOG` nor a command line flag decides
    pub level: String,
    /// Enable colored console output
    pub colored_output: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            colored_output: true,
        }
    }
}
