//! Settings loading and saving

use crate::{ConfigError, ConfigResult, Settings, SettingsBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;

const ENV_PREFIX: &str = "DIRMIRROR";

/// Settings loader with the common loading patterns
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from the first settings file found in the default locations
    pub fn load_default() -> ConfigResult<Settings> {
        let mut builder = SettingsBuilder::new();

        if let Some(path) = Self::settings_file_exists() {
            debug!("Using settings file {}", path.display());
            builder = builder.add_source_file(&path);
        }

        builder.add_env_prefix(ENV_PREFIX).build()
    }

    /// Load settings from a specific file, which must exist
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Settings> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Settings file not found",
                ),
            });
        }

        SettingsBuilder::new()
            .add_source_file(path)
            .add_env_prefix(ENV_PREFIX)
            .build()
    }

    /// Save settings to a file, format taken from the extension (YAML by default)
    pub fn save_to_file<P: AsRef<Path>>(settings: &Settings, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = serialize(settings, path)?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// First existing settings file in the default locations
    pub fn settings_file_exists() -> Option<PathBuf> {
        default_settings_paths()
            .into_iter()
            .find(|path| path.is_file())
    }
}

/// Serialize `value` in the format implied by the extension of `path`
pub(crate) fn serialize<T: serde::Serialize>(value: &T, path: &Path) -> ConfigResult<String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::to_string_pretty(value).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to serialize to TOML: {}", e),
        }),
        Some("json") => {
            serde_json::to_string_pretty(value).map_err(|e| ConfigError::Serialization {
                message: format!("Failed to serialize to JSON: {}", e),
            })
        }
        _ => serde_yaml::to_string(value).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to serialize to YAML: {}", e),
        }),
    }
}

/// Settings file candidates in order of preference
fn default_settings_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("dirmirror.yaml"),
        PathBuf::from("dirmirror.yml"),
        PathBuf::from("dirmirror.toml"),
        PathBuf::from(".dirmirror.yaml"),
        PathBuf::from(".dirmirror.yml"),
        PathBuf::from(".dirmirror.toml"),
    ];

    if let Some(config_dir) = dirs::config_dir() {
        let dirmirror_dir = config_dir.join("dirmirror");
        paths.push(dirmirror_dir.join("config.yaml"));
        paths.push(dirmirror_dir.join("config.yml"));
        paths.push(dirmirror_dir.join("config.toml"));
    }

    #[cfg(unix)]
    {
        paths.push(PathBuf::from("/etc/dirmirror/config.yaml"));
        paths.push(PathBuf::from("/etc/dirmirror/config.yml"));
        paths.push(PathBuf::from("/etc/dirmirror/config.toml"));
    }

    paths
}

mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME").ok().map(|home| {
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
            })
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_CONFIG_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|home| PathBuf::from(home).join(".config"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
