//! Discovery of the profile files in the profile directory

use crate::profile::ProfileLoader;
use crate::{ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A profile file found in the profile directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    /// Display name, the file stem
    pub name: String,
    /// Path of the profile file
    pub path: PathBuf,
}

/// The profile files available for selection, sorted by file name
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    directory: PathBuf,
    entries: Vec<ProfileEntry>,
}

impl ProfileCatalog {
    /// Scan `directory` for profile files
    ///
    /// Fails when the directory is missing or holds no profile files.
    pub fn scan<P: AsRef<Path>>(directory: P) -> ConfigResult<Self> {
        let directory = directory.as_ref();

        if !directory.is_dir() {
            return Err(ConfigError::ProfileDirectoryMissing {
                path: directory.to_path_buf(),
            });
        }

        let read_dir = fs::read_dir(directory).map_err(|e| ConfigError::Io {
            path: directory.to_path_buf(),
            source: e,
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let path = entry
                .map_err(|e| ConfigError::Io {
                    path: directory.to_path_buf(),
                    source: e,
                })?
                .path();
            if !path.is_file() || !ProfileLoader::is_profile_file(&path) {
                continue;
            }
            let Some(name) = path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
            else {
                continue;
            };
            entries.push(ProfileEntry { name, path });
        }

        if entries.is_empty() {
            return Err(ConfigError::NoProfiles {
                path: directory.to_path_buf(),
            });
        }

        entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        debug!(
            "Found {} profile(s) in {}",
            entries.len(),
            directory.display()
        );

        Ok(Self {
            directory: directory.to_path_buf(),
            entries,
        })
    }

    /// Scanned directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Available profiles, sorted by file name
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Resolve a profile file path or a profile display name
    pub fn find(&self, name_or_path: &str) -> ConfigResult<PathBuf> {
        let candidate = Path::new(name_or_path);
        if candidate.is_file() {
            return Ok(candidate.to_path_buf());
        }

        self.entries
            .iter()
            .find(|entry| entry.name == name_or_path)
            .map(|entry| entry.path.clone())
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: name_or_path.to_string(),
                available: self.entries.iter().map(|entry| entry.name.clone()).collect(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn profile_dir(files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            fs::write(temp_dir.path().join(file), "name: x\n").unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_scan_sorts_and_filters() {
        let temp_dir = profile_dir(&["work.yaml", "home.toml", "notes.txt", "archive.json"]);
        fs::create_dir(temp_dir.path().join("nested.yaml")).unwrap();

        let catalog = ProfileCatalog::scan(temp_dir.path()).unwrap();

        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["archive", "home", "work"]);
        assert_eq!(catalog.directory(), temp_dir.path());
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("backup_profiles");

        let error = ProfileCatalog::scan(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::ProfileDirectoryMissing { .. }));
        assert!(error.to_string().contains("backup_profiles"));
    }

    #[test]
    fn test_directory_without_profiles() {
        let temp_dir = profile_dir(&["readme.md"]);

        let error = ProfileCatalog::scan(temp_dir.path()).unwrap_err();
        assert!(matches!(error, ConfigError::NoProfiles { .. }));
    }

    #[test]
    fn test_find_by_name_and_path() {
        let temp_dir = profile_dir(&["docs.yaml", "music.yml"]);
        let catalog = ProfileCatalog::scan(temp_dir.path()).unwrap();

        assert_eq!(
            catalog.find("music").unwrap(),
            temp_dir.path().join("music.yml")
        );

        let direct = temp_dir.path().join("docs.yaml");
        assert_eq!(catalog.find(&direct.to_string_lossy()).unwrap(), direct);

        match catalog.find("photos").unwrap_err() {
            ConfigError::UnknownProfile { available, .. } => {
                assert_eq!(available, vec!["docs".to_string(), "music".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
