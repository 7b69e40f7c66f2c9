//! Backup profile files
//!
//! A profile names a set of backup locations:
//!
//! ```yaml
//! name: documents
//! locations:
//!   - path: /home/me/Documents
//!     dest: /mnt/backup/Documents
//!     exclude:
//!       - "*.tmp"
//!       - "*/node_modules/*"
//! ```

use crate::builder::detect_format;
use crate::loader::serialize;
use crate::{ConfigError, ConfigResult};
use config::File;
use dirmirror_types::BackupLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::debug;

const PROFILE_EXTENSIONS: [&str; 4] = ["yaml", "yml", "toml", "json"];

/// A validated backup profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupProfile {
    /// Display name
    pub name: String,
    /// File the profile was loaded from
    pub source_file: PathBuf,
    /// Locations to mirror, in file order
    pub locations: Vec<BackupLocation>,
}

impl fmt::Display for BackupProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile '{}'", self.name)?;
        for location in &self.locations {
            write!(f, "{}", location)?;
        }
        Ok(())
    }
}

/// On-disk shape of a profile file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    locations: Vec<LocationEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LocationEntry {
    #[serde(default)]
    path: String,
    #[serde(default)]
    dest: String,
    #[serde(default)]
    exclude: Vec<String>,
}

/// Loads, validates and writes profile files
pub struct ProfileLoader;

impl ProfileLoader {
    /// Whether `path` has one of the supported profile extensions
    pub fn is_profile_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| PROFILE_EXTENSIONS.contains(&ext))
    }

    /// Load and validate the profile at `path`
    ///
    /// Validation reports every problem found, not only the first one.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<BackupProfile> {
        let path = path.as_ref();

        if !path.is_file() || !Self::is_profile_file(path) {
            return Err(ConfigError::validation(format!(
                "'{}' is not a backup profile file (*.yaml, *.yml, *.toml or *.json).",
                path.display()
            )));
        }

        let file: ProfileFile = config::Config::builder()
            .add_source(File::from(path.to_path_buf()).format(detect_format(path)))
            .build()
            .and_then(|parsed| parsed.try_deserialize())
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let profile = validate(file, path)?;
        debug!(
            "Loaded profile '{}' with {} location(s) from {}",
            profile.name,
            profile.locations.len(),
            path.display()
        );
        Ok(profile)
    }

    /// Write an example profile to `path`, refusing to overwrite an existing file
    pub fn save_template<P: AsRef<Path>>(path: P) -> ConfigResult<()> {
        let path = path.as_ref();

        if path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "File already exists",
                ),
            });
        }

        let content = serialize(&template(), path)?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn template() -> ProfileFile {
    let sep = MAIN_SEPARATOR;
    ProfileFile {
        name: "example".to_string(),
        locations: vec![LocationEntry {
            path: format!("{sep}path{sep}to{sep}source"),
            dest: format!("{sep}path{sep}to{sep}backup"),
            exclude: vec!["*.tmp".to_string(), format!("*{sep}node_modules{sep}*")],
        }],
    }
}

fn validate(file: ProfileFile, path: &Path) -> ConfigResult<BackupProfile> {
    let mut messages = Vec::new();

    if file.name.trim().is_empty() {
        messages.push(format!("Profile '{}' has no name.", path.display()));
    }
    if file.locations.is_empty() {
        messages.push(format!("Profile '{}' has no locations.", path.display()));
    }

    for (index, location) in file.locations.iter().enumerate() {
        let number = index + 1;
        if location.path.trim().is_empty() {
            messages.push(format!("Location {} has no path.", number));
        } else if !Path::new(&location.path).exists() {
            messages.push(format!(
                "Location {}: path '{}' does not exist.",
                number, location.path
            ));
        }
        if location.dest.trim().is_empty() {
            messages.push(format!("Location {} has no destination.", number));
        }
    }

    if !messages.is_empty() {
        return Err(ConfigError::Validation { messages });
    }

    Ok(BackupProfile {
        name: file.name,
        source_file: path.to_path_buf(),
        locations: file
            .locations
            .into_iter()
            .map(|location| BackupLocation::new(location.path, location.dest, location.exclude))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        temp_dir: TempDir,
        source: PathBuf,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("data");
        fs::create_dir_all(&source).unwrap();
        Fixture { temp_dir, source }
    }

    impl Fixture {
        fn write(&self, file_name: &str, content: &str) -> PathBuf {
            let path = self.temp_dir.path().join(file_name);
            fs::write(&path, content).unwrap();
            path
        }
    }

    #[test]
    fn test_load_yaml_profile() {
        let fixture = fixture();
        let path = fixture.write(
            "docs.yaml",
            &format!(
                "name: docs\nlocations:\n  - path: '{}'\n    dest: /backup/docs\n    exclude:\n      - '*.tmp'\n      - '*.bak'\n",
                fixture.source.display()
            ),
        );

        let profile = ProfileLoader::load(&path).unwrap();

        assert_eq!(profile.name, "docs");
        assert_eq!(profile.source_file, path);
        assert_eq!(profile.locations.len(), 1);
        assert_eq!(profile.locations[0].source(), fixture.source.as_path());
        assert_eq!(profile.locations[0].destination(), Path::new("/backup/docs"));
        assert_eq!(
            profile.locations[0].exclude_patterns(),
            ["*.tmp".to_string(), "*.bak".to_string()]
        );
    }

    #[test]
    fn test_load_toml_profile_without_excludes() {
        let fixture = fixture();
        let path = fixture.write(
            "docs.toml",
            &format!(
                "name = \"docs\"\n\n[[locations]]\npath = '{}'\ndest = '/backup/docs'\n",
                fixture.source.display()
            ),
        );

        let profile = ProfileLoader::load(&path).unwrap();

        assert!(profile.locations[0].exclude_patterns().is_empty());
    }

    #[test]
    fn test_load_json_profile() {
        let fixture = fixture();
        let content = serde_json::json!({
            "name": "json",
            "locations": [{ "path": fixture.source, "dest": "/backup/json" }]
        });
        let path = fixture.write("json.json", &content.to_string());

        let profile = ProfileLoader::load(&path).unwrap();
        assert_eq!(profile.name, "json");
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let fixture = fixture();
        let path = fixture.write(
            "broken.yaml",
            "name: ''\nlocations:\n  - path: /does/not/exist\n    dest: ''\n  - path: ''\n    dest: /b\n",
        );

        let error = ProfileLoader::load(&path).unwrap_err();

        match error {
            ConfigError::Validation { messages } => {
                assert_eq!(messages.len(), 4);
                assert!(messages[0].contains("has no name"));
                assert!(messages[1].contains("does not exist"));
                assert!(messages[2].contains("Location 1 has no destination"));
                assert!(messages[3].contains("Location 2 has no path"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_profile_without_locations() {
        let fixture = fixture();
        let path = fixture.write("empty.yaml", "name: empty\n");

        let error = ProfileLoader::load(&path).unwrap_err();
        assert!(error.to_string().contains("has no locations"));
    }

    #[rstest]
    #[case("notes.txt")]
    #[case("missing.yaml")]
    fn test_rejects_non_profile_paths(#[case] file_name: &str) {
        let fixture = fixture();
        let path = fixture.temp_dir.path().join(file_name);
        if file_name.ends_with(".txt") {
            fs::write(&path, "name: x").unwrap();
        }

        let error = ProfileLoader::load(&path).unwrap_err();
        assert!(error.to_string().contains("is not a backup profile file"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let fixture = fixture();
        let path = fixture.write("bad.yaml", "name: [unterminated\n");

        let error = ProfileLoader::load(&path).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[rstest]
    #[case("template.yaml")]
    #[case("template.toml")]
    #[case("template.json")]
    fn test_template_parses(#[case] file_name: &str) {
        let fixture = fixture();
        let path = fixture.temp_dir.path().join(file_name);

        ProfileLoader::save_template(&path).unwrap();

        // The template points at placeholder paths, so only the path check fails
        match ProfileLoader::load(&path).unwrap_err() {
            ConfigError::Validation { messages } => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].contains("does not exist"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_template_does_not_overwrite() {
        let fixture = fixture();
        let path = fixture.write("existing.yaml", "name: keep\n");

        assert!(ProfileLoader::save_template(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "name: keep\n");
    }
}
