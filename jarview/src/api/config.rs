use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::api::models::{Endpoint, InstanceError};
use crate::types::constants::{paths, report};

/// Coordinator settings, persisted as JSON.
///
/// Missing fields fall back to their defaults, so an empty object is a
/// valid config file.
///
/// ```json
/// {
///   "endpoint": { "kind": "lock_file", "path": "/run/user/1000/jarview.lock" },
///   "presence": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// What marks this process as the running instance.
    pub endpoint: Endpoint,
    /// Whether to start the presence integration.
    pub presence: bool,
    /// Shown in error reports as the place to file an issue. `null`
    /// leaves the line out.
    pub issue_tracker: Option<String>,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            presence: true,
            issue_tracker: Some(report::ISSUE_TRACKER.to_string()),
        }
    }
}

impl InstanceConfig {
    /// `<config dir>/jarview/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(paths::APP_DIR);
            path.push(paths::CONFIG_FILE);
            path
        })
    }

    /// Loads the config from the default location, or the defaults if
    /// there is no file.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the config from `path`. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(InstanceError::ConfigIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| InstanceError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = InstanceConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, InstanceConfig::default());
        assert_eq!(config.endpoint, Endpoint::Loopback { port: 9988 });
        assert!(config.presence);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "presence": false }"#).unwrap();

        let config = InstanceConfig::load_from(&path).unwrap();
        assert!(!config.presence);
        assert_eq!(config.endpoint, Endpoint::default());
        assert_eq!(
            config.issue_tracker.as_deref(),
            Some("https://github.com/deathmarine/Luyten/issues")
        );
    }

    #[test]
    fn null_issue_tracker_disables_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "issue_tracker": null }"#).unwrap();

        let config = InstanceConfig::load_from(&path).unwrap();
        assert_eq!(config.issue_tracker, None);
        assert!(config.presence);
    }

    #[test]
    fn lock_file_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "endpoint": { "kind": "lock_file", "path": "/tmp/j.lock" },
                 "issue_tracker": "https://example.invalid/issues" }"#,
        )
        .unwrap();

        let config = InstanceConfig::load_from(&path).unwrap();
        assert_eq!(
            config.endpoint,
            Endpoint::LockFile {
                path: PathBuf::from("/tmp/j.lock")
            }
        );
        assert_eq!(
            config.issue_tracker.as_deref(),
            Some("https://example.invalid/issues")
        );
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = InstanceConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, InstanceError::Config { .. }));
    }
}
