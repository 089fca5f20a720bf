//! Server configuration.
//!
//! Read from `timetable.toml` in the working directory when it exists; every
//! field has a default so a bare checkout runs as-is. The admin password can
//! also come from `TIMETABLE_ADMIN_PASSWORD`, which wins over the file.

use crate::error::BackendError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "timetable.toml";
pub const ADMIN_PASSWORD_ENV: &str = "TIMETABLE_ADMIN_PASSWORD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
    /// Holds `timetable.sqlite` and the `files/` directory of stored PDFs.
    pub data_dir: PathBuf,
    pub admin_password: String,
    pub max_upload_bytes: usize,
    /// Opens the default browser on the app URL after startup.
    pub open_browser: bool,
    /// Lifetime of an admin token, logout or not.
    pub session_ttl_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            admin_password: "admin".to_string(),
            max_upload_bytes: 20 * 1024 * 1024,
            open_browser: true,
            session_ttl_secs: 60 * 60,
        }
    }
}

impl BackendConfig {
    /// Loads `timetable.toml` and applies the environment override.
    pub fn load() -> Result<Self, BackendError> {
        let config = Self::load_from(Path::new(CONFIG_FILE))?;
        Ok(config.with_password_override(std::env::var(ADMIN_PASSWORD_ENV).ok()))
    }

    /// Parses `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, BackendError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BackendError::Config(e.to_string()))
    }

    fn with_password_override(mut self, password: Option<String>) -> Self {
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.admin_password = password;
        }
        self
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BackendConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, BackendConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "port = 9090\nadmin_password = \"s3cret\"\nopen_browser = false\nsession_ttl_secs = 600\n",
        )
        .unwrap();

        let config = BackendConfig::load_from(&path).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.admin_password, "s3cret");
        assert!(!config.open_browser);
        assert_eq!(config.session_ttl_secs, 600);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "port = \"not a number\"").unwrap();

        assert!(matches!(
            BackendConfig::load_from(&path),
            Err(BackendError::Config(_))
        ));
    }

    #[test]
    fn environment_password_wins_unless_empty() {
        let config = BackendConfig::default().with_password_override(Some("from-env".into()));
        assert_eq!(config.admin_password, "from-env");

        let config = BackendConfig::default().with_password_override(Some(String::new()));
        assert_eq!(config.admin_password, "admin");
    }
}
