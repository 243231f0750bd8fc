use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application settings loaded once at startup from `settings.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub phpbb_db: DbSettings,
    pub logger: LoggerSettings,
}

/// Connection parameters for the phpBB MySQL database.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DbSettings {
    pub host: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// Log output destination and rotation policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub log_filename: PathBuf,
    pub log_max_bytes: u64,
    pub log_backup_count: u32,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            log_filename: PathBuf::from("log.txt"),
            log_max_bytes: 1024 * 1024,
            log_backup_count: 5,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// Every key is optional; missing sections fall back to defaults. The
    /// default database settings are empty strings, so a missing settings
    /// file shows up later as a connection failure rather than here.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write settings");
        file
    }

    #[test]
    fn test_full_settings_parse() {
        let file = write_settings(
            r#"
            [phpbb_db]
            host = "db.example.net"
            username = "phpbb"
            password = "hunter2"
            database = "phpbb3"

            [logger]
            log_filename = "export.log"
            log_max_bytes = 2048
            log_backup_count = 3
            "#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.phpbb_db.host, "db.example.net");
        assert_eq!(settings.phpbb_db.username, "phpbb");
        assert_eq!(settings.phpbb_db.password, "hunter2");
        assert_eq!(settings.phpbb_db.database, "phpbb3");
        assert_eq!(settings.logger.log_filename, PathBuf::from("export.log"));
        assert_eq!(settings.logger.log_max_bytes, 2048);
        assert_eq!(settings.logger.log_backup_count, 3);
    }

    #[test]
    fn test_missing_logger_section_uses_defaults() {
        let file = write_settings(
            r#"
            [phpbb_db]
            host = "localhost"
            username = "phpbb"
            password = ""
            database = "phpbb"
            "#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.logger.log_filename, PathBuf::from("log.txt"));
        assert_eq!(settings.logger.log_max_bytes, 1024 * 1024);
        assert_eq!(settings.logger.log_backup_count, 5);
    }

    #[test]
    fn test_partial_logger_section_fills_remaining_defaults() {
        let file = write_settings(
            r#"
            [logger]
            log_filename = "other.log"
            "#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.logger.log_filename, PathBuf::from("other.log"));
        assert_eq!(settings.logger.log_max_bytes, 1024 * 1024);
        assert_eq!(settings.logger.log_backup_count, 5);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Settings::load("definitely/not/here/settings.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let file = write_settings("[phpbb_db\nhost = ");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
