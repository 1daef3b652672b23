//! Arcade settings, read from `rustcade.json` next to the executable.
//!
//! Every field is optional; anything missing falls back to its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

pub const SETTINGS_FILE: &str = "rustcade.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between simulation steps.
    pub tick_rate_ms: u64,
    /// `env_logger` filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Log destination, relative to the executable's directory. `None`
    /// disables logging.
    pub log_file: Option<PathBuf>,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Score bumper and flipper contacts once per contact instead of on
    /// every overlapping step.
    pub debounce_contacts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16, // ~60 FPS
            log_level: "info".to_string(),
            log_file: Some(PathBuf::from("rustcade.log")),
            seed: None,
            debounce_contacts: false,
        }
    }
}

impl Settings {
    /// Loads settings from the default location. A missing file yields the
    /// defaults; an unreadable or malformed one is reported alongside them.
    pub fn load() -> (Self, Option<SettingsError>) {
        match Self::read_from(&base_dir().join(SETTINGS_FILE)) {
            Ok(Some(settings)) => (settings, None),
            Ok(None) => (Self::default(), None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Reads a settings file, returning `Ok(None)` if it doesn't exist.
    pub fn read_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text)
            .map(Some)
            .map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(text)?;
        settings.tick_rate_ms = settings.tick_rate_ms.max(1);
        Ok(settings)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Absolute path of the log file, if logging is enabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_ref().map(|file| base_dir().join(file))
    }
}

/// Directory holding the executable, or the working directory as a fallback.
fn base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(Settings::parse("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_settings() {
        let settings = Settings::parse(r#"{ "seed": 1234, "debounce_contacts": true }"#).unwrap();
        assert_eq!(settings.seed, Some(1234));
        assert!(settings.debounce_contacts);
        assert_eq!(settings.tick_rate_ms, 16);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_null_log_file_disables_logging() {
        let settings = Settings::parse(r#"{ "log_file": null }"#).unwrap();
        assert!(settings.log_path().is_none());
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let settings = Settings::parse(r#"{ "tick_rate_ms": 0 }"#).unwrap();
        assert_eq!(settings.tick_rate(), Duration::from_millis(1));
    }

    #[test]
    fn test_malformed_settings_rejected() {
        assert!(Settings::parse(r#"{ "seed": "abc" }"#).is_err());
        assert!(Settings::parse("not json").is_err());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("rustcade-missing-settings.json");
        let _ = fs::remove_file(&path);
        assert!(matches!(Settings::read_from(&path), Ok(None)));
    }

    #[test]
    fn test_read_reports_parse_errors_with_path() {
        let path = std::env::temp_dir().join(format!("rustcade-bad-{}.json", std::process::id()));
        fs::write(&path, "{ broken").unwrap();
        let err = Settings::read_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("rustcade-bad-"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_settings_round_trip_through_json() {
        let settings = Settings {
            seed: Some(7),
            log_file: None,
            ..Settings::default()
        };
        let text = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::parse(&text).unwrap(), settings);
    }
}
