use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to start logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_missing() -> Result<(), AppError> {
        std::fs::File::open("/nonexistent/rustcade/terminal")?;
        Ok(())
    }

    #[test]
    fn test_io_errors_convert_to_app_error() {
        let err = open_missing().unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().starts_with("terminal I/O failed"));
    }

    #[test]
    fn test_settings_error_names_file() {
        let source = serde_json::from_str::<u32>("x").unwrap_err();
        let err = SettingsError::Parse {
            path: PathBuf::from("rustcade.json"),
            source,
        };
        assert!(err.to_string().starts_with("invalid settings in rustcade.json"));
    }
}
