//! Application error types.
//!
//! Errors from the persistence layer pass through unchanged so a caller can
//! still ask them for user-facing details.

use plcm_persistence::PersistenceError;
use thiserror::Error;

/// Errors returned by project commands and settings I/O.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Reading or writing a project file failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The loaded project could not be turned into a document (or back).
    #[error("Failed to map project: {reason}")]
    Mapping {
        /// Description of what went wrong.
        reason: String,
    },

    /// Save was requested for a document that has never been saved.
    #[error("Save is unavailable: the project has no file yet")]
    SaveUnavailable,

    /// Failed to read or write the settings file.
    #[error("Settings error: {reason}")]
    Settings {
        /// Description of what went wrong.
        reason: String,
    },
}

impl AppError {
    /// Create a mapping error.
    pub fn mapping(reason: impl Into<String>) -> Self {
        Self::Mapping {
            reason: reason.into(),
        }
    }

    /// Create a settings error.
    pub fn settings(reason: impl Into<String>) -> Self {
        Self::Settings {
            reason: reason.into(),
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Persistence(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Persistence(err) => err.suggestion(),
            Self::Mapping { .. } => {
                Some("The project file may have been edited by hand; check it for duplicate PLC ids.".into())
            }
            Self::SaveUnavailable => Some("Use \"Save As\" to choose a file first.".into()),
            Self::Settings { .. } => {
                Some("Check file permissions for the application config directory.".into())
            }
        }
    }
}

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_persistence_error_keeps_user_message() {
        let err: AppError = PersistenceError::SchemaTooNew {
            path: PathBuf::from("/tmp/a.plcson"),
            found: 7,
            supported: 1,
        }
        .into();

        assert!(err.user_message().contains("newer PlcMonitor"));
        assert!(err.suggestion().is_some());
        assert_eq!(
            err.to_string(),
            "/tmp/a.plcson uses schema version 7, this build reads up to 1"
        );
    }

    #[test]
    fn test_save_unavailable_suggests_save_as() {
        let suggestion = AppError::SaveUnavailable.suggestion().unwrap();
        assert!(suggestion.contains("Save As"));
    }
}
