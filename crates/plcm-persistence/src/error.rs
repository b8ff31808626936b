//! Errors raised while reading or writing `.plcson` files.
//!
//! JSON problems carry the line and column reported by `serde_json`, so the
//! message points at the spot a hand edit went wrong.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::FILE_EXTENSION;

/// Filesystem step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Read,
    CreateDir,
    CreateTemp,
    Write,
    Sync,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::CreateDir => "create the folder",
            Self::CreateTemp => "create a temporary file at",
            Self::Write => "write to",
            Self::Sync => "flush",
        })
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Cannot {action} {}", path.display())]
    File {
        action: FileAction,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bytes are not JSON at all.
    #[error("{} is not JSON (line {line}, column {column})", path.display())]
    NotJson {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} has no schema_version field", path.display())]
    MissingSchemaVersion { path: PathBuf },

    #[error("{} uses schema version {found}, this build reads up to {supported}", path.display())]
    SchemaTooNew {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    /// Valid JSON that does not describe a project (wrong field types,
    /// unknown data type, missing PLC fields).
    #[error(
        "{} does not match the project layout (line {line}, column {column})",
        path.display()
    )]
    Schema {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Project could not be encoded as JSON")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// The finished temp file could not be moved over the target.
    #[error("Cannot replace {} with {}", target_path.display(), temp_path.display())]
    Replace {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The blocking task running the file operation panicked or was cancelled.
    #[error("Background file task did not finish")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl PersistenceError {
    pub(crate) fn file(action: FileAction, path: &Path, source: io::Error) -> Self {
        Self::File {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Classify a parse failure: syntax and truncation mean "not JSON",
    /// anything else is a layout mismatch.
    pub(crate) fn parse(path: &Path, source: serde_json::Error) -> Self {
        let (line, column) = (source.line(), source.column());
        let path = path.to_path_buf();
        if source.is_data() {
            Self::Schema {
                path,
                line,
                column,
                source,
            }
        } else {
            Self::NotJson {
                path,
                line,
                column,
                source,
            }
        }
    }

    /// File the error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. }
            | Self::NotJson { path, .. }
            | Self::MissingSchemaVersion { path }
            | Self::SchemaTooNew { path, .. }
            | Self::Schema { path, .. } => Some(path),
            Self::Replace { target_path, .. } => Some(target_path),
            Self::Encode { .. } | Self::Task { .. } => None,
        }
    }

    /// Message for a status bar or error dialog.
    pub fn user_message(&self) -> String {
        match self {
            Self::File { source, .. } => format!("{self}: {source}"),
            Self::NotJson { path, .. } => format!(
                "{} is damaged or is not a PlcMonitor project.",
                path.display()
            ),
            Self::MissingSchemaVersion { path } => format!(
                "{} is JSON but was not written by PlcMonitor.",
                path.display()
            ),
            Self::SchemaTooNew {
                found, supported, ..
            } => format!(
                "This project was saved by a newer PlcMonitor (schema {found}); \
                 this build only reads schema {supported} and older."
            ),
            Self::Schema { source, .. } => format!("{self}: {source}"),
            Self::Encode { .. } | Self::Task { .. } => {
                "The project could not be saved because of an internal error.".to_string()
            }
            Self::Replace { target_path, .. } => format!(
                "The new contents were written but could not take the place of {}. \
                 The previous file is unchanged.",
                target_path.display()
            ),
        }
    }

    /// Hint for fixing the problem, when there is one.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::File {
                action: FileAction::Read,
                ..
            } => Some("Check that the file still exists and is readable.".into()),
            Self::File { .. } => {
                Some("Check free disk space and write permission for the folder.".into())
            }
            Self::NotJson { line, column, .. } => Some(format!(
                "If the file was edited by hand, look near line {line}, column {column}."
            )),
            Self::MissingSchemaVersion { .. } => Some(format!(
                "Choose a .{FILE_EXTENSION} file saved by PlcMonitor, or add \"schema_version\": 1."
            )),
            Self::SchemaTooNew { .. } => Some("Update PlcMonitor to open this project.".into()),
            Self::Schema { line, column, .. } => Some(format!(
                "Fix the value at line {line}, column {column}; data types are lowercase names such as \"bool\" or \"real\"."
            )),
            Self::Replace { source, .. } if source.kind() == io::ErrorKind::IsADirectory => {
                Some("A folder with that name already exists; choose another file name.".into())
            }
            Self::Replace { .. } => Some("Try saving to a different location.".into()),
            Self::Encode { .. } | Self::Task { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_is_not_json() {
        let err = PersistenceError::parse(
            Path::new("a.plcson"),
            serde_json::from_str::<serde_json::Value>("{\n  oops").unwrap_err(),
        );
        match err {
            PersistenceError::NotJson { line, .. } => assert_eq!(line, 2),
            other => panic!("expected NotJson, got {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_is_schema_error() {
        let source = serde_json::from_str::<Vec<u32>>("[1, \"two\"]").unwrap_err();
        let err = PersistenceError::parse(Path::new("a.plcson"), source);
        assert!(matches!(err, PersistenceError::Schema { line: 1, .. }));
        assert!(err.suggestion().unwrap().contains("line 1"));
    }

    #[test]
    fn test_missing_version_points_at_field() {
        let err = PersistenceError::MissingSchemaVersion {
            path: PathBuf::from("/tmp/x.plcson"),
        };
        assert_eq!(err.path(), Some(Path::new("/tmp/x.plcson")));
        assert!(err.suggestion().unwrap().contains("schema_version"));
    }
}
