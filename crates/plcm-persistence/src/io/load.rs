//! Project loading operations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FileAction, PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, ProjectFile};

/// Only the version field, read before the full document so that a file
/// from a newer release is reported as such instead of as a parse error.
#[derive(Deserialize)]
struct VersionProbe {
    schema_version: Option<u32>,
}

/// Load a project from a .plcson file.
pub fn load_project(path: &Path) -> Result<ProjectFile> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::file(FileAction::Read, path, e))?;

    parse_project_bytes(&bytes, path)
}

/// Load a project asynchronously.
///
/// Spawns the load operation on a blocking thread pool to avoid
/// blocking the async runtime.
pub async fn load_project_async(path: PathBuf) -> Result<ProjectFile> {
    tokio::task::spawn_blocking(move || load_project(&path))
        .await
        .map_err(|source| PersistenceError::Task { source })?
}

/// Parse project bytes and validate the format.
fn parse_project_bytes(bytes: &[u8], path: &Path) -> Result<ProjectFile> {
    let probe: VersionProbe =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::parse(path, e))?;

    let Some(version) = probe.schema_version else {
        return Err(PersistenceError::MissingSchemaVersion {
            path: path.to_path_buf(),
        });
    };

    if version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::SchemaTooNew {
            path: path.to_path_buf(),
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    let project: ProjectFile =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::parse(path, e))?;

    tracing::info!(
        plcs = project.plcs.len(),
        variables = project.variable_count(),
        "Loaded project from {}",
        path.display()
    );
    Ok(project)
}
