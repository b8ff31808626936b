//! Project saving operations.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{FileAction, PersistenceError, Result};
use crate::types::{FILE_EXTENSION, ProjectFile};

/// Save a project to a .plcson file.
///
/// Uses atomic write (temp file + rename) to prevent data corruption
/// on crash or power loss. Refreshes `last_saved_at` before writing.
pub fn save_project(project: &mut ProjectFile, path: &Path) -> Result<()> {
    project.touch();

    let bytes = serialize_project(project)?;
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| PersistenceError::file(FileAction::CreateDir, parent, e))?;
    }

    let mut file = File::create(&temp_path)
        .map_err(|e| PersistenceError::file(FileAction::CreateTemp, &temp_path, e))?;
    file.write_all(&bytes)
        .map_err(|e| PersistenceError::file(FileAction::Write, &temp_path, e))?;
    file.sync_all()
        .map_err(|e| PersistenceError::file(FileAction::Sync, &temp_path, e))?;
    drop(file);

    if let Err(source) = fs::rename(&temp_path, path) {
        // Leave no stray temp file behind; the rename error is what matters.
        let _ = fs::remove_file(&temp_path);
        return Err(PersistenceError::Replace {
            temp_path,
            target_path: path.to_path_buf(),
            source,
        });
    }

    tracing::info!(
        plcs = project.plcs.len(),
        "Saved project to {}",
        path.display()
    );
    Ok(())
}

/// Save a project asynchronously.
///
/// Spawns the save operation on a blocking thread pool to avoid
/// blocking the async runtime. Returns the project with its refreshed
/// `last_saved_at`.
pub async fn save_project_async(project: ProjectFile, path: PathBuf) -> Result<ProjectFile> {
    tokio::task::spawn_blocking(move || {
        let mut project = project;
        save_project(&mut project, &path).map(|()| project)
    })
    .await
    .map_err(|source| PersistenceError::Task { source })?
}

fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension(format!("{FILE_EXTENSION}.tmp"))
}

fn serialize_project(project: &ProjectFile) -> Result<Vec<u8>> {
    let mut bytes =
        serde_json::to_vec_pretty(project).map_err(|source| PersistenceError::Encode { source })?;
    bytes.push(b'\n');
    Ok(bytes)
}
