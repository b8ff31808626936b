//! Project persistence handler.
//!
//! Handles the project lifecycle commands:
//! - New project creation
//! - Opening existing projects (picker or explicit path)
//! - Saving to the current file
//! - Saving to a new file ("Save As")

use std::path::{Path, PathBuf};

use plcm_model::Document;
use plcm_persistence::FILE_EXTENSION;

use crate::error::{AppError, Result};
use crate::service::{FileFilter, Services};
use crate::state::{AppState, DirtyEvent};

// =============================================================================
// NEW PROJECT
// =============================================================================

/// Replace the active document with an empty, untitled one.
pub fn new_project(state: &mut AppState) {
    state.document.replace(Document::new());
    tracing::info!("New project created");
}

// =============================================================================
// OPEN PROJECT
// =============================================================================

/// Ask for a project file and open it.
///
/// Returns `Ok(false)` if the user cancelled; nothing changes then.
pub async fn open_project(state: &mut AppState, services: &Services) -> Result<bool> {
    let Some(path) = services
        .picker
        .choose_open_path(&[FileFilter::project()])
        .await
    else {
        tracing::debug!("Open cancelled");
        return Ok(false);
    };

    open_file(state, services, path).await?;
    Ok(true)
}

/// Load `path` and make it the active document.
///
/// On failure the current document stays active and untouched.
pub async fn open_file(state: &mut AppState, services: &Services, path: PathBuf) -> Result<()> {
    let project = services.storage.load(&path).await?;
    let document = services.mapper.map_from_storage(&path, project)?;

    state.document.replace(document);
    state.dirty.emit(DirtyEvent::FileOpened);
    state.record_recent_project(&path);

    tracing::info!(
        devices = state.document.current().devices().len(),
        variables = state.document.current().variable_count(),
        "Project opened from {}",
        path.display()
    );
    Ok(())
}

// =============================================================================
// SAVE PROJECT
// =============================================================================

/// Save the active document to its current file.
///
/// Fails with [`AppError::SaveUnavailable`] if the document has never been
/// saved or opened; use [`save_project_as`] then.
pub async fn save_project(state: &mut AppState, services: &Services) -> Result<()> {
    let Some(path) = state.document.current().file_path().map(Path::to_path_buf) else {
        return Err(AppError::SaveUnavailable);
    };

    write_document(state, services, &path).await?;
    state.dirty.emit(DirtyEvent::Saved);
    state.notify_persisted();

    tracing::info!("Project saved to {}", path.display());
    Ok(())
}

/// Ask for a destination and save the active document there.
///
/// Returns `Ok(false)` if the user cancelled. The document keeps its
/// previous file in that case, but is reported as having unsaved changes.
pub async fn save_project_as(state: &mut AppState, services: &Services) -> Result<bool> {
    let Some(path) = services
        .picker
        .choose_save_path(FILE_EXTENSION, &[FileFilter::project()])
        .await
    else {
        tracing::debug!("Save As cancelled");
        state.dirty.emit(DirtyEvent::SavedAs { success: false });
        return Ok(false);
    };

    write_document(state, services, &path).await?;
    state.document.current_mut().set_file_path(&path);
    state.dirty.emit(DirtyEvent::SavedAs { success: true });
    state.record_recent_project(&path);

    tracing::info!("Project saved as {}", path.display());
    Ok(true)
}

// =============================================================================
// HELPERS
// =============================================================================

async fn write_document(state: &AppState, services: &Services, path: &Path) -> Result<()> {
    let project = services.mapper.map_to_storage(state.document.current())?;
    services.storage.save(project, path).await.inspect_err(|e| {
        tracing::error!("Failed to save project to {}: {}", path.display(), e);
    })
}
