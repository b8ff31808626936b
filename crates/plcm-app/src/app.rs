//! Main application struct.

use std::path::PathBuf;
use std::sync::Arc;

use plcm_model::Document;

use crate::error::Result;
use crate::handler::project;
use crate::service::Services;
use crate::state::{AppState, ConfirmDialog, DocumentMut};

/// Application name shown in window titles.
pub const APP_NAME: &str = "PlcMonitor";

/// One editor window: its state plus the collaborators its commands use.
pub struct App {
    state: AppState,
    services: Services,
}

impl App {
    pub fn new(state: AppState, services: Services) -> Self {
        Self { state, services }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// The active document.
    pub fn document(&self) -> &Document {
        self.state.document.current()
    }

    /// Editing access to the active document; edits mark the window dirty.
    /// Swapping in another document is done by the project commands.
    pub fn document_mut(&mut self) -> DocumentMut<'_> {
        self.state.document.current_mut()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty.is_dirty()
    }

    pub fn save_enabled(&self) -> bool {
        self.state.document.save_enabled()
    }

    /// Window title, e.g. `PlcMonitor - line *`.
    pub fn title(&self) -> String {
        let marker = if self.is_dirty() { " *" } else { "" };
        format!("{} - {}{}", APP_NAME, self.document().display_name(), marker)
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    pub fn new_project(&mut self) {
        project::new_project(&mut self.state);
    }

    /// Returns `Ok(false)` if the picker was cancelled.
    pub async fn open(&mut self) -> Result<bool> {
        project::open_project(&mut self.state, &self.services).await
    }

    pub async fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        project::open_file(&mut self.state, &self.services, path.into()).await
    }

    pub async fn save(&mut self) -> Result<()> {
        project::save_project(&mut self.state, &self.services).await
    }

    /// Returns `Ok(false)` if the picker was cancelled.
    pub async fn save_as(&mut self) -> Result<bool> {
        project::save_project_as(&mut self.state, &self.services).await
    }

    /// Show a confirmation prompt and wait for it to close.
    ///
    /// A prompt closed without an answer (or replaced by another dialog that
    /// then closed) counts as "no".
    pub async fn confirm(&self, dialog: Arc<ConfirmDialog>) -> bool {
        self.state.dialogs.show(dialog.clone()).await;
        dialog.response().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::PresetFilePicker;
    use plcm_model::Device;

    fn app() -> App {
        App::new(
            AppState::default(),
            Services::with_picker(Arc::new(PresetFilePicker::new())),
        )
    }

    #[test]
    fn test_title_tracks_dirty_flag() {
        let mut app = app();
        assert_eq!(app.title(), "PlcMonitor - Untitled");

        app.document_mut().add_device(Device::new("Press", "10.0.0.5"));
        assert_eq!(app.title(), "PlcMonitor - Untitled *");
    }

    #[tokio::test]
    async fn test_confirm_returns_answer() {
        let app = app();
        let dialog = Arc::new(ConfirmDialog::new(
            "Discard changes?",
            "The project has unsaved edits.",
        ));

        let answering = {
            let dialog = dialog.clone();
            async move {
                tokio::task::yield_now().await;
                dialog.answer(true);
            }
        };
        let (confirmed, ()) = tokio::join!(app.confirm(dialog), answering);
        assert!(confirmed);
    }
}
