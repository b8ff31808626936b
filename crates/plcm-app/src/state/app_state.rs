//! Application-level state.
//!
//! This module contains `AppState` which is the root of all state.

use std::path::{Path, PathBuf};

use plcm_model::Document;
use tokio::sync::broadcast;

use super::{DialogHost, DirtyTracker, DocumentState, RecentProject, Settings};

/// Capacity of the persisted-notification channel.
const PERSISTED_CAPACITY: usize = 16;

/// Sent once per successful "Save".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectPersisted;

/// Top-level state of one editor window.
#[derive(Debug)]
pub struct AppState {
    /// The active document.
    pub document: DocumentState,
    /// Unsaved-changes flag, shared with `document`.
    pub dirty: DirtyTracker,
    /// Modal dialog slot.
    pub dialogs: DialogHost,
    /// Application settings (persisted)
    pub settings: Settings,
    /// Where `settings` is written back; `None` keeps them in memory only.
    pub settings_path: Option<PathBuf>,
    persisted: broadcast::Sender<ProjectPersisted>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None, Settings::default(), None)
    }
}

impl AppState {
    pub fn new(
        document: Option<Document>,
        settings: Settings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let dirty = DirtyTracker::new();
        let (persisted, _) = broadcast::channel(PERSISTED_CAPACITY);
        Self {
            document: DocumentState::new(document, dirty.clone()),
            dirty,
            dialogs: DialogHost::new(),
            settings,
            settings_path,
            persisted,
        }
    }

    /// Receiver for "project persisted" notifications.
    pub fn subscribe_persisted(&self) -> broadcast::Receiver<ProjectPersisted> {
        self.persisted.subscribe()
    }

    pub(crate) fn notify_persisted(&self) {
        // Nobody listening is fine.
        let _ = self.persisted.send(ProjectPersisted);
    }

    /// Remember `path` as recently used and write the settings back.
    ///
    /// Failing to write settings never fails the command that triggered it.
    pub(crate) fn record_recent_project(&mut self, path: &Path) {
        let display_name = self.document.current().display_name();
        self.settings
            .general
            .add_recent_project(RecentProject::new(path.to_path_buf(), display_name));

        if let Some(settings_path) = &self.settings_path
            && let Err(e) = self.settings.save_to(settings_path)
        {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }
}
