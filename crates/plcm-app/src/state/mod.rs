//! Application state management.
//!
//! This module contains all runtime state of one editor window:
//!
//! - **AppState**: Root state, owned by [`App`](crate::App)
//! - **DocumentState**: The active document and its save enablement
//! - **DirtyTracker**: The derived "unsaved changes" flag
//! - **DialogHost**: The single modal dialog slot
//! - **Settings**: Persisted preferences (recent projects, logging)

mod app_state;
mod dialog;
mod dirty;
mod document_state;
mod settings;

pub use app_state::{AppState, ProjectPersisted};
pub use dialog::{CloseSignal, ConfirmDialog, DialogCompletion, DialogContent, DialogHost};
pub use dirty::{DirtyEvent, DirtyTracker, fold_dirty};
pub use document_state::{DocumentMut, DocumentState};
pub use settings::{GeneralSettings, LoggingSettings, RecentProject, Settings};
