//! File pickers.
//!
//! [`RfdFilePicker`] shows native dialogs; [`PresetFilePicker`] answers with
//! fixed paths for non-interactive use.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};

use super::{FileFilter, FilePicker};

// =============================================================================
// HOST WINDOW
// =============================================================================

/// Anything that can parent a native dialog.
pub trait ParentWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {}

impl<T> ParentWindow for T where T: HasWindowHandle + HasDisplayHandle + Send + Sync {}

/// The application window native dialogs attach to.
#[derive(Clone)]
pub struct HostWindow(Arc<dyn ParentWindow>);

impl HostWindow {
    pub fn new(window: Arc<dyn ParentWindow>) -> Self {
        Self(window)
    }
}

impl HasWindowHandle for HostWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.0.window_handle()
    }
}

impl HasDisplayHandle for HostWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.0.display_handle()
    }
}

impl fmt::Debug for HostWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostWindow").finish_non_exhaustive()
    }
}

// =============================================================================
// NATIVE PICKER
// =============================================================================

/// Native open/save dialogs via `rfd`.
#[derive(Debug, Clone, Default)]
pub struct RfdFilePicker {
    parent: Option<HostWindow>,
}

impl RfdFilePicker {
    pub fn new(parent: Option<HostWindow>) -> Self {
        Self { parent }
    }

    #[cfg(not(target_os = "macos"))]
    fn async_dialog(&self, title: &str, filters: &[FileFilter]) -> rfd::AsyncFileDialog {
        let mut dialog = rfd::AsyncFileDialog::new().set_title(title);
        for filter in filters {
            dialog = dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice());
        }
        if let Some(parent) = &self.parent {
            dialog = dialog.set_parent(parent);
        }
        dialog
    }

    #[cfg(target_os = "macos")]
    fn sync_dialog(&self, title: &str, filters: &[FileFilter]) -> rfd::FileDialog {
        let mut dialog = rfd::FileDialog::new().set_title(title);
        for filter in filters {
            dialog = dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice());
        }
        if let Some(parent) = &self.parent {
            dialog = dialog.set_parent(parent);
        }
        dialog
    }
}

#[async_trait]
impl FilePicker for RfdFilePicker {
    async fn choose_open_path(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        // On macOS, use synchronous dialog to avoid security-scoped access issues
        #[cfg(target_os = "macos")]
        let path = self.sync_dialog("Open Project", filters).pick_file();

        #[cfg(not(target_os = "macos"))]
        let path = self
            .async_dialog("Open Project", filters)
            .pick_file()
            .await
            .map(|handle| handle.path().to_path_buf());

        if path.is_none() {
            tracing::debug!("open dialog cancelled");
        }
        path
    }

    async fn choose_save_path(
        &self,
        default_extension: &str,
        filters: &[FileFilter],
    ) -> Option<PathBuf> {
        let file_name = format!("project.{default_extension}");

        #[cfg(target_os = "macos")]
        let path = self
            .sync_dialog("Save Project As", filters)
            .set_file_name(file_name)
            .save_file();

        #[cfg(not(target_os = "macos"))]
        let path = self
            .async_dialog("Save Project As", filters)
            .set_file_name(file_name)
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf());

        match path {
            Some(path) => Some(with_default_extension(path, default_extension)),
            None => {
                tracing::debug!("save dialog cancelled");
                None
            }
        }
    }
}

/// Append `extension` if `path` has none.
pub(crate) fn with_default_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let has_extension = path.extension().is_some_and(|ext| !ext.is_empty());
    if !has_extension && !extension.is_empty() {
        path.set_extension(extension);
    }
    path
}

// =============================================================================
// PRESET PICKER
// =============================================================================

/// A picker request as seen by [`PresetFilePicker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerRequest {
    Open {
        filters: Vec<FileFilter>,
    },
    Save {
        default_extension: String,
        filters: Vec<FileFilter>,
    },
}

/// Answers every request with a fixed path (or a cancel) and records what
/// was asked.
#[derive(Debug, Default)]
pub struct PresetFilePicker {
    open_path: Option<PathBuf>,
    save_path: Option<PathBuf>,
    requests: Mutex<Vec<PickerRequest>>,
}

impl PresetFilePicker {
    /// A picker that cancels everything.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_open_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.open_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<PickerRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, request: PickerRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

#[async_trait]
impl FilePicker for PresetFilePicker {
    async fn choose_open_path(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        self.record(PickerRequest::Open {
            filters: filters.to_vec(),
        });
        self.open_path.clone()
    }

    async fn choose_save_path(
        &self,
        default_extension: &str,
        filters: &[FileFilter],
    ) -> Option<PathBuf> {
        self.record(PickerRequest::Save {
            default_extension: default_extension.to_string(),
            filters: filters.to_vec(),
        });
        self.save_path
            .clone()
            .map(|path| with_default_extension(path, default_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extension_added_when_missing() {
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/line"), "plcson"),
            PathBuf::from("/tmp/line.plcson")
        );
    }

    #[test]
    fn test_existing_extension_kept() {
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/line.json"), "plcson"),
            PathBuf::from("/tmp/line.json")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/line.plcson"), "plcson"),
            PathBuf::from("/tmp/line.plcson")
        );
    }

    #[tokio::test]
    async fn test_preset_picker_records_requests() {
        let picker = PresetFilePicker::new().with_save_path("/tmp/out");
        assert_eq!(picker.choose_open_path(&[FileFilter::project()]).await, None);
        assert_eq!(
            picker
                .choose_save_path("plcson", &[FileFilter::project()])
                .await,
            Some(PathBuf::from("/tmp/out.plcson"))
        );

        assert_eq!(
            picker.requests(),
            vec![
                PickerRequest::Open {
                    filters: vec![FileFilter::project()],
                },
                PickerRequest::Save {
                    default_extension: "plcson".to_string(),
                    filters: vec![FileFilter::project()],
                },
            ]
        );
    }
}
