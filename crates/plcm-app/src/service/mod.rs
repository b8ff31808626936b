//! Collaborators of the project commands.
//!
//! Commands never reach for a dialog toolkit or the filesystem directly; they
//! receive a [`Services`] bundle and talk to these traits. The defaults wire
//! up native dialogs, `.plcson` files and the snapshot mapper.

mod file_picker;
mod mapper;
mod storage;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use plcm_model::Document;
use plcm_persistence::{FILE_EXTENSION, FILTER_NAME, ProjectFile};

use crate::error::Result;

pub use file_picker::{HostWindow, ParentWindow, PickerRequest, PresetFilePicker, RfdFilePicker};
pub use mapper::SnapshotMapper;
pub use storage::FileStorage;

/// A named set of file extensions for open/save dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|ext| (*ext).to_string()).collect(),
        }
    }

    /// "PlcMonitor files" (`*.plcson`).
    pub fn project() -> Self {
        Self::new(FILTER_NAME, &[FILE_EXTENSION])
    }
}

/// Asks the user for a file path.
///
/// `None` means the user cancelled.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// Pick a single existing file.
    async fn choose_open_path(&self, filters: &[FileFilter]) -> Option<PathBuf>;

    /// Pick a destination. `default_extension` is applied when the chosen
    /// name has none.
    async fn choose_save_path(
        &self,
        default_extension: &str,
        filters: &[FileFilter],
    ) -> Option<PathBuf>;
}

/// Reads and writes the storage representation of a project.
#[async_trait]
pub trait ProjectStorage: Send + Sync {
    async fn load(&self, path: &Path) -> Result<ProjectFile>;

    async fn save(&self, project: ProjectFile, path: &Path) -> Result<()>;
}

/// Converts between documents and their storage representation.
pub trait ProjectMapper: Send + Sync {
    /// Build the document loaded from `path`. The document's backing file
    /// is `path`.
    fn map_from_storage(&self, path: &Path, project: ProjectFile) -> Result<Document>;

    fn map_to_storage(&self, document: &Document) -> Result<ProjectFile>;
}

/// Everything the project commands depend on.
#[derive(Clone)]
pub struct Services {
    pub picker: Arc<dyn FilePicker>,
    pub storage: Arc<dyn ProjectStorage>,
    pub mapper: Arc<dyn ProjectMapper>,
}

impl Services {
    pub fn new(
        picker: Arc<dyn FilePicker>,
        storage: Arc<dyn ProjectStorage>,
        mapper: Arc<dyn ProjectMapper>,
    ) -> Self {
        Self {
            picker,
            storage,
            mapper,
        }
    }

    /// Native dialogs (parented to `window` when given), `.plcson` files on
    /// disk and the snapshot mapper.
    pub fn native(window: Option<HostWindow>) -> Self {
        Self::with_picker(Arc::new(RfdFilePicker::new(window)))
    }

    /// Default storage and mapping with a caller-supplied picker.
    pub fn with_picker(picker: Arc<dyn FilePicker>) -> Self {
        Self::new(picker, Arc::new(FileStorage), Arc::new(SnapshotMapper))
    }
}
