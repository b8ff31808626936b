//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use plcm_app::service::{PresetFilePicker, ProjectStorage, Services, SnapshotMapper};
use plcm_app::state::AppState;
use plcm_app::{App, Result};
use plcm_model::{DataType, Device, DeviceId, Document, NodePath, Variable, VariableGroup};
use plcm_persistence::{FileAction, PersistenceError, ProjectFile};

/// In-memory project storage that can be told to fail.
#[derive(Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<PathBuf, ProjectFile>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn insert(&self, path: impl Into<PathBuf>, project: ProjectFile) {
        self.files.lock().unwrap().insert(path.into(), project);
    }

    pub fn get(&self, path: &Path) -> Option<ProjectFile> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProjectStorage for MemoryStorage {
    async fn load(&self, path: &Path) -> Result<ProjectFile> {
        self.get(path).ok_or_else(|| {
            PersistenceError::File {
                action: FileAction::Read,
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .into()
        })
    }

    async fn save(&self, project: ProjectFile, path: &Path) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::File {
                action: FileAction::Write,
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            }
            .into());
        }
        self.insert(path, project);
        Ok(())
    }
}

/// App wired to `picker` and `storage` with in-memory settings.
pub fn app_with(picker: PresetFilePicker, storage: Arc<MemoryStorage>) -> App {
    App::new(
        AppState::default(),
        Services::new(Arc::new(picker), storage, Arc::new(SnapshotMapper)),
    )
}

/// A press with one nested variable, for seeding storage.
pub fn sample_document() -> Document {
    let mut document = Document::new();
    document.add_device(
        Device::new("Press", "10.0.0.5").with_root(
            VariableGroup::new("Variables").with_child(
                VariableGroup::new("Hydraulics")
                    .with_child(Variable::new("Pressure", "DB2.DBD0", DataType::Real)),
            ),
        ),
    );
    document
}

/// Add a variable to the first device of the active document, creating the
/// device if there is none.
pub fn mutate(app: &mut App) {
    let mut document = app.document_mut();
    let id: DeviceId = match document.devices().first() {
        Some(device) => device.id(),
        None => document.add_device(Device::new("Mixer", "10.0.0.6")),
    };
    document
        .edit_device(id)
        .expect("device exists")
        .add_variable(
            &NodePath::root(),
            Variable::new("Level", "DB3.DBW0", DataType::Int),
        )
        .expect("root is a group");
}
