//! The project document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::change::{
    ChangeFeed, ChangeKind, DocumentEvent, DocumentObserver, ObserverId, TreeChange,
};
use crate::device::{Device, DeviceEditor, DeviceId};
use crate::error::{ModelError, Result};
use crate::variable::NodePath;

/// Display name of a document without a backing file.
const UNTITLED: &str = "Untitled";

/// An open PlcMonitor project.
#[derive(Debug, Clone)]
pub struct Document {
    file_path: Option<PathBuf>,
    /// When the project was first created; survives every later save.
    created_at: DateTime<Utc>,
    devices: Vec<Device>,
    feed: ChangeFeed,
}

impl Document {
    /// Create an empty document with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a document, e.g. after loading it from storage.
    pub fn from_parts(file_path: Option<PathBuf>, devices: Vec<Device>) -> Self {
        Self {
            file_path,
            created_at: Utc::now(),
            devices,
            feed: ChangeFeed::default(),
        }
    }

    /// Keep the creation time recorded in a stored project.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Backing file of the document, if it has been saved or opened.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Point the document at a new backing file.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.file_path = Some(path.clone());
        self.feed.emit(&DocumentEvent::FilePathChanged(Some(path)));
    }

    /// File stem of the backing file, or "Untitled".
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|device| device.id() == id)
    }

    /// Total number of variables across all devices.
    pub fn variable_count(&self) -> usize {
        self.devices.iter().map(Device::variable_count).sum()
    }

    /// Append a device (with its whole variable tree).
    pub fn add_device(&mut self, device: Device) -> DeviceId {
        let id = device.id();
        self.devices.push(device);
        self.emit_device(id, ChangeKind::Added);
        id
    }

    /// Remove a device (with its whole variable tree).
    pub fn remove_device(&mut self, id: DeviceId) -> Result<Device> {
        let index = self
            .devices
            .iter()
            .position(|device| device.id() == id)
            .ok_or(ModelError::DeviceNotFound(id))?;
        let removed = self.devices.remove(index);
        self.emit_device(id, ChangeKind::Removed);
        Ok(removed)
    }

    /// Borrow one device for editing its variable tree.
    pub fn edit_device(&mut self, id: DeviceId) -> Option<DeviceEditor<'_>> {
        let feed = &self.feed;
        self.devices
            .iter_mut()
            .find(|device| device.id() == id)
            .map(|device| DeviceEditor::new(device, feed))
    }

    /// Start receiving events from this document instance.
    pub fn attach_observer(&mut self, observer: Arc<dyn DocumentObserver>) -> ObserverId {
        self.feed.attach(observer)
    }

    /// Stop an observer. Returns false if it was not attached.
    pub fn detach_observer(&mut self, id: ObserverId) -> bool {
        self.feed.detach(id)
    }

    pub fn observer_count(&self) -> usize {
        self.feed.len()
    }

    fn emit_device(&self, device: DeviceId, kind: ChangeKind) {
        self.feed.emit(&DocumentEvent::Tree(TreeChange {
            device,
            kind,
            path: NodePath::root(),
        }));
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::from_parts(None, Vec::new())
    }
}

/// Content equality: backing file and devices. Creation time is metadata.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.file_path == other.file_path && self.devices == other.devices
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::variable::{DataType, Variable, VariableGroup};

    fn recording(document: &mut Document) -> (ObserverId, Arc<Mutex<Vec<DocumentEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let id = document.attach_observer(Arc::new(move |event: &DocumentEvent| {
            sink.lock().unwrap().push(event.clone());
        }));
        (id, events)
    }

    #[test]
    fn test_new_document_is_empty() {
        let document = Document::new();
        assert!(document.file_path().is_none());
        assert!(document.devices().is_empty());
        assert_eq!(document.display_name(), "Untitled");
    }

    #[test]
    fn test_nested_edit_reaches_observer() {
        let mut document = Document::new();
        let id = document.add_device(Device::new("Press", "10.0.0.5"));
        let (_, events) = recording(&mut document);

        let mut editor = document.edit_device(id).unwrap();
        let group = editor
            .add_group(&NodePath::root(), VariableGroup::new("Hydraulics"))
            .unwrap();
        let pressure = editor
            .add_variable(&group, Variable::new("Pressure", "DB2.DBD0", DataType::Real))
            .unwrap();
        editor
            .update_variable(&pressure, |variable| variable.data_type = DataType::DInt)
            .unwrap();
        editor.remove(&pressure).unwrap();

        let kinds: Vec<_> = events
            .lock()
            .unwrap()
            .iter()
            .map(|event| match event {
                DocumentEvent::Tree(change) => (change.kind, change.path.clone()),
                DocumentEvent::FilePathChanged(_) => panic!("unexpected file event"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ChangeKind::Added, NodePath::from(vec![0])),
                (ChangeKind::Added, NodePath::from(vec![0, 0])),
                (ChangeKind::Updated, NodePath::from(vec![0, 0])),
                (ChangeKind::Removed, NodePath::from(vec![0, 0])),
            ]
        );
    }

    #[test]
    fn test_failed_edit_emits_nothing() {
        let mut document = Document::new();
        let id = document.add_device(Device::new("Press", "10.0.0.5"));
        let (_, events) = recording(&mut document);

        let mut editor = document.edit_device(id).unwrap();
        assert!(editor.remove(&NodePath::from(vec![3])).is_err());
        assert!(editor.update_variable(&NodePath::root(), |_| {}).is_err());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_detached_observer_is_silent() {
        let mut document = Document::new();
        let (observer, events) = recording(&mut document);
        assert!(document.detach_observer(observer));
        assert!(!document.detach_observer(observer));

        document.add_device(Device::new("Mixer", "10.0.0.6"));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_set_file_path_emits_event() {
        let mut document = Document::new();
        let (_, events) = recording(&mut document);
        document.set_file_path("/tmp/line.plcson");

        assert_eq!(document.display_name(), "line");
        assert_eq!(
            *events.lock().unwrap(),
            vec![DocumentEvent::FilePathChanged(Some(PathBuf::from(
                "/tmp/line.plcson"
            )))]
        );
    }

    #[test]
    fn test_clone_does_not_carry_observers() {
        let mut document = Document::new();
        let _ = recording(&mut document);
        let copy = document.clone();
        assert_eq!(document.observer_count(), 1);
        assert_eq!(copy.observer_count(), 0);
        assert_eq!(copy, document);
    }

    #[test]
    fn test_created_at_survives_clone_and_edits() {
        let created = DateTime::parse_from_rfc3339("2020-01-01T00:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let mut document = Document::new().with_created_at(created);
        document.add_device(Device::new("Press", "10.0.0.5"));
        document.set_file_path("/tmp/line.plcson");

        assert_eq!(document.created_at(), created);
        assert_eq!(document.clone().created_at(), created);
    }

    #[test]
    fn test_remove_unknown_device() {
        let mut document = Document::new();
        let missing = DeviceId::new();
        assert_eq!(
            document.remove_device(missing).unwrap_err(),
            ModelError::DeviceNotFound(missing)
        );
    }
}
