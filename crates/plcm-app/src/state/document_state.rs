//! Ownership of the active document.

use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

use plcm_model::{Device, DeviceEditor, DeviceId, Document, DocumentEvent, ObserverId};
use tokio::sync::watch;

use super::dirty::{DirtyEvent, DirtyTracker};

/// Holds the single active [`Document`] and keeps the signals derived from it
/// (dirty flag, save enablement) attached to whichever document is current.
#[derive(Debug)]
pub struct DocumentState {
    document: Document,
    observer: ObserverId,
    dirty: DirtyTracker,
    save_enabled: Arc<watch::Sender<bool>>,
}

impl DocumentState {
    /// Take ownership of `document`, or start with an empty untitled one.
    pub fn new(document: Option<Document>, dirty: DirtyTracker) -> Self {
        let mut document = document.unwrap_or_default();
        let save_enabled = Arc::new(watch::Sender::new(document.file_path().is_some()));
        let observer = arm(&mut document, &dirty, &save_enabled);
        Self {
            document,
            observer,
            dirty,
            save_enabled,
        }
    }

    /// The active document.
    pub fn current(&self) -> &Document {
        &self.document
    }

    /// Editing access to the active document. Edits made through it reach
    /// the dirty tracker.
    pub fn current_mut(&mut self) -> DocumentMut<'_> {
        DocumentMut {
            document: &mut self.document,
        }
    }

    /// Swap in another document and return the previous one.
    ///
    /// The previous document is detached before it is handed back, so edits
    /// to it no longer affect this window.
    pub fn replace(&mut self, document: Document) -> Document {
        self.document.detach_observer(self.observer);
        let previous = std::mem::replace(&mut self.document, document);

        self.observer = arm(&mut self.document, &self.dirty, &self.save_enabled);
        publish(&self.save_enabled, self.document.file_path().is_some());
        tracing::debug!(
            document = %self.document.display_name(),
            devices = self.document.devices().len(),
            "active document replaced"
        );
        previous
    }

    /// Whether "Save" (as opposed to "Save As") is available.
    pub fn save_enabled(&self) -> bool {
        *self.save_enabled.borrow()
    }

    /// Receiver notified whenever save enablement flips.
    pub fn subscribe_save_enabled(&self) -> watch::Receiver<bool> {
        self.save_enabled.subscribe()
    }
}

/// Edits of the active document.
///
/// Reads go through `Deref`. There is no way to overwrite the whole document
/// here; that is [`DocumentState::replace`], which moves the observer along.
///
/// ```compile_fail
/// use plcm_app::state::{DirtyTracker, DocumentState};
/// use plcm_model::Document;
///
/// let mut state = DocumentState::new(None, DirtyTracker::new());
/// *state.current_mut() = Document::new();
/// ```
#[derive(Debug)]
pub struct DocumentMut<'a> {
    document: &'a mut Document,
}

impl DocumentMut<'_> {
    pub fn add_device(&mut self, device: Device) -> DeviceId {
        self.document.add_device(device)
    }

    pub fn remove_device(&mut self, id: DeviceId) -> plcm_model::Result<Device> {
        self.document.remove_device(id)
    }

    pub fn edit_device(&mut self, id: DeviceId) -> Option<DeviceEditor<'_>> {
        self.document.edit_device(id)
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.document.set_file_path(path);
    }
}

impl Deref for DocumentMut<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.document
    }
}

fn arm(
    document: &mut Document,
    dirty: &DirtyTracker,
    save_enabled: &Arc<watch::Sender<bool>>,
) -> ObserverId {
    let dirty = dirty.clone();
    let save_enabled = Arc::clone(save_enabled);
    document.attach_observer(Arc::new(move |event: &DocumentEvent| match event {
        DocumentEvent::Tree(_) => dirty.emit(DirtyEvent::DocumentChanged),
        DocumentEvent::FilePathChanged(path) => publish(&save_enabled, path.is_some()),
    }))
}

fn publish(sender: &watch::Sender<bool>, enabled: bool) {
    sender.send_if_modified(|current| {
        let changed = *current != enabled;
        *current = enabled;
        changed
    });
}
