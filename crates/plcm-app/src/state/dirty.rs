//! Unsaved-changes tracking.
//!
//! The dirty flag is derived, never set directly: every source that can
//! affect it pushes a [`DirtyEvent`] into one ordered queue, and the queue is
//! folded with last-event-wins semantics. The current value is published on a
//! `watch` channel so any number of readers can follow it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

/// Something that happened to the active project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyEvent {
    /// A variable tree of the active document changed (any depth), or a
    /// device was added or removed.
    DocumentChanged,
    /// A project file was opened successfully.
    FileOpened,
    /// The project was saved to its existing file.
    Saved,
    /// "Save As" completed; `success` is false when the user cancelled.
    SavedAs { success: bool },
}

impl DirtyEvent {
    /// The dirty value this event leaves behind.
    pub fn value(self) -> bool {
        match self {
            Self::DocumentChanged => true,
            Self::FileOpened | Self::Saved => false,
            Self::SavedAs { success } => !success,
        }
    }
}

/// Fold an event history into a dirty value. The last event wins.
pub fn fold_dirty(initial: bool, events: impl IntoIterator<Item = DirtyEvent>) -> bool {
    events.into_iter().fold(initial, |_, event| event.value())
}

/// Shared handle to the unsaved-changes flag of one window.
///
/// Cloning yields another handle to the same flag.
#[derive(Debug, Clone)]
pub struct DirtyTracker {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    pending: Mutex<VecDeque<DirtyEvent>>,
    value: watch::Sender<bool>,
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyTracker {
    /// Create a new tracker with no unsaved changes.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                pending: Mutex::new(VecDeque::new()),
                value: watch::Sender::new(false),
            }),
        }
    }

    /// Record an event and republish the folded value.
    pub fn emit(&self, event: DirtyEvent) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        pending.push_back(event);

        // Drained under the lock so publications keep arrival order.
        let next = fold_dirty(*self.inner.value.borrow(), pending.drain(..));
        let changed = self.inner.value.send_if_modified(|current| {
            let changed = *current != next;
            *current = next;
            changed
        });
        tracing::trace!(?event, dirty = next, changed, "dirty event");
    }

    /// Check if there are unsaved changes.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        *self.inner.value.borrow()
    }

    /// Receiver notified whenever the flag flips.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.value.subscribe()
    }
}
