//! Change notification for documents.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::device::DeviceId;
use crate::variable::NodePath;

static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by [`Document::attach_observer`](crate::Document::attach_observer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    fn next() -> Self {
        Self(NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// What happened to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Updated,
}

/// A structural change inside one device's variable tree.
///
/// A root `path` means the whole device tree (device added or removed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeChange {
    pub device: DeviceId,
    pub kind: ChangeKind,
    pub path: NodePath,
}

/// Event emitted by a document to its observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// A variable tree changed.
    Tree(TreeChange),
    /// The backing file handle was set.
    FilePathChanged(Option<PathBuf>),
}

/// Receives document events synchronously, in emission order.
pub trait DocumentObserver: Send + Sync {
    fn on_event(&self, event: &DocumentEvent);
}

impl<F> DocumentObserver for F
where
    F: Fn(&DocumentEvent) + Send + Sync,
{
    fn on_event(&self, event: &DocumentEvent) {
        self(event)
    }
}

/// Observers attached to a single document instance.
#[derive(Default)]
pub(crate) struct ChangeFeed {
    observers: Vec<(ObserverId, Arc<dyn DocumentObserver>)>,
}

impl ChangeFeed {
    pub(crate) fn attach(&mut self, observer: Arc<dyn DocumentObserver>) -> ObserverId {
        let id = ObserverId::next();
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn emit(&self, event: &DocumentEvent) {
        tracing::trace!(?event, observers = self.observers.len(), "document event");
        for (_, observer) in &self.observers {
            observer.on_event(event);
        }
    }
}

// Observers belong to the instance they were attached to.
impl Clone for ChangeFeed {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeFeed")
            .field("observers", &self.observers.len())
            .finish()
    }
}
