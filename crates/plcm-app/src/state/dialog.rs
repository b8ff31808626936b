//! Single-slot modal dialog host.
//!
//! At most one dialog is active per window. Showing a dialog occupies the
//! slot until the content signals that it closed; callers await a
//! [`DialogCompletion`] for that moment. Showing another dialog while one is
//! active replaces it: the previous content's close signal is ignored from
//! then on, and every pending completion resolves once the slot is idle again.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll};

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, oneshot, watch};
use tokio::task::JoinHandle;

// =============================================================================
// CONTENT
// =============================================================================

/// Something that can occupy the dialog slot.
///
/// The host only needs to know when the content is done; rendering is up to
/// the UI layer.
pub trait DialogContent: Send + Sync + 'static {
    /// Title shown in the dialog frame.
    fn title(&self) -> &str;

    /// Receiver that fires when the content wants to close. It may fire more
    /// than once; only the first firing while the content is active counts.
    fn closed(&self) -> broadcast::Receiver<()>;
}

/// Close notification that dialog contents can embed.
#[derive(Debug, Clone)]
pub struct CloseSignal {
    sender: broadcast::Sender<()>,
}

impl CloseSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(4);
        Self { sender }
    }

    /// Notify every current subscriber.
    pub fn close(&self) {
        // No subscribers means nobody is waiting.
        let _ = self.sender.send(());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.sender.subscribe()
    }
}

impl Default for CloseSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Yes/no confirmation prompt.
#[derive(Debug)]
pub struct ConfirmDialog {
    title: String,
    message: String,
    answer: Mutex<Option<bool>>,
    signal: CloseSignal,
}

impl ConfirmDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            answer: Mutex::new(None),
            signal: CloseSignal::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Record the user's choice and close.
    pub fn answer(&self, confirmed: bool) {
        *self.answer.lock().unwrap_or_else(PoisonError::into_inner) = Some(confirmed);
        self.signal.close();
    }

    /// The recorded choice, `None` while unanswered.
    pub fn response(&self) -> Option<bool> {
        *self.answer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DialogContent for ConfirmDialog {
    fn title(&self) -> &str {
        &self.title
    }

    fn closed(&self) -> broadcast::Receiver<()> {
        self.signal.subscribe()
    }
}

// =============================================================================
// HOST
// =============================================================================

/// Shared handle to a window's dialog slot.
#[derive(Clone)]
pub struct DialogHost {
    inner: Arc<HostInner>,
}

struct HostInner {
    slot: Mutex<Slot>,
    active: watch::Sender<Option<Arc<dyn DialogContent>>>,
}

#[derive(Default)]
struct Slot {
    content: Option<Arc<dyn DialogContent>>,
    /// Bumped on every `show`; a listener only closes its own generation.
    generation: u64,
    listener: Option<JoinHandle<()>>,
    waiters: Vec<oneshot::Sender<()>>,
}

impl Drop for Slot {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

impl Default for DialogHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogHost {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HostInner {
                slot: Mutex::new(Slot::default()),
                active: watch::Sender::new(None),
            }),
        }
    }

    /// Put `content` in the slot and return a future that resolves when the
    /// slot is idle again.
    ///
    /// Must be called from within a tokio runtime: the close listener runs
    /// as a task.
    pub fn show(&self, content: Arc<dyn DialogContent>) -> DialogCompletion {
        let closed = content.closed();
        let (sender, receiver) = oneshot::channel();

        let mut slot = self.inner.lock_slot();
        slot.generation += 1;
        let generation = slot.generation;

        if let Some(previous) = slot.listener.take() {
            previous.abort();
        }
        if let Some(previous) = slot.content.as_ref() {
            tracing::warn!(
                replaced = previous.title(),
                title = content.title(),
                "dialog replaced while still open"
            );
        } else {
            tracing::debug!(title = content.title(), "dialog shown");
        }

        slot.content = Some(Arc::clone(&content));
        slot.waiters.push(sender);
        slot.listener = Some(tokio::spawn(listen(
            Arc::downgrade(&self.inner),
            closed,
            generation,
        )));
        self.inner.active.send_replace(Some(content));

        DialogCompletion { receiver }
    }

    /// The content currently in the slot.
    pub fn active(&self) -> Option<Arc<dyn DialogContent>> {
        self.inner.lock_slot().content.clone()
    }

    pub fn is_showing(&self) -> bool {
        self.inner.lock_slot().content.is_some()
    }

    /// Receiver notified on every slot change.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<dyn DialogContent>>> {
        self.inner.active.subscribe()
    }
}

impl fmt::Debug for DialogHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.inner.lock_slot();
        f.debug_struct("DialogHost")
            .field("active", &slot.content.as_ref().map(|content| content.title()))
            .field("generation", &slot.generation)
            .field("waiters", &slot.waiters.len())
            .finish()
    }
}

impl HostInner {
    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clear the slot if `generation` is still the active one.
    fn finish(&self, generation: u64) {
        let mut slot = self.lock_slot();
        if slot.generation != generation {
            tracing::debug!(generation, "ignoring close of replaced dialog");
            return;
        }

        let title = slot
            .content
            .take()
            .map(|content| content.title().to_string());
        // Dropping our own handle detaches; the task is finishing anyway.
        slot.listener = None;
        let waiters = std::mem::take(&mut slot.waiters);
        self.active.send_replace(None);
        drop(slot);

        tracing::debug!(title = ?title, waiters = waiters.len(), "dialog closed");
        for waiter in waiters {
            // The awaiting side may have given up.
            let _ = waiter.send(());
        }
    }
}

async fn listen(host: Weak<HostInner>, mut closed: broadcast::Receiver<()>, generation: u64) {
    match closed.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => {
            tracing::debug!(generation, "dialog content dropped its close signal");
            return;
        }
    }
    if let Some(host) = host.upgrade() {
        host.finish(generation);
    }
}

/// Resolves when the dialog slot returns to idle.
///
/// Also resolves if the host is dropped first.
#[must_use = "a dialog completion does nothing unless awaited"]
#[derive(Debug)]
pub struct DialogCompletion {
    receiver: oneshot::Receiver<()>,
}

impl Future for DialogCompletion {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        Pin::new(&mut self.receiver).poll(cx).map(|_| ())
    }
}
