//! Resize signal abstraction.
//!
//! The host delivers zero-argument resize notifications at arbitrary
//! frequency. Nothing here debounces them.

use crate::sync::lock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Listener invoked on every host resize.
pub type ResizeListener = Arc<dyn Fn() + Send + Sync + 'static>;

/// Handle returned by [`ResizeSource::subscribe`], used to unbind later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A subscribable resize signal supplied by the host environment.
pub trait ResizeSource: Send + Sync {
    /// Register a listener. It stays bound until [`ResizeSource::unsubscribe`].
    fn subscribe(&self, listener: ResizeListener) -> ListenerId;

    /// Unbind a listener. Returns `false` if the id was not bound.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// In-process resize source.
///
/// A host event loop calls [`ResizeEmitter::emit`] whenever its surface is
/// resized. Tests use it to drive resize sequences directly.
#[derive(Default)]
pub struct ResizeEmitter {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, ResizeListener)>>,
}

impl ResizeEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal once. Returns how many listeners were invoked.
    pub fn emit(&self) -> usize {
        // Snapshot so a listener may unbind itself mid-emit.
        let listeners: Vec<ResizeListener> = lock(&self.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &listeners {
            listener();
        }

        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }
}

impl ResizeSource for ResizeEmitter {
    fn subscribe(&self, listener: ResizeListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        lock(&self.listeners).push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = lock(&self.listeners);
        let before = listeners.len();
        listeners.retain(|(bound, _)| *bound != id);
        listeners.len() != before
    }
}

impl std::fmt::Debug for ResizeEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeEmitter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
