//! Change detection across resize signals.

use crate::breakpoint::{same_breakpoint, Breakpoint, BreakpointUpdate};
use crate::sync::lock;
use std::sync::{Arc, Mutex};

/// Holds the change reference: the last breakpoint known to be current.
///
/// Only a genuine transition produces an update, so resizes that stay within
/// one breakpoint are suppressed.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    reference: Mutex<Option<Arc<Breakpoint>>>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last committed current breakpoint.
    pub fn reference(&self) -> Option<Arc<Breakpoint>> {
        lock(&self.reference).clone()
    }

    /// Overwrite the reference unconditionally.
    pub fn reset(&self, reference: Option<Arc<Breakpoint>>) {
        *lock(&self.reference) = reference;
    }

    /// Compare a freshly resolved `current` against the reference.
    ///
    /// Returns the update to publish, or `None` when nothing changed. The
    /// reference is left untouched; call [`ChangeDetector::commit`] once the
    /// update has been delivered.
    pub fn detect(&self, current: Option<Arc<Breakpoint>>) -> Option<BreakpointUpdate> {
        let reference = lock(&self.reference);
        if same_breakpoint(reference.as_ref(), current.as_ref()) {
            return None;
        }
        Some(BreakpointUpdate::new(reference.clone(), current))
    }

    /// Store the delivered update's `current` as the new reference.
    pub fn commit(&self, update: &BreakpointUpdate) {
        self.reset(update.current.clone());
    }
}
