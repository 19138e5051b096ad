//! Named observers for generic breakpoint changes.

use crate::breakpoint::{BreakpointCallback, BreakpointUpdate};
use crate::sync::lock;
use std::collections::HashMap;
use std::sync::Mutex;

/// Fan-out registry mapping observer names to callbacks.
///
/// Call order across observers is unspecified.
#[derive(Default)]
pub struct ObserverHub {
    observers: Mutex<HashMap<String, BreakpointCallback>>,
}

impl ObserverHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `name`, replacing any previous entry.
    ///
    /// Returns the replaced callback, if there was one.
    pub fn insert(
        &self,
        name: impl Into<String>,
        callback: BreakpointCallback,
    ) -> Option<BreakpointCallback> {
        let name = name.into();
        let previous = lock(&self.observers).insert(name.clone(), callback);
        if previous.is_some() {
            tracing::debug!(observer = %name, "observer replaced");
        } else {
            tracing::debug!(observer = %name, "observer added");
        }
        previous
    }

    /// Remove an observer. Absence is not an error.
    pub fn remove(&self, name: &str) -> bool {
        let removed = lock(&self.observers).remove(name).is_some();
        if removed {
            tracing::debug!(observer = name, "observer removed");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        lock(&self.observers).contains_key(name)
    }

    pub fn len(&self) -> usize {
        lock(&self.observers).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.observers).is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        lock(&self.observers).keys().cloned().collect()
    }

    /// Invoke every observer with `update`. Returns how many were invoked.
    ///
    /// Observers registered or removed during the pass only affect later passes.
    pub fn notify(&self, update: &BreakpointUpdate) -> usize {
        let observers: Vec<BreakpointCallback> = lock(&self.observers).values().cloned().collect();

        for observer in &observers {
            observer(update);
        }

        tracing::trace!(
            observers = observers.len(),
            passed = ?update.passed_key(),
            current = ?update.current_key(),
            "observers notified"
        );
        observers.len()
    }
}

impl std::fmt::Debug for ObserverHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverHub")
            .field("observers", &self.names())
            .finish()
    }
}
