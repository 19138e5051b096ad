//! Directional up/down callback dispatch.
//!
//! Level-triggered: on every notification each breakpoint fires the list
//! matching its active state at that moment, whether or not it just crossed.

use crate::breakpoint::{Breakpoint, BreakpointUpdate, Direction};
use crate::provider::WidthProvider;
use std::sync::Arc;

/// Observer name the dispatcher is registered under by `Viewport::init`.
pub const DIRECTIONAL_OBSERVER: &str = "directional-dispatch";

/// Walks breakpoints and fires their up or down callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionalDispatcher;

impl DirectionalDispatcher {
    /// Dispatch `update` to every breakpoint's directional callbacks.
    ///
    /// Active state is read from `provider` per breakpoint. Returns the number
    /// of callbacks invoked.
    pub fn dispatch(
        &self,
        breakpoints: &[Arc<Breakpoint>],
        provider: &dyn WidthProvider,
        update: &BreakpointUpdate,
    ) -> usize {
        let mut invoked = 0;

        for breakpoint in breakpoints {
            let direction = if breakpoint.is_active(provider) {
                Direction::Up
            } else {
                Direction::Down
            };

            // Snapshot: a callback may append to this very list.
            let callbacks = breakpoint.callbacks(direction);
            for callback in &callbacks {
                callback(update);
            }
            invoked += callbacks.len();
        }

        tracing::trace!(invoked, "directional callbacks dispatched");
        invoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::new_callback;
    use crate::provider::FixedWidth;
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, label: &str) -> crate::BreakpointCallback {
        let log = Arc::clone(log);
        let label = label.to_string();
        new_callback(move |_| log.lock().unwrap().push(label.clone()))
    }

    #[test]
    fn test_fires_by_active_state() {
        let sm = Arc::new(Breakpoint::new("sm", 576.0));
        let lg = Arc::new(Breakpoint::new("lg", 992.0));
        let log = Arc::new(Mutex::new(Vec::new()));

        sm.push_callback(Direction::Up, recorder(&log, "sm:up"));
        sm.push_callback(Direction::Down, recorder(&log, "sm:down"));
        lg.push_callback(Direction::Up, recorder(&log, "lg:up"));
        lg.push_callback(Direction::Down, recorder(&log, "lg:down"));

        let invoked = DirectionalDispatcher.dispatch(
            &[lg.clone(), sm.clone()],
            &FixedWidth(600.0),
            &BreakpointUpdate::default(),
        );

        assert_eq!(invoked, 2);
        assert_eq!(*log.lock().unwrap(), ["lg:down", "sm:up"]);
    }

    #[test]
    fn test_empty_lists_are_skipped() {
        let xs = Arc::new(Breakpoint::new("xs", 1.0));
        let invoked =
            DirectionalDispatcher.dispatch(&[xs], &FixedWidth(10.0), &BreakpointUpdate::default());
        assert_eq!(invoked, 0);
    }

    #[test]
    fn test_callbacks_fire_in_registration_order() {
        let md = Arc::new(Breakpoint::new("md", 768.0));
        let log = Arc::new(Mutex::new(Vec::new()));
        md.push_callback(Direction::Up, recorder(&log, "first"));
        md.push_callback(Direction::Up, recorder(&log, "second"));

        DirectionalDispatcher.dispatch(&[md], &FixedWidth(800.0), &BreakpointUpdate::default());
        assert_eq!(*log.lock().unwrap(), ["first", "second"]);
    }

    #[test]
    fn test_update_is_forwarded() {
        let sm = Arc::new(Breakpoint::new("sm", 576.0));
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = Arc::clone(&seen);
        sm.push_callback(
            Direction::Up,
            new_callback(move |update| {
                *seen_clone.lock().unwrap() = update.current_key().map(str::to_string);
            }),
        );

        let update = BreakpointUpdate::new(None, Some(sm.clone()));
        DirectionalDispatcher.dispatch(&[sm], &FixedWidth(600.0), &update);
        assert_eq!(seen.lock().unwrap().as_deref(), Some("sm"));
    }
}
