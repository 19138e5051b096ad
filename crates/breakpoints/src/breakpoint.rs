//! The breakpoint entity and the update payload delivered to callbacks.

use crate::provider::WidthProvider;
use crate::sync::lock;
use std::sync::{Arc, Mutex};

/// Callback type for breakpoint notifications, both generic and directional.
pub type BreakpointCallback = Arc<dyn Fn(&BreakpointUpdate) + Send + Sync + 'static>;

/// Wrap a closure as a [`BreakpointCallback`].
pub fn new_callback<F>(f: F) -> BreakpointCallback
where
    F: Fn(&BreakpointUpdate) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Which callback list of a breakpoint is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Fires while the breakpoint is active.
    Up,
    /// Fires while the breakpoint is inactive.
    Down,
}

impl Direction {
    /// Whether callbacks of this direction fire for the given active state.
    pub fn fires_when(self, active: bool) -> bool {
        match self {
            Direction::Up => active,
            Direction::Down => !active,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Default)]
struct Callbacks {
    up: Vec<BreakpointCallback>,
    down: Vec<BreakpointCallback>,
}

impl Callbacks {
    fn list(&self, direction: Direction) -> &Vec<BreakpointCallback> {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }

    fn list_mut(&mut self, direction: Direction) -> &mut Vec<BreakpointCallback> {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }
}

/// A named viewport-width threshold.
///
/// `key` and `width` are fixed at creation. Callbacks are only ever appended.
pub struct Breakpoint {
    key: String,
    width: f64,
    callbacks: Mutex<Callbacks>,
}

impl Breakpoint {
    pub fn new(key: impl Into<String>, width: f64) -> Self {
        Self {
            key: key.into(),
            width,
            callbacks: Mutex::new(Callbacks::default()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Active iff this threshold fits into `viewport_width`.
    pub fn is_active_at(&self, viewport_width: f64) -> bool {
        self.width <= viewport_width
    }

    /// Active state against the host's current width. Never cached.
    pub fn is_active(&self, provider: &dyn WidthProvider) -> bool {
        self.is_active_at(provider.width())
    }

    pub fn callback_count(&self, direction: Direction) -> usize {
        lock(&self.callbacks).list(direction).len()
    }

    pub(crate) fn push_callback(&self, direction: Direction, callback: BreakpointCallback) {
        lock(&self.callbacks).list_mut(direction).push(callback);
    }

    /// Snapshot of one callback list, so callers can invoke without holding the lock.
    pub(crate) fn callbacks(&self, direction: Direction) -> Vec<BreakpointCallback> {
        lock(&self.callbacks).list(direction).clone()
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}

impl std::fmt::Debug for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let callbacks = lock(&self.callbacks);
        f.debug_struct("Breakpoint")
            .field("key", &self.key)
            .field("width", &self.width)
            .field("up", &callbacks.up.len())
            .field("down", &callbacks.down.len())
            .finish()
    }
}

/// Identity comparison of two optional registered breakpoints.
///
/// Two absences are the same; a breakpoint re-added under an old key is not.
pub fn same_breakpoint(a: Option<&Arc<Breakpoint>>, b: Option<&Arc<Breakpoint>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// Payload of every notification.
#[derive(Debug, Clone, Default)]
pub struct BreakpointUpdate {
    /// Breakpoint that was current before the change.
    pub passed: Option<Arc<Breakpoint>>,
    /// Breakpoint that is current now.
    pub current: Option<Arc<Breakpoint>>,
}

impl BreakpointUpdate {
    pub fn new(passed: Option<Arc<Breakpoint>>, current: Option<Arc<Breakpoint>>) -> Self {
        Self { passed, current }
    }

    /// False for priming notifications where `passed` and `current` are the same.
    pub fn is_change(&self) -> bool {
        !same_breakpoint(self.passed.as_ref(), self.current.as_ref())
    }

    pub fn passed_key(&self) -> Option<&str> {
        self.passed.as_deref().map(Breakpoint::key)
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current.as_deref().map(Breakpoint::key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FixedWidth;

    #[test]
    fn test_is_active_boundary() {
        let sm = Breakpoint::new("sm", 576.0);
        assert!(sm.is_active_at(576.0));
        assert!(sm.is_active_at(1000.0));
        assert!(!sm.is_active_at(575.9));
    }

    #[test]
    fn test_is_active_reads_provider() {
        let md = Breakpoint::new("md", 768.0);
        assert!(md.is_active(&FixedWidth(800.0)));
        assert!(!md.is_active(&FixedWidth(700.0)));
    }

    #[test]
    fn test_display_is_key() {
        let lg = Breakpoint::new("lg", 992.0);
        assert_eq!(lg.to_string(), "lg");
    }

    #[test]
    fn test_callbacks_append_per_direction() {
        let xs = Breakpoint::new("xs", 1.0);
        xs.push_callback(Direction::Up, new_callback(|_| {}));
        xs.push_callback(Direction::Up, new_callback(|_| {}));
        xs.push_callback(Direction::Down, new_callback(|_| {}));

        assert_eq!(xs.callback_count(Direction::Up), 2);
        assert_eq!(xs.callback_count(Direction::Down), 1);
        assert_eq!(xs.callbacks(Direction::Up).len(), 2);
    }

    #[test]
    fn test_direction_fires_when() {
        assert!(Direction::Up.fires_when(true));
        assert!(!Direction::Up.fires_when(false));
        assert!(Direction::Down.fires_when(false));
        assert!(!Direction::Down.fires_when(true));
    }

    #[test]
    fn test_same_breakpoint_is_identity() {
        let a = Arc::new(Breakpoint::new("sm", 576.0));
        let b = Arc::new(Breakpoint::new("sm", 576.0));

        assert!(same_breakpoint(None, None));
        assert!(same_breakpoint(Some(&a), Some(&a)));
        assert!(!same_breakpoint(Some(&a), Some(&b)));
        assert!(!same_breakpoint(Some(&a), None));
    }

    #[test]
    fn test_update_keys() {
        let sm = Arc::new(Breakpoint::new("sm", 576.0));
        let md = Arc::new(Breakpoint::new("md", 768.0));

        let update = BreakpointUpdate::new(Some(sm.clone()), Some(md));
        assert!(update.is_change());
        assert_eq!(update.passed_key(), Some("sm"));
        assert_eq!(update.current_key(), Some("md"));

        let priming = BreakpointUpdate::new(Some(sm.clone()), Some(sm));
        assert!(!priming.is_change());
        assert!(!BreakpointUpdate::default().is_change());
    }
}
