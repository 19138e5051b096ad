//! The viewport context: registry, observers and change detection bound to
//! one host surface.

use crate::breakpoint::{Breakpoint, BreakpointCallback, BreakpointUpdate, Direction};
use crate::detector::ChangeDetector;
use crate::dispatch::{DirectionalDispatcher, DIRECTIONAL_OBSERVER};
use crate::error::{BreakpointError, BreakpointResult};
use crate::observer::ObserverHub;
use crate::provider::WidthProvider;
use crate::registry::BreakpointRegistry;
use crate::signal::{ListenerId, ResizeSource};
use crate::sync::lock;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, Weak};

/// State reachable from resize listeners and the directional dispatcher.
///
/// Those closures hold a `Weak` to it, so dropping the `Viewport` frees it.
struct Shared {
    provider: Arc<dyn WidthProvider>,
    registry: Mutex<BreakpointRegistry>,
    observers: ObserverHub,
    detector: ChangeDetector,
}

impl Shared {
    fn current(&self) -> Option<Arc<Breakpoint>> {
        lock(&self.registry).current(self.provider.width())
    }

    /// `{passed: <change reference>, current: <registry current>}`.
    fn default_update(&self) -> BreakpointUpdate {
        BreakpointUpdate::new(self.detector.reference(), self.current())
    }

    fn notify_default(&self) -> usize {
        self.observers.notify(&self.default_update())
    }

    fn handle_resize(&self) -> bool {
        let current = self.current();
        let Some(update) = self.detector.detect(current) else {
            tracing::trace!(width = self.provider.width(), "resize within breakpoint, suppressed");
            return false;
        };

        tracing::debug!(
            passed = ?update.passed_key(),
            current = ?update.current_key(),
            width = self.provider.width(),
            "breakpoint changed"
        );
        self.observers.notify(&update);
        self.detector.commit(&update);
        true
    }

    fn dispatch_directional(&self, update: &BreakpointUpdate) -> usize {
        let breakpoints = lock(&self.registry).snapshot();
        DirectionalDispatcher.dispatch(&breakpoints, self.provider.as_ref(), update)
    }
}

struct Binding {
    source: Arc<dyn ResizeSource>,
    listener: ListenerId,
}

/// Breakpoint tracking for one host display surface.
///
/// Each instance is independent. Nothing is process-global.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use viewport_breakpoints::{Breakpoint, ResizeEmitter, SharedWidth, Viewport};
///
/// let width = Arc::new(SharedWidth::new(600.0));
/// let resize = Arc::new(ResizeEmitter::new());
/// let viewport = Viewport::new(width.clone());
///
/// viewport
///     .init(
///         resize.clone(),
///         vec![Breakpoint::new("xs", 1.0), Breakpoint::new("sm", 576.0), Breakpoint::new("md", 768.0)],
///     )
///     .unwrap();
/// assert_eq!(viewport.current().unwrap().key(), "sm");
///
/// width.set(800.0);
/// resize.emit();
/// assert_eq!(viewport.current().unwrap().key(), "md");
/// ```
pub struct Viewport {
    shared: Arc<Shared>,
    binding: Mutex<Option<Binding>>,
}

impl Viewport {
    /// Create an empty, unbound viewport reading widths from `provider`.
    pub fn new<P>(provider: Arc<P>) -> Self
    where
        P: WidthProvider + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                provider,
                registry: Mutex::new(BreakpointRegistry::new()),
                observers: ObserverHub::new(),
                detector: ChangeDetector::new(),
            }),
            binding: Mutex::new(None),
        }
    }

    /// Register `breakpoints`, bind to `source` and prime every observer.
    ///
    /// The batch is validated before anything is registered, so a duplicate
    /// key leaves the viewport unchanged. The directional dispatcher is
    /// installed under [`DIRECTIONAL_OBSERVER`], then a single notification
    /// with `passed == current` is sent.
    ///
    /// # Errors
    ///
    /// `EmptyInitialization`, `DuplicateKey`, or `AlreadyInitialized` while a
    /// previous `init` is still bound.
    pub fn init<S, I, B>(&self, source: Arc<S>, breakpoints: I) -> BreakpointResult<()>
    where
        S: ResizeSource + 'static,
        I: IntoIterator<Item = B>,
        B: Into<Arc<Breakpoint>>,
    {
        {
            let mut binding = lock(&self.binding);
            if binding.is_some() {
                return Err(BreakpointError::AlreadyInitialized);
            }

            let breakpoints: Vec<Arc<Breakpoint>> = breakpoints.into_iter().map(Into::into).collect();
            if breakpoints.is_empty() {
                return Err(BreakpointError::EmptyInitialization);
            }
            self.register_all(&breakpoints)?;

            let initial = self.shared.current();
            self.shared.detector.reset(initial.clone());

            let weak = Arc::downgrade(&self.shared);
            let listener = source.subscribe(Arc::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.handle_resize();
                }
            }));
            *binding = Some(Binding { source, listener });

            self.shared
                .observers
                .insert(DIRECTIONAL_OBSERVER, directional_observer(Arc::downgrade(&self.shared)));

            tracing::info!(
                breakpoints = breakpoints.len(),
                current = ?initial.as_deref().map(Breakpoint::key),
                width = self.shared.provider.width(),
                "viewport initialized"
            );
        }

        self.shared.notify_default();
        Ok(())
    }

    fn register_all(&self, breakpoints: &[Arc<Breakpoint>]) -> BreakpointResult<()> {
        let mut registry = lock(&self.shared.registry);

        let mut seen = HashSet::new();
        for breakpoint in breakpoints {
            if registry.contains(breakpoint.key()) || !seen.insert(breakpoint.key()) {
                return Err(BreakpointError::duplicate(breakpoint.key()));
            }
        }

        for breakpoint in breakpoints {
            registry.add(Arc::clone(breakpoint))?;
        }
        Ok(())
    }

    /// Unbind from the resize signal. Returns `false` if it was not bound.
    ///
    /// Breakpoints and observers stay registered; `init` may be called again.
    pub fn dispose(&self) -> bool {
        let Some(binding) = lock(&self.binding).take() else {
            return false;
        };
        binding.source.unsubscribe(binding.listener);
        tracing::info!("viewport disposed");
        true
    }

    pub fn is_initialized(&self) -> bool {
        lock(&self.binding).is_some()
    }

    /// Run change detection now, as the bound resize listener does.
    ///
    /// Returns `true` if observers were notified.
    pub fn handle_resize(&self) -> bool {
        self.shared.handle_resize()
    }

    // ------------------------------------------------------------------
    // Breakpoints
    // ------------------------------------------------------------------

    pub fn add_breakpoint(
        &self,
        breakpoint: impl Into<Arc<Breakpoint>>,
    ) -> BreakpointResult<Arc<Breakpoint>> {
        lock(&self.shared.registry).add(breakpoint)
    }

    pub fn remove_breakpoint(&self, key: &str) -> BreakpointResult<Arc<Breakpoint>> {
        lock(&self.shared.registry).remove(key)
    }

    pub fn breakpoint(&self, key: &str) -> Option<Arc<Breakpoint>> {
        lock(&self.shared.registry).get(key).cloned()
    }

    /// All breakpoints, largest width first.
    pub fn breakpoints(&self) -> Vec<Arc<Breakpoint>> {
        lock(&self.shared.registry).snapshot()
    }

    /// Apply `f` to every breakpoint, largest width first.
    ///
    /// Works on a snapshot, so `f` may call back into the viewport.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&Arc<Breakpoint>),
    {
        for breakpoint in &self.breakpoints() {
            f(breakpoint);
        }
    }

    /// The active breakpoint for the host's current width.
    pub fn current(&self) -> Option<Arc<Breakpoint>> {
        self.shared.current()
    }

    pub fn is_active(&self, key: &str) -> BreakpointResult<bool> {
        let breakpoint = self
            .breakpoint(key)
            .ok_or_else(|| BreakpointError::not_found(key))?;
        Ok(breakpoint.is_active(self.shared.provider.as_ref()))
    }

    pub fn width(&self) -> f64 {
        self.shared.provider.width()
    }

    /// The host width reader this viewport resolves against.
    pub fn provider(&self) -> Arc<dyn WidthProvider> {
        Arc::clone(&self.shared.provider)
    }

    /// The change reference: the last breakpoint observers were told about.
    pub fn reference(&self) -> Option<Arc<Breakpoint>> {
        self.shared.detector.reference()
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register a generic observer under `name`, replacing any previous one.
    ///
    /// Every observer is then notified once with the current state, so the
    /// new one does not have to wait for the next change.
    pub fn add_observer<F>(&self, name: impl Into<String>, callback: F)
    where
        F: Fn(&BreakpointUpdate) + Send + Sync + 'static,
    {
        self.shared.observers.insert(name, Arc::new(callback));
        self.shared.notify_default();
    }

    /// Remove an observer. Returns whether one was registered.
    pub fn remove_observer(&self, name: &str) -> bool {
        self.shared.observers.remove(name)
    }

    pub fn has_observer(&self, name: &str) -> bool {
        self.shared.observers.contains(name)
    }

    pub fn observer_count(&self) -> usize {
        self.shared.observers.len()
    }

    /// Deliver `update` to every observer. Returns how many were invoked.
    pub fn notify(&self, update: &BreakpointUpdate) -> usize {
        self.shared.observers.notify(update)
    }

    // ------------------------------------------------------------------
    // Directional callbacks
    // ------------------------------------------------------------------

    /// Fire `callback` on every notification while `key` is active.
    pub fn up<F>(&self, key: &str, callback: F) -> BreakpointResult<()>
    where
        F: Fn(&BreakpointUpdate) + Send + Sync + 'static,
    {
        self.subscribe(key, Direction::Up, Arc::new(callback))
    }

    /// Fire `callback` on every notification while `key` is inactive.
    pub fn down<F>(&self, key: &str, callback: F) -> BreakpointResult<()>
    where
        F: Fn(&BreakpointUpdate) + Send + Sync + 'static,
    {
        self.subscribe(key, Direction::Down, Arc::new(callback))
    }

    /// Append a directional callback to `key`.
    ///
    /// If the breakpoint's state already matches `direction`, the callback
    /// also fires once right away with `{passed: <change reference>, current}`.
    pub fn subscribe(
        &self,
        key: &str,
        direction: Direction,
        callback: BreakpointCallback,
    ) -> BreakpointResult<()> {
        let breakpoint = self
            .breakpoint(key)
            .ok_or_else(|| BreakpointError::not_found(key))?;
        breakpoint.push_callback(direction, Arc::clone(&callback));
        tracing::debug!(key, %direction, "directional callback added");

        if direction.fires_when(breakpoint.is_active(self.shared.provider.as_ref())) {
            callback(&self.shared.default_update());
        }
        Ok(())
    }
}

fn directional_observer(shared: Weak<Shared>) -> BreakpointCallback {
    Arc::new(move |update: &BreakpointUpdate| {
        if let Some(shared) = shared.upgrade() {
            shared.dispatch_directional(update);
        }
    })
}

impl Drop for Viewport {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("width", &self.width())
            .field("breakpoints", &self.breakpoints())
            .field("observers", &self.shared.observers)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
