//! Shared event contracts for breakpoint changes.
//!
//! Serializable DTOs for what the viewport observers see, plus the `EventBus`
//! trait and a bridge that forwards every notification onto a bus.

mod bus;

pub use bus::{EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, NullEventBus};

use serde::{Deserialize, Serialize};
use viewport_breakpoints::{Breakpoint, BreakpointUpdate, Viewport};

/// Observer name used by [`attach_event_bus`].
pub const EVENT_BUS_OBSERVER: &str = "event-bus";

/// Plain-data view of a breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointInfo {
    pub key: String,
    pub width: f64,
}

impl From<&Breakpoint> for BreakpointInfo {
    fn from(breakpoint: &Breakpoint) -> Self {
        Self {
            key: breakpoint.key().to_string(),
            width: breakpoint.width(),
        }
    }
}

/// Event emitted whenever viewport observers are notified.
///
/// Producers: [`attach_event_bus`]
/// Consumers: host UI code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointChangedEvent {
    /// Breakpoint current before the change.
    #[serde(default)]
    pub passed: Option<BreakpointInfo>,
    /// Breakpoint current now.
    #[serde(default)]
    pub current: Option<BreakpointInfo>,
    /// Host width when the event was built.
    pub width: f64,
    /// False for priming notifications.
    #[serde(default)]
    pub is_change: bool,
    /// Timestamp in milliseconds.
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl BreakpointChangedEvent {
    pub fn from_update(update: &BreakpointUpdate, width: f64) -> Self {
        Self {
            passed: update.passed.as_deref().map(BreakpointInfo::from),
            current: update.current.as_deref().map(BreakpointInfo::from),
            width,
            is_change: update.is_change(),
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Forward every notification of `viewport` to `bus` as JSON.
///
/// Registering the observer primes it, so the bus receives the current state
/// right away.
pub fn attach_event_bus(viewport: &Viewport, bus: EventBusRef) {
    let provider = viewport.provider();
    viewport.add_observer(EVENT_BUS_OBSERVER, move |update: &BreakpointUpdate| {
        let event = BreakpointChangedEvent::from_update(update, provider.width());
        match serde_json::to_value(&event) {
            Ok(payload) => bus.emit(event_names::BREAKPOINT_CHANGED, payload),
            Err(e) => tracing::warn!(error = %e, "failed to serialize breakpoint event"),
        }
    });
}

/// Stop forwarding to the bus.
pub fn detach_event_bus(viewport: &Viewport) -> bool {
    viewport.remove_observer(EVENT_BUS_OBSERVER)
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Breakpoint changed event.
    pub const BREAKPOINT_CHANGED: &str = "viewport:breakpoint_changed";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserialize() {
        let json = r#"{
            "passed": {"key": "sm", "width": 576},
            "current": {"key": "md", "width": 768},
            "width": 800,
            "isChange": true,
            "timestampMs": 12345
        }"#;
        let event: BreakpointChangedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.passed.unwrap().key, "sm");
        assert_eq!(event.current.unwrap().width, 768.0);
        assert!(event.is_change);
        assert_eq!(event.timestamp_ms, 12345);
    }

    #[test]
    fn test_event_deserialize_minimal() {
        let event: BreakpointChangedEvent = serde_json::from_str(r#"{"width": 0}"#).unwrap();
        assert!(event.passed.is_none());
        assert!(event.current.is_none());
        assert!(!event.is_change);
    }

    #[test]
    fn test_from_update() {
        let sm = std::sync::Arc::new(Breakpoint::new("sm", 576.0));
        let update = BreakpointUpdate::new(Some(sm.clone()), Some(sm));
        let event = BreakpointChangedEvent::from_update(&update, 600.0);

        assert_eq!(
            event.current,
            Some(BreakpointInfo {
                key: "sm".to_string(),
                width: 576.0
            })
        );
        assert!(!event.is_change);
        assert!(event.timestamp_ms > 0);
    }
}
