//! Viewport breakpoint tracking.
//!
//! Tracks which named width threshold ("breakpoint") is active for a host
//! display surface and notifies observers when it changes. Two notification
//! surfaces exist:
//! - Generic observers, registered by name, told about every change
//! - Directional up/down callbacks tied to one breakpoint's active state
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  breakpoint.rs - Breakpoint entity, update payload          │
//! │  registry.rs   - Ordered registry, current resolution       │
//! │  provider.rs   - Host width traits                          │
//! │  signal.rs     - Host resize signal traits                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Notification Layer                         │
//! │  observer.rs - Named observer fan-out                       │
//! │  dispatch.rs - Directional up/down dispatch                 │
//! │  detector.rs - Change reference and de-duplication          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  viewport.rs - Context object: init, subscribe, dispose     │
//! │  config.rs   - Breakpoint sets from JSON                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use viewport_breakpoints::{BreakpointConfig, ResizeEmitter, SharedWidth, Viewport};
//!
//! let width = Arc::new(SharedWidth::new(1000.0));
//! let resize = Arc::new(ResizeEmitter::new());
//! let viewport = Viewport::new(width.clone());
//! viewport
//!     .init(resize.clone(), BreakpointConfig::bootstrap().into_breakpoints())
//!     .unwrap();
//!
//! viewport.add_observer("log", |update| {
//!     println!("{:?} -> {:?}", update.passed_key(), update.current_key());
//! });
//! viewport.up("md", |_| println!("md or wider")).unwrap();
//!
//! width.set(500.0);
//! resize.emit();
//! ```

mod breakpoint;
mod config;
mod detector;
mod dispatch;
mod error;
mod observer;
mod provider;
mod registry;
mod signal;
mod sync;
mod viewport;

pub use breakpoint::{
    new_callback, same_breakpoint, Breakpoint, BreakpointCallback, BreakpointUpdate, Direction,
};
pub use config::{BreakpointConfig, BreakpointSpec};
pub use detector::ChangeDetector;
pub use dispatch::{DirectionalDispatcher, DIRECTIONAL_OBSERVER};
pub use error::{BreakpointError, BreakpointResult};
pub use observer::ObserverHub;
pub use provider::{FixedWidth, NullProvider, SharedWidth, WidthProvider};
pub use registry::BreakpointRegistry;
pub use signal::{ListenerId, ResizeEmitter, ResizeListener, ResizeSource};
pub use viewport::Viewport;
