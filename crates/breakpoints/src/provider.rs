//! Provider traits for reading the host viewport width.
//!
//! The host environment owns the real display surface. These traits keep the
//! breakpoint logic independent of it, so resolution stays pure and testable.

use std::sync::atomic::{AtomicU64, Ordering};

/// Synchronous reader for the current viewport width of the host surface.
pub trait WidthProvider: Send + Sync {
    /// Current viewport width in the same unit as breakpoint widths.
    fn width(&self) -> f64;
}

/// Null implementation for testing or headless hosts. Always reports `0.0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProvider;

impl WidthProvider for NullProvider {
    fn width(&self) -> f64 {
        0.0
    }
}

/// A width that never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidth(pub f64);

impl WidthProvider for FixedWidth {
    fn width(&self) -> f64 {
        self.0
    }
}

/// A width the host updates from its own event loop.
///
/// Stored as the bit pattern of an `f64` so reads never block.
#[derive(Debug, Default)]
pub struct SharedWidth {
    bits: AtomicU64,
}

impl SharedWidth {
    pub fn new(width: f64) -> Self {
        Self {
            bits: AtomicU64::new(width.to_bits()),
        }
    }

    /// Replace the stored width. Does not emit a resize signal by itself.
    pub fn set(&self, width: f64) {
        self.bits.store(width.to_bits(), Ordering::SeqCst);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

impl WidthProvider for SharedWidth {
    fn width(&self) -> f64 {
        self.get()
    }
}
