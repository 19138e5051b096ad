//! Example: Sweep a simulated window across breakpoints and print changes.
//!
//! Run with: cargo run -p viewport-breakpoints --example simulate_resize

use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use viewport_breakpoints::{BreakpointConfig, ResizeEmitter, SharedWidth, Viewport};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,viewport_breakpoints=debug")),
        )
        .init();

    println!("=== Viewport Breakpoint Example ===");

    // The host side: a width the "window" reports and its resize event.
    let width = Arc::new(SharedWidth::new(1024.0));
    let resize = Arc::new(ResizeEmitter::new());

    let viewport = Viewport::new(width.clone());
    viewport.init(resize.clone(), BreakpointConfig::bootstrap().into_breakpoints())?;

    viewport.add_observer("print", |update| {
        println!(
            "  change: {} -> {}",
            update.passed_key().unwrap_or("(none)"),
            update.current_key().unwrap_or("(none)")
        );
    });
    viewport.up("md", |_| println!("  md: up (tablet layout or wider)"))?;
    viewport.down("md", |_| println!("  md: down (phone layout)"))?;

    for next in [1300.0, 1250.0, 1000.0, 800.0, 700.0, 600.0, 300.0, 0.0, 900.0] {
        println!("[resize] {next}px");
        width.set(next);
        resize.emit();
    }

    viewport.dispose();
    println!("\nDone.");
    Ok(())
}
