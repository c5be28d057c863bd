//! Basic handler usage example
//!
//! Demonstrates console output, per-writer thresholds and structured fields.
//!
//! Run with: cargo run --example basic_usage

use proxy_log::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Proxy Log - Basic Usage Example ===\n");

    // Writers attached from here on start at DEBUG
    let handler = Handler::new(Level::Debug);
    handler.add_writer(ConsoleWriter::new());

    println!("1. Logging at different levels:");
    handler.debug("This is a debug message").enforce();
    handler.info("This is an info message").enforce();
    handler.warning("This is a warning message").enforce();
    handler.error("This is an error message").enforce();

    println!("\n2. Thresholds are stamped when a writer is attached:");
    handler.set_level(Level::Warning);
    handler.set_writer(ConsoleWriter::with_colors(false));
    println!("   Writer replaced at WARNING - debug and info won't show:");
    handler.debug("Debug message (hidden)").enforce();
    handler.info("Info message (hidden)").enforce();
    handler.warning("Warning message (visible)").enforce();

    println!("\n3. Structured fields:");
    handler
        .with_field("upstream", "10.0.0.2:53")
        .with_field("latency", Duration::from_millis(740))
        .warning("slow upstream")
        .enforce();

    let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    handler
        .with_field("upstream", "10.0.0.3:53")
        .with_error(&err)
        .send()
        .enforce();

    println!("\n4. Logfmt output:");
    handler.set_writer(
        ConsoleWriter::with_colors(false).with_output_format(OutputFormat::Logfmt),
    );
    handler
        .with_field("listener", "0.0.0.0:8053")
        .warning("listener bound without TLS")
        .enforce();

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
