//! File logging example
//!
//! Demonstrates fan-out to the console, a text file and a JSONL file, wired
//! from a JSON configuration document.
//!
//! Run with: cargo run --example file_logging

use proxy_log::prelude::*;

fn main() -> Result<()> {
    println!("=== Proxy Log - File Logging Example ===\n");

    let config = HandlerConfig::from_json_str(
        r#"{
            "log_level": "debug",
            "writers": [
                { "type": "console", "colors": true },
                { "type": "file", "path": "proxy.log" },
                { "type": "json", "path": "events.jsonl", "timestamp": "unix_millis" }
            ]
        }"#,
    )?;
    let handler = config.build()?;

    println!("1. Logging to every configured writer:");
    println!("   Writers: {:?}", handler.writer_names());

    handler.info("proxy starting").enforce();
    handler.debug("loading blocklists").enforce();
    handler
        .with_field("entries", 48_213)
        .info("blocklists loaded")
        .enforce();
    handler.warning("no upstream configured for .lan, using defaults").enforce();

    println!("\n2. Simulating traffic:");
    for i in 1..=5 {
        handler
            .with_field("client", format!("192.0.2.{}", i))
            .info(format_args!("query {}/5 forwarded", i))
            .enforce();
        if i == 3 {
            handler
                .with_field("client", "192.0.2.3")
                .warning("query 3 took longer than expected")
                .enforce();
        }
    }

    handler.info("proxy stopped").enforce();

    // Buffered writers only hit the disk on flush or drop
    handler.flush()?;

    let metrics = handler.metrics();
    println!("\n3. Handler metrics:");
    println!("   dispatched: {}", metrics.dispatched());
    println!("   fallback used: {}", metrics.fallback_used());

    println!("\n=== Example completed successfully! ===");
    println!("Check 'proxy.log' and 'events.jsonl' for the full log output");

    Ok(())
}
