//! Structured logging example
//!
//! Demonstrates one-shot and bound fields, the JSON and colorized
//! formatters, extra destinations and Panic handling.
//!
//! Run with: cargo run --example structured_logging

use rust_fanout_logger::prelude::*;
use rust_fanout_logger::log_panic;

fn load_shards(logger: &Logger, shards: usize) -> Result<usize> {
    if shards == 0 {
        return Err(log_panic!(logger, "no shards configured"));
    }
    Ok(shards)
}

fn main() -> Result<()> {
    println!("=== Rust Fanout Logger - Structured Logging Example ===\n");

    println!("1. Plain key=value fields:");
    let plain = Logger::builder().name("orders").detached().build();
    plain.bind_context(fields! { "service" => "orders", "version" => "2.1.0" });
    plain
        .with(fields! { "order_id" => 981, "total" => 42.5 })
        .info("order placed");
    plain.info("bound fields only");

    println!("\n2. JSON lines:");
    let json = Logger::builder()
        .formatter(JsonFormatter::new())
        .flags(OutputFlags::STD | OutputFlags::SHORT_FILE)
        .context(fields! { "service" => "orders" })
        .detached()
        .build();
    json.with(LogFields::new())
        .field("user", "alice")
        .field("items", FieldValue::serialize(&["book", "pen"])?)
        .warning("cart nearly full");

    println!("\n3. Colorized prefixes:");
    let colored = Logger::builder()
        .formatter(ColorizedFormatter::new())
        .level(LogLevel::Debug)
        .detached()
        .build();
    colored.debug("debug in white");
    colored.error("error in red");

    println!("\n4. Extra destination and Panic:");
    let captured = MemorySink::new();
    let audited = Logger::builder()
        .writer(captured.clone())
        .flags(OutputFlags::DISABLED)
        .detached()
        .build();
    match load_shards(&audited, 0) {
        Ok(count) => println!("   loaded {} shards", count),
        Err(e) => println!("   caller received: {}", e),
    }
    println!("   captured lines: {:?}", captured.lines());

    println!("\n5. Configuration from JSON:");
    let config = LoggerConfig::from_json_str(
        r#"{ "level": "debug", "flags": "time|shortfile", "context": { "job": "nightly" } }"#,
    )?;
    let configured = LoggerBuilder::from_config(&config)?.detached().build();
    configured.debug("configured from json");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
