//! Basic handler usage example
//!
//! Logs one message per level with source locations enabled. Each record
//! is printed in color on the console and appended to `./logs.log`.
//!
//! Run with: cargo run --example basic_usage

use flarelog::prelude::*;
use flarelog::{debug, error, info, warn};

fn main() -> Result<()> {
    let options = HandlerOptions::new()
        .with_level(Level::DEBUG)
        .with_source(true);
    let logger = Logger::new(FlareHandler::new(options)?);

    info!(logger, "Info Level Log");
    debug!(logger, "This is a debug message");
    warn!(logger, "This is a warn message");
    error!(logger, "This is an error message");

    // Bound attributes and groups end up in the JSON blob
    let requests = logger
        .with(&[Attr::new("service", "api")])
        .with_group("request");
    requests.error(
        "request failed",
        vec![Attr::new("code", 500), Attr::new("path", "/users/42")],
    );

    if logger.metrics().dropped_count() > 0 {
        eprintln!("{} records could not be written", logger.metrics().dropped_count());
    }
    Ok(())
}
