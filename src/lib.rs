//! # Flarelog
//!
//! A structured-log handler that writes every record twice: a colorized,
//! human-readable line on the console and a plain line appended to a log
//! file.
//!
//! ## Features
//!
//! - **Dual output**: styled console text and plain file text from one record
//! - **Structured attributes**: groups, bound attributes and a rewrite hook
//!   that can rename, transform or suppress any attribute
//! - **Thread Safe**: handlers can be shared across threads and derived
//!   handlers keep serializing through their root
//!
//! ## Example
//!
//! ```no_run
//! use flarelog::prelude::*;
//!
//! let handler = FlareHandler::new(HandlerOptions::new().with_level(Level::DEBUG))?;
//! let logger = Logger::new(handler);
//!
//! logger.info("Info Level Log", vec![]);
//! logger.error("Request failed", vec![Attr::new("code", 500)]);
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod handlers;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Attr, FlareConfig, Handler, HandlerOptions, Level, Logger, LoggerError, LoggerMetrics,
        Record, ReplaceAttr, Result, Rewrite, Source, Value,
    };
    pub use crate::handlers::{FlareHandler, FlareHandlerBuilder, JsonHandler};
}

pub use crate::core::{
    Attr, FlareConfig, Handler, HandlerOptions, Level, Logger, LoggerError, LoggerMetrics, Record,
    ReplaceAttr, Result, Rewrite, Source, Value, DEFAULT_LOG_PATH,
};
pub use crate::handlers::{FlareHandler, FlareHandlerBuilder, JsonHandler};
