//! Core logger types and traits

pub mod attr;
pub mod error;
pub mod handler;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod record;
pub mod timestamp;

pub use attr::{Attr, Rewrite, Value};
pub use error::{LoggerError, Result};
pub use handler::Handler;
pub use level::Level;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use options::{FlareConfig, HandlerOptions, ReplaceAttr, DEFAULT_LOG_PATH};
pub use record::{Record, Source};
