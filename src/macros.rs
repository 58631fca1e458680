//! Logging macros for ergonomic log message formatting.
//!
//! These macros format the message like `format!`, take optional attributes
//! after a `;`, and record the call site so `add_source` can report it.
//!
//! # Examples
//!
//! ```
//! use flarelog::{info, HandlerOptions, JsonHandler, Logger};
//!
//! let logger = Logger::new(JsonHandler::new(std::io::sink(), HandlerOptions::default()));
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With attributes
//! info!(logger, "Request served"; "status" => 200, "path" => "/health");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use flarelog::{HandlerOptions, JsonHandler, Logger};
/// # let logger = Logger::new(JsonHandler::new(std::io::sink(), HandlerOptions::default()));
/// use flarelog::{log, Level};
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::ERROR + 1, "Error code: {}", 500; "retry" => false);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(; $($key:literal => $value:expr),+ $(,)?)?) => {
        $logger.log_at(
            $level,
            format!($fmt $(, $arg)*),
            vec![$($($crate::Attr::new($key, $value)),+)?],
            $crate::Source::new(file!(), line!(), module_path!()),
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use flarelog::{HandlerOptions, JsonHandler, Logger};
/// # let logger = Logger::new(JsonHandler::new(std::io::sink(), HandlerOptions::default()));
/// use flarelog::error;
/// error!(logger, "Database connection failed"; "code" => 500);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($arg)+)
    };
}
