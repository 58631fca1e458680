//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The embedded encoder or the attribute pretty-printer failed
    #[error("{context}: {source}")]
    Encode {
        context: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The encoder buffer did not hold a valid JSON object
    #[error("{context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The log file could not be opened or written
    #[error("Log file sink '{path}' failed while {operation}: {source}")]
    Sink {
        path: String,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LoggerError {
    /// Create an encode error wrapping the failing stage
    pub fn encode<E>(context: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LoggerError::Encode {
            context,
            source: source.into(),
        }
    }

    /// Create a decode error wrapping the parser failure
    pub fn decode(context: &'static str, source: serde_json::Error) -> Self {
        LoggerError::Decode { context, source }
    }

    /// Create a file sink error
    pub fn sink(path: impl Into<String>, operation: &'static str, source: std::io::Error) -> Self {
        LoggerError::Sink {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}
