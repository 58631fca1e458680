//! Handler configuration
//!
//! `HandlerOptions` is the programmatic surface (it can carry a closure),
//! while `FlareConfig` holds the settings that can be loaded from a
//! configuration file.

use super::attr::{Attr, Rewrite};
use super::error::{LoggerError, Result};
use super::level::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Attribute rewrite hook.
///
/// Called with the group path of the attribute (empty for top-level fields)
/// and the attribute itself. Returning `Rewrite::Suppress` removes the
/// attribute from every output.
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Rewrite + Send + Sync>;

/// Default location of the log file.
pub const DEFAULT_LOG_PATH: &str = "./logs.log";

#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Minimum level a record needs to be handled.
    pub level: Level,
    /// Include the call-site location of records in the attribute blob.
    pub add_source: bool,
    pub replace_attr: Option<ReplaceAttr>,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    /// Install an attribute rewrite hook
    ///
    /// # Example
    ///
    /// ```
    /// use flarelog::{Attr, HandlerOptions, Rewrite};
    ///
    /// // Hide passwords wherever they appear
    /// let options = HandlerOptions::new().with_replace_attr(|_groups: &[String], attr: Attr| {
    ///     if attr.key == "password" {
    ///         Rewrite::Suppress
    ///     } else {
    ///         Rewrite::Keep(attr)
    ///     }
    /// });
    /// assert!(options.replace_attr.is_some());
    /// ```
    #[must_use]
    pub fn with_replace_attr<F>(mut self, hook: F) -> Self
    where
        F: Fn(&[String], Attr) -> Rewrite + Send + Sync + 'static,
    {
        self.replace_attr = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("level", &self.level)
            .field("add_source", &self.add_source)
            .field("replace_attr", &self.replace_attr.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

/// Serializable settings of a `FlareHandler`
///
/// # Example
///
/// ```
/// use flarelog::{FlareConfig, Level};
///
/// let config = FlareConfig::from_json(r#"{"level": "debug", "use_colors": false}"#).unwrap();
/// assert_eq!(config.level, Level::DEBUG);
/// assert!(!config.use_colors);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlareConfig {
    pub level: Level,
    pub add_source: bool,
    pub file_path: PathBuf,
    pub use_colors: bool,
}

impl FlareConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FlareConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_path.as_os_str().is_empty() {
            return Err(LoggerError::config("FlareConfig", "file_path must not be empty"));
        }
        Ok(())
    }
}

impl Default for FlareConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            add_source: false,
            file_path: PathBuf::from(DEFAULT_LOG_PATH),
            use_colors: true,
        }
    }
}
