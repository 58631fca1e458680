//! Logger front-end
//!
//! Builds records and hands them to a `Handler`. Level gating happens here,
//! before a record is built, through the handler's own `enabled` check.

use super::{
    attr::Attr,
    handler::Handler,
    level::Level,
    metrics::LoggerMetrics,
    record::{Record, Source},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    /// Shared with every logger derived through `with`/`with_group`
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new<H: Handler + 'static>(handler: H) -> Self {
        Self::from_arc(Arc::new(handler))
    }

    #[must_use]
    pub fn from_arc(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Logger whose records always carry `attrs`
    #[must_use]
    pub fn with(&self, attrs: &[Attr]) -> Self {
        Self {
            handler: self.handler.with_attrs(attrs),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Logger whose later attributes are nested under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            handler: self.handler.with_group(name),
            metrics: Arc::clone(&self.metrics),
        }
    }

    pub fn log(&self, level: Level, message: impl Into<String>, attrs: Vec<Attr>) {
        if !self.enabled(level) {
            return;
        }
        self.dispatch(&Record::new(level, message).with_attrs(attrs));
    }

    /// Log with the call-site location the macros capture
    pub fn log_at(&self, level: Level, message: impl Into<String>, attrs: Vec<Attr>, source: Source) {
        if !self.enabled(level) {
            return;
        }
        self.dispatch(
            &Record::new(level, message)
                .with_attrs(attrs)
                .with_source(source),
        );
    }

    /// Hand a prebuilt record to the handler if its level is enabled
    pub fn log_record(&self, record: &Record) {
        if self.enabled(record.level) {
            self.dispatch(record);
        }
    }

    fn dispatch(&self, record: &Record) {
        match self.handler.handle(record) {
            Ok(()) => self.metrics.record_logged(),
            Err(e) => {
                eprintln!("[LOGGER ERROR] Handler failed: {}", e);
                self.metrics.record_dropped();
            }
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(Level::DEBUG, message, attrs);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(Level::INFO, message, attrs);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(Level::WARN, message, attrs);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(Level::ERROR, message, attrs);
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use flarelog::{HandlerOptions, JsonHandler, Logger};
    ///
    /// let logger = Logger::new(JsonHandler::new(std::io::sink(), HandlerOptions::default()));
    /// logger.info("counted", vec![]);
    /// assert_eq!(logger.metrics().total_logged(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}
