//! Dual-output handler
//!
//! `FlareHandler` renders each record twice: a colorized line for the
//! console and a plain line appended to the log file. The attribute blob
//! of both lines comes from an embedded `JsonHandler` that writes into a
//! private buffer which is parsed back into a JSON object.
//!
//! Handlers derived with `with_attrs`/`with_group` share the buffer, its
//! lock, the hook and both sinks with the handler they came from, so every
//! handler of one family serializes attribute extraction through the same
//! lock.

use super::json::JsonHandler;
use super::render::{self, Fields};
use crate::core::attr::is_well_known;
use crate::core::{
    Attr, FlareConfig, Handler, HandlerOptions, Level, LoggerError, Record, ReplaceAttr, Result,
    Rewrite,
};
use crate::sinks::{ConsoleSink, FileSink};
use parking_lot::Mutex;
use serde_json::Map;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type JsonMap = Map<String, serde_json::Value>;

/// State shared by every handler derived from one root.
struct Shared {
    /// Output of the embedded encoder; empty outside of `compute_attrs`.
    buffer: Arc<Mutex<Vec<u8>>>,
    /// Held across encode, parse and reset of `buffer`.
    gate: Mutex<()>,
    replace_attr: Option<ReplaceAttr>,
    console: ConsoleSink,
    file: FileSink,
    use_colors: bool,
}

/// Clears the buffer when dropped, so every exit path leaves it empty.
struct BufferReset<'a>(&'a Mutex<Vec<u8>>);

impl Drop for BufferReset<'_> {
    fn drop(&mut self) {
        self.0.lock().clear();
    }
}

#[derive(Clone)]
pub struct FlareHandler {
    inner: JsonHandler<Vec<u8>>,
    shared: Arc<Shared>,
}

impl FlareHandler {
    /// Create a handler writing to standard output and `./logs.log`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use flarelog::{FlareHandler, HandlerOptions, Level, Logger};
    ///
    /// let handler = FlareHandler::new(
    ///     HandlerOptions::new().with_level(Level::DEBUG).with_source(true),
    /// )?;
    /// let logger = Logger::new(handler);
    /// logger.info("Info Level Log", vec![]);
    /// # Ok::<(), flarelog::LoggerError>(())
    /// ```
    pub fn new(options: HandlerOptions) -> Result<Self> {
        Self::builder().options(options).build()
    }

    #[must_use]
    pub fn builder() -> FlareHandlerBuilder {
        FlareHandlerBuilder::new()
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    /// Derive a handler whose attribute blob always carries `attrs`
    #[must_use]
    pub fn with_attrs(&self, attrs: &[Attr]) -> Self {
        Self {
            inner: self.inner.with_attrs(attrs),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Derive a handler that nests later attributes under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            inner: self.inner.with_group(name),
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn file_path(&self) -> &Path {
        self.shared.file.path()
    }

    /// Extract the generic attributes of `record` through the embedded encoder
    pub(crate) fn compute_attrs(&self, record: &Record) -> Result<JsonMap> {
        let _gate = self.shared.gate.lock();
        let _reset = BufferReset(&self.shared.buffer);

        Handler::handle(&self.inner, record)
            .map_err(|e| LoggerError::encode("inner handler Handle failed", e))?;

        let parsed = {
            let buffer = self.shared.buffer.lock();
            serde_json::from_slice::<JsonMap>(&buffer)
        };
        parsed.map_err(|e| LoggerError::decode("unmarshal failed", e))
    }
}

impl Handler for FlareHandler {
    fn enabled(&self, level: Level) -> bool {
        FlareHandler::enabled(self, level)
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(FlareHandler::with_attrs(self, attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(FlareHandler::with_group(self, name))
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let fields = Fields::from_record(record, self.shared.replace_attr.as_ref());
        let attrs = self.compute_attrs(record)?;
        let line = render::compose(&fields, record.level, &attrs, self.shared.use_colors)?;

        self.shared.console.write_line(&line.styled);
        self.shared.file.write_line(&line.plain, record.source.as_ref())
    }
}

impl fmt::Debug for FlareHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlareHandler")
            .field("file", &self.shared.file.path())
            .field("use_colors", &self.shared.use_colors)
            .finish_non_exhaustive()
    }
}

/// Drop the well-known keys wherever they appear, then defer to `next`.
fn suppress_well_known(next: Option<ReplaceAttr>) -> ReplaceAttr {
    Arc::new(move |groups: &[String], attr: Attr| {
        if is_well_known(&attr.key) {
            return Rewrite::Suppress;
        }
        match next {
            Some(ref hook) => hook(groups, attr),
            None => Rewrite::Keep(attr),
        }
    })
}

/// Builder for constructing a `FlareHandler` with a fluent API
///
/// # Example
/// ```no_run
/// use flarelog::{FlareHandler, Level};
///
/// let handler = FlareHandler::builder()
///     .level(Level::DEBUG)
///     .add_source(true)
///     .file_path("/var/log/app.log")
///     .build()?;
/// # Ok::<(), flarelog::LoggerError>(())
/// ```
pub struct FlareHandlerBuilder {
    options: HandlerOptions,
    file_path: PathBuf,
    console: Option<ConsoleSink>,
    use_colors: bool,
}

impl FlareHandlerBuilder {
    pub fn new() -> Self {
        let config = FlareConfig::default();
        Self {
            options: HandlerOptions::new().with_level(config.level),
            file_path: config.file_path,
            console: None,
            use_colors: config.use_colors,
        }
    }

    /// Replace level, source flag and hook at once
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: HandlerOptions) -> Self {
        self.options = options;
        self
    }

    /// Apply every setting of a loaded configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: FlareConfig) -> Self {
        self.options.level = config.level;
        self.options.add_source = config.add_source;
        self.file_path = config.file_path;
        self.use_colors = config.use_colors;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.options.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn add_source(mut self, add_source: bool) -> Self {
        self.options.add_source = add_source;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn replace_attr<F>(mut self, hook: F) -> Self
    where
        F: Fn(&[String], Attr) -> Rewrite + Send + Sync + 'static,
    {
        self.options.replace_attr = Some(Arc::new(hook));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Send console lines to `writer` instead of standard output
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, writer: impl Write + Send + 'static) -> Self {
        self.console = Some(ConsoleSink::new(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Open the log file and build the handler
    ///
    /// Fails with `LoggerError::Sink` when the file cannot be opened.
    pub fn build(self) -> Result<FlareHandler> {
        if self.file_path.as_os_str().is_empty() {
            return Err(LoggerError::config("FlareHandler", "file path must not be empty"));
        }
        let file = FileSink::open(self.file_path)?;

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let inner_options = HandlerOptions {
            level: self.options.level,
            add_source: self.options.add_source,
            replace_attr: Some(suppress_well_known(self.options.replace_attr.clone())),
        };
        let inner = JsonHandler::with_shared_writer(Arc::clone(&buffer), inner_options);

        Ok(FlareHandler {
            inner,
            shared: Arc::new(Shared {
                buffer,
                gate: Mutex::new(()),
                replace_attr: self.options.replace_attr,
                console: self.console.unwrap_or_default(),
                file,
                use_colors: self.use_colors,
            }),
        })
    }
}

impl Default for FlareHandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
