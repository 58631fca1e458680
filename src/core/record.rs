//! Log record structure

use super::attr::{Attr, Value};
use super::level::Level;
use chrono::{DateTime, Local};
use std::path::Path;

/// Call-site location of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl Source {
    pub fn new(file: &str, line: u32, function: &str) -> Self {
        Self {
            file: file.to_string(),
            line,
            function: function.to_string(),
        }
    }

    /// File name without its directories, as used in line prefixes.
    pub fn short_file(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Group(vec![
            Attr::new("function", self.function.as_str()),
            Attr::new("file", self.file.as_str()),
            Attr::new("line", self.line),
        ])
    }
}

/// A single log event, owned by the caller for the duration of one `handle` call
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
    pub source: Option<Source>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            level,
            message: message.into(),
            attrs: Vec::new(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_attr(mut self, attr: Attr) -> Self {
        self.attrs.push(attr);
        self
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}
