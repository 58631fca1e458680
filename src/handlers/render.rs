//! Rendering of the well-known fields and composition of the two output lines

use crate::core::attr::{Attr, LEVEL_KEY, MESSAGE_KEY, TIME_KEY};
use crate::core::{timestamp, Level, LoggerError, Record, ReplaceAttr, Result};
use colored::Color;
use serde_json::Map;

const RESET: &str = "\x1b[0m";
const NO_GROUPS: &[String] = &[];

/// Color of the timestamp field.
pub const TIME_COLOR: Color = Color::White;
/// Color of the message field.
pub const MESSAGE_COLOR: Color = Color::BrightWhite;
/// Color of the attribute blob.
pub const ATTRS_COLOR: Color = Color::BrightBlack;

/// Wrap `text` in the ANSI foreground escape of `color`
pub fn colorize(color: Color, text: &str) -> String {
    format!("\x1b[{}m{}{}", color.to_fg_str(), text, RESET)
}

/// Plain text of the well-known fields; `None` marks a suppressed field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pub time: Option<String>,
    pub level: Option<String>,
    pub message: Option<String>,
}

impl Fields {
    /// Derive the well-known fields of a record, passing each through `hook`
    pub fn from_record(record: &Record, hook: Option<&ReplaceAttr>) -> Self {
        let rewrite = |attr: Attr| match hook {
            Some(hook) => hook(NO_GROUPS, attr).into_attr(),
            None => Some(attr),
        };

        let time = rewrite(Attr::new(TIME_KEY, timestamp::format_field(&record.time)))
            .map(|attr| attr.value.to_string());
        let level = rewrite(Attr::new(LEVEL_KEY, record.level))
            .map(|attr| format!("{}:", attr.value));
        let message = rewrite(Attr::new(MESSAGE_KEY, record.message.as_str()))
            .map(|attr| attr.value.to_string());

        Self {
            time,
            level,
            message,
        }
    }
}

/// The console and file representations of one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub styled: String,
    pub plain: String,
}

/// Pretty-print the leftover attributes; an empty mapping renders as nothing.
pub fn format_attrs(attrs: &Map<String, serde_json::Value>) -> Result<String> {
    if attrs.is_empty() {
        return Ok(String::new());
    }
    serde_json::to_string_pretty(attrs).map_err(|e| LoggerError::encode("marshal attrs failed", e))
}

/// Compose the styled console line and the plain file line
///
/// The console line reads timestamp, level, message, attributes. The file
/// line reads level, timestamp, message, attributes. Missing parts leave no
/// separator behind.
pub fn compose(
    fields: &Fields,
    level: Level,
    attrs: &Map<String, serde_json::Value>,
    use_colors: bool,
) -> Result<RenderedLine> {
    let blob = format_attrs(attrs)?;
    let paint = |color: Color, text: &str| {
        if use_colors {
            colorize(color, text)
        } else {
            text.to_string()
        }
    };

    let mut styled = Vec::with_capacity(4);
    if let Some(ref time) = fields.time {
        styled.push(paint(TIME_COLOR, time));
    }
    if let Some(ref level_text) = fields.level {
        styled.push(paint(level.color(), level_text));
    }
    if let Some(ref message) = fields.message {
        styled.push(paint(MESSAGE_COLOR, message));
    }
    if !blob.is_empty() {
        styled.push(paint(ATTRS_COLOR, &blob));
    }

    let plain: Vec<&str> = [&fields.level, &fields.time, &fields.message]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .chain((!blob.is_empty()).then_some(blob.as_str()))
        .collect();

    Ok(RenderedLine {
        styled: styled.join(" "),
        plain: plain.join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rewrite;
    use chrono::{Local, TimeZone};
    use serde_json::json;
    use std::sync::Arc;

    fn record(level: Level, message: &str) -> Record {
        let time = Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        Record::new(level, message).with_time(time)
    }

    fn attrs(value: serde_json::Value) -> Map<String, serde_json::Value> {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_colorize_escapes() {
        assert_eq!(colorize(Color::Cyan, "INFO:"), "\x1b[36mINFO:\x1b[0m");
        assert_eq!(colorize(Color::BrightBlack, "{}"), "\x1b[90m{}\x1b[0m");
    }

    #[test]
    fn test_fields_without_hook() {
        let fields = Fields::from_record(&record(Level::WARN, "careful"), None);
        assert_eq!(fields.time.as_deref(), Some("[10:30:45.000]"));
        assert_eq!(fields.level.as_deref(), Some("WARN:"));
        assert_eq!(fields.message.as_deref(), Some("careful"));
    }

    #[test]
    fn test_fields_hook_can_rewrite_and_suppress() {
        let hook: ReplaceAttr = Arc::new(|groups: &[String], attr: Attr| {
            assert!(groups.is_empty());
            match attr.key.as_str() {
                "time" => Rewrite::Suppress,
                "level" => Rewrite::Keep(Attr::new("level", "LVL")),
                _ => Rewrite::Keep(attr),
            }
        });
        let fields = Fields::from_record(&record(Level::INFO, "hi"), Some(&hook));

        assert_eq!(fields.time, None);
        assert_eq!(fields.level.as_deref(), Some("LVL:"));
        assert_eq!(fields.message.as_deref(), Some("hi"));
    }

    #[test]
    fn test_compose_without_attrs() {
        let fields = Fields::from_record(&record(Level::INFO, "Info Level Log"), None);
        let line = compose(&fields, Level::INFO, &Map::new(), true).unwrap();

        assert_eq!(
            line.styled,
            "\x1b[37m[10:30:45.000]\x1b[0m \x1b[36mINFO:\x1b[0m \x1b[97mInfo Level Log\x1b[0m"
        );
        assert_eq!(line.plain, "INFO: [10:30:45.000] Info Level Log");
    }

    #[test]
    fn test_compose_with_attrs() {
        let fields = Fields::from_record(&record(Level::ERROR, "boom"), None);
        let line = compose(&fields, Level::ERROR, &attrs(json!({"code": 500})), true).unwrap();

        assert!(line.styled.contains("\x1b[91mERROR:\x1b[0m"));
        assert!(line.styled.ends_with("\x1b[90m{\n  \"code\": 500\n}\x1b[0m"));
        assert!(line.plain.ends_with("boom {\n  \"code\": 500\n}"));
        assert!(!line.plain.contains('\x1b'));
    }

    #[test]
    fn test_compose_skips_suppressed_fields() {
        let fields = Fields {
            time: None,
            level: Some("DEBUG:".to_string()),
            message: None,
        };
        let line = compose(&fields, Level::DEBUG, &Map::new(), false).unwrap();
        assert_eq!(line.styled, "DEBUG:");
        assert_eq!(line.plain, "DEBUG:");

        let line = compose(&Fields::default(), Level::DEBUG, &Map::new(), true).unwrap();
        assert_eq!(line.styled, "");
        assert_eq!(line.plain, "");
    }

    #[test]
    fn test_compose_without_colors() {
        let fields = Fields::from_record(&record(Level::ERROR + 2, "bad"), None);
        let line = compose(&fields, Level::ERROR + 2, &Map::new(), false).unwrap();
        assert_eq!(line.styled, "[10:30:45.000] ERROR+2: bad");
    }
}
