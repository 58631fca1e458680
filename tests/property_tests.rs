//! Property-based tests for flarelog using proptest

use flarelog::handlers::render::{compose, Fields};
use flarelog::{Attr, FlareHandler, Handler, Level, Record};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::io::{self, Write};
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// Level Tests
// ============================================================================

fn expected_color(level: i32) -> colored::Color {
    use colored::Color::*;
    if level <= -4 {
        White
    } else if level <= 0 {
        Cyan
    } else if level < 4 {
        BrightBlue
    } else if level < 8 {
        Yellow
    } else if level <= 9 {
        BrightRed
    } else {
        BrightMagenta
    }
}

proptest! {
    /// The console color is a total function of the level
    #[test]
    fn test_color_band_is_total(value in -1000i32..1000) {
        prop_assert_eq!(Level::new(value).color(), expected_color(value));
    }

    /// Level names parse back to the same level
    #[test]
    fn test_level_name_roundtrip(value in -1000i32..1000) {
        let level = Level::new(value);
        let parsed: Level = level.to_string().parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    /// Level ordering follows the integer scale
    #[test]
    fn test_level_ordering(a in -100i32..100, b in -100i32..100) {
        prop_assert_eq!(Level::new(a) < Level::new(b), a < b);
        prop_assert_eq!(Level::new(a) + (b - a), Level::new(b));
    }
}

// ============================================================================
// Rendering Tests
// ============================================================================

fn optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-zA-Z0-9:\\[\\]. ]{1,16}")
}

proptest! {
    /// Suppressed fields never leave doubled or dangling separators
    #[test]
    fn test_no_stray_separators(
        time in optional_text(),
        level in optional_text(),
        message in optional_text(),
    ) {
        let trimmed = |s: Option<String>| s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty() && !s.contains("  "));
        let fields = Fields { time: trimmed(time), level: trimmed(level), message: trimmed(message) };
        let line = compose(&fields, Level::INFO, &serde_json::Map::new(), false).unwrap();

        for text in [&line.styled, &line.plain] {
            prop_assert!(!text.starts_with(' '));
            prop_assert!(!text.ends_with(' '));
            prop_assert!(!text.contains("  "));
        }
        let parts = [&fields.time, &fields.level, &fields.message].iter().filter(|f| f.is_some()).count();
        prop_assert_eq!(line.plain.len(), line.styled.len());
        if parts == 0 {
            prop_assert!(line.plain.is_empty());
        }
    }
}

// ============================================================================
// Handler Tests
// ============================================================================

#[derive(Clone, Default)]
struct Console(Arc<Mutex<Vec<u8>>>);

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn attr_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("time".to_string()),
        Just("level".to_string()),
        Just("msg".to_string()),
        "[a-z]{1,8}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The attribute blob never carries the well-known keys, at any depth
    #[test]
    fn test_blob_excludes_well_known_keys(
        top in prop::collection::vec((attr_key(), any::<i64>()), 0..6),
        nested in prop::collection::vec((attr_key(), "[0-9]{0,6}"), 0..4),
    ) {
        let dir = TempDir::new().unwrap();
        let console = Console::default();
        let handler = FlareHandler::builder()
            .file_path(dir.path().join("prop.log"))
            .console(console.clone())
            .use_colors(false)
            .build()
            .unwrap();

        let mut record = Record::new(Level::INFO, "prop");
        for (key, value) in &top {
            record = record.with_attr(Attr::new(key.as_str(), *value));
        }
        let members = nested.iter().map(|(k, v)| Attr::new(k.as_str(), v.as_str())).collect();
        record = record.with_attr(Attr::group("inner", members));
        handler.handle(&record).unwrap();

        let text = String::from_utf8(console.0.lock().clone()).unwrap();
        let file = std::fs::read_to_string(dir.path().join("prop.log")).unwrap();
        for output in [&text, &file] {
            for key in ["\"time\"", "\"level\"", "\"msg\""] {
                prop_assert!(!output.contains(key), "{} found in {:?}", key, output);
            }
        }
    }
}
