//! Log level definitions
//!
//! Levels live on an open integer scale so callers can express severities
//! between and beyond the named ones (`Level::ERROR + 2`).

use colored::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i32);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    pub const fn new(value: i32) -> Self {
        Level(value)
    }

    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Named band this level belongs to, with the base it is measured from.
    fn band(&self) -> (&'static str, Level) {
        if *self < Level::INFO {
            ("DEBUG", Level::DEBUG)
        } else if *self < Level::WARN {
            ("INFO", Level::INFO)
        } else if *self < Level::ERROR {
            ("WARN", Level::WARN)
        } else {
            ("ERROR", Level::ERROR)
        }
    }

    /// Console color for this severity.
    ///
    /// Bands are checked low to high and the first match wins.
    pub fn color(&self) -> Color {
        if *self <= Level::DEBUG {
            Color::White
        } else if *self <= Level::INFO {
            Color::Cyan
        } else if *self < Level::WARN {
            Color::BrightBlue
        } else if *self < Level::ERROR {
            Color::Yellow
        } else if *self <= Level::ERROR + 1 {
            Color::BrightRed
        } else {
            Color::BrightMagenta
        }
    }
}

impl Add<i32> for Level {
    type Output = Level;

    fn add(self, rhs: i32) -> Level {
        Level(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = self.band();
        let offset = i64::from(self.0) - i64::from(base.0);
        if offset == 0 {
            f.write_str(name)
        } else {
            write!(f, "{}{:+}", name, offset)
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let split = upper.find(['+', '-']).unwrap_or(upper.len());
        let (name, offset) = upper.split_at(split);

        let base = match name {
            "DEBUG" => Level::DEBUG,
            "INFO" => Level::INFO,
            "WARN" | "WARNING" => Level::WARN,
            "ERROR" => Level::ERROR,
            _ => return Err(format!("Invalid log level: '{}'", s)),
        };

        if offset.is_empty() {
            return Ok(base);
        }
        let delta: i32 = offset
            .parse()
            .map_err(|_| format!("Invalid log level offset in '{}'", s))?;
        Ok(base + delta)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
