//! File sink implementation
//!
//! A line logger bound to one append-only file. Every line is prefixed with
//! the local write time (microsecond precision) and the short `file:line`
//! of the call site.

use crate::core::{timestamp, LoggerError, Result, Source};
use chrono::Local;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};

pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, creating it with mode `0644` when missing
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }

        let file = options
            .open(&path)
            .map_err(|e| LoggerError::sink(path.display().to_string(), "opening", e))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line annotated with `site`, or with the caller's location
    /// when the record carries none.
    #[track_caller]
    pub fn write_line(&self, line: &str, site: Option<&Source>) -> Result<()> {
        let caller = Location::caller();
        let (file, line_no) = match site {
            Some(source) => (source.short_file().to_string(), source.line),
            None => (short_name(caller.file()).to_string(), caller.line()),
        };

        let mut output = format!(
            "{} {}:{}: {}",
            timestamp::format_file_prefix(&Local::now()),
            file,
            line_no,
            line
        );
        if !output.ends_with('\n') {
            output.push('\n');
        }

        let mut file = self.file.lock();
        file.write_all(output.as_bytes())
            .map_err(|e| LoggerError::sink(self.path.display().to_string(), "writing", e))
    }
}

fn short_name(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_creates_and_appends() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("logs.log");

        let sink = FileSink::open(&path)?;
        sink.write_line("INFO: first", None)?;
        drop(sink);

        let sink = FileSink::open(&path)?;
        sink.write_line("INFO: second", None)?;

        let content = fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" file.rs:"));
        assert!(lines[0].ends_with(": INFO: first"));
        assert!(lines[1].ends_with("INFO: second"));
        Ok(())
    }

    #[test]
    fn test_prefix_has_microseconds_and_site() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("logs.log");
        let sink = FileSink::open(&path)?;

        let site = Source::new("src/app/server.rs", 31, "app::server");
        sink.write_line("WARN: slow", Some(&site))?;

        let content = fs::read_to_string(&path)?;
        let line = content.lines().next().unwrap();
        // 2025/01/08 10:30:45.123456 server.rs:31: WARN: slow
        let (date, rest) = line.split_once(' ').unwrap();
        let (time, rest) = rest.split_once(' ').unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(time.len(), 15);
        assert_eq!(time.split_once('.').unwrap().1.len(), 6);
        assert_eq!(rest, "server.rs:31: WARN: slow");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let path = dir.path().join("logs.log");
        FileSink::open(&path)?;

        let mode = fs::metadata(&path)?.permissions().mode() & 0o777;
        // The process umask can only clear bits
        assert_eq!(mode & !0o644, 0);
        Ok(())
    }

    #[test]
    fn test_open_failure_is_sink_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("logs.log");

        match FileSink::open(&path) {
            Err(LoggerError::Sink { operation, .. }) => assert_eq!(operation, "opening"),
            other => panic!("expected sink error, got {:?}", other.map(|s| s.path().to_owned())),
        }
    }
}
