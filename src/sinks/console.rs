//! Console sink implementation

use parking_lot::Mutex;
use std::io::Write;

/// Line-oriented console output, standard output by default
pub struct ConsoleSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Write `line` followed by a newline. Write errors are ignored.
    pub fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}
