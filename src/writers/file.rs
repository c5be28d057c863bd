//! Plain-text file writer

use crate::core::{Level, LoggerError, Message, OutputFormat, Result, TimestampFormat, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one text line per message to a file.
///
/// Each message is rendered into the buffer and flushed before `write`
/// returns, so I/O errors belong to the message that caused them.
pub struct FileWriter {
    level: Level,
    path: PathBuf,
    writer: BufWriter<File>,
    timestamp_format: TimestampFormat,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}' for append", path.display()),
                    err,
                )
            })?;

        Ok(Self {
            level: Level::default(),
            path,
            writer: BufWriter::new(file),
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// # Examples
    ///
    /// ```no_run
    /// use proxy_log::{FileWriter, TimestampFormat};
    ///
    /// let writer = FileWriter::new("/var/log/proxy/access.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Writer for FileWriter {
    fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    fn level(&self) -> Level {
        self.level
    }

    fn write(&mut self, message: &Message) -> Result<()> {
        if !self.enabled(message.level()) {
            return Ok(());
        }

        let line = OutputFormat::Text.format(message, &self.timestamp_format)?;
        // Flush per message: a sink error fails the write that caused it
        writeln!(self.writer, "{}", line)
            .and_then(|()| self.writer.flush())
            .map_err(|err| LoggerError::file_writer(self.path.display().to_string(), err.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
