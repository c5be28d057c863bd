//! JSON lines writer for structured output

use crate::core::{Level, Message, OutputFormat, Result, TimestampFormat, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes each message as one JSON object per line (JSONL), the shape log
/// aggregators such as Loki or ELK ingest directly.
///
/// The destination is any `io::Write`; [`JsonWriter::file`] opens a file in
/// append mode.
pub struct JsonWriter<W: Write + Send + Sync = BufWriter<File>> {
    level: Level,
    writer: W,
    pretty: bool,
    timestamp_format: TimestampFormat,
}

impl JsonWriter<BufWriter<File>> {
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send + Sync> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            level: Level::default(),
            writer,
            pretty: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Multi-line output, for humans reading a local file
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> Writer for JsonWriter<W> {
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

        let value = OutputFormat::to_json_value(message, &self.timestamp_format)?;
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &value)?;
        } else {
            serde_json::to_writer(&mut self.writer, &value)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys;
    use std::fs;
    use std::io;
    use tempfile::tempdir;

    /// Accepts bytes but cannot persist them
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
    }

    #[test]
    fn test_json_lines_in_memory() -> Result<()> {
        let mut writer = JsonWriter::new(Vec::new());
        writer.set_level(Level::Info);

        writer.write(&Message::new(Level::Debug).with_summary("skipped"))?;
        for status in [200, 404] {
            let message = Message::new(Level::Info)
                .with_summary("served")
                .with_field(keys::HTTP_STATUS_CODE, status);
            writer.write(&message)?;
        }

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value = serde_json::from_str(lines[1])?;
        assert_eq!(second["http_status_code"], 404);
        assert_eq!(second["msg"], "served");
        assert_eq!(second["level"], "INFO");
        Ok(())
    }

    #[test]
    fn test_json_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("proxy.jsonl");

        let mut writer = JsonWriter::file(&path)?;
        writer.write(&Message::new(Level::Warning).with_dns_nxdomain())?;
        writer.flush()?;

        let content = fs::read_to_string(&path)?;
        let parsed: serde_json::Value = serde_json::from_str(content.trim())?;
        assert_eq!(parsed["dns_rcode"], "NXDOMAIN");
        Ok(())
    }

    #[test]
    fn test_flush_error_fails_write() {
        let mut writer = JsonWriter::new(BufWriter::new(FullDisk));

        let err = writer
            .write(&Message::new(Level::Info).with_summary("served"))
            .unwrap_err();
        assert!(err.to_string().contains("no space left on device"));
    }

    #[test]
    fn test_bad_custom_timestamp_fails_write() {
        let mut writer = JsonWriter::new(Vec::new())
            .with_timestamp_format(TimestampFormat::Custom("%Q".to_string()));

        assert!(writer.write(&Message::new(Level::Info)).is_err());
        assert!(writer.get_ref().is_empty());
    }
}
