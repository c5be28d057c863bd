//! Console writer implementation

use crate::core::{Level, Message, OutputFormat, Result, TimestampFormat, Writer};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write as _;

/// Human-oriented writer for stdout/stderr, also the default fallback.
///
/// ERROR and FATAL go to stderr, everything else to stdout.
pub struct ConsoleWriter {
    level: Level,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            level: Level::default(),
            use_colors,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    /// # Example
    ///
    /// ```
    /// use proxy_log::{ConsoleWriter, OutputFormat};
    ///
    /// let writer = ConsoleWriter::new().with_output_format(OutputFormat::Logfmt);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn render(&self, message: &Message) -> Result<String> {
        match self.output_format {
            OutputFormat::Text if self.use_colors => self.format_colored(message),
            format => format.format(message, &self.timestamp_format),
        }
    }

    #[cfg(feature = "console")]
    fn format_colored(&self, message: &Message) -> Result<String> {
        let level = format!("{:7}", message.level().to_str()).color(message.level().color_code());
        let base = format!(
            "[{}] [{}] {}",
            self.timestamp_format.format(message.timestamp())?,
            level,
            message.summary().unwrap_or("")
        );

        let fields = message.format_fields();
        if fields.is_empty() {
            Ok(base)
        } else {
            Ok(format!("{} {}", base, fields))
        }
    }

    #[cfg(not(feature = "console"))]
    fn format_colored(&self, message: &Message) -> Result<String> {
        OutputFormat::Text.format(message, &self.timestamp_format)
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for ConsoleWriter {
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

        let output = self.render(message)?;
        match message.level() {
            Level::Error | Level::Fatal => writeln!(std::io::stderr().lock(), "{}", output)?,
            _ => writeln!(std::io::stdout().lock(), "{}", output)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render() {
        let writer = ConsoleWriter::with_colors(false);
        let message = Message::new(Level::Info)
            .with_summary("listening")
            .with_field("addr", "0.0.0.0:8080");

        let output = writer.render(&message).unwrap();
        assert!(output.contains("[INFO   ] listening addr=0.0.0.0:8080"));
    }

    #[test]
    fn test_json_render() {
        let writer = ConsoleWriter::new().with_output_format(OutputFormat::Json);
        let output = writer
            .render(&Message::new(Level::Error).with_summary("boom"))
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["level"], "ERROR");
    }

    #[test]
    fn test_below_threshold_is_ok() {
        let mut writer = ConsoleWriter::with_colors(false);
        writer.set_level(Level::Fatal);
        assert!(writer.write(&Message::new(Level::Debug)).is_ok());
        assert!(!writer.enabled(Level::Error));
    }

    #[test]
    fn test_bad_custom_timestamp_fails_write() {
        let mut writer = ConsoleWriter::with_colors(false)
            .with_timestamp_format(TimestampFormat::Custom("%Q".to_string()));
        writer.set_level(Level::Debug);

        assert!(writer.write(&Message::new(Level::Info)).is_err());
    }
}
