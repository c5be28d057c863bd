//! Handler wiring from configuration
//!
//! ```json
//! {
//!   "log_level": "info",
//!   "writers": [
//!     { "type": "console", "colors": false, "format": "logfmt" },
//!     { "type": "json", "path": "/var/log/proxy/events.jsonl" },
//!     { "type": "file", "path": "/var/log/proxy/proxy.log" }
//!   ]
//! }
//! ```
//!
//! Every configured writer is attached with [`Handler::add_writer`], so each
//! one starts at `log_level`.

use crate::core::{Handler, Level, LoggerError, OutputFormat, Result, TimestampFormat, Writer};
use crate::writers::{ConsoleWriter, FileWriter, JsonWriter};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerConfig {
    #[serde(default)]
    pub log_level: Level,

    /// Empty means every message goes to the console fallback
    #[serde(default)]
    pub writers: Vec<WriterConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum WriterConfig {
    Console {
        #[serde(default = "default_colors")]
        colors: bool,
        #[serde(default)]
        format: OutputFormat,
        #[serde(default)]
        timestamp: TimestampFormat,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        timestamp: TimestampFormat,
    },
    Json {
        path: PathBuf,
        #[serde(default)]
        pretty: bool,
        #[serde(default)]
        timestamp: TimestampFormat,
    },
}

fn default_colors() -> bool {
    true
}

impl WriterConfig {
    pub fn build(&self) -> Result<Box<dyn Writer>> {
        let writer: Box<dyn Writer> = match self {
            WriterConfig::Console {
                colors,
                format,
                timestamp,
            } => {
                timestamp.validate()?;
                Box::new(
                    ConsoleWriter::with_colors(*colors)
                        .with_output_format(*format)
                        .with_timestamp_format(timestamp.clone()),
                )
            }
            WriterConfig::File { path, timestamp } => {
                Self::check_path("file writer", path)?;
                timestamp.validate()?;
                Box::new(FileWriter::new(path.clone())?.with_timestamp_format(timestamp.clone()))
            }
            WriterConfig::Json {
                path,
                pretty,
                timestamp,
            } => {
                Self::check_path("json writer", path)?;
                timestamp.validate()?;
                Box::new(
                    JsonWriter::file(path)?
                        .pretty(*pretty)
                        .with_timestamp_format(timestamp.clone()),
                )
            }
        };
        Ok(writer)
    }

    fn check_path(component: &str, path: &std::path::Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(LoggerError::config(component, "path must not be empty"));
        }
        Ok(())
    }
}

impl HandlerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|err| LoggerError::config("handler", err.to_string()))
    }

    /// Open every configured writer and attach it in order
    pub fn build(&self) -> Result<Handler> {
        let handler = Handler::new(self.log_level);
        for writer in &self.writers {
            handler.add_boxed_writer(writer.build()?);
        }
        Ok(handler)
    }
}
