//! Output formats shared by the bundled writers
//!
//! - Text: `[2025-01-08T10:30:45.123Z] [INFO   ] request served http_status_code=200`
//! - Json: one object per message, fields flattened next to `time` and `level`
//! - Logfmt: `time=... level=INFO msg="request served" http_status_code=200`

use super::error::Result;
use super::field::FieldValue;
use super::keys;
use super::message::{sanitize, Message};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Logfmt,
}

impl OutputFormat {
    /// Fails only when `timestamp_format` holds an unrenderable custom pattern
    pub fn format(&self, message: &Message, timestamp_format: &TimestampFormat) -> Result<String> {
        match self {
            OutputFormat::Text => Self::format_text(message, timestamp_format),
            OutputFormat::Json => {
                Ok(Self::to_json_value(message, timestamp_format)?.to_string())
            }
            OutputFormat::Logfmt => Self::format_logfmt(message, timestamp_format),
        }
    }

    fn format_text(message: &Message, timestamp_format: &TimestampFormat) -> Result<String> {
        let base = format!(
            "[{}] [{:7}] {}",
            timestamp_format.format(message.timestamp())?,
            message.level().to_str(),
            message.summary().unwrap_or("")
        );

        let fields = message.format_fields();
        if fields.is_empty() {
            Ok(base)
        } else {
            Ok(format!("{} {}", base, fields))
        }
    }

    /// Build the JSON object for a message
    ///
    /// `time` and `level` are written last so a field can never shadow them.
    pub fn to_json_value(
        message: &Message,
        timestamp_format: &TimestampFormat,
    ) -> Result<serde_json::Value> {
        let mut json_obj = serde_json::Map::new();

        for (key, value) in message.fields() {
            json_obj.insert(key.clone(), value.to_json_value());
        }
        if let Some(code) = message.exit_code() {
            json_obj.insert("exit_code".to_string(), code.into());
        }
        json_obj.insert(
            "time".to_string(),
            timestamp_format.to_json_value(message.timestamp())?,
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(message.level().to_str().to_string()),
        );

        Ok(serde_json::Value::Object(json_obj))
    }

    fn format_logfmt(message: &Message, timestamp_format: &TimestampFormat) -> Result<String> {
        let mut parts = vec![
            format!(
                "time={}",
                escape_logfmt_value(&timestamp_format.format(message.timestamp())?)
            ),
            format!("level={}", message.level().to_str()),
        ];

        if let Some(summary) = message.summary() {
            parts.push(format!("{}={}", keys::MESSAGE, quote_logfmt_value(summary)));
        }

        for (key, value) in message.fields() {
            if key == keys::MESSAGE {
                continue;
            }
            let formatted = match value {
                FieldValue::String(s) => escape_logfmt_value(s),
                FieldValue::Map(_) => quote_logfmt_value(&value.to_string()),
                other => other.to_string(),
            };
            parts.push(format!("{}={}", escape_logfmt_key(key), formatted));
        }

        Ok(parts.join(" "))
    }
}

fn escape_logfmt_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn escape_logfmt_value(value: &str) -> String {
    if value.is_empty() || value.contains([' ', '"', '=', '\\', '\n', '\r', '\t']) {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", sanitize(&escaped))
}
