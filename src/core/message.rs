//! Message record

use super::dns::{DnsQuestion, DnsRecord};
use super::field::FieldValue;
use super::keys;
use super::level::Level;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use http::header::{self, HeaderMap, HeaderName};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// One log event: severity, structured fields and creation time.
///
/// Every `with_*` method consumes and returns the message so enrichment calls
/// compose left to right. A later call writing a key that is already present
/// replaces the earlier value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    level: Level,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
    fields: BTreeMap<String, FieldValue>,
}

impl Message {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            exit_code: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn summary(&self) -> Option<&str> {
        self.field(keys::MESSAGE).and_then(FieldValue::as_str)
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Process exit status for a FATAL message: the explicit code when positive, else 1
    pub fn effective_exit_code(&self) -> i32 {
        self.exit_code.filter(|code| *code > 0).unwrap_or(1)
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    /// Store the human-readable summary line
    #[must_use]
    pub fn with_summary(mut self, text: impl fmt::Display) -> Self {
        self.insert(keys::MESSAGE, sanitize(&text.to_string()));
        self
    }

    /// Record an error and raise the level to at least ERROR
    #[must_use]
    pub fn with_error<E>(mut self, err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.insert(keys::ERROR, sanitize(&err.to_string()));

        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        if !chain.is_empty() {
            self.insert(keys::ERROR_CHAIN, sanitize(&chain.join(": ")));
        }

        if self.level < Level::Error {
            self.level = Level::Error;
        }
        self
    }

    /// Only observable once the message is FATAL
    #[must_use]
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    #[must_use]
    pub fn with_request<B>(mut self, req: &http::Request<B>) -> Self {
        let uri = req.uri();
        self.insert(keys::HTTP_METHOD, req.method().as_str());
        self.insert(keys::HTTP_URL, uri.to_string());
        self.insert(keys::HTTP_PATH, uri.path());
        if let Some(query) = uri.query() {
            self.insert(keys::HTTP_QUERY, query);
        }

        let host = uri
            .authority()
            .map(|authority| authority.as_str())
            .or_else(|| header_str(req.headers(), header::HOST));
        if let Some(host) = host {
            self.insert(keys::HTTP_HOST, host);
        }

        self.insert(keys::HTTP_PROTO, format!("{:?}", req.version()));

        if let Some(addr) = req.extensions().get::<SocketAddr>() {
            self.insert(keys::HTTP_REMOTE_ADDR, addr.to_string());
        }
        if let Some(agent) = header_str(req.headers(), header::USER_AGENT) {
            self.insert(keys::HTTP_USER_AGENT, sanitize(agent));
        }
        if let Some(referer) = header_str(req.headers(), header::REFERER) {
            self.insert(keys::HTTP_REFERER, sanitize(referer));
        }
        if let Some(length) = content_length(req.headers()) {
            self.insert(keys::HTTP_REQUEST_LENGTH, length);
        }
        self
    }

    #[must_use]
    pub fn with_response<B>(mut self, res: &http::Response<B>) -> Self {
        let status = res.status();
        self.insert(keys::HTTP_STATUS_CODE, status.as_u16());
        self.insert(keys::HTTP_STATUS, status.to_string());
        self.insert(keys::HTTP_PROTO, format!("{:?}", res.version()));

        if let Some(content_type) = header_str(res.headers(), header::CONTENT_TYPE) {
            self.insert(keys::HTTP_CONTENT_TYPE, content_type);
        }
        if let Some(length) = content_length(res.headers()) {
            self.insert(keys::HTTP_RESPONSE_LENGTH, length);
        }
        self
    }

    #[must_use]
    pub fn with_dns_questions(mut self, questions: &[DnsQuestion]) -> Self {
        self.insert(keys::DNS_QUESTION_COUNT, questions.len());
        if let Some(first) = questions.first() {
            self.insert(keys::DNS_QUESTION_NAME, first.name.as_str());
            self.insert(keys::DNS_QUESTION_TYPE, first.record_type.to_string());

            let rendered = questions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.insert(keys::DNS_QUESTIONS, rendered);
        }
        self
    }

    #[must_use]
    pub fn with_dns_answer(mut self, name: &str, ttl: Duration, record: &DnsRecord) -> Self {
        self.insert(keys::DNS_ANSWER_NAME, name);
        self.insert(keys::DNS_ANSWER_TTL, ttl);
        self.insert(keys::DNS_ANSWER_TYPE, record.record_type().to_string());
        self.insert(keys::DNS_ANSWER_DATA, record.to_string());
        self
    }

    #[must_use]
    pub fn with_dns_nxdomain(mut self) -> Self {
        self.insert(keys::DNS_RCODE, "NXDOMAIN");
        self
    }

    /// Format fields other than the summary as key=value pairs, one line
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .filter(|(key, _)| key.as_str() != keys::MESSAGE)
            .map(|(key, value)| format!("{}={}", key, sanitize(&value.to_string())))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{:7}] {}",
            TimestampFormat::default()
                .format(&self.timestamp)
                .map_err(|_| fmt::Error)?,
            self.level.to_str(),
            self.summary().unwrap_or("")
        )?;

        let fields = self.format_fields();
        if !fields.is_empty() {
            write!(f, " {}", fields)?;
        }
        Ok(())
    }
}

/// Escape line breaks and tabs in text bound for a single-line rendering
pub(crate) fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    header_str(headers, header::CONTENT_LENGTH).and_then(|value| value.trim().parse().ok())
}
