//! Fluent message construction bound to a handler
//!
//! A [`MessageBuilder`] starts from a [`Handler`] factory call, collects
//! enrichment calls, and ends in a terminal that dispatches through the same
//! handler. Terminals take the builder by value, so a message is dispatched at
//! most once.

use super::dns::{DnsQuestion, DnsRecord};
use super::field::FieldValue;
use super::handler::Handler;
use super::level::Level;
use super::message::Message;
use super::outcome::Outcome;
use std::fmt;
use std::time::Duration;

/// # Example
///
/// ```
/// use proxy_log::prelude::*;
/// use std::time::Duration;
///
/// let memory = MemoryWriter::new();
/// let handler = Handler::with_fallback(Level::Debug, memory.clone());
///
/// let record = DnsRecord::A("192.0.2.10".parse().unwrap());
/// let outcome = handler
///     .with_dns_questions(&[DnsQuestion::new("api.internal.", RecordType::A)])
///     .with_dns_answer("api.internal.", Duration::from_secs(30), &record)
///     .debug("answered from cache");
///
/// assert_eq!(outcome, Outcome::Continue);
/// assert_eq!(memory.messages()[0].summary(), Some("answered from cache"));
/// ```
#[must_use = "a message is only logged once a terminal such as `info` or `send` is called"]
pub struct MessageBuilder<'h> {
    handler: &'h Handler,
    message: Message,
}

impl<'h> MessageBuilder<'h> {
    pub fn new(handler: &'h Handler) -> Self {
        Self {
            handler,
            message: Message::default(),
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.message = self.message.with_level(level);
        self
    }

    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.message.insert(key, value);
        self
    }

    pub fn with_error<E>(mut self, err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.message = self.message.with_error(err);
        self
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.message = self.message.with_exit_code(code);
        self
    }

    pub fn with_request<B>(mut self, req: &http::Request<B>) -> Self {
        self.message = self.message.with_request(req);
        self
    }

    pub fn with_response<B>(mut self, res: &http::Response<B>) -> Self {
        self.message = self.message.with_response(res);
        self
    }

    pub fn with_dns_questions(mut self, questions: &[DnsQuestion]) -> Self {
        self.message = self.message.with_dns_questions(questions);
        self
    }

    pub fn with_dns_answer(mut self, name: &str, ttl: Duration, record: &DnsRecord) -> Self {
        self.message = self.message.with_dns_answer(name, ttl, record);
        self
    }

    pub fn with_dns_nxdomain(mut self) -> Self {
        self.message = self.message.with_dns_nxdomain();
        self
    }

    /// Dispatch at the message's current level
    pub fn send(self) -> Outcome {
        self.handler.dispatch(self.message)
    }

    fn finish(mut self, level: Level, text: impl fmt::Display) -> Outcome {
        self.message = self.message.with_level(level).with_summary(text);
        self.send()
    }

    pub fn debug(self, text: impl fmt::Display) -> Outcome {
        self.finish(Level::Debug, text)
    }

    pub fn info(self, text: impl fmt::Display) -> Outcome {
        self.finish(Level::Info, text)
    }

    pub fn warning(self, text: impl fmt::Display) -> Outcome {
        self.finish(Level::Warning, text)
    }

    pub fn error(self, text: impl fmt::Display) -> Outcome {
        self.finish(Level::Error, text)
    }

    pub fn fatal(self, text: impl fmt::Display) -> Outcome {
        self.finish(Level::Fatal, text)
    }
}

impl fmt::Debug for MessageBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuilder")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
