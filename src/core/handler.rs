//! Handler: writer fan-out and fatal escalation

use super::{
    builder::MessageBuilder,
    dns::{DnsQuestion, DnsRecord},
    error::{LoggerError, Result},
    field::FieldValue,
    keys,
    level::Level,
    message::Message,
    metrics::HandlerMetrics,
    outcome::Outcome,
    writer::Writer,
};
use crate::writers::ConsoleWriter;
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::fmt;
use std::time::Duration;

/// Entry point call sites use to start and dispatch messages.
///
/// Writers receive every message in registration order. When no writer is
/// attached, the fallback writer given at construction receives it instead.
/// Writers run under the handler's lock, so a writer must not log through the
/// handler that owns it.
///
/// # Example
///
/// ```
/// use proxy_log::prelude::*;
///
/// let handler = Handler::new(Level::Info);
/// handler.add_writer(ConsoleWriter::with_colors(false));
///
/// let outcome = handler
///     .with_field("upstream", "10.0.0.2:53")
///     .info(format_args!("forwarded {} questions", 2));
/// assert_eq!(outcome, Outcome::Continue);
/// ```
pub struct Handler {
    level: RwLock<Level>,
    writers: RwLock<Vec<Box<dyn Writer>>>,
    fallback: Mutex<Box<dyn Writer>>,
    metrics: HandlerMetrics,
}

impl Handler {
    /// Handler whose fallback is a console writer emitting every level
    #[must_use]
    pub fn new(level: Level) -> Self {
        let mut fallback = ConsoleWriter::new();
        fallback.set_level(Level::Debug);
        Self::with_boxed_fallback(level, Box::new(fallback))
    }

    /// Handler with an explicit fallback writer, kept at its own threshold
    #[must_use]
    pub fn with_fallback<W: Writer + 'static>(level: Level, fallback: W) -> Self {
        Self::with_boxed_fallback(level, Box::new(fallback))
    }

    #[must_use]
    pub fn with_boxed_fallback(level: Level, fallback: Box<dyn Writer>) -> Self {
        Self {
            level: RwLock::new(level),
            writers: RwLock::new(Vec::new()),
            fallback: Mutex::new(fallback),
            metrics: HandlerMetrics::new(),
        }
    }

    #[must_use]
    pub fn builder() -> HandlerBuilder {
        HandlerBuilder::new()
    }

    /// Level stamped on writers as they are attached
    pub fn level(&self) -> Level {
        *self.level.read()
    }

    /// Changes the default for writers attached later; attached writers keep theirs
    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    /// Replace every attached writer with `writer`
    pub fn set_writer<W: Writer + 'static>(&self, writer: W) {
        self.set_boxed_writer(Box::new(writer));
    }

    pub fn set_boxed_writer(&self, mut writer: Box<dyn Writer>) {
        writer.set_level(self.level());
        *self.writers.write() = vec![writer];
    }

    /// Append `writer` after the ones already attached; duplicates are not detected
    pub fn add_writer<W: Writer + 'static>(&self, writer: W) {
        self.add_boxed_writer(Box::new(writer));
    }

    pub fn add_boxed_writer(&self, mut writer: Box<dyn Writer>) {
        writer.set_level(self.level());
        self.writers.write().push(writer);
    }

    pub fn writer_count(&self) -> usize {
        self.writers.read().len()
    }

    /// Names of the attached writers in registration order
    pub fn writer_names(&self) -> Vec<String> {
        self.writers
            .read()
            .iter()
            .map(|writer| writer.name().to_string())
            .collect()
    }

    pub fn metrics(&self) -> &HandlerMetrics {
        &self.metrics
    }

    pub fn new_message(&self) -> MessageBuilder<'_> {
        MessageBuilder::new(self)
    }

    pub fn with_level(&self, level: Level) -> MessageBuilder<'_> {
        self.new_message().with_level(level)
    }

    pub fn with_exit_code(&self, code: i32) -> MessageBuilder<'_> {
        self.new_message().with_exit_code(code)
    }

    pub fn with_error<E>(&self, err: &E) -> MessageBuilder<'_>
    where
        E: std::error::Error + ?Sized,
    {
        self.new_message().with_error(err)
    }

    pub fn with_field<K, V>(&self, key: K, value: V) -> MessageBuilder<'_>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.new_message().with_field(key, value)
    }

    pub fn with_request<B>(&self, req: &http::Request<B>) -> MessageBuilder<'_> {
        self.new_message().with_request(req)
    }

    pub fn with_response<B>(&self, res: &http::Response<B>) -> MessageBuilder<'_> {
        self.new_message().with_response(res)
    }

    pub fn with_dns_questions(&self, questions: &[DnsQuestion]) -> MessageBuilder<'_> {
        self.new_message().with_dns_questions(questions)
    }

    pub fn with_dns_answer(
        &self,
        name: &str,
        ttl: Duration,
        record: &DnsRecord,
    ) -> MessageBuilder<'_> {
        self.new_message().with_dns_answer(name, ttl, record)
    }

    pub fn with_dns_nxdomain(&self) -> MessageBuilder<'_> {
        self.new_message().with_dns_nxdomain()
    }

    #[inline]
    pub fn debug(&self, text: impl fmt::Display) -> Outcome {
        self.new_message().debug(text)
    }

    #[inline]
    pub fn info(&self, text: impl fmt::Display) -> Outcome {
        self.new_message().info(text)
    }

    #[inline]
    pub fn warning(&self, text: impl fmt::Display) -> Outcome {
        self.new_message().warning(text)
    }

    #[inline]
    pub fn error(&self, text: impl fmt::Display) -> Outcome {
        self.new_message().error(text)
    }

    #[inline]
    pub fn fatal(&self, text: impl fmt::Display) -> Outcome {
        self.new_message().fatal(text)
    }

    /// Hand `message` to every writer in order.
    ///
    /// The first writer failure stops the fan-out: a FATAL diagnostic naming
    /// the writer is printed to stderr and the outcome is `Terminate { code: 1 }`.
    /// A FATAL message that reached every writer flushes them and yields its
    /// effective exit code; a flush failure there counts as a writer failure.
    pub fn dispatch(&self, message: Message) -> Outcome {
        self.metrics.record_dispatched();

        let mut writers = self.writers.write();
        let mut fallback: MutexGuard<'_, Box<dyn Writer>>;
        let targets: &mut [Box<dyn Writer>] = if writers.is_empty() {
            self.metrics.record_fallback();
            fallback = self.fallback.lock();
            std::slice::from_mut(&mut *fallback)
        } else {
            writers.as_mut_slice()
        };

        for writer in targets.iter_mut() {
            if let Err(err) = writer.write(&message) {
                return self.escalate(writer.name(), &err);
            }
        }

        if message.level() == Level::Fatal {
            for writer in targets.iter_mut() {
                if let Err(err) = writer.flush() {
                    return self.escalate(writer.name(), &err);
                }
            }
            self.metrics.record_termination();
            return Outcome::Terminate {
                code: message.effective_exit_code(),
            };
        }

        Outcome::Continue
    }

    fn escalate(&self, writer_name: &str, err: &LoggerError) -> Outcome {
        self.metrics.record_writer_failure();
        self.metrics.record_termination();

        let diagnostic = Message::new(Level::Fatal)
            .with_summary("log writer failed")
            .with_error(err)
            .with_field(keys::WRITER, writer_name);
        eprintln!("{}", diagnostic);

        Outcome::Terminate { code: 1 }
    }

    /// Flush attached writers and the fallback, stopping at the first error
    pub fn flush(&self) -> Result<()> {
        for writer in self.writers.write().iter_mut() {
            writer.flush()?;
        }
        self.fallback.lock().flush()
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("level", &self.level())
            .field("writers", &self.writer_names())
            .field("fallback", &self.fallback.lock().name())
            .finish()
    }
}

/// Builder for constructing a [`Handler`]
///
/// # Example
/// ```
/// use proxy_log::prelude::*;
///
/// let memory = MemoryWriter::new();
/// let handler = Handler::builder()
///     .level(Level::Warning)
///     .writer(memory.clone())
///     .fallback(ConsoleWriter::with_colors(false))
///     .build();
///
/// assert_eq!(handler.writer_count(), 1);
/// let _ = handler.info("below the writer threshold");
/// assert!(memory.messages().is_empty());
/// ```
pub struct HandlerBuilder {
    level: Level,
    writers: Vec<Box<dyn Writer>>,
    fallback: Option<Box<dyn Writer>>,
}

impl HandlerBuilder {
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            writers: Vec::new(),
            fallback: None,
        }
    }

    /// Default level stamped on every writer added through this builder
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Writer + 'static>(mut self, writer: W) -> Self {
        self.writers.push(Box::new(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_writer(mut self, writer: Box<dyn Writer>) -> Self {
        self.writers.push(writer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fallback<W: Writer + 'static>(mut self, writer: W) -> Self {
        self.fallback = Some(Box::new(writer));
        self
    }

    pub fn build(self) -> Handler {
        let handler = match self.fallback {
            Some(fallback) => Handler::with_boxed_fallback(self.level, fallback),
            None => Handler::new(self.level),
        };

        for writer in self.writers {
            handler.add_boxed_writer(writer);
        }

        handler
    }
}

impl Default for HandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::MemoryWriter;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FailingWriter {
        level: Level,
        calls: Arc<AtomicUsize>,
    }

    impl Writer for FailingWriter {
        fn set_level(&mut self, level: Level) {
            self.level = level;
        }

        fn level(&self) -> Level {
            self.level
        }

        fn write(&mut self, _message: &Message) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LoggerError::writer("disk full"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Accepts every message but cannot persist them
    struct UnflushableWriter {
        level: Level,
        flushes: Arc<AtomicUsize>,
    }

    impl Writer for UnflushableWriter {
        fn set_level(&mut self, level: Level) {
            self.level = level;
        }

        fn level(&self) -> Level {
            self.level
        }

        fn write(&mut self, _message: &Message) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Err(LoggerError::writer("no space left on device"))
        }

        fn name(&self) -> &str {
            "unflushable"
        }
    }

    #[test]
    fn test_attach_stamps_level() {
        let handler = Handler::new(Level::Error);
        let memory = MemoryWriter::new();
        handler.add_writer(memory.clone());

        let _ = handler.warning("dropped by threshold");
        let _ = handler.error("kept");

        let messages = memory.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].summary(), Some("kept"));
    }

    #[test]
    fn test_set_level_not_retroactive() {
        let handler = Handler::new(Level::Debug);
        let early = MemoryWriter::new();
        handler.add_writer(early.clone());

        handler.set_level(Level::Error);
        let late = MemoryWriter::new();
        handler.add_writer(late.clone());

        let _ = handler.info("hello");

        assert_eq!(early.messages().len(), 1);
        assert!(late.messages().is_empty());
        assert_eq!(late.threshold(), Level::Error);
    }

    #[test]
    fn test_set_writer_replaces() {
        let handler = Handler::new(Level::Info);
        handler.set_writer(MemoryWriter::named("first"));
        handler.add_writer(MemoryWriter::named("second"));
        assert_eq!(handler.writer_names(), vec!["first", "second"]);

        handler.set_writer(MemoryWriter::named("third"));
        assert_eq!(handler.writer_names(), vec!["third"]);
    }

    #[test]
    fn test_fallback_when_empty() {
        let fallback = MemoryWriter::new();
        let handler = Handler::with_fallback(Level::Info, fallback.clone());

        let outcome = handler.info("no writers yet");

        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(fallback.messages().len(), 1);
        assert_eq!(handler.metrics().fallback_used(), 1);

        handler.add_writer(MemoryWriter::new());
        let _ = handler.info("now attached");
        assert_eq!(fallback.messages().len(), 1);
    }

    #[test]
    fn test_fatal_outcome() {
        let handler = Handler::with_fallback(Level::Info, MemoryWriter::new());

        assert_eq!(handler.fatal("bye"), Outcome::Terminate { code: 1 });
        assert_eq!(
            handler.with_exit_code(7).fatal("bye"),
            Outcome::Terminate { code: 7 }
        );
        assert_eq!(handler.metrics().terminations(), 2);
    }

    #[test]
    fn test_writer_failure_stops_fan_out() {
        let failing_calls = Arc::new(AtomicUsize::new(0));
        let after = MemoryWriter::new();

        let handler = Handler::with_fallback(Level::Debug, MemoryWriter::new());
        handler.add_writer(FailingWriter {
            level: Level::Debug,
            calls: Arc::clone(&failing_calls),
        });
        handler.add_writer(after.clone());

        let outcome = handler.debug("routine");

        assert_eq!(outcome, Outcome::Terminate { code: 1 });
        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert!(after.messages().is_empty());
        assert_eq!(after.write_calls(), 0);
        assert_eq!(handler.metrics().writer_failures(), 1);
    }

    #[test]
    fn test_failure_overrides_exit_code() {
        let handler = Handler::with_fallback(Level::Debug, MemoryWriter::new());
        handler.set_writer(FailingWriter {
            level: Level::Debug,
            calls: Arc::new(AtomicUsize::new(0)),
        });

        let outcome = handler.with_exit_code(9).fatal("shutting down");
        assert_eq!(outcome, Outcome::Terminate { code: 1 });
    }

    #[test]
    fn test_fatal_flushes_every_writer() {
        let handler = Handler::with_fallback(Level::Debug, MemoryWriter::new());
        let first = MemoryWriter::named("first");
        let second = MemoryWriter::named("second");
        handler.add_writer(first.clone());
        handler.add_writer(second.clone());

        let outcome = handler.with_exit_code(4).fatal("listener lost");

        assert_eq!(outcome, Outcome::Terminate { code: 4 });
        assert_eq!(first.messages().len(), 1);
        assert_eq!(second.messages().len(), 1);
        assert_eq!(handler.metrics().writer_failures(), 0);
    }

    #[test]
    fn test_fatal_flush_failure_escalates() {
        let flushes = Arc::new(AtomicUsize::new(0));
        let later = MemoryWriter::new();
        let handler = Handler::with_fallback(Level::Debug, MemoryWriter::new());
        handler.add_writer(UnflushableWriter {
            level: Level::Debug,
            flushes: Arc::clone(&flushes),
        });
        handler.add_writer(later.clone());

        let outcome = handler.with_exit_code(4).fatal("listener lost");

        assert_eq!(outcome, Outcome::Terminate { code: 1 });
        assert_eq!(flushes.load(Ordering::SeqCst), 1);
        assert_eq!(later.messages().len(), 1, "write fan-out completed before flushing");
        assert_eq!(handler.metrics().writer_failures(), 1);
        assert_eq!(handler.metrics().terminations(), 1);
    }

    #[test]
    fn test_non_fatal_skips_flush() {
        let flushes = Arc::new(AtomicUsize::new(0));
        let handler = Handler::with_fallback(Level::Debug, MemoryWriter::new());
        handler.add_writer(UnflushableWriter {
            level: Level::Debug,
            flushes: Arc::clone(&flushes),
        });

        assert_eq!(handler.error("upstream reset"), Outcome::Continue);
        assert_eq!(flushes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_builder() {
        let memory = MemoryWriter::new();
        let handler = Handler::builder()
            .level(Level::Debug)
            .writer(memory.clone())
            .fallback(MemoryWriter::new())
            .build();

        assert_eq!(handler.level(), Level::Debug);
        assert_eq!(memory.threshold(), Level::Debug);

        let _ = handler.debug("visible");
        assert_eq!(memory.messages().len(), 1);
    }

    #[test]
    fn test_handler_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Handler>();
    }
}
