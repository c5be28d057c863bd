//! In-memory capture writer

use crate::core::{Level, LoggerError, Message, Result, Writer};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug)]
struct Capture {
    level: Level,
    messages: Vec<Message>,
    write_calls: usize,
}

impl Default for Capture {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            messages: Vec::new(),
            write_calls: 0,
        }
    }
}

/// Keeps every emitted message in a shared buffer.
///
/// Clones share the buffer and the threshold, so a caller can keep one clone
/// and hand the other to a [`Handler`](crate::Handler). The threshold starts
/// at DEBUG until a handler stamps its own.
#[derive(Debug, Clone)]
pub struct MemoryWriter {
    name: String,
    capture: Arc<Mutex<Capture>>,
    fail_with: Option<String>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capture: Arc::new(Mutex::new(Capture::default())),
            fail_with: None,
        }
    }

    /// Make every `write` call fail with `reason` after counting it
    #[must_use]
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.fail_with = Some(reason.into());
        self
    }

    /// Messages at or above the threshold, in arrival order
    pub fn messages(&self) -> Vec<Message> {
        self.capture.lock().messages.clone()
    }

    /// Every `write` invocation, including those dropped by the threshold
    pub fn write_calls(&self) -> usize {
        self.capture.lock().write_calls
    }

    pub fn threshold(&self) -> Level {
        self.capture.lock().level
    }

    pub fn clear(&self) {
        let mut capture = self.capture.lock();
        capture.messages.clear();
        capture.write_calls = 0;
    }
}

impl Default for MemoryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for MemoryWriter {
    fn set_level(&mut self, level: Level) {
        self.capture.lock().level = level;
    }

    fn level(&self) -> Level {
        self.threshold()
    }

    fn write(&mut self, message: &Message) -> Result<()> {
        let mut capture = self.capture.lock();
        capture.write_calls += 1;

        if let Some(reason) = &self.fail_with {
            return Err(LoggerError::writer(reason.clone()));
        }
        if message.level().enables(capture.level) {
            capture.messages.push(message.clone());
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
