//! Dispatch counters for a handler
//!
//! Tracks how many messages went through fan-out, how often the fallback
//! writer was used, and how often dispatch asked the process to terminate.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use proxy_log::HandlerMetrics;
///
/// let metrics = HandlerMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_writer_failure();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.writer_failures(), 1);
/// ```
#[derive(Debug)]
pub struct HandlerMetrics {
    dispatched: AtomicU64,

    /// Messages routed to the fallback writer because no writer was attached
    fallback_used: AtomicU64,

    writer_failures: AtomicU64,

    /// Dispatches that returned `Outcome::Terminate`
    terminations: AtomicU64,
}

impl HandlerMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            fallback_used: AtomicU64::new(0),
            writer_failures: AtomicU64::new(0),
            terminations: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fallback_used(&self) -> u64 {
        self.fallback_used.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn writer_failures(&self) -> u64 {
        self.writer_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn terminations(&self) -> u64 {
        self.terminations.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fallback(&self) -> u64 {
        self.fallback_used.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_writer_failure(&self) -> u64 {
        self.writer_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_termination(&self) -> u64 {
        self.terminations.fetch_add(1, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.fallback_used.store(0, Ordering::Relaxed);
        self.writer_failures.store(0, Ordering::Relaxed);
        self.terminations.store(0, Ordering::Relaxed);
    }
}

impl Default for HandlerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HandlerMetrics {
    /// Snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            fallback_used: AtomicU64::new(self.fallback_used()),
            writer_failures: AtomicU64::new(self.writer_failures()),
            terminations: AtomicU64::new(self.terminations()),
        }
    }
}
