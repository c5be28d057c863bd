//! Formatting macros for the level-named terminals.
//!
//! Each macro takes a [`Handler`](crate::Handler) or a
//! [`MessageBuilder`](crate::MessageBuilder) followed by `format!`-style
//! arguments and returns the dispatch [`Outcome`](crate::Outcome).
//!
//! ```
//! use proxy_log::prelude::*;
//! use proxy_log::{info, warning};
//!
//! let handler = Handler::with_fallback(Level::Debug, MemoryWriter::new());
//!
//! let port = 8053;
//! let _ = info!(handler, "dns listener on port {}", port);
//! let _ = warning!(handler.with_field("upstream", "9.9.9.9:53"), "slow upstream: {}ms", 740);
//! ```

/// Dispatch at an explicit level.
///
/// ```
/// # use proxy_log::prelude::*;
/// # let handler = Handler::with_fallback(Level::Debug, MemoryWriter::new());
/// use proxy_log::log;
/// let outcome = log!(handler, Level::Error, "upstream {} refused", "10.0.0.3");
/// assert_eq!(outcome, Outcome::Continue);
/// ```
#[macro_export]
macro_rules! log {
    ($target:expr, $level:expr, $($arg:tt)+) => {
        match $level {
            $crate::Level::Debug => $target.debug(format_args!($($arg)+)),
            $crate::Level::Info => $target.info(format_args!($($arg)+)),
            $crate::Level::Warning => $target.warning(format_args!($($arg)+)),
            $crate::Level::Error => $target.error(format_args!($($arg)+)),
            $crate::Level::Fatal => $target.fatal(format_args!($($arg)+)),
        }
    };
}

#[macro_export]
macro_rules! debug {
    ($target:expr, $($arg:tt)+) => {
        $target.debug(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($target:expr, $($arg:tt)+) => {
        $target.info(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warning {
    ($target:expr, $($arg:tt)+) => {
        $target.warning(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($target:expr, $($arg:tt)+) => {
        $target.error(format_args!($($arg)+))
    };
}

/// The returned `Outcome` is always `Terminate`; enforce it to exit.
#[macro_export]
macro_rules! fatal {
    ($target:expr, $($arg:tt)+) => {
        $target.fatal(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Handler, Level, Outcome};
    use crate::writers::MemoryWriter;

    fn handler() -> (Handler, MemoryWriter) {
        let memory = MemoryWriter::new();
        let handler = Handler::with_fallback(Level::Debug, memory.clone());
        (handler, memory)
    }

    #[test]
    fn test_level_macros() {
        let (handler, memory) = handler();

        assert_eq!(debug!(handler, "cache size {}", 10), Outcome::Continue);
        assert_eq!(info!(handler, "ready"), Outcome::Continue);
        assert_eq!(warning!(handler, "retry {} of {}", 1, 3), Outcome::Continue);
        assert_eq!(error!(handler, "code {}", 502), Outcome::Continue);
        assert_eq!(fatal!(handler, "gone"), Outcome::Terminate { code: 1 });

        let summaries: Vec<String> = memory
            .messages()
            .iter()
            .filter_map(|m| m.summary().map(String::from))
            .collect();
        assert_eq!(
            summaries,
            vec!["cache size 10", "ready", "retry 1 of 3", "code 502", "gone"]
        );
    }

    #[test]
    fn test_log_macro_on_builder() {
        let (handler, memory) = handler();

        let outcome = log!(
            handler.with_field("client", "192.0.2.1"),
            Level::Warning,
            "rate limited after {} requests",
            100
        );

        assert_eq!(outcome, Outcome::Continue);
        let messages = memory.messages();
        assert_eq!(messages[0].level(), Level::Warning);
        assert_eq!(messages[0].summary(), Some("rate limited after 100 requests"));
    }
}
