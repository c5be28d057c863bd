//! # Proxy Log
//!
//! Structured logging facade for a network proxy.
//!
//! ## Features
//!
//! - **Fluent messages**: attach HTTP request/response, DNS question/answer and
//!   arbitrary fields before dispatch
//! - **Fan-out**: every attached writer receives each message, in order, and
//!   filters by its own threshold
//! - **Fatal escalation**: a failing writer or a FATAL message yields
//!   [`Outcome::Terminate`], which the application enforces at its entry point
//!
//! ```no_run
//! use proxy_log::prelude::*;
//!
//! let handler = Handler::new(Level::Info);
//! handler.add_writer(ConsoleWriter::new());
//!
//! handler.info("proxy starting").enforce();
//! handler.with_exit_code(2).fatal("no listeners configured").enforce();
//! ```

pub mod config;
pub mod core;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::config::{HandlerConfig, WriterConfig};
    pub use crate::core::{
        DnsClass, DnsQuestion, DnsRecord, FieldValue, Handler, HandlerBuilder, HandlerMetrics,
        Level, LoggerError, Message, MessageBuilder, Outcome, OutputFormat, RecordType, Result,
        TimestampFormat, Writer,
    };
    pub use crate::writers::{ConsoleWriter, FileWriter, JsonWriter, MemoryWriter};
}

pub use config::{HandlerConfig, WriterConfig};
pub use crate::core::{
    keys, DnsClass, DnsQuestion, DnsRecord, FieldValue, Handler, HandlerBuilder, HandlerMetrics,
    Level, LoggerError, Message, MessageBuilder, Outcome, OutputFormat, RecordType, Result,
    TimestampFormat, Writer,
};
pub use writers::{ConsoleWriter, FileWriter, JsonWriter, MemoryWriter};
