//! Core types: levels, messages, the writer trait and the handler

pub mod builder;
pub mod dns;
pub mod error;
pub mod field;
pub mod handler;
pub mod keys;
pub mod level;
pub mod message;
pub mod metrics;
pub mod outcome;
pub mod output_format;
pub mod timestamp;
pub mod writer;

pub use builder::MessageBuilder;
pub use dns::{DnsClass, DnsQuestion, DnsRecord, RecordType};
pub use error::{LoggerError, Result};
pub use field::FieldValue;
pub use handler::{Handler, HandlerBuilder};
pub use level::Level;
pub use message::Message;
pub use metrics::HandlerMetrics;
pub use outcome::Outcome;
pub use output_format::OutputFormat;
pub use timestamp::TimestampFormat;
pub use writer::Writer;
