//! Writer implementations

pub mod console;
pub mod file;
pub mod json;
pub mod memory;

pub use console::ConsoleWriter;
pub use file::FileWriter;
pub use json::JsonWriter;
pub use memory::MemoryWriter;

pub use crate::core::Writer;
