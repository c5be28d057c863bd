//! Writer trait for log output destinations

use super::{error::Result, level::Level, message::Message};

/// A sink that renders or ships finished messages.
///
/// The handler hands every dispatched message to every writer; dropping
/// messages below [`Writer::level`] is the writer's own job. Returning an
/// error from [`Writer::write`] makes the handler escalate to a fatal exit.
pub trait Writer: Send + Sync {
    fn set_level(&mut self, level: Level);

    fn level(&self) -> Level;

    fn write(&mut self, message: &Message) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    fn name(&self) -> &str;

    #[inline]
    fn enabled(&self, level: Level) -> bool {
        level.enables(self.level())
    }
}
