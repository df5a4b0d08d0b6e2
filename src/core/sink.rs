//! Sink trait for output destinations

use super::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// A destination that accepts rendered text.
///
/// Channels never own sinks; they hold [`WeakSink`] handles and write to
/// whichever of them are still alive.
pub trait Sink: Send {
    fn write(&mut self, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Owning handle to a sink, kept by whoever opened it
pub type SharedSink = Arc<Mutex<dyn Sink>>;

/// Non-owning handle held by a channel's registry
pub type WeakSink = std::sync::Weak<Mutex<dyn Sink>>;

/// Wrap a sink so it can be attached to channels
pub fn shared<S: Sink + 'static>(sink: S) -> SharedSink {
    Arc::new(Mutex::new(sink))
}
