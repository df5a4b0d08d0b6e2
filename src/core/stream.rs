//! Chained message builder
//!
//! ```
//! use rust_spew_system::prelude::*;
//!
//! let channel = OutputChannel::new(EmptyPolicy::new("doc")).unwrap();
//! let memory = MemorySink::new("memory");
//! let sink = memory.shared();
//! channel.attach_sink(&sink);
//!
//! channel
//!     .stream(CategoryFilter::ALL, 1)
//!     .unwrap()
//!     .append("frame ")
//!     .append(42)
//!     .endl()
//!     .unwrap();
//! assert_eq!(memory.contents(), "frame 42\n");
//! assert_eq!(memory.write_count(), 1);
//! ```

use super::{
    channel::{ChannelPolicy, OutputChannel},
    error::Result,
    filter::CategoryFilter,
    level::LevelTag,
    message::BoundedMessage,
};
use std::fmt::{self, Write};

/// Fragments appended here reach the sinks as one write per logical message.
///
/// The masks are checked when each message starts: while they reject it,
/// appends are skipped entirely. They are checked again on flush, so a
/// long-lived stream follows filter changes. A stream dropped with pending
/// text flushes it.
pub struct MessageStream<'a, P: ChannelPolicy> {
    channel: &'a OutputChannel<P>,
    category: CategoryFilter,
    level: LevelTag,
    buffer: BoundedMessage,
    live: bool,
}

impl<'a, P: ChannelPolicy> MessageStream<'a, P> {
    pub(crate) fn new(channel: &'a OutputChannel<P>, category: CategoryFilter, level: LevelTag) -> Self {
        Self {
            channel,
            category,
            level,
            buffer: BoundedMessage::new(channel.max_message_len()),
            live: channel.would_emit(category, level),
        }
    }

    /// Whether appended text can reach a sink
    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn pending(&self) -> &str {
        self.buffer.as_str()
    }

    /// Append a value, consuming and returning the stream for chaining
    #[must_use = "the message is only written when the stream is ended or flushed"]
    pub fn append(mut self, value: impl fmt::Display) -> Self {
        self.push(value);
        self
    }

    /// Append a value in place
    pub fn push(&mut self, value: impl fmt::Display) -> &mut Self {
        if self.buffer.is_empty() {
            self.refresh();
        }
        if self.live {
            let _ = write!(self.buffer, "{}", value);
        }
        self
    }

    /// Write the pending text to the channel's sinks as one message.
    /// The stream stays usable for the next message.
    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            self.refresh();
            return Ok(());
        }
        let result = self
            .channel
            .emit_buffered(self.category, self.level, &self.buffer);
        self.buffer.clear();
        self.refresh();
        result
    }

    fn refresh(&mut self) {
        self.live = self.channel.would_emit(self.category, self.level);
    }

    /// Append a newline and flush, ending the stream
    pub fn endl(mut self) -> Result<()> {
        self.push('\n');
        self.flush()
    }
}

impl<P: ChannelPolicy> Write for MessageStream<'_, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push(s);
        Ok(())
    }
}

impl<P: ChannelPolicy> Drop for MessageStream<'_, P> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!(
                "[SPEW ERROR] Channel '{}' failed to flush a pending stream: {}",
                self.channel.name(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::fmt::Write;

    const GFX: CategoryFilter = CategoryFilter::from_bits(0x01);
    const SCRIPT: CategoryFilter = CategoryFilter::from_bits(0x02);

    fn setup() -> (OutputChannel<EmptyPolicy>, MemorySink, SharedSink) {
        let channel = OutputChannel::new(EmptyPolicy::new("stream")).unwrap();
        let memory = MemorySink::new("memory");
        let shared = memory.shared();
        channel.attach_sink(&shared);
        (channel, memory, shared)
    }

    #[test]
    fn test_chained_appends_are_one_write() {
        let (channel, memory, _keep) = setup();
        channel
            .stream(GFX, 1)
            .unwrap()
            .append("a")
            .append(1)
            .append('b')
            .endl()
            .unwrap();
        assert_eq!(memory.contents(), "a1b\n");
        assert_eq!(memory.write_count(), 1);
    }

    #[test]
    fn test_flush_marks_message_boundary() {
        let (channel, memory, _keep) = setup();
        let mut stream = channel.stream_default();
        stream.push("one");
        stream.flush().unwrap();
        write!(stream, "two {}", 2).unwrap();
        stream.flush().unwrap();
        assert_eq!(memory.writes(), vec!["one", "two 2"]);
    }

    #[test]
    fn test_suppressed_stream_buffers_nothing() {
        let (channel, memory, _keep) = setup();
        channel.set_filter(SCRIPT);
        let stream = channel.stream(GFX, 1).unwrap().append("hidden");
        assert!(!stream.is_live());
        assert_eq!(stream.pending(), "");
        stream.endl().unwrap();
        assert!(memory.is_empty());
    }

    #[test]
    fn test_drop_flushes_pending_text() {
        let (channel, memory, _keep) = setup();
        {
            let mut stream = channel.stream(GFX, 1).unwrap();
            stream.push("left over");
        }
        assert_eq!(memory.contents(), "left over");
    }

    #[test]
    fn test_masks_rechecked_on_flush() {
        let (channel, memory, _keep) = setup();
        let mut stream = channel.stream(GFX, 1).unwrap();
        stream.push("late");
        channel.set_filter(CategoryFilter::NONE);
        stream.flush().unwrap();
        assert!(memory.is_empty());
        assert_eq!(channel.metrics().suppressed(), 1);
    }

    #[test]
    fn test_stream_follows_filter_enable() {
        let (channel, memory, _keep) = setup();
        channel.set_filter(CategoryFilter::NONE);
        let mut stream = channel.stream(GFX, 1).unwrap();
        stream.push("first");
        stream.flush().unwrap();
        assert!(!stream.is_live());

        channel.set_filter(GFX);
        stream.push("second");
        stream.flush().unwrap();
        assert!(stream.is_live());
        assert_eq!(memory.contents(), "second");
    }
}
