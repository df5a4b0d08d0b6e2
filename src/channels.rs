//! The four preset channels, created and addressed together

use crate::core::{ChannelControl, OutputChannel, Result, DEFAULT_MAX_MESSAGE_LEN};
use crate::presets::{LogPolicy, StdErrPolicy, StdOutPolicy, TracePolicy, DEFAULT_LOG_PATH};
use crate::tags::TagTable;
use std::fmt;
use std::path::PathBuf;

/// Log, Trace, StdOut and StdErr channels plus the tag table used to
/// resolve names aimed at them
///
/// # Example
/// ```no_run
/// use rust_spew_system::prelude::*;
/// use rust_spew_system::tags::category;
///
/// let channels = ChannelSet::builder()
///     .log_path("app.log")
///     .max_message_len(128)
///     .build()
///     .unwrap();
///
/// channels.stdout().emit_default(format_args!("ready\n")).unwrap();
/// channels.channel("trace").unwrap().add_filter(category::GFX);
/// ```
pub struct ChannelSet {
    log: OutputChannel<LogPolicy>,
    trace: OutputChannel<TracePolicy>,
    stdout: OutputChannel<StdOutPolicy>,
    stderr: OutputChannel<StdErrPolicy>,
    tags: TagTable,
}

impl ChannelSet {
    /// Default set: `log.txt`, 255-byte messages, standard tag table
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> ChannelSetBuilder {
        ChannelSetBuilder::new()
    }

    pub fn log(&self) -> &OutputChannel<LogPolicy> {
        &self.log
    }

    pub fn trace(&self) -> &OutputChannel<TracePolicy> {
        &self.trace
    }

    pub fn stdout(&self) -> &OutputChannel<StdOutPolicy> {
        &self.stdout
    }

    pub fn stderr(&self) -> &OutputChannel<StdErrPolicy> {
        &self.stderr
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    /// Every channel, in the order the command-line toggler tries them
    pub fn channels(&self) -> [&dyn ChannelControl; 4] {
        [&self.trace, &self.log, &self.stderr, &self.stdout]
    }

    /// Look a channel up by name, ignoring case
    pub fn channel(&self, name: &str) -> Option<&dyn ChannelControl> {
        self.channels()
            .into_iter()
            .find(|channel| channel.name().eq_ignore_ascii_case(name))
    }

    /// Restore every channel's default masks
    pub fn reset_to_defaults(&self) {
        for channel in self.channels() {
            channel.reset_to_defaults();
        }
    }
}

impl fmt::Debug for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelSet")
            .field("log", &self.log)
            .field("trace", &self.trace)
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .finish()
    }
}

/// Builder for [`ChannelSet`]
pub struct ChannelSetBuilder {
    log_path: PathBuf,
    max_message_len: usize,
    tags: TagTable,
}

impl ChannelSetBuilder {
    pub fn new() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            tags: TagTable::standard(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tags(mut self, tags: TagTable) -> Self {
        self.tags = tags;
        self
    }

    pub fn build(self) -> Result<ChannelSet> {
        let len = self.max_message_len;
        Ok(ChannelSet {
            log: OutputChannel::with_max_message_len(LogPolicy::with_path(self.log_path), len)?,
            trace: OutputChannel::with_max_message_len(TracePolicy::new(), len)?,
            stdout: OutputChannel::with_max_message_len(StdOutPolicy::new(), len)?,
            stderr: OutputChannel::with_max_message_len(StdErrPolicy::new(), len)?,
            tags: self.tags,
        })
    }
}

impl Default for ChannelSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
