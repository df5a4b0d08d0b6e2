//! Output channel implementation
//!
//! An [`OutputChannel`] joins a pair of masks, a sink registry and a
//! formatting front end. Each call decides once whether the message passes;
//! only then is it rendered and written to every sink.
//!
//! Channels whose policy is not marked [`ChannelPolicy::INCLUDE_IN_RELEASE`]
//! are compiled out of release builds: [`OutputChannel::ACTIVE`] is a
//! constant, so every entry point reduces to an empty body.

use super::{
    error::Result,
    filter::CategoryFilter,
    level::{IntoLevelSelection, IntoLevelTag, LevelSelection, LevelTag},
    message::{BoundedMessage, DEFAULT_MAX_MESSAGE_LEN},
    metrics::ChannelMetrics,
    predicate::Masks,
    registry::SinkRegistry,
    sink::SharedSink,
    stream::MessageStream,
};
use parking_lot::RwLock;
use std::fmt;

/// Supplies a channel's defaults.
///
/// `open_sinks` runs once at construction; the policy keeps ownership of
/// whatever it opens, so the channel never closes a sink it was handed.
/// `default_masks` is reapplied by [`OutputChannel::reset_to_defaults`].
pub trait ChannelPolicy: Send + Sync + 'static {
    /// Keep this channel in release builds
    const INCLUDE_IN_RELEASE: bool = false;

    fn name(&self) -> &str;

    fn default_masks(&self) -> Masks;

    fn open_sinks(&mut self) -> Result<Vec<SharedSink>> {
        Ok(Vec::new())
    }
}

pub struct OutputChannel<P: ChannelPolicy> {
    policy: P,
    masks: RwLock<Masks>,
    sinks: RwLock<SinkRegistry>,
    max_message_len: usize,
    metrics: ChannelMetrics,
}

impl<P: ChannelPolicy> OutputChannel<P> {
    /// Whether this channel exists in the current build
    pub const ACTIVE: bool =
        P::INCLUDE_IN_RELEASE || cfg!(debug_assertions) || cfg!(feature = "release-trace");

    pub fn new(policy: P) -> Result<Self> {
        Self::with_max_message_len(policy, DEFAULT_MAX_MESSAGE_LEN)
    }

    pub fn with_max_message_len(mut policy: P, max_message_len: usize) -> Result<Self> {
        let mut registry = SinkRegistry::new();
        if Self::ACTIVE {
            for sink in policy.open_sinks()? {
                registry.attach(&sink);
            }
        }

        Ok(Self {
            masks: RwLock::new(policy.default_masks()),
            policy,
            sinks: RwLock::new(registry),
            max_message_len,
            metrics: ChannelMetrics::new(),
        })
    }

    /// Builder for channels that need non-default settings
    ///
    /// # Example
    /// ```
    /// use rust_spew_system::prelude::*;
    ///
    /// let channel = OutputChannel::builder(EmptyPolicy::new("Custom"))
    ///     .max_message_len(64)
    ///     .filter(CategoryFilter::from_bits(0x3))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(channel.max_message_len(), 64);
    /// ```
    #[must_use]
    pub fn builder(policy: P) -> ChannelBuilder<P> {
        ChannelBuilder::new(policy)
    }

    /// Same as [`Self::ACTIVE`], callable through a reference
    #[inline(always)]
    pub const fn is_compiled_in(&self) -> bool {
        Self::ACTIVE
    }

    pub fn name(&self) -> &str {
        self.policy.name()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn max_message_len(&self) -> usize {
        self.max_message_len
    }

    pub fn metrics(&self) -> &ChannelMetrics {
        &self.metrics
    }

    pub fn masks(&self) -> Masks {
        *self.masks.read()
    }

    pub fn filter(&self) -> CategoryFilter {
        self.masks.read().filter
    }

    pub fn level(&self) -> LevelSelection {
        self.masks.read().level
    }

    pub fn set_filter(&self, filter: impl Into<CategoryFilter>) {
        if Self::ACTIVE {
            self.masks.write().filter = filter.into();
        }
    }

    pub fn add_filter(&self, filter: impl Into<CategoryFilter>) {
        if Self::ACTIVE {
            self.masks.write().filter |= filter.into();
        }
    }

    pub fn remove_filter(&self, filter: impl Into<CategoryFilter>) {
        if Self::ACTIVE {
            let mut masks = self.masks.write();
            masks.filter = masks.filter.without(filter.into());
        }
    }

    /// Set the level selection. Raw integers mean "this level and lower"
    /// and must be in `1..=5`.
    pub fn set_level(&self, level: impl IntoLevelSelection) -> Result<()> {
        if Self::ACTIVE {
            let level = level.into_level_selection()?;
            self.masks.write().level = level;
        }
        Ok(())
    }

    /// Reapply the policy's default filter and level. Sinks are untouched.
    pub fn reset_to_defaults(&self) {
        if Self::ACTIVE {
            *self.masks.write() = self.policy.default_masks();
        }
    }

    pub fn attach_sink(&self, sink: &SharedSink) -> bool {
        Self::ACTIVE && self.sinks.write().attach(sink)
    }

    pub fn detach_sink(&self, sink: &SharedSink) -> bool {
        Self::ACTIVE && self.sinks.write().detach(sink)
    }

    pub fn clear_sinks(&self) {
        if Self::ACTIVE {
            self.sinks.write().clear();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.read().names()
    }

    /// Would a message with these tags currently be written?
    #[inline]
    pub fn would_emit(&self, category: CategoryFilter, level: LevelTag) -> bool {
        Self::ACTIVE && self.masks.read().passes(category, level)
    }

    /// Emit a formatted message. Formatting happens only if the message
    /// passes the channel's masks.
    pub fn emit<L: IntoLevelTag>(
        &self,
        category: impl Into<CategoryFilter>,
        level: L,
        args: fmt::Arguments<'_>,
    ) -> Result<()> {
        if !Self::ACTIVE {
            return Ok(());
        }

        let category = category.into();
        let level = level.into_level_tag()?;
        if !self.would_emit(category, level) {
            self.metrics.record_suppressed();
            return Ok(());
        }

        let message = BoundedMessage::render(self.max_message_len, args);
        self.deliver(&message)
    }

    /// Emit at the default level
    pub fn emit_category(
        &self,
        category: impl Into<CategoryFilter>,
        args: fmt::Arguments<'_>,
    ) -> Result<()> {
        self.emit(category, LevelTag::DEFAULT, args)
    }

    /// Emit with every category bit set, at the default level
    pub fn emit_default(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.emit(CategoryFilter::ALL, LevelTag::DEFAULT, args)
    }

    /// Emit literal text
    pub fn emit_str<L: IntoLevelTag>(
        &self,
        category: impl Into<CategoryFilter>,
        level: L,
        text: &str,
    ) -> Result<()> {
        self.emit(category, level, format_args!("{}", text))
    }

    /// Start a chained message. Text appended to the stream is written to the
    /// sinks once, when the stream is ended or flushed.
    pub fn stream<L: IntoLevelTag>(
        &self,
        category: impl Into<CategoryFilter>,
        level: L,
    ) -> Result<MessageStream<'_, P>> {
        let level = if Self::ACTIVE {
            level.into_level_tag()?
        } else {
            LevelTag::DEFAULT
        };
        Ok(MessageStream::new(self, category.into(), level))
    }

    /// Stream with every category bit set, at the default level
    pub fn stream_default(&self) -> MessageStream<'_, P> {
        MessageStream::new(self, CategoryFilter::ALL, LevelTag::DEFAULT)
    }

    /// Write a stream's buffered text. Masks are checked again since they may
    /// have changed while the stream was being built.
    pub(crate) fn emit_buffered(
        &self,
        category: CategoryFilter,
        level: LevelTag,
        message: &BoundedMessage,
    ) -> Result<()> {
        if !self.would_emit(category, level) {
            self.metrics.record_suppressed();
            return Ok(());
        }
        self.deliver(message)
    }

    fn deliver(&self, message: &BoundedMessage) -> Result<()> {
        if message.is_truncated() {
            self.metrics.record_truncated();
        }

        // The registry lock is released before any sink I/O starts.
        let fan_out = self.sinks.read().snapshot();
        let result = fan_out.write(message.as_str());
        let failed = result.as_ref().map_or_else(|e| e.sink_failures().len(), |_| 0);

        // Delivered means at least one sink accepted the text.
        if failed < fan_out.len() {
            self.metrics.record_delivered();
        }
        self.metrics.record_sink_failures(failed);
        result
    }
}

/// Object-safe control surface shared by every channel, used by the
/// command-line toggler and config loader to address channels by name
pub trait ChannelControl: Send + Sync {
    fn name(&self) -> &str;
    fn filter(&self) -> CategoryFilter;
    fn level(&self) -> LevelSelection;
    fn set_filter(&self, filter: CategoryFilter);
    fn add_filter(&self, filter: CategoryFilter);
    fn remove_filter(&self, filter: CategoryFilter);
    fn set_level(&self, level: LevelSelection);
    fn reset_to_defaults(&self);
}

impl<P: ChannelPolicy> ChannelControl for OutputChannel<P> {
    fn name(&self) -> &str {
        OutputChannel::name(self)
    }

    fn filter(&self) -> CategoryFilter {
        OutputChannel::filter(self)
    }

    fn level(&self) -> LevelSelection {
        OutputChannel::level(self)
    }

    fn set_filter(&self, filter: CategoryFilter) {
        OutputChannel::set_filter(self, filter);
    }

    fn add_filter(&self, filter: CategoryFilter) {
        OutputChannel::add_filter(self, filter);
    }

    fn remove_filter(&self, filter: CategoryFilter) {
        OutputChannel::remove_filter(self, filter);
    }

    fn set_level(&self, level: LevelSelection) {
        if Self::ACTIVE {
            self.masks.write().level = level;
        }
    }

    fn reset_to_defaults(&self) {
        OutputChannel::reset_to_defaults(self);
    }
}

impl<P: ChannelPolicy> fmt::Debug for OutputChannel<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputChannel")
            .field("name", &self.name())
            .field("active", &Self::ACTIVE)
            .field("masks", &self.masks())
            .field("sinks", &self.sink_names())
            .finish()
    }
}

/// Builder for constructing an OutputChannel with a fluent API
pub struct ChannelBuilder<P: ChannelPolicy> {
    policy: P,
    max_message_len: usize,
    filter: Option<CategoryFilter>,
    level: Option<LevelSelection>,
    sinks: Vec<SharedSink>,
}

impl<P: ChannelPolicy> ChannelBuilder<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            filter: None,
            level: None,
            sinks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    /// Starting filter, overriding the policy default until the next reset
    #[must_use = "builder methods return a new value"]
    pub fn filter(mut self, filter: impl Into<CategoryFilter>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Starting level selection, overriding the policy default until the next reset
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LevelSelection) -> Self {
        self.level = Some(level);
        self
    }

    /// Attach a caller-owned sink after the policy's own sinks
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: &SharedSink) -> Self {
        self.sinks.push(sink.clone());
        self
    }

    pub fn build(self) -> Result<OutputChannel<P>> {
        let channel = OutputChannel::with_max_message_len(self.policy, self.max_message_len)?;
        if let Some(filter) = self.filter {
            channel.set_filter(filter);
        }
        if let Some(level) = self.level {
            channel.set_level(level)?;
        }
        for sink in &self.sinks {
            channel.attach_sink(sink);
        }
        Ok(channel)
    }
}
