//! # Rust Spew System
//!
//! An embeddable output router: messages tagged with a category and a
//! verbosity level are written to every sink of a channel whose masks let
//! them through.
//!
//! ## Features
//!
//! - **Two independent masks**: a category filter and a level selection per channel
//! - **Deferred formatting**: suppressed messages are never formatted
//! - **Fan-out**: one rendered message, written and flushed to each sink in order
//! - **Compile-time elision**: debug-only channels vanish from release builds
//! - **Run-once guard** and **assertion handler chain** utilities
//!
//! ## Example
//!
//! ```
//! use rust_spew_system::prelude::*;
//! use rust_spew_system::emit;
//! use rust_spew_system::tags::category::{GFX, IO};
//!
//! let channel = OutputChannel::new(EmptyPolicy::new("Game")).unwrap();
//! let memory = MemorySink::new("memory");
//! let sink = memory.shared();
//! channel.attach_sink(&sink);
//!
//! channel.set_filter(GFX | IO);
//! channel.set_level(3).unwrap();
//!
//! emit!(channel; GFX, 2; "loaded {} textures\n", 12).unwrap();
//! emit!(channel; GFX, 4; "too verbose\n").unwrap();
//!
//! assert_eq!(memory.contents(), "loaded 12 textures\n");
//! ```

pub mod assertion;
pub mod channels;
pub mod cli;
pub mod config;
pub mod core;
pub mod macros;
pub mod once;
pub mod presets;
pub mod sinks;
pub mod tags;

pub mod prelude {
    pub use crate::assertion::{AssertionChain, AssertionHandler, ChannelHandler, Prompt};
    pub use crate::channels::{ChannelSet, ChannelSetBuilder};
    pub use crate::cli::{parse_command_line, Toggle, ToggleAction};
    pub use crate::config::{ChannelConfig, OutputConfig};
    pub use crate::core::{
        shared, CategoryFilter, ChannelBuilder, ChannelControl, ChannelMetrics, ChannelPolicy,
        LevelSelection, LevelTag, Masks, MessageStream, OutputChannel, OutputError, Result,
        SharedSink, Sink, TimestampFormat, VerbosityLevel,
    };
    pub use crate::once::OnceGuard;
    pub use crate::presets::{EmptyPolicy, LogPolicy, StdErrPolicy, StdOutPolicy, TracePolicy};
    pub use crate::sinks::{ConsoleSink, ConsoleTarget, FileSink, MemorySink, WriterSink};
    pub use crate::tags::{Tag, TagTable};
}

pub use assertion::{AssertionChain, AssertionHandler, ChannelHandler, Prompt};
pub use channels::{ChannelSet, ChannelSetBuilder};
pub use cli::{parse_command_line, parse_toggle, Toggle, ToggleAction};
pub use config::{ChannelConfig, FilterSpec, LevelSpec, OutputConfig};
pub use crate::core::{
    passes, shared, BoundedMessage, CategoryFilter, ChannelBuilder, ChannelControl,
    ChannelMetrics, ChannelPolicy, FanOut, IntoLevelSelection, IntoLevelTag, LevelSelection,
    LevelTag, Masks, MessageStream, OutputChannel, OutputError, Result, SharedSink, Sink,
    SinkFailure, SinkRegistry, TimestampFormat, VerbosityLevel, WeakSink,
    DEFAULT_MAX_MESSAGE_LEN, HIGHEST_LEVEL,
};
pub use once::OnceGuard;
pub use presets::{
    EmptyPolicy, LogPolicy, StdErrPolicy, StdOutPolicy, TracePolicy, DEFAULT_LOG_PATH,
};
pub use sinks::{ConsoleSink, ConsoleTarget, FileSink, MemorySink, WriterSink};
pub use tags::{Tag, TagTable};
