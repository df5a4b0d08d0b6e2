//! Core output engine types and traits

pub mod channel;
pub mod error;
pub mod filter;
pub mod level;
pub mod message;
pub mod metrics;
pub mod predicate;
pub mod registry;
pub mod sink;
pub mod stream;
pub mod timestamp;

pub use channel::{ChannelBuilder, ChannelControl, ChannelPolicy, OutputChannel};
pub use error::{OutputError, Result, SinkFailure};
pub use filter::CategoryFilter;
pub use level::{
    IntoLevelSelection, IntoLevelTag, LevelSelection, LevelTag, VerbosityLevel, HIGHEST_LEVEL,
};
pub use message::{BoundedMessage, DEFAULT_MAX_MESSAGE_LEN};
pub use metrics::ChannelMetrics;
pub use predicate::{passes, Masks};
pub use registry::{FanOut, SinkRegistry};
pub use sink::{shared, SharedSink, Sink, WeakSink};
pub use stream::MessageStream;
pub use timestamp::TimestampFormat;
