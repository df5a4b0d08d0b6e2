//! Error types for the output system

use std::fmt;

pub type Result<T> = std::result::Result<T, OutputError>;

/// One sink that failed during a fan-out write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkFailure {
    /// Position of the sink in the channel's registration order
    pub index: usize,
    /// Name reported by the sink
    pub sink: String,
    pub message: String,
}

impl fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} '{}': {}", self.index, self.sink, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Verbosity level outside 1..=5
    #[error("Verbosity level {level} out of range (expected 1..=5)")]
    LevelOutOfRange { level: i64 },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// One or more sinks failed while the rest still received the message
    #[error("{} of the channel's sinks failed: {}", .failures.len(), join_failures(.failures))]
    Sink { failures: Vec<SinkFailure> },

    /// Sink that can no longer accept writes
    #[error("Sink '{name}' is closed")]
    SinkClosed { name: String },

    /// No channel with that name
    #[error("Unknown output channel '{name}'")]
    UnknownChannel { name: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

fn join_failures(failures: &[SinkFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl OutputError {
    /// Create a level range error
    pub fn level_out_of_range(level: impl Into<i64>) -> Self {
        OutputError::LevelOutOfRange {
            level: level.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        OutputError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an aggregated sink error
    pub fn sink(failures: Vec<SinkFailure>) -> Self {
        OutputError::Sink { failures }
    }

    pub fn sink_closed(name: impl Into<String>) -> Self {
        OutputError::SinkClosed { name: name.into() }
    }

    pub fn unknown_channel(name: impl Into<String>) -> Self {
        OutputError::UnknownChannel { name: name.into() }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        OutputError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        OutputError::Other(msg.into())
    }

    /// Failed sinks, if this is a fan-out error
    pub fn sink_failures(&self) -> &[SinkFailure] {
        match self {
            OutputError::Sink { failures } => failures,
            _ => &[],
        }
    }
}
