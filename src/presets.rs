//! Preset channel policies
//!
//! | Channel | Sinks        | Default filter | Level      | In release |
//! |---------|--------------|----------------|------------|------------|
//! | Log     | file `log.txt` | ALL          | 1 and lower | no        |
//! | Trace   | stdout       | NONE           | 1 and lower | no         |
//! | StdOut  | stdout       | ALL            | 1 and lower | yes        |
//! | StdErr  | stderr       | NONE           | 1 and lower | yes        |
//!
//! [`EmptyPolicy`] starts with no sinks at all and is kept in release, for
//! channels an application wires up itself.

use crate::core::{
    shared, CategoryFilter, ChannelPolicy, LevelSelection, Masks, Result, SharedSink,
};
use crate::sinks::{ConsoleSink, FileSink};
use std::path::{Path, PathBuf};

/// File the Log channel writes to unless told otherwise
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Writes to a file, truncated when the channel is created
pub struct LogPolicy {
    path: PathBuf,
    file: Option<SharedSink>,
}

impl LogPolicy {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_LOG_PATH)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for LogPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelPolicy for LogPolicy {
    fn name(&self) -> &str {
        "Log"
    }

    fn default_masks(&self) -> Masks {
        Masks::new(CategoryFilter::ALL, LevelSelection::LEVEL1_AND_LOWER)
    }

    fn open_sinks(&mut self) -> Result<Vec<SharedSink>> {
        let file = shared(FileSink::create(&self.path)?);
        self.file = Some(file.clone());
        Ok(vec![file])
    }
}

/// Debug trace to standard output, silent until categories are enabled
#[derive(Default)]
pub struct TracePolicy {
    console: Option<SharedSink>,
}

impl TracePolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChannelPolicy for TracePolicy {
    fn name(&self) -> &str {
        "Trace"
    }

    fn default_masks(&self) -> Masks {
        Masks::new(CategoryFilter::NONE, LevelSelection::LEVEL1_AND_LOWER)
    }

    fn open_sinks(&mut self) -> Result<Vec<SharedSink>> {
        let console = shared(ConsoleSink::stdout());
        self.console = Some(console.clone());
        Ok(vec![console])
    }
}

#[derive(Default)]
pub struct StdOutPolicy {
    console: Option<SharedSink>,
}

impl StdOutPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChannelPolicy for StdOutPolicy {
    const INCLUDE_IN_RELEASE: bool = true;

    fn name(&self) -> &str {
        "StdOut"
    }

    fn default_masks(&self) -> Masks {
        Masks::new(CategoryFilter::ALL, LevelSelection::LEVEL1_AND_LOWER)
    }

    fn open_sinks(&mut self) -> Result<Vec<SharedSink>> {
        let console = shared(ConsoleSink::stdout());
        self.console = Some(console.clone());
        Ok(vec![console])
    }
}

#[derive(Default)]
pub struct StdErrPolicy {
    console: Option<SharedSink>,
}

impl StdErrPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChannelPolicy for StdErrPolicy {
    const INCLUDE_IN_RELEASE: bool = true;

    fn name(&self) -> &str {
        "StdErr"
    }

    fn default_masks(&self) -> Masks {
        Masks::new(CategoryFilter::NONE, LevelSelection::LEVEL1_AND_LOWER)
    }

    fn open_sinks(&mut self) -> Result<Vec<SharedSink>> {
        let console = shared(ConsoleSink::stderr());
        self.console = Some(console.clone());
        Ok(vec![console])
    }
}

/// No sinks, every category, level 1. Kept in release builds.
///
/// # Example
/// ```
/// use rust_spew_system::prelude::*;
///
/// let memory = MemorySink::new("memory");
/// let handle = memory.shared();
///
/// let channel = OutputChannel::new(EmptyPolicy::new("Audit")).unwrap();
/// channel.attach_sink(&handle);
/// channel.emit_default(format_args!("user {} logged in", 42)).unwrap();
///
/// assert_eq!(memory.contents(), "user 42 logged in");
/// ```
#[derive(Debug, Clone)]
pub struct EmptyPolicy {
    name: String,
}

impl EmptyPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ChannelPolicy for EmptyPolicy {
    const INCLUDE_IN_RELEASE: bool = true;

    fn name(&self) -> &str {
        &self.name
    }

    fn default_masks(&self) -> Masks {
        Masks::new(CategoryFilter::ALL, LevelSelection::LEVEL1_AND_LOWER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutputChannel;
    use tempfile::TempDir;

    #[test]
    fn test_default_masks() {
        assert_eq!(
            LogPolicy::new().default_masks(),
            Masks::new(CategoryFilter::ALL, LevelSelection::LEVEL1_AND_LOWER)
        );
        assert_eq!(TracePolicy::new().default_masks().filter, CategoryFilter::NONE);
        assert_eq!(StdOutPolicy::new().default_masks().filter, CategoryFilter::ALL);
        assert_eq!(StdErrPolicy::new().default_masks().filter, CategoryFilter::NONE);
        assert_eq!(EmptyPolicy::new("x").default_masks().filter, CategoryFilter::ALL);
    }

    #[test]
    fn test_release_inclusion() {
        assert!(!LogPolicy::INCLUDE_IN_RELEASE);
        assert!(!TracePolicy::INCLUDE_IN_RELEASE);
        assert!(StdOutPolicy::INCLUDE_IN_RELEASE);
        assert!(StdErrPolicy::INCLUDE_IN_RELEASE);
        assert!(EmptyPolicy::INCLUDE_IN_RELEASE);
        assert!(OutputChannel::<StdErrPolicy>::ACTIVE);
    }

    #[test]
    fn test_log_policy_writes_its_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "stale").unwrap();

        let channel = OutputChannel::new(LogPolicy::with_path(&path)).unwrap();
        if channel.is_compiled_in() {
            assert_eq!(channel.sink_names(), vec!["file"]);
            channel.emit_default(format_args!("hello\n")).unwrap();
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        } else {
            assert_eq!(channel.sink_count(), 0);
        }
    }

    #[test]
    fn test_console_policies_open_one_sink() {
        let stdout = OutputChannel::new(StdOutPolicy::new()).unwrap();
        assert_eq!(stdout.sink_names(), vec!["stdout"]);
        let stderr = OutputChannel::new(StdErrPolicy::new()).unwrap();
        assert_eq!(stderr.sink_names(), vec!["stderr"]);
        let empty = OutputChannel::new(EmptyPolicy::new("quiet")).unwrap();
        assert_eq!(empty.sink_count(), 0);
        assert_eq!(empty.name(), "quiet");
    }
}
