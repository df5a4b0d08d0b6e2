//! Ordered set of sinks attached to one channel

use super::error::{OutputError, Result, SinkFailure};
use super::sink::{SharedSink, WeakSink};
use std::sync::{Arc, Weak};

struct Entry {
    name: String,
    sink: WeakSink,
}

/// Sinks a channel writes to, in registration order.
///
/// Entries are weak: dropping the last [`SharedSink`] detaches the sink
/// everywhere without the registry noticing until the next snapshot.
#[derive(Default)]
pub struct SinkRegistry {
    entries: Vec<Entry>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sink. Attaching the same sink twice is a no-op.
    pub fn attach(&mut self, sink: &SharedSink) -> bool {
        self.prune();
        let weak = Arc::downgrade(sink);
        if self.entries.iter().any(|e| Weak::ptr_eq(&e.sink, &weak)) {
            return false;
        }
        let name = sink.lock().name().to_string();
        self.entries.push(Entry { name, sink: weak });
        true
    }

    pub fn detach(&mut self, sink: &SharedSink) -> bool {
        let weak = Arc::downgrade(sink);
        let before = self.entries.len();
        self.entries.retain(|e| !Weak::ptr_eq(&e.sink, &weak));
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries whose owner has released the sink
    pub fn prune(&mut self) {
        self.entries.retain(|e| e.sink.strong_count() > 0);
    }

    /// Number of sinks still alive
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.sink.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the live sinks, in registration order
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.sink.strong_count() > 0)
            .map(|e| e.name.clone())
            .collect()
    }

    /// Upgrade the live sinks so they can be written without holding
    /// whatever lock guards this registry. Sinks are numbered among the
    /// live ones, matching [`Self::names`].
    pub fn snapshot(&self) -> FanOut {
        let sinks = self
            .entries
            .iter()
            .filter_map(|e| e.sink.upgrade())
            .enumerate()
            .collect();
        FanOut { sinks }
    }
}

/// Live sinks captured from a registry for one write
pub struct FanOut {
    sinks: Vec<(usize, SharedSink)>,
}

impl FanOut {
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Write `text` to every sink in order, flushing each one after its
    /// write. A failing or panicking sink does not stop the others; all
    /// failures are returned together once every sink has been tried.
    pub fn write(&self, text: &str) -> Result<()> {
        let mut failures = Vec::new();

        for (idx, sink) in &self.sinks {
            let mut guard = sink.lock();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                guard.write(text).and_then(|()| guard.flush())
            }));

            let message = match result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    format!("sink panicked: {}", panic_msg)
                }
            };

            failures.push(SinkFailure {
                index: *idx,
                sink: guard.name().to_string(),
                message,
            });
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(OutputError::sink(failures))
        }
    }
}
