//! In-memory sink
//!
//! Captures everything written to it. Clones share the same buffer, so a
//! test can attach one handle to a channel and inspect another.

use crate::core::{shared, OutputError, Result, SharedSink, Sink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct MemorySink {
    name: String,
    writes: Arc<Mutex<Vec<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            writes: Arc::new(Mutex::new(Vec::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// An attachable handle sharing this sink's buffer
    pub fn shared(&self) -> SharedSink {
        shared(self.clone())
    }

    /// Everything written so far, concatenated
    pub fn contents(&self) -> String {
        self.writes.lock().concat()
    }

    /// Each write as it arrived
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.writes.lock().clear();
    }

    /// Make every later write fail, to exercise error paths
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }
}

impl Sink for MemorySink {
    fn write(&mut self, text: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(OutputError::io_operation(
                "writing memory sink",
                format!("sink '{}' is set to fail", self.name),
                std::io::Error::other("simulated failure"),
            ));
        }
        self.writes.lock().push(text.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
