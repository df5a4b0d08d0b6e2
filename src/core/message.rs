//! Bounded message rendering
//!
//! Messages are rendered into a buffer with a fixed maximum length. Text past
//! the limit is dropped at a UTF-8 character boundary, so a truncated message
//! is still a valid string and never an error.

use std::fmt::{self, Write};

/// Default maximum rendered message length, in bytes
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 255;

#[derive(Debug, Clone)]
pub struct BoundedMessage {
    text: String,
    limit: usize,
    truncated: bool,
}

impl BoundedMessage {
    pub fn new(limit: usize) -> Self {
        Self {
            text: String::with_capacity(limit.min(DEFAULT_MAX_MESSAGE_LEN + 1)),
            limit,
            truncated: false,
        }
    }

    /// Render `args`, truncating at `limit`
    pub fn render(limit: usize, args: fmt::Arguments<'_>) -> Self {
        let mut message = Self::new(limit);
        // A full buffer stops formatting early; that is not a failure.
        let _ = message.write_fmt(args);
        message
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// True once any text has been dropped
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.truncated = false;
    }
}

impl Write for BoundedMessage {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Err(fmt::Error);
        }

        let room = self.limit - self.text.len();
        if s.len() <= room {
            self.text.push_str(s);
            return Ok(());
        }

        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.text.push_str(&s[..cut]);
        self.truncated = true;
        Err(fmt::Error)
    }
}

impl fmt::Display for BoundedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
