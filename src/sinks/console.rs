//! Console sink implementation

use crate::core::{Result, Sink, TimestampFormat};
#[cfg(feature = "console")]
use colored::{Color, Colorize};
use std::io::Write;

/// Which standard stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

pub struct ConsoleSink {
    target: ConsoleTarget,
    name: String,
    timestamp_format: Option<TimestampFormat>,
    #[cfg(feature = "console")]
    color: Option<Color>,
}

impl ConsoleSink {
    pub fn new(target: ConsoleTarget) -> Self {
        let name = match target {
            ConsoleTarget::Stdout => "stdout",
            ConsoleTarget::Stderr => "stderr",
        };
        Self {
            target,
            name: name.to_string(),
            timestamp_format: None,
            #[cfg(feature = "console")]
            color: None,
        }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    /// Stamp each write with the current time
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_spew_system::sinks::ConsoleSink;
    /// use rust_spew_system::TimestampFormat;
    ///
    /// let sink = ConsoleSink::stdout().with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    /// Colour every write, when the terminal supports it
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn render(&self, text: &str) -> Result<String> {
        let stamped = match &self.timestamp_format {
            Some(format) => format!("{}{}", format.prefix_now()?, text),
            None => text.to_string(),
        };

        #[cfg(feature = "console")]
        if let Some(color) = self.color {
            return Ok(stamped.color(color).to_string());
        }

        Ok(stamped)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, text: &str) -> Result<()> {
        let output = self.render(text)?;
        match self.target {
            ConsoleTarget::Stdout => std::io::stdout().lock().write_all(output.as_bytes())?,
            ConsoleTarget::Stderr => std::io::stderr().lock().write_all(output.as_bytes())?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
