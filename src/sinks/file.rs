//! File sink implementation

use crate::core::{OutputError, Result, Sink, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    timestamp_format: Option<TimestampFormat>,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed
    pub fn append(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(path.into(), false)
    }

    /// Open `path`, discarding any previous contents
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(path.into(), true)
    }

    fn open(path: PathBuf, truncate: bool) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.create(true);
        if truncate {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }

        let file = options.open(&path).map_err(|e| {
            OutputError::io_operation(
                "opening file sink",
                format!("cannot open '{}'", path.display()),
                e,
            )
        })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            timestamp_format: None,
        })
    }

    /// Stamp each write with the current time
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_spew_system::sinks::FileSink;
    /// use rust_spew_system::TimestampFormat;
    ///
    /// let sink = FileSink::append("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and release the file. Later writes fail with `SinkClosed`.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Sink for FileSink {
    fn write(&mut self, text: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| OutputError::sink_closed(self.path.display().to_string()))?;

        if let Some(format) = &self.timestamp_format {
            let prefix = format.prefix_now()?;
            writer.write_all(prefix.as_bytes())?;
        }
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            eprintln!(
                "[SPEW ERROR] Failed to flush '{}' on close: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_keeps_existing_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("append.txt");
        std::fs::write(&path, "old\n").unwrap();

        let mut sink = FileSink::append(&path).unwrap();
        sink.write("new\n").unwrap();
        sink.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_create_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("create.txt");
        std::fs::write(&path, "old\n").unwrap();

        let mut sink = FileSink::create(&path).unwrap();
        sink.write("fresh").unwrap();
        sink.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_write_after_close_fails() {
        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::create(dir.path().join("closed.txt")).unwrap();
        sink.close().unwrap();
        assert!(matches!(
            sink.write("late"),
            Err(OutputError::SinkClosed { .. })
        ));
    }

    #[test]
    fn test_open_failure_has_context() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no_such_dir").join("log.txt");
        let err = FileSink::append(&missing).err().unwrap();
        assert!(err.to_string().contains("opening file sink"));
    }

    #[test]
    fn test_timestamp_prefix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stamped.txt");
        let mut sink = FileSink::create(&path)
            .unwrap()
            .with_timestamp_format(TimestampFormat::Custom("%Y".to_string()));
        sink.write("line\n").unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('['));
        assert!(content.ends_with("] line\n"));
    }

    #[test]
    fn test_bad_timestamp_format_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad_stamp.txt");
        let mut sink = FileSink::create(&path)
            .unwrap()
            .with_timestamp_format(TimestampFormat::Custom("%Q".to_string()));
        let err = sink.write("line\n").unwrap_err();
        assert!(err.to_string().contains("invalid strftime format"));
        sink.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
