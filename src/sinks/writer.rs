//! Adapter from any `io::Write` to a sink

use crate::core::Sink;
use std::io::{self, Write};

/// Sink over an arbitrary writer.
///
/// Pass `closeable = true` via [`WriterSink::closeable`] when the writer owns
/// something the logger should flush and release on shutdown.
pub struct WriterSink<W: Write + Send> {
    writer: Option<W>,
    name: String,
    closeable: bool,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            name: "writer".to_string(),
            closeable: false,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn closeable(mut self) -> Self {
        self.closeable = true;
        self
    }

    /// Take the writer back, e.g. to inspect an in-memory buffer.
    pub fn into_inner(mut self) -> Option<W> {
        self.writer.take()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.write_all(line),
            None => Err(io::Error::new(io::ErrorKind::NotConnected, "writer closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_closeable(&self) -> bool {
        self.closeable
    }

    fn close(&mut self) -> io::Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}
