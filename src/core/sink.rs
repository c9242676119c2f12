//! Sink trait for log output destinations

use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// A destination that receives fully formatted lines.
///
/// A sink only has to accept bytes. Sinks that hold a resource worth
/// releasing (a file, a socket) report `is_closeable() == true`; the logger
/// tracks those and calls [`Sink::close`] when it shuts down.
pub trait Sink: Send {
    /// Write one complete line, trailing newline included.
    fn write_line(&mut self, line: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    fn is_closeable(&self) -> bool {
        false
    }

    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

/// Shared handle to a sink.
///
/// The same sink may sit in several level channels at once (an explicit
/// writer is attached to every level), so sinks are reference counted.
pub type SinkHandle = Arc<Mutex<dyn Sink>>;

/// Wrap a sink into a [`SinkHandle`].
pub fn sink_handle<S: Sink + 'static>(sink: S) -> SinkHandle {
    Arc::new(Mutex::new(sink))
}
