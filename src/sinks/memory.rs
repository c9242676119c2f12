//! In-memory sink for capturing output

use crate::core::{sink_handle, Sink, SinkHandle};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Collects every written line in memory.
///
/// Clones share the same buffer, so a test can keep one clone to inspect
/// while another is handed to a logger.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`SinkHandle`] writing into this buffer.
    pub fn handle(&self) -> SinkHandle {
        sink_handle(self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        self.buffer.lock().extend_from_slice(line);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
