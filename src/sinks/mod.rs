//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;
pub mod syslog;
pub mod writer;

pub use console::{ConsoleSink, Stream};
pub use file::FileSink;
pub use memory::MemorySink;
pub use syslog::{PlatformSystemLog, SystemLogConnector};
#[cfg(all(unix, feature = "syslog"))]
pub use syslog::{SyslogSeverity, SyslogSink};
pub use writer::WriterSink;

pub use crate::core::{Sink, SinkHandle};
