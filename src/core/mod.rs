//! Core logger types and traits

pub mod channel;
pub mod config;
pub mod context;
pub mod error;
pub mod fanout;
pub mod fields;
pub mod flags;
pub mod formatter;
pub mod global;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod sink;
pub mod timestamp;

pub use channel::{Channel, Channels};
pub use config::{FormatKind, LoggerConfig};
pub use context::BoundContext;
pub use error::{LoggerError, Result};
pub use fanout::FanOut;
pub use fields::{parse_rendered, FieldValue, LogFields};
pub use flags::OutputFlags;
pub use formatter::Formatter;
pub use log_entry::{CallSite, LogEntry};
pub use log_level::{LevelMask, LogLevel, SeverityGate};
pub use logger::{FieldScope, Lifecycle, Logger, LoggerBuilder, Terminator, FATAL_EXIT_CODE};
pub use sink::{sink_handle, Sink, SinkHandle};
