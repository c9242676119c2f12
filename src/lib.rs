//! # Rust Fanout Logger
//!
//! A small leveled logger that writes every line to an ordered set of
//! destinations: an optional explicit writer, the platform system log and
//! the process's stdout/stderr.
//!
//! ## Features
//!
//! - **Six levels**: Fatal, Panic, Error, Warning, Info, Debug, gated by a
//!   threshold or an explicit level mask
//! - **Fan-out**: one call, identical output on every destination; a failing
//!   destination never blocks the others
//! - **Structured fields**: one-shot fields per call and bound context fields
//! - **Formatters**: plain `key=value`, single-line JSON, colorized prefixes
//! - **Process-wide default**: works before any setup, replaced by the first
//!   logger you build
//!
//! ## Example
//!
//! ```
//! use rust_fanout_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .name("billing")
//!     .level(LogLevel::Debug)
//!     .build();
//!
//! logger.bind_context(fields! { "service" => "billing" });
//! logger.with(fields! { "invoice" => 1042 }).info("invoice sent");
//! ```

pub mod core;
pub mod formatters;
pub mod macros;
pub mod sinks;

pub use crate::core::global;

pub mod prelude {
    pub use crate::core::{
        CallSite, FieldScope, FieldValue, FormatKind, Formatter, LevelMask, LogEntry, LogFields,
        LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, OutputFlags, Result,
        SeverityGate, Sink,
    };
    pub use crate::fields;
    #[cfg(feature = "console")]
    pub use crate::formatters::ColorizedFormatter;
    pub use crate::formatters::{JsonFormatter, PlainFormatter};
    pub use crate::sinks::{FileSink, MemorySink, WriterSink};
}

pub use crate::core::{
    CallSite, FieldScope, FieldValue, FormatKind, Formatter, Lifecycle, LevelMask, LogEntry,
    LogFields, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, OutputFlags, Result,
    SeverityGate, Sink, SinkHandle,
};
#[cfg(feature = "console")]
pub use formatters::ColorizedFormatter;
pub use formatters::{JsonFormatter, PlainFormatter};
pub use sinks::{ConsoleSink, FileSink, MemorySink, SystemLogConnector, WriterSink};
