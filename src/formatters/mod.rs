//! Formatter implementations

#[cfg(feature = "console")]
pub mod colorized;
pub mod json;
pub mod plain;

#[cfg(feature = "console")]
pub use colorized::ColorizedFormatter;
pub use json::JsonFormatter;
pub use plain::PlainFormatter;

pub use crate::core::Formatter;
