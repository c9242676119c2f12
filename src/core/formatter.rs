//! Formatter trait for turning log calls into output text

use super::flags::OutputFlags;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;

/// Strategy that renders one log call.
///
/// Besides producing the payload a formatter may take over parts of the
/// channel configuration: the header flags (time/file decorations) and the
/// per-level prefixes. Returning `None` leaves the channel defaults alone.
pub trait Formatter: Send + Sync {
    /// Produce the payload for `entry`. `flags` is the logger's current flag
    /// value, whether or not the channels use it.
    fn output(&self, flags: OutputFlags, entry: &LogEntry) -> String;

    /// Flags forced onto every channel, if this formatter overrides them.
    fn channel_flags(&self) -> Option<OutputFlags> {
        None
    }

    /// Prefix forced onto the channel for `level`, if this formatter
    /// overrides prefixes.
    fn channel_prefix(&self, _level: LogLevel) -> Option<String> {
        None
    }

    fn name(&self) -> &str;
}
