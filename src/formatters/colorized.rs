//! Colorized plain-text formatter

use super::plain::PlainFormatter;
use crate::core::{Formatter, LogEntry, LogLevel, OutputFlags};

const RESET: &str = "\u{1b}[0m";

/// Plain formatting with ANSI-colored level prefixes.
///
/// The payload is produced by the wrapped [`PlainFormatter`]; only the
/// channel prefixes change. The escape sequences are always emitted, whatever
/// the destination, so files and pipes get the same bytes as a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorizedFormatter {
    inner: PlainFormatter,
}

impl ColorizedFormatter {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `tag` wrapped in the foreground color for `level` and a reset.
fn paint(level: LogLevel) -> String {
    format!(
        "\u{1b}[{}m{}{}",
        level.color_code().to_fg_str(),
        level.tag(),
        RESET
    )
}

impl Formatter for ColorizedFormatter {
    fn output(&self, flags: OutputFlags, entry: &LogEntry) -> String {
        self.inner.output(flags, entry)
    }

    fn channel_prefix(&self, level: LogLevel) -> Option<String> {
        Some(paint(level))
    }

    fn name(&self) -> &str {
        "colorized"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Logger;
    use crate::sinks::MemorySink;

    #[test]
    fn test_prefix_wrapped_in_escape_sequence() {
        let prefix = ColorizedFormatter::new()
            .channel_prefix(LogLevel::Error)
            .expect("colorized formatter overrides prefixes");

        assert_eq!(prefix, "\u{1b}[31mERROR: \u{1b}[0m");
    }

    #[test]
    fn test_every_level_colored() {
        for level in LogLevel::ALL {
            let prefix = ColorizedFormatter::new().channel_prefix(level).unwrap();
            assert!(prefix.starts_with("\u{1b}["), "got {:?}", prefix);
            assert!(prefix.contains(level.tag()));
            assert!(prefix.ends_with(RESET));
        }
    }

    #[test]
    fn test_colors_reach_non_terminal_sinks() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .formatter(ColorizedFormatter::new())
            .writer(sink.clone())
            .flags(OutputFlags::DISABLED)
            .detached()
            .build();

        logger.error("boom");
        assert_eq!(sink.contents(), "\u{1b}[31mERROR: \u{1b}[0mboom\n");
    }

    #[test]
    fn test_payload_matches_plain() {
        let entry = LogEntry::new(LogLevel::Info, "ready")
            .with_fields(crate::core::LogFields::new().with("port", 8080));
        assert_eq!(
            ColorizedFormatter::new().output(OutputFlags::DISABLED, &entry),
            PlainFormatter.output(OutputFlags::DISABLED, &entry)
        );
        assert_eq!(ColorizedFormatter::new().channel_flags(), None);
    }
}
