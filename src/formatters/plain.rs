//! Plain-text formatter

use crate::core::{Formatter, LogEntry, OutputFlags};

/// `key=value ` fields followed by the message.
///
/// Time, file and level prefix are left to the channel header.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for PlainFormatter {
    fn output(&self, _flags: OutputFlags, entry: &LogEntry) -> String {
        let mut out = entry.fields.render();
        out.push_str(&entry.message);
        out
    }

    fn name(&self) -> &str {
        "plain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogFields, LogLevel};

    #[test]
    fn test_fields_then_message() {
        let fields = LogFields::new()
            .with("bool", true)
            .with("int", 7)
            .with("string", "test")
            .add(LogFields::new().with("second", 2));
        let entry = LogEntry::new(LogLevel::Info, "check field").with_fields(fields);

        assert_eq!(
            PlainFormatter.output(OutputFlags::DISABLED, &entry),
            "bool=true int=7 second=2 string=test check field"
        );
    }

    #[test]
    fn test_message_only() {
        let entry = LogEntry::new(LogLevel::Debug, "just text");
        assert_eq!(PlainFormatter.output(OutputFlags::STD, &entry), "just text");
    }

    #[test]
    fn test_does_not_override_channels() {
        assert_eq!(PlainFormatter.channel_flags(), None);
        assert_eq!(PlainFormatter.channel_prefix(LogLevel::Info), None);
    }
}
