//! Per-level output channel
//!
//! A channel owns the prefix and header flags for one severity level and the
//! fan-out its lines go to. Line layout:
//!
//! `<prefix><date> <time> <file>:<line>: <message>\n`
//!
//! With `MSG_PREFIX` the prefix moves from the start of the line to just
//! before the message.

use super::fanout::FanOut;
use super::flags::OutputFlags;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::timestamp::{format_call_site, format_time};

#[derive(Clone)]
pub struct Channel {
    prefix: String,
    flags: OutputFlags,
    out: FanOut,
}

impl Channel {
    pub fn new(out: FanOut, prefix: impl Into<String>, flags: OutputFlags) -> Self {
        Self {
            prefix: prefix.into(),
            flags,
            out,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> OutputFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: OutputFlags) {
        self.flags = flags;
    }

    pub fn out(&self) -> &FanOut {
        &self.out
    }

    /// Build the full line for `payload`, header taken from `entry`.
    pub fn render_line(&self, entry: &LogEntry, payload: &str) -> String {
        let mut line = String::with_capacity(self.prefix.len() + payload.len() + 40);

        if !self.flags.contains(OutputFlags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }
        if let Some(time) = format_time(self.flags, &entry.timestamp) {
            line.push_str(&time);
            line.push(' ');
        }
        if let Some(site) = format_call_site(self.flags, entry.call_site_or_unknown()) {
            line.push_str(&site);
            line.push_str(": ");
        }
        if self.flags.contains(OutputFlags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }

        line.push_str(payload);
        if !payload.ends_with('\n') {
            line.push('\n');
        }
        line
    }

    /// Render and write one line to every sink of this channel.
    pub fn output(&self, entry: &LogEntry, payload: &str) {
        let line = self.render_line(entry, payload);
        self.out.write_line(line.as_bytes());
    }
}

/// One channel per severity level.
#[derive(Clone)]
pub struct Channels {
    by_level: [Channel; 6],
}

impl Channels {
    /// Build all six channels from a per-level fan-out, prefix and flag source.
    pub fn build(
        mut out: impl FnMut(LogLevel) -> FanOut,
        mut prefix: impl FnMut(LogLevel) -> String,
        flags: OutputFlags,
    ) -> Self {
        Self {
            by_level: LogLevel::ALL.map(|level| Channel::new(out(level), prefix(level), flags)),
        }
    }

    pub fn get(&self, level: LogLevel) -> &Channel {
        &self.by_level[level as usize]
    }

    pub fn set_flags(&mut self, flags: OutputFlags) {
        for channel in &mut self.by_level {
            channel.set_flags(flags);
        }
    }

    pub fn flush(&self) {
        for channel in &self.by_level {
            channel.out().flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_entry::CallSite;
    use crate::sinks::MemorySink;
    use chrono::{TimeZone, Utc};

    fn entry() -> LogEntry {
        LogEntry::new(LogLevel::Info, "hello")
            .with_timestamp(
                Utc.with_ymd_and_hms(2024, 3, 9, 8, 7, 6)
                    .single()
                    .expect("valid datetime"),
            )
            .with_call_site(CallSite {
                file: "src/app/main.rs",
                line: 42,
            })
    }

    #[test]
    fn test_disabled_header() {
        let channel = Channel::new(FanOut::default(), "INFO : ", OutputFlags::DISABLED);
        assert_eq!(channel.render_line(&entry(), "hello"), "INFO : hello\n");
    }

    #[test]
    fn test_full_header() {
        let flags = OutputFlags::STD | OutputFlags::UTC | OutputFlags::SHORT_FILE;
        let channel = Channel::new(FanOut::default(), "INFO : ", flags);
        assert_eq!(
            channel.render_line(&entry(), "hello"),
            "INFO : 2024/03/09 08:07:06 main.rs:42: hello\n"
        );
    }

    #[test]
    fn test_msg_prefix_moves_tag() {
        let flags = OutputFlags::TIME | OutputFlags::UTC | OutputFlags::MSG_PREFIX;
        let channel = Channel::new(FanOut::default(), "WARN : ", flags);
        assert_eq!(
            channel.render_line(&entry(), "careful"),
            "08:07:06 WARN : careful\n"
        );
    }

    #[test]
    fn test_newline_not_doubled() {
        let channel = Channel::new(FanOut::default(), "", OutputFlags::DISABLED);
        assert_eq!(channel.render_line(&entry(), "done\n"), "done\n");
    }

    #[test]
    fn test_output_reaches_sink() {
        let sink = MemorySink::new();
        let channels = Channels::build(
            |_| FanOut::new(vec![sink.handle()]),
            |level| level.tag().to_string(),
            OutputFlags::DISABLED,
        );
        channels.get(LogLevel::Error).output(&entry(), "bad");
        assert_eq!(sink.contents(), "ERROR: bad\n");
    }
}
