//! JSON formatter for structured logging
//!
//! Each call becomes a single-line JSON object. The reserved keys `time`,
//! `level` and `msg` always lead the object in that order; the remaining
//! keys follow in field-set order. Time and call site are encoded in the
//! body, so this formatter switches the channel header and prefixes off.

use crate::core::timestamp::{format_call_site, format_time};
use crate::core::{Formatter, LogEntry, LogFields, LogLevel, LoggerError, OutputFlags};

const RESERVED_KEYS: [&str; 3] = ["time", "level", "msg"];

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    /// `time` and `file` fields selected by `flags`.
    fn header_fields(&self, flags: OutputFlags, entry: &LogEntry) -> LogFields {
        let mut fields = LogFields::new();
        if let Some(time) = format_time(flags, &entry.timestamp) {
            fields.insert("time", time);
        }
        if let Some(site) = format_call_site(flags, entry.call_site_or_unknown()) {
            fields.insert("file", site);
        }
        fields
    }

    fn encoding_failure(&self, e: &serde_json::Error) -> LoggerError {
        LoggerError::formatter(self.name(), e.to_string())
    }
}

/// Encode a field set as a JSON object with reserved keys first.
pub fn encode_fields(fields: &LogFields) -> serde_json::Result<String> {
    let mut out = String::from("{");
    let mut first = true;

    let reserved = RESERVED_KEYS
        .iter()
        .filter_map(|key| fields.get(key).map(|value| (*key, value)));
    let rest = fields
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.as_str(), value));

    for (key, value) in reserved.chain(rest) {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&serde_json::to_string(key)?);
        out.push(':');
        out.push_str(&serde_json::to_string(&value.to_json_value())?);
    }

    out.push('}');
    Ok(out)
}

impl Formatter for JsonFormatter {
    fn output(&self, flags: OutputFlags, entry: &LogEntry) -> String {
        let body = LogFields::new()
            .with("msg", entry.message.as_str())
            .with("level", entry.level.name());
        let fields = entry
            .fields
            .clone()
            .add(body)
            .add(self.header_fields(flags, entry));

        match encode_fields(&fields) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("[LOGGER ERROR] {}", self.encoding_failure(&e));
                format!(
                    "{{\"level\":\"{}\",\"msg\":{}}}",
                    entry.level.name(),
                    serde_json::Value::String(entry.message.clone())
                )
            }
        }
    }

    fn channel_flags(&self) -> Option<OutputFlags> {
        Some(OutputFlags::DISABLED)
    }

    fn channel_prefix(&self, _level: LogLevel) -> Option<String> {
        Some(String::new())
    }

    fn name(&self) -> &str {
        "json"
    }
}
