//! Log entry structure

use super::fields::LogFields;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::panic::Location;

/// Source location a log line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Placeholder used when the caller cannot be determined.
    pub const UNKNOWN: CallSite = CallSite {
        file: "???",
        line: 0,
    };

    /// Location of the caller of the enclosing `#[track_caller]` chain.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        CallSite {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// Everything a formatter needs to render one call.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub fields: LogFields,
    pub call_site: Option<CallSite>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            level,
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            fields: LogFields::new(),
            call_site: None,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: LogFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_call_site(mut self, call_site: CallSite) -> Self {
        self.call_site = Some(call_site);
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Call site, or [`CallSite::UNKNOWN`] when none was captured.
    pub fn call_site_or_unknown(&self) -> CallSite {
        self.call_site.unwrap_or(CallSite::UNKNOWN)
    }
}
