//! Serializable logger configuration
//!
//! ```
//! use rust_fanout_logger::prelude::*;
//!
//! let config = LoggerConfig::from_json_str(
//!     r#"{ "level": "debug", "flags": "date|time|shortfile", "format": "json",
//!          "context": { "service": "billing" } }"#,
//! )?;
//! let logger = LoggerBuilder::from_config(&config)?.detached().build();
//! logger.debug("configured");
//! # Ok::<(), LoggerError>(())
//! ```

use super::error::{LoggerError, Result};
use super::fields::LogFields;
use super::flags::OutputFlags;
use super::formatter::Formatter;
use super::log_level::{LevelMask, LogLevel, SeverityGate};
use super::logger::LoggerBuilder;
use crate::formatters::{JsonFormatter, PlainFormatter};
use crate::sinks::FileSink;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which formatter a configured logger uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    #[default]
    Plain,
    Json,
    Colorized,
}

impl FormatKind {
    pub fn formatter(self) -> Result<Arc<dyn Formatter>> {
        match self {
            FormatKind::Plain => Ok(Arc::new(PlainFormatter::new())),
            FormatKind::Json => Ok(Arc::new(JsonFormatter::new())),
            #[cfg(feature = "console")]
            FormatKind::Colorized => Ok(Arc::new(crate::formatters::ColorizedFormatter::new())),
            #[cfg(not(feature = "console"))]
            FormatKind::Colorized => Err(LoggerError::config(
                "format",
                "colorized output requires the `console` feature",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Severity threshold name
    pub level: String,
    /// Explicit set of enabled levels; overrides `level` when present
    pub levels: Option<Vec<String>>,
    /// Header flags, e.g. `"date|time|shortfile"`
    pub flags: String,
    pub format: FormatKind,
    /// Source name for the system log; attaches it when present
    pub system_log: Option<String>,
    /// File used as the explicit writer
    pub file: Option<PathBuf>,
    /// Fields bound to every call
    pub context: LogFields,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default().name().to_string(),
            levels: None,
            flags: OutputFlags::STD.to_string(),
            format: FormatKind::default(),
            system_log: None,
            file: None,
            context: LogFields::new(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn gate(&self) -> Result<SeverityGate> {
        match &self.levels {
            Some(names) => {
                let mut mask = LevelMask::NONE;
                for name in names {
                    mask |= parse_level(name)?;
                }
                Ok(SeverityGate::Mask(mask))
            }
            None => parse_level(&self.level).map(SeverityGate::Threshold),
        }
    }

    pub fn output_flags(&self) -> Result<OutputFlags> {
        self.flags
            .parse()
            .map_err(|_| LoggerError::InvalidFlag(self.flags.clone()))
    }
}

fn parse_level(name: &str) -> Result<LogLevel> {
    name.parse()
        .map_err(|_| LoggerError::InvalidLevel(name.to_string()))
}

impl LoggerBuilder {
    /// Builder preloaded from `config`.
    ///
    /// Fails on unknown level or flag names and when the configured file
    /// cannot be opened.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let mut builder = LoggerBuilder::new()
            .gate(config.gate()?)
            .flags(config.output_flags()?)
            .formatter_arc(config.format.formatter()?)
            .context(config.context.clone());

        if let Some(ref source) = config.system_log {
            builder = builder.name(source.as_str()).system_log(true);
        }
        if let Some(ref path) = config.file {
            builder = builder.writer(FileSink::new(path.clone())?);
        }

        Ok(builder)
    }
}
