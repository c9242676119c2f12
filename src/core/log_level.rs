//! Log level definitions and the severity gate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Severity of a log call.
///
/// Lower values are more severe. A threshold enables every level that is at
/// least as severe as itself, so `LogLevel::Info` enables Fatal through Info
/// and leaves Debug out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Fatal = 0,
    Panic = 1,
    Error = 2,
    #[serde(alias = "warn")]
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
}

impl LogLevel {
    /// Every level, most severe first.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Panic,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Lowercase name used in structured output (`"level":"warning"`)
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Panic => "panic",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Fixed-width channel prefix written ahead of plain-text lines.
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL: ",
            LogLevel::Panic => "PANIC: ",
            LogLevel::Error => "ERROR: ",
            LogLevel::Warning => "WARN : ",
            LogLevel::Info => "INFO : ",
            LogLevel::Debug => "DEBUG: ",
        }
    }

    /// Whether a threshold of `self` lets a call at `candidate` through.
    #[inline]
    pub fn enables(&self, candidate: LogLevel) -> bool {
        *self >= candidate
    }

    /// Bit owned by this level inside a [`LevelMask`].
    #[inline]
    pub fn bit(&self) -> u8 {
        1 << (*self as u8)
    }

    /// Levels that end the caller's control flow after the line is written.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LogLevel::Fatal | LogLevel::Panic)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Fatal => BrightRed,
            LogLevel::Panic => Magenta,
            LogLevel::Error => Red,
            LogLevel::Warning => Yellow,
            LogLevel::Info => Cyan,
            LogLevel::Debug => White,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "panic" => Ok(LogLevel::Panic),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Bit set of enabled levels, one bit per [`LogLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelMask(u8);

impl LevelMask {
    pub const NONE: LevelMask = LevelMask(0);
    pub const ALL: LevelMask = LevelMask(0b11_1111);
    /// Everything except Debug, which is opt-in.
    pub const DEFAULT: LevelMask = LevelMask(0b01_1111);

    pub fn from_levels(levels: &[LogLevel]) -> Self {
        levels.iter().fold(Self::NONE, |mask, level| mask.with(*level))
    }

    /// Mask equivalent to an ordered threshold.
    pub fn up_to(threshold: LogLevel) -> Self {
        LogLevel::ALL
            .iter()
            .filter(|level| threshold.enables(**level))
            .fold(Self::NONE, |mask, level| mask.with(*level))
    }

    #[must_use]
    pub fn with(self, level: LogLevel) -> Self {
        LevelMask(self.0 | level.bit())
    }

    #[must_use]
    pub fn without(self, level: LogLevel) -> Self {
        LevelMask(self.0 & !level.bit())
    }

    #[inline]
    pub fn contains(&self, level: LogLevel) -> bool {
        self.0 & level.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl BitOr<LogLevel> for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LogLevel) -> LevelMask {
        self.with(rhs)
    }
}

impl BitOr for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LevelMask) -> LevelMask {
        LevelMask(self.0 | rhs.0)
    }
}

impl BitOrAssign<LogLevel> for LevelMask {
    fn bitor_assign(&mut self, rhs: LogLevel) {
        *self = self.with(rhs);
    }
}

/// Decides whether a call at a given level produces a line.
///
/// Two flavours are supported side by side: an ordered threshold and an
/// explicit bit mask. `SeverityGate::OFF` never lets anything through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityGate {
    Threshold(LogLevel),
    Mask(LevelMask),
}

impl SeverityGate {
    pub const OFF: SeverityGate = SeverityGate::Mask(LevelMask::NONE);

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        match self {
            SeverityGate::Threshold(threshold) => threshold.enables(level),
            SeverityGate::Mask(mask) => mask.contains(level),
        }
    }

    /// The gate expressed as a mask, whichever flavour it was set with.
    pub fn as_mask(&self) -> LevelMask {
        match self {
            SeverityGate::Threshold(threshold) => LevelMask::up_to(*threshold),
            SeverityGate::Mask(mask) => *mask,
        }
    }
}

impl Default for SeverityGate {
    fn default() -> Self {
        SeverityGate::Threshold(LogLevel::default())
    }
}

impl From<LogLevel> for SeverityGate {
    fn from(level: LogLevel) -> Self {
        SeverityGate::Threshold(level)
    }
}

impl From<LevelMask> for SeverityGate {
    fn from(mask: LevelMask) -> Self {
        SeverityGate::Mask(mask)
    }
}
