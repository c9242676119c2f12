//! Output header flags
//!
//! Flags decide which decorations a channel writes in front of each line.
//! They are independent from the severity gate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OutputFlags(u32);

impl OutputFlags {
    /// Date in the local time zone: `2009/01/23`
    pub const DATE: OutputFlags = OutputFlags(1);
    /// Time in the local time zone: `01:23:23`
    pub const TIME: OutputFlags = OutputFlags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Implies TIME.
    pub const MICROSECONDS: OutputFlags = OutputFlags(1 << 2);
    /// Full file name and line number: `/a/b/c/main.rs:23`
    pub const LONG_FILE: OutputFlags = OutputFlags(1 << 3);
    /// Final path element and line number: `main.rs:23`. Overrides LONG_FILE.
    pub const SHORT_FILE: OutputFlags = OutputFlags(1 << 4);
    /// Use UTC instead of the local time zone for DATE and TIME.
    pub const UTC: OutputFlags = OutputFlags(1 << 5);
    /// Move the level prefix from the start of the line to just before the message.
    pub const MSG_PREFIX: OutputFlags = OutputFlags(1 << 6);
    pub const STD: OutputFlags = OutputFlags(Self::DATE.0 | Self::TIME.0);
    pub const DISABLED: OutputFlags = OutputFlags(0);

    const NAMES: [(&'static str, OutputFlags); 7] = [
        ("date", Self::DATE),
        ("time", Self::TIME),
        ("microseconds", Self::MICROSECONDS),
        ("longfile", Self::LONG_FILE),
        ("shortfile", Self::SHORT_FILE),
        ("utc", Self::UTC),
        ("msgprefix", Self::MSG_PREFIX),
    ];

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        OutputFlags(bits & 0b111_1111)
    }

    /// All bits of `other` are set.
    #[inline]
    pub const fn contains(&self, other: OutputFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Any bit of `other` is set.
    #[inline]
    pub const fn intersects(&self, other: OutputFlags) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub(crate) fn wants_time(&self) -> bool {
        self.intersects(Self::DATE | Self::TIME | Self::MICROSECONDS)
    }

    pub(crate) fn wants_call_site(&self) -> bool {
        self.intersects(Self::SHORT_FILE | Self::LONG_FILE)
    }
}

impl BitOr for OutputFlags {
    type Output = OutputFlags;

    fn bitor(self, rhs: OutputFlags) -> OutputFlags {
        OutputFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for OutputFlags {
    fn bitor_assign(&mut self, rhs: OutputFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for OutputFlags {
    type Output = OutputFlags;

    fn bitand(self, rhs: OutputFlags) -> OutputFlags {
        OutputFlags(self.0 & rhs.0)
    }
}

impl fmt::Display for OutputFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("disabled");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        f.write_str(&names.join("|"))
    }
}

/// Parses `|`- or `,`-separated flag names, e.g. `"date|microseconds|shortfile"`.
impl FromStr for OutputFlags {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = OutputFlags::DISABLED;
        for part in s.split(['|', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            let part = part.to_lowercase();
            match part.as_str() {
                "std" => flags |= Self::STD,
                "disabled" | "none" => {}
                name => {
                    let (_, flag) = Self::NAMES
                        .iter()
                        .find(|(known, _)| *known == name)
                        .ok_or_else(|| format!("Invalid output flag: '{}'", name))?;
                    flags |= *flag;
                }
            }
        }
        Ok(flags)
    }
}

impl TryFrom<String> for OutputFlags {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFlags> for String {
    fn from(flags: OutputFlags) -> Self {
        flags.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_is_date_and_time() {
        assert!(OutputFlags::STD.contains(OutputFlags::DATE));
        assert!(OutputFlags::STD.contains(OutputFlags::TIME));
        assert!(!OutputFlags::STD.intersects(OutputFlags::MICROSECONDS));
        assert!(OutputFlags::DISABLED.is_empty());
    }

    #[test]
    fn test_parse_and_display() {
        let flags: OutputFlags = "date|microseconds|shortfile".parse().unwrap();
        assert_eq!(
            flags,
            OutputFlags::DATE | OutputFlags::MICROSECONDS | OutputFlags::SHORT_FILE
        );
        assert_eq!(flags.to_string(), "date|microseconds|shortfile");
        assert_eq!("std".parse::<OutputFlags>().unwrap(), OutputFlags::STD);
        assert_eq!("".parse::<OutputFlags>().unwrap(), OutputFlags::DISABLED);
        assert_eq!(OutputFlags::DISABLED.to_string(), "disabled");
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "date|seconds".parse::<OutputFlags>().unwrap_err();
        assert!(err.contains("seconds"));
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&OutputFlags::STD).unwrap();
        assert_eq!(json, "\"date|time\"");
        let flags: OutputFlags = serde_json::from_str("\"utc,time\"").unwrap();
        assert_eq!(flags, OutputFlags::UTC | OutputFlags::TIME);
    }
}
