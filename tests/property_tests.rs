//! Property-based tests for rust_fanout_logger using proptest

use proptest::prelude::*;
use rust_fanout_logger::core::parse_rendered;
use rust_fanout_logger::prelude::*;
use std::collections::BTreeMap;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Fatal),
        Just(LogLevel::Panic),
        Just(LogLevel::Error),
        Just(LogLevel::Warning),
        Just(LogLevel::Info),
        Just(LogLevel::Debug),
    ]
}

fn any_fields() -> impl Strategy<Value = LogFields> {
    prop::collection::btree_map("[a-z_]{1,8}", any::<i64>(), 0..6)
        .prop_map(|map| map.into_iter().collect::<LogFields>())
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    /// Threshold T enables L exactly when T >= L
    #[test]
    fn test_threshold_gate(threshold in any_level(), candidate in any_level()) {
        let gate = SeverityGate::Threshold(threshold);
        prop_assert_eq!(gate.enabled(candidate), threshold >= candidate);
        prop_assert_eq!(gate.as_mask().contains(candidate), threshold >= candidate);
    }

    /// A mask enables exactly the levels it was built from
    #[test]
    fn test_mask_gate(levels in prop::collection::vec(any_level(), 0..6), candidate in any_level()) {
        let gate = SeverityGate::Mask(LevelMask::from_levels(&levels));
        prop_assert_eq!(gate.enabled(candidate), levels.contains(&candidate));
    }

    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_string().parse().unwrap();
        prop_assert_eq!(level, parsed);
        let upper: LogLevel = level.name().to_uppercase().parse().unwrap();
        prop_assert_eq!(level, upper);
    }

    #[test]
    fn test_level_invalid_parse(invalid in "[0-9 ]{1,10}") {
        prop_assert!(invalid.parse::<LogLevel>().is_err());
    }
}

// ============================================================================
// Field Merge Tests
// ============================================================================

proptest! {
    #[test]
    fn test_merge_with_empty_is_identity(fields in any_fields()) {
        prop_assert_eq!(fields.clone().add(LogFields::new()), fields.clone());
        prop_assert_eq!(LogFields::new().add(fields.clone()), fields);
    }

    /// Every key survives the merge and the right-hand side wins
    #[test]
    fn test_merge_last_write_wins(base in any_fields(), extra in any_fields()) {
        let merged = base.clone().add(extra.clone());
        for (key, value) in &base {
            if !extra.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        for (key, value) in &extra {
            prop_assert_eq!(merged.get(key), Some(value));
        }
    }
}

// ============================================================================
// Rendering Tests
// ============================================================================

proptest! {
    /// Plain output parses back into the same fields and message.
    ///
    /// Values may carry quotes, backslashes and `=`. The message's first
    /// word never contains `=`, since a field-shaped first word reads as a
    /// field.
    #[test]
    fn test_plain_render_parse_roundtrip(
        fields in prop::collection::btree_map("[a-z]{1,6}", "[a-zA-Z0-9 =\"\\\\]{0,12}", 0..5),
        message in "[a-zA-Z0-9\"]{1,8}( [a-zA-Z0-9 =\"]{0,24})?",
    ) {
        let log_fields: LogFields = fields.clone().into_iter().collect();
        let entry = LogEntry::new(LogLevel::Info, message.clone()).with_fields(log_fields);
        let output = PlainFormatter::new().output(OutputFlags::DISABLED, &entry);

        let (parsed, rest) = parse_rendered(&output);
        let expected: BTreeMap<String, String> = fields;
        prop_assert_eq!(parsed, expected);
        prop_assert_eq!(rest, message.as_str());
    }

    #[test]
    fn test_message_never_spans_lines(message in ".*") {
        let entry = LogEntry::new(LogLevel::Warning, message);
        prop_assert!(!entry.message.contains('\n'));
        prop_assert!(!entry.message.contains('\r'));
        prop_assert!(!entry.message.contains('\t'));
    }

    /// JSON output is a single object whose msg is the sanitized message
    #[test]
    fn test_json_output_parses(message in ".*", fields in any_fields(), level in any_level()) {
        let entry = LogEntry::new(level, message).with_fields(fields);
        let json = JsonFormatter::new().output(OutputFlags::STD, &entry);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(value["msg"].as_str(), Some(entry.message.as_str()));
        prop_assert_eq!(value["level"].as_str(), Some(level.name()));
        prop_assert!(!json.contains('\n'));
    }

    #[test]
    fn test_flags_str_roundtrip(bits in 0u32..128) {
        let flags = OutputFlags::from_bits(bits);
        let parsed: OutputFlags = flags.to_string().parse().unwrap();
        prop_assert_eq!(flags, parsed);
    }
}
