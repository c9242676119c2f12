//! Structured key/value fields attached to log calls
//!
//! This module provides:
//! - `FieldValue`: a single typed value
//! - `LogFields`: a key-ordered field set with last-write-wins merging
//! - Plain `key=value` rendering and the matching parser

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
    /// Arbitrary serializable data, rendered as compact JSON in plain output
    Json(serde_json::Value),
}

impl FieldValue {
    /// Capture a value through its `Display` implementation.
    pub fn display(value: &impl fmt::Display) -> Self {
        FieldValue::String(value.to_string())
    }

    /// Capture a value through its `Debug` implementation.
    pub fn debug(value: &impl fmt::Debug) -> Self {
        FieldValue::String(format!("{:?}", value))
    }

    /// Capture any serializable value as structured JSON.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(FieldValue::Json)
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::UInt(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Json(v) => v.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Json(serde_json::Value::String(s)) => f.write_str(s),
            FieldValue::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::UInt(u)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Json(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Set of structured fields, ordered by key.
///
/// Field sets are values: merging produces a new set instead of mutating a
/// shared one, so a set handed to one log call can never leak into another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogFields {
    fields: BTreeMap<String, FieldValue>,
}

impl LogFields {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, replacing any previous value under the same key
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    /// Union of both sets where `additional` wins on key collisions.
    ///
    /// When either side is empty the other one is returned as is.
    #[must_use]
    pub fn add(self, additional: LogFields) -> LogFields {
        if self.is_empty() {
            return additional;
        }
        if additional.is_empty() {
            return self;
        }

        let mut merged = self;
        merged.fields.extend(additional.fields);
        merged
    }

    /// Render as `key=value ` pairs in key order.
    ///
    /// Every pair is followed by a single space so the message can be
    /// appended directly. Values containing whitespace or `"` are
    /// double-quoted, with `"` and `\` inside the quotes backslash-escaped.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.fields {
            let value = value.to_string();
            out.push_str(key);
            out.push('=');
            if value.contains(|c: char| c.is_whitespace() || c == '"') {
                push_quoted(&mut out, &value);
            } else {
                out.push_str(&value);
            }
            out.push(' ');
        }
        out
    }
}

fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

impl fmt::Display for LogFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render().trim_end())
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for LogFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>, const N: usize> From<[(K, V); N]> for LogFields {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for LogFields {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a LogFields {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Split a plain rendered payload back into its fields and message.
///
/// Leading `key=value` tokens are consumed until the first token that is not
/// one; the rest of the line is the message. Quoting is undone, so values
/// come back as the strings [`LogFields::render`] produced.
///
/// Messages are written raw, so a message whose first word itself looks
/// like `key=value` followed by a space cannot be told apart from a field
/// and is parsed as one.
pub fn parse_rendered(line: &str) -> (BTreeMap<String, String>, &str) {
    let mut fields = BTreeMap::new();
    let mut rest = line;

    loop {
        let Some((key, after_eq)) = split_key(rest) else {
            break;
        };

        let (value, remainder) = if let Some(quoted) = after_eq.strip_prefix('"') {
            match unquote(quoted) {
                Some(parsed) => parsed,
                None => break,
            }
        } else {
            let end = after_eq.find(' ').unwrap_or(after_eq.len());
            (after_eq[..end].to_string(), &after_eq[end..])
        };

        // A field token is always terminated by the separator space.
        let Some(remainder) = remainder.strip_prefix(' ') else {
            break;
        };

        fields.insert(key.to_string(), value);
        rest = remainder;
    }

    (fields, rest)
}

/// Read a quoted value up to its closing quote, undoing backslash escapes.
fn unquote(s: &str) -> Option<(String, &str)> {
    let mut value = String::with_capacity(s.len());
    let mut chars = s.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(escaped);
            }
            '"' => return Some((value, &s[idx + 1..])),
            _ => value.push(c),
        }
    }
    None
}

fn split_key(s: &str) -> Option<(&str, &str)> {
    let eq = s.find('=')?;
    let key = &s[..eq];
    if key.is_empty() || key.contains(char::is_whitespace) || key.contains('"') {
        return None;
    }
    Some((key, &s[eq + 1..]))
}
