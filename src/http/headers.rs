//! Header map with overwrite semantics.
//!
//! Keys are compared exactly as received: `Host` and `host` are distinct.
//! Setting an existing key replaces its value in place, so serialization
//! order is first-insertion order.

use crate::http::error::ParseError;
use crate::http::CRLF;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header, or update it if the key is already present.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a single `Key: Value` line. Both sides are trimmed; the value
    /// keeps any further colons.
    pub(crate) fn parse_line(line: &str) -> Result<(String, String), ParseError> {
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;
        Ok((key.trim().to_string(), value.trim().to_string()))
    }

    /// Render every header as `key: value\r\n`.
    pub(crate) fn write_to(&self, out: &mut String) {
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(CRLF);
        }
    }
}
