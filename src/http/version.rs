//! HTTP protocol version token.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::http::error::ParseError;

/// Fractional digits kept after the decimal point.
const FRACTION_DIGITS: usize = 9;
const FRACTION_SCALE: u32 = 1_000_000_000;

/// An `HTTP/<number>` version, compared as a decimal number.
///
/// `HTTP/1.05 < HTTP/1.1 == HTTP/1.10 < HTTP/1.2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HttpVersion {
    major: u16,
    /// Fractional part in units of 10^-9.
    fraction: u32,
}

impl HttpVersion {
    pub const HTTP_10: HttpVersion = HttpVersion::new(1, 0);
    pub const HTTP_11: HttpVersion = HttpVersion::new(1, FRACTION_SCALE / 10);

    const fn new(major: u16, fraction: u32) -> Self {
        Self { major, fraction }
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    /// Parse a full protocol token such as `HTTP/1.1`.
    pub fn parse_token(token: &str) -> Result<Self, ParseError> {
        token
            .strip_prefix("HTTP/")
            .and_then(|number| number.parse().ok())
            .ok_or_else(|| ParseError::UnrecognizedVersion(token.to_string()))
    }

    fn fraction_digits(&self) -> String {
        let padded = format!("{:0width$}", self.fraction, width = FRACTION_DIGITS);
        match padded.trim_end_matches('0') {
            "" => "0".to_string(),
            digits => digits.to_string(),
        }
    }
}

impl Default for HttpVersion {
    fn default() -> Self {
        Self::HTTP_11
    }
}

/// Parses the bare number part: `1.1`, `1.05` or `1` (no fraction means `.0`).
impl FromStr for HttpVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::UnrecognizedVersion(s.to_string());
        let (major, fraction) = match s.split_once('.') {
            Some((major, fraction)) => (major, fraction),
            None => (s, "0"),
        };
        let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(major) || !is_digits(fraction) {
            return Err(invalid());
        }

        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > FRACTION_DIGITS {
            return Err(invalid());
        }
        let scaled = format!("{:0<width$}", fraction, width = FRACTION_DIGITS);

        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            fraction: scaled.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for HttpVersion {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HttpVersion> for String {
    fn from(version: HttpVersion) -> Self {
        format!("{}.{}", version.major, version.fraction_digits())
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.fraction_digits())
    }
}
