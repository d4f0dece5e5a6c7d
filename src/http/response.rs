//! Response parsing, building and serialization.
//!
//! # Responsibilities
//! - Split a raw response into header block and body
//! - Track body completeness against `Content-Length`
//! - Build responses that re-parse to themselves (cache hits, errors)
//!
//! # Design Decisions
//! - The header block must be UTF-8; the body is kept as raw bytes so a
//!   multi-byte character split across two reads is reassembled intact
//! - A status line needs a version and a code; the message may be empty

use std::fmt::Write as _;

use crate::http::error::ParseError;
use crate::http::headers::Headers;
use crate::http::status;
use crate::http::version::HttpVersion;
use crate::http::{CONTENT_LENGTH, CRLF};

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// A parsed or synthesized response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    version: HttpVersion,
    status_code: u16,
    status_message: String,
    headers: Headers,
    body: Vec<u8>,
}

impl Response {
    /// Parse a (possibly partial) response. Everything after the first blank
    /// line is body; a missing blank line means an empty body.
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        let (head, body) = match find_head_end(raw) {
            Some(end) => (&raw[..end], &raw[end + HEAD_TERMINATOR.len()..]),
            None => (raw, &[][..]),
        };
        let head = std::str::from_utf8(head).map_err(|_| ParseError::Decode)?;
        let mut lines = head.split(CRLF);

        let status_line = lines.next().unwrap_or_default();
        let mut tokens = status_line.split_whitespace();
        let (Some(version), Some(code)) = (tokens.next(), tokens.next()) else {
            return Err(ParseError::MalformedStatusLine(status_line.to_string()));
        };
        let version = HttpVersion::parse_token(version)
            .map_err(|_| ParseError::MalformedStatusLine(status_line.to_string()))?;
        let status_code = code
            .parse()
            .map_err(|_| ParseError::InvalidStatusCode(code.to_string()))?;
        let status_message = tokens.collect::<Vec<_>>().join(" ");

        let mut headers = Headers::new();
        for line in lines.filter(|line| !line.is_empty()) {
            let (key, value) = Headers::parse_line(line)?;
            headers.set(key, value);
        }
        if let Some(value) = headers.get(CONTENT_LENGTH) {
            if value.parse::<usize>().is_err() {
                return Err(ParseError::InvalidContentLength(value.to_string()));
            }
        }

        Ok(Self {
            version,
            status_code,
            status_message,
            headers,
            body: body.to_vec(),
        })
    }

    /// Build an HTTP/1.1 response. See [`Response::build_with`].
    pub fn build(status_code: u16, message: &str, body: impl Into<Vec<u8>>) -> Result<Self, ParseError> {
        Self::build_with(HttpVersion::HTTP_11, status_code, message, body)
    }

    /// Build a response with `Content-Length` computed from `body` and
    /// `Connection: close`, then re-parse it, so the result always
    /// round-trips through [`Response::to_bytes`].
    pub fn build_with(
        version: HttpVersion,
        status_code: u16,
        message: &str,
        body: impl Into<Vec<u8>>,
    ) -> Result<Self, ParseError> {
        if message.contains(['\r', '\n']) {
            return Err(ParseError::MalformedStatusLine(message.to_string()));
        }
        Self::parse(&Self::synthesize(version, status_code, message, body.into()).to_bytes())
    }

    /// `200 OK` carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::ok_with(HttpVersion::HTTP_11, body)
    }

    pub fn ok_with(version: HttpVersion, body: impl Into<Vec<u8>>) -> Self {
        Self::synthesize(version, status::OK, status::reason_phrase(status::OK), body.into())
    }

    /// Empty `500 Internal Server Error`.
    pub fn internal_error() -> Self {
        Self::internal_error_with(HttpVersion::HTTP_11)
    }

    pub fn internal_error_with(version: HttpVersion) -> Self {
        let code = status::INTERNAL_SERVER_ERROR;
        Self::synthesize(version, code, status::reason_phrase(code), Vec::new())
    }

    /// Canonical form of a response whose status line is known to be valid.
    fn synthesize(version: HttpVersion, status_code: u16, message: &str, body: Vec<u8>) -> Self {
        let mut headers = Headers::new();
        headers.set(CONTENT_LENGTH, body.len().to_string());
        headers.set("Connection", "close");
        Self {
            version,
            status_code,
            status_message: message.to_string(),
            headers,
            body,
        }
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Declared body length, if the `Content-Length` header is present and numeric.
    pub fn content_length(&self) -> Option<usize> {
        self.headers.get(CONTENT_LENGTH)?.parse().ok()
    }

    /// True iff the body length equals the declared `Content-Length`.
    /// Always false when no length is declared.
    pub fn has_full_body(&self) -> bool {
        self.content_length() == Some(self.body.len())
    }

    /// Bytes still expected before the body is complete; `None` when the
    /// body is delimited by connection close instead.
    pub fn body_remaining(&self) -> Option<usize> {
        self.content_length()
            .map(|expected| expected.saturating_sub(self.body.len()))
    }

    /// Append newly received body bytes in arrival order.
    pub fn extend_body(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    /// Add or update a header.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.set(key, value);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = String::new();
        let _ = write!(head, "{} {} {}{CRLF}", self.version, self.status_code, self.status_message);
        self.headers.write_to(&mut head);
        head.push_str(CRLF);

        let mut out = head.into_bytes();
        out.extend_from_slice(&self.body);
        out
    }
}

/// Offset of the blank line ending the header block.
pub(crate) fn find_head_end(raw: &[u8]) -> Option<usize> {
    raw.windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}
