//! Message parsing errors.

use thiserror::Error;

/// Reasons a raw message could not be turned into a [`Request`] or [`Response`].
///
/// Every variant on the client leg is answered with a 500 response.
///
/// [`Request`]: crate::http::Request
/// [`Response`]: crate::http::Response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Can not decode message as UTF-8")]
    Decode,

    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("Unsupported or unrecognized HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Unrecognized HTTP version: {0}")]
    UnrecognizedVersion(String),

    #[error("Unsupported HTTP version: {0}")]
    UnsupportedVersion(String),

    #[error("Malformed header line: {0:?}")]
    MalformedHeader(String),

    #[error("Malformed request: Invalid URI {0:?}")]
    InvalidUri(String),

    #[error("Malformed status line: {0:?}")]
    MalformedStatusLine(String),

    #[error("Invalid status code: {0}")]
    InvalidStatusCode(String),

    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),
}
