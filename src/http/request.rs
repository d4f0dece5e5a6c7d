//! Request parsing, building and serialization.
//!
//! # Responsibilities
//! - Validate the request line (method, URI, version)
//! - Collect headers up to the blank separator line
//! - Derive host, port, path and cache locator
//! - Build canonical outbound requests for the origin leg
//!
//! # Design Decisions
//! - Only `GET` is accepted; anything else is a parse error
//! - Host comes from the URI authority, falling back to the `Host` header
//! - The request line is always re-rendered in origin form (path only)

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::cache::Locator;
use crate::http::error::ParseError;
use crate::http::headers::Headers;
use crate::http::version::HttpVersion;
use crate::http::CRLF;

/// Supported request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

/// Method tokens are matched case-insensitively.
impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Knobs applied while parsing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Highest protocol version accepted; also used by the request builder.
    pub max_version: HttpVersion,
    /// Port used when neither the URI nor the `Host` header names one.
    pub default_port: u16,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_version: HttpVersion::HTTP_11,
            default_port: 80,
        }
    }
}

/// A parsed, validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    version: HttpVersion,
    headers: Headers,
    host: String,
    port: u16,
    path: String,
    locator: Locator,
}

impl Request {
    /// Parse with the default options (HTTP/1.1 ceiling, port 80).
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        Self::parse_with(raw, &ParseOptions::default())
    }

    pub fn parse_with(raw: &[u8], options: &ParseOptions) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(raw).map_err(|_| ParseError::Decode)?;
        let mut lines = text.split(CRLF);
        let request_line = lines.next().unwrap_or_default();

        let tokens: Vec<&str> = request_line.split_whitespace().collect();
        let [method, uri, version_token] = tokens[..] else {
            return Err(ParseError::MalformedRequestLine(request_line.to_string()));
        };

        let method: Method = method.parse()?;
        let version = HttpVersion::parse_token(version_token)?;
        if version > options.max_version {
            return Err(ParseError::UnsupportedVersion(version_token.to_string()));
        }

        let mut headers = Headers::new();
        for line in lines.take_while(|line| !line.is_empty()) {
            let (key, value) = Headers::parse_line(line)?;
            headers.set(key, value);
        }

        let target = Target::resolve(uri, &headers, options.default_port)?;
        let locator = Locator::new(&target.host, &target.path);

        Ok(Self {
            method,
            version,
            headers,
            host: target.host,
            port: target.port,
            path: target.path,
            locator,
        })
    }

    /// Build a canonical `Host` + `Connection: close` request with no body.
    pub fn build(method: Method, host: &str, path: &str) -> Result<Self, ParseError> {
        Self::build_with(method, host, path, &ParseOptions::default())
    }

    /// Build at `options.max_version` and re-parse, so the result always
    /// round-trips through [`Request::to_bytes`].
    pub fn build_with(
        method: Method,
        host: &str,
        path: &str,
        options: &ParseOptions,
    ) -> Result<Self, ParseError> {
        let raw = format!(
            "{method} {path} {version}{CRLF}Host: {host}{CRLF}Connection: close{CRLF}{CRLF}",
            version = options.max_version,
        );
        Self::parse_with(raw.as_bytes(), options)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Add or update a header.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.set(key, value);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = format!("{} {} {}{CRLF}", self.method, self.path, self.version);
        self.headers.write_to(&mut out);
        out.push_str(CRLF);
        f.write_str(&out)
    }
}

/// Where a request points, derived from its URI and headers.
struct Target {
    host: String,
    port: u16,
    path: String,
}

impl Target {
    fn resolve(uri: &str, headers: &Headers, default_port: u16) -> Result<Self, ParseError> {
        let (uri_host, uri_port, path) = match Url::parse(uri) {
            Ok(url) => (host_of(&url), url.port(), url.path().to_string()),
            // Origin-form targets such as `/index.html` carry no authority.
            Err(_) => (None, None, strip_query(uri).to_string()),
        };

        let (host, header_port) = match uri_host {
            Some(host) => (host, None),
            None => headers
                .get("Host")
                .map(split_authority)
                .ok_or_else(|| ParseError::InvalidUri(uri.to_string()))?,
        };
        if host.is_empty() {
            return Err(ParseError::InvalidUri(uri.to_string()));
        }

        let path = if path.is_empty() { "/".to_string() } else { path };

        Ok(Self {
            host,
            port: uri_port.or(header_port).unwrap_or(default_port),
            path,
        })
    }
}

fn host_of(url: &Url) -> Option<String> {
    match url.host()? {
        url::Host::Domain(domain) => Some(domain.to_string()),
        url::Host::Ipv4(addr) => Some(addr.to_string()),
        url::Host::Ipv6(addr) => Some(addr.to_string()),
    }
}

fn strip_query(uri: &str) -> &str {
    uri.split(['?', '#']).next().unwrap_or_default()
}

/// Split a `Host` header value into host and optional port.
///
/// Bracketed IPv6 literals (`[::1]:8080`) lose their brackets, matching the
/// host form derived from absolute URIs.
fn split_authority(value: &str) -> (String, Option<u16>) {
    if let Some(literal) = value.strip_prefix('[') {
        if let Some((host, rest)) = literal.split_once(']') {
            let port = rest.strip_prefix(':').and_then(|port| port.parse().ok());
            return (host.to_string(), port);
        }
    }
    if let Some((host, port)) = value.rsplit_once(':') {
        if !host.contains(':') {
            if let Ok(port) = port.parse() {
                return (host.to_string(), Some(port));
            }
        }
    }
    (value.to_string(), None)
}
