//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::{HttpVersion, ParseOptions};

/// Root configuration for the caching proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host, port, backlog).
    pub listener: ListenerConfig,

    /// Message handling limits.
    pub http: HttpConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Cache storage settings.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host name or address to bind (e.g., "localhost").
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Pending connection queue length passed to `listen(2)`.
    pub backlog: u32,
}

impl ListenerConfig {
    /// Lowest port accepted from the command line or a config file.
    pub const MIN_PORT: u16 = 10_000;
    pub const MAX_PORT: u16 = 65_535;
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: Self::MIN_PORT,
            backlog: 5,
        }
    }
}

/// HTTP message handling.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    /// Size of each socket read, on both the client and origin legs.
    pub buffer_size: usize,

    /// Highest accepted request version (e.g., "1.1").
    pub max_version: HttpVersion,

    /// Origin port used when the request names none.
    pub default_port: u16,
}

impl HttpConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_version: self.max_version,
            default_port: self.default_port,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            buffer_size: 4096,
            max_version: HttpVersion::HTTP_11,
            default_port: 80,
        }
    }
}

/// Timeout configuration for the origin leg.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for each connect, write and read against an origin, in milliseconds.
    pub origin_ms: u64,
}

impl TimeoutConfig {
    pub fn origin(&self) -> Duration {
        Duration::from_millis(self.origin_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { origin_ms: 1000 }
    }
}

/// Cache storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root, relative to the working directory unless absolute.
    pub dir: PathBuf,

    /// File name used for locators ending in `/`.
    pub default_filename: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("cache"),
            default_filename: "idx".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
