//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports in the unreserved range)
//! - Reject cache layouts that cannot map onto the filesystem
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::{ListenerConfig, ProxyConfig};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    PortOutOfRange(u16),
    ZeroBacklog,
    ZeroBufferSize,
    ZeroOriginTimeout,
    EmptyCacheDir,
    InvalidDefaultFilename(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::PortOutOfRange(port) => write!(
                f,
                "listener.port {} must be between {} and {}",
                port,
                ListenerConfig::MIN_PORT,
                ListenerConfig::MAX_PORT
            ),
            ValidationError::ZeroBacklog => write!(f, "listener.backlog must be greater than 0"),
            ValidationError::ZeroBufferSize => write!(f, "http.buffer_size must be greater than 0"),
            ValidationError::ZeroOriginTimeout => {
                write!(f, "timeouts.origin_ms must be greater than 0")
            }
            ValidationError::EmptyCacheDir => write!(f, "cache.dir must not be empty"),
            ValidationError::InvalidDefaultFilename(name) => {
                write!(f, "cache.default_filename {:?} is not a plain file name", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port < ListenerConfig::MIN_PORT {
        errors.push(ValidationError::PortOutOfRange(config.listener.port));
    }
    if config.listener.backlog == 0 {
        errors.push(ValidationError::ZeroBacklog);
    }
    if config.http.buffer_size == 0 {
        errors.push(ValidationError::ZeroBufferSize);
    }
    if config.timeouts.origin_ms == 0 {
        errors.push(ValidationError::ZeroOriginTimeout);
    }
    if config.cache.dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyCacheDir);
    }
    let filename = &config.cache.default_filename;
    if matches!(filename.as_str(), "" | "." | "..") || filename.contains(['/', '\\']) {
        errors.push(ValidationError::InvalidDefaultFilename(filename.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid_config() -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.listener.port = 12_345;
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_reserved_port_rejected() {
        let mut config = valid_config();
        config.listener.port = 8080;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::PortOutOfRange(8080)]);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.listener.backlog = 0;
        config.http.buffer_size = 0;
        config.timeouts.origin_ms = 0;
        config.cache.dir = PathBuf::new();
        config.cache.default_filename = "a/b".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroBacklog,
                ValidationError::ZeroBufferSize,
                ValidationError::ZeroOriginTimeout,
                ValidationError::EmptyCacheDir,
                ValidationError::InvalidDefaultFilename("a/b".to_string()),
            ]
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ValidationError::PortOutOfRange(80).to_string(),
            "listener.port 80 must be between 10000 and 65535"
        );
    }
}
