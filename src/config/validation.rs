//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits ≥ 1, intervals > 0)
//! - Check the bind address parses as a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ContactConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ContactConfig;

const KNOWN_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "rate_limit.max_requests").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ContactConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not a valid socket address: {:?}", config.listener.bind_address),
        });
    }

    if config.listener.max_body_bytes < 1024 {
        errors.push(ValidationError {
            field: "listener.max_body_bytes".into(),
            message: "must be at least 1024".into(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".into(),
            message: "must be at least 1".into(),
        });
    }

    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError {
            field: "rate_limit.max_requests".into(),
            message: "must be at least 1".into(),
        });
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError {
            field: "rate_limit.window_secs".into(),
            message: "must be at least 1".into(),
        });
    }

    if config.rate_limit.sweep_interval_secs == 0 {
        errors.push(ValidationError {
            field: "rate_limit.sweep_interval_secs".into(),
            message: "must be at least 1".into(),
        });
    }

    if !KNOWN_LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError {
            field: "observability.log_level".into(),
            message: format!(
                "unknown level {:?}, expected one of {}",
                config.observability.log_level,
                KNOWN_LOG_LEVELS.join(", ")
            ),
        });
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

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ContactConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ContactConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.rate_limit.max_requests = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);

        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"listener.bind_address"));
        assert!(fields.contains(&"rate_limit.max_requests"));
        assert!(fields.contains(&"observability.log_level"));
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = ContactConfig::default();
        config.rate_limit.window_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "rate_limit.window_secs");
    }
}
