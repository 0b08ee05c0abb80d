//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port, worker counts, rate-limit threshold)
//! - Check addresses parse before the listener ever tries to bind
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ApiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{IpAddr, SocketAddr};

use crate::config::schema::ApiConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("api.port must not be 0")]
    ZeroPort,

    #[error("api.host is not a valid IP address: {0}")]
    InvalidHost(String),

    #[error("rate_limit.requests_per_minute must be at least 1 when rate limiting is enabled")]
    ZeroRateLimit,

    #[error("thread_pool.workers must be at least 1")]
    ZeroWorkers,

    #[error("thread_pool.max_blocking must be at least 1")]
    ZeroBlocking,

    #[error("cors.allowed_origins must not be empty when CORS is enabled")]
    EmptyOrigins,

    #[error("metrics.address is not a valid socket address: {0}")]
    InvalidMetricsAddress(String),

    #[error("logging.level must be one of trace/debug/info/warn/error, got {0:?}")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.api.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.api.host.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::InvalidHost(config.api.host.clone()));
    }
    if config.rate_limit.enabled && config.rate_limit.requests_per_minute == 0 {
        errors.push(ValidationError::ZeroRateLimit);
    }
    if config.thread_pool.workers == 0 {
        errors.push(ValidationError::ZeroWorkers);
    }
    if config.thread_pool.max_blocking == 0 {
        errors.push(ValidationError::ZeroBlocking);
    }
    if config.cors.enabled && config.cors.allowed_origins.trim().is_empty() {
        errors.push(ValidationError::EmptyOrigins);
    }
    if config.metrics.enabled && config.metrics.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.metrics.address.clone(),
        ));
    }
    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
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
    fn default_config_is_valid() {
        assert!(validate_config(&ApiConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = ApiConfig::default();
        config.api.port = 0;
        config.api.host = "not-an-ip".into();
        config.thread_pool.workers = 0;
        config.logging.level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn zero_rate_limit_only_matters_when_enabled() {
        let mut config = ApiConfig::default();
        config.rate_limit.requests_per_minute = 0;
        assert!(validate_config(&config).is_err());

        config.rate_limit.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn metrics_address_checked_when_enabled() {
        let mut config = ApiConfig::default();
        config.metrics.enabled = true;
        config.metrics.address = "nowhere".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::InvalidMetricsAddress(_)
        ));
    }
}
