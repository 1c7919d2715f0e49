//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse and ports are numeric
//! - Validate value ranges (body limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before the backend is contacted

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{BackendKind, BridgeConfig};
use crate::queue::split_addresses;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("backend.address is empty")]
    EmptyBackendAddress,

    #[error("backend.address entry {0:?} is not host:port")]
    BackendAddress(String),

    #[error("backend.address {0:?} lists several hosts; redis takes exactly one")]
    MultipleRedisAddresses(String),

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    validate_backend_address(config.backend.kind, config.backend.address(), &mut errors);

    if config.limits.max_body_bytes == Some(0) {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_backend_address(kind: BackendKind, address: &str, errors: &mut Vec<ValidationError>) {
    if kind == BackendKind::Redis && address.contains("://") {
        return;
    }

    let entries = split_addresses(address);
    if entries.is_empty() {
        errors.push(ValidationError::EmptyBackendAddress);
        return;
    }

    if kind == BackendKind::Redis && address.contains(',') {
        errors.push(ValidationError::MultipleRedisAddresses(address.to_string()));
    }

    for entry in entries {
        if !is_host_port(entry) {
            errors.push(ValidationError::BackendAddress(entry.to_string()));
        }
    }
}

fn is_host_port(entry: &str) -> bool {
    match entry.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&BridgeConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = BridgeConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.backend.address = Some("redis-host".into());
        config.limits.max_body_bytes = Some(0);
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "bad".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("nowhere".into()),
                ValidationError::BackendAddress("redis-host".into()),
                ValidationError::ZeroBodyLimit,
                ValidationError::MetricsAddress("bad".into()),
            ]
        );
    }

    #[test]
    fn test_broker_list() {
        let mut config = BridgeConfig::default();
        config.backend.kind = BackendKind::Kafka;
        config.backend.address = Some("k1:9092, k2:9093".into());
        assert!(validate_config(&config).is_ok());

        config.backend.address = Some("k1:9092,k2:port".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::BackendAddress("k2:port".into())]
        );

        config.backend.address = Some(" ".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::EmptyBackendAddress]
        );
    }

    #[test]
    fn test_redis_rejects_address_list() {
        let mut config = BridgeConfig::default();
        config.backend.address = Some("a:6379,b:6379".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::MultipleRedisAddresses("a:6379,b:6379".into())]
        );

        config.backend.address = Some("a:6379,".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::MultipleRedisAddresses("a:6379,".into())]
        );

        config.backend.address = Some(" a:6379 ".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_redis_url_accepted() {
        let mut config = BridgeConfig::default();
        config.backend.address = Some("redis://:secret@cache:6379/1".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = BridgeConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());
    }
}
