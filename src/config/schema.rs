//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! default every field, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::observability::logging::LogFormat;

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    /// HTTP listener settings.
    pub listener: ListenerConfig,

    /// Queue backend selection and address.
    pub backend: BackendConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Which queue system receives envelopes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Redis list (LPUSH).
    #[default]
    Redis,
    /// Kafka topic.
    Kafka,
}

impl BackendKind {
    /// Address used when none is configured.
    pub fn default_address(&self) -> &'static str {
        match self {
            BackendKind::Redis => "localhost:6379",
            BackendKind::Kafka => "localhost:9092",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Redis => write!(f, "redis"),
            BackendKind::Kafka => write!(f, "kafka"),
        }
    }
}

/// Queue backend configuration.
///
/// The list key / topic name is fixed and deliberately not part of it.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend type.
    pub kind: BackendKind,

    /// `host:port`, a comma-separated list of them, or a `redis://` URL.
    /// Falls back to the kind's default when unset.
    pub address: Option<String>,
}

impl BackendConfig {
    /// Effective backend address.
    pub fn address(&self) -> &str {
        self.address
            .as_deref()
            .unwrap_or_else(|| self.kind.default_address())
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum captured body size in bytes. Unset means unbounded.
    pub max_body_bytes: Option<usize>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Scrape endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
