//! Command-line arguments.
//!
//! CLI values override whatever the optional config file sets.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::loader::{read_config, ConfigError};
use crate::config::schema::{BackendKind, BridgeConfig};
use crate::config::validation::validate_config;
use crate::observability::logging::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "queue-bridge")]
#[command(about = "Accepts any HTTP request and enqueues it to Redis or Kafka", long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "QUEUE_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// HTTP bind address.
    #[arg(short, long, env = "QUEUE_BRIDGE_LISTEN")]
    pub listen: Option<String>,

    /// Log line format.
    #[arg(long, value_enum, env = "QUEUE_BRIDGE_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub backend: Option<BackendCommand>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum BackendCommand {
    /// Push envelopes onto a Redis list
    Redis {
        /// Redis server address
        #[arg(long, default_value = "localhost:6379")]
        addr: String,
    },
    /// Produce envelopes to a Kafka topic
    Kafka {
        /// Comma-separated broker list
        #[arg(long, default_value = "localhost:9092")]
        brokers: String,
    },
}

impl Cli {
    /// Resolve the final configuration: file (or defaults), then CLI
    /// overrides, then validation.
    pub fn into_config(self) -> Result<BridgeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => BridgeConfig::default(),
        };

        if let Some(listen) = self.listen {
            config.listener.bind_address = listen;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
        match self.backend {
            Some(BackendCommand::Redis { addr }) => {
                config.backend.kind = BackendKind::Redis;
                config.backend.address = Some(addr);
            }
            Some(BackendCommand::Kafka { brokers }) => {
                config.backend.kind = BackendKind::Kafka;
                config.backend.address = Some(brokers);
            }
            None => {}
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
