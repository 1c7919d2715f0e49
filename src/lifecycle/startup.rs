//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the backend client for the configured kind
//! - Verify the backend answers before any listener is bound
//! - Start metrics, bind the listener, serve until shutdown
//!
//! # Design Decisions
//! - Subsystems initialize in order, not concurrently
//! - Listener starts last (traffic only when the backend is confirmed)

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{BackendConfig, BackendKind, BridgeConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::queue::{QueueError, SharedQueue};

/// Fatal errors before the bridge starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to connect to {kind} at {address}: {source}")]
    Backend {
        kind: BackendKind,
        address: String,
        #[source]
        source: QueueError,
    },

    #[error("{0} backend support is not compiled into this build")]
    BackendDisabled(BackendKind),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(String),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Create the backend handle and check it is reachable.
pub async fn connect_backend(config: &BackendConfig) -> Result<SharedQueue, StartupError> {
    let address = config.address();
    let wrap = |source| StartupError::Backend {
        kind: config.kind,
        address: address.to_string(),
        source,
    };

    let queue: SharedQueue = match config.kind {
        #[cfg(feature = "redis-backend")]
        BackendKind::Redis => Arc::new(crate::queue::RedisQueue::connect(address).await.map_err(wrap)?),
        #[cfg(feature = "kafka-backend")]
        BackendKind::Kafka => Arc::new(crate::queue::KafkaQueue::connect(address).map_err(wrap)?),
        #[allow(unreachable_patterns)]
        kind => return Err(StartupError::BackendDisabled(kind)),
    };

    queue.ping().await.map_err(wrap)?;

    tracing::info!(address = %address, "Connected to {}", queue.name());
    Ok(queue)
}

/// Run the bridge until Ctrl+C.
pub async fn run(config: BridgeConfig) -> Result<(), StartupError> {
    run_with_shutdown(config, Shutdown::new()).await
}

/// Run the bridge until Ctrl+C or `shutdown` is triggered.
pub async fn run_with_shutdown(config: BridgeConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.backend.kind,
        backend_address = %config.backend.address(),
        max_body_bytes = ?config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|e: std::net::AddrParseError| StartupError::Metrics(e.to_string()))?;
        metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    let queue = connect_backend(&config.backend).await?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let server = HttpServer::new(config, queue);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
