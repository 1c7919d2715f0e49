//! Queue backend subsystem.
//!
//! # Data Flow
//! ```text
//! Bridge (serialized envelope bytes)
//!     → QueueBackend::enqueue
//!         → redis.rs  (LPUSH onto a fixed list key)
//!         → kafka.rs  (produce one record to a fixed topic, acks=all)
//!     → Ack | QueueError
//! ```
//!
//! # Design Decisions
//! - One narrow capability; the bridge never branches on backend type
//! - Implementations must be safe for concurrent `enqueue` calls through
//!   a shared reference; no lock is placed in front of them
//! - Single attempt per call, no retry

#[cfg(feature = "kafka-backend")]
pub mod kafka;
#[cfg(feature = "redis-backend")]
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[cfg(feature = "kafka-backend")]
pub use kafka::{KafkaQueue, REQUEST_TOPIC};
#[cfg(feature = "redis-backend")]
pub use redis::{RedisQueue, REQUEST_QUEUE_KEY};

/// Errors reported by a queue backend.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The client could not be created or the first connection failed.
    #[error("connection error: {0}")]
    Connect(String),

    /// The liveness check did not succeed.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed to acknowledge a record.
    #[error("enqueue failed: {0}")]
    Enqueue(String),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// The single write capability every queue backend exposes.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Human label, used in logs and the success response ("Redis", "Kafka").
    fn name(&self) -> &'static str;

    /// Verify the backend is reachable.
    async fn ping(&self) -> QueueResult<()>;

    /// Append one opaque blob. Returns once the backend has acknowledged it.
    async fn enqueue(&self, payload: Bytes) -> QueueResult<()>;
}

/// Process-wide handle shared by every request handler.
pub type SharedQueue = Arc<dyn QueueBackend>;

/// Split a `host:port[,host:port...]` list, trimming blanks.
pub fn split_addresses(addresses: &str) -> Vec<&str> {
    addresses
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}
