//! Redis list backend.
//!
//! Every envelope is pushed onto the head of one list shared by all
//! producers and consumers. A consumer popping from the head sees the
//! newest entry first; ordering beyond that is left to Redis.

use async_trait::async_trait;
use bytes::Bytes;
use redis::{aio::ConnectionManager, AsyncCommands};

use super::{QueueBackend, QueueError, QueueResult};

/// List key every producer pushes onto.
pub const REQUEST_QUEUE_KEY: &str = "request_queue";

/// Redis list producer.
///
/// Wraps a multiplexed [`ConnectionManager`]; clones share the same
/// underlying connection and may be used concurrently.
#[derive(Clone)]
pub struct RedisQueue {
    conn: ConnectionManager,
    address: String,
}

impl std::fmt::Debug for RedisQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisQueue")
            .field("address", &self.address)
            .field("key", &REQUEST_QUEUE_KEY)
            .finish()
    }
}

impl RedisQueue {
    /// Open a connection to `address` (`host:port` or a `redis://` URL).
    pub async fn connect(address: &str) -> QueueResult<Self> {
        let url = redis_url(address);
        let client = redis::Client::open(url.as_str()).map_err(|e| QueueError::Connect(e.to_string()))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| QueueError::Connect(e.to_string()))?;

        tracing::debug!(address, "Redis connection manager ready");

        Ok(Self {
            conn,
            address: address.to_string(),
        })
    }

}

/// Turn a bare `host:port` into a URL on database 0.
pub fn redis_url(address: &str) -> String {
    let address = address.trim();
    if address.contains("://") {
        address.to_string()
    } else {
        format!("redis://{}/0", address)
    }
}

#[async_trait]
impl QueueBackend for RedisQueue {
    fn name(&self) -> &'static str {
        "Redis"
    }

    async fn ping(&self) -> QueueResult<()> {
        let mut conn = self.conn.clone();

        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| QueueError::Unavailable(e.to_string()))?;

        if response == "PONG" {
            Ok(())
        } else {
            Err(QueueError::Unavailable(format!("unexpected PING reply: {}", response)))
        }
    }

    async fn enqueue(&self, payload: Bytes) -> QueueResult<()> {
        let mut conn = self.conn.clone();

        let len: i64 = conn
            .lpush(REQUEST_QUEUE_KEY, &payload[..])
            .await
            .map_err(|e| QueueError::Enqueue(e.to_string()))?;

        tracing::trace!(key = REQUEST_QUEUE_KEY, list_len = len, bytes = payload.len(), "Redis LPUSH");
        Ok(())
    }
}
