//! Kafka topic backend.
//!
//! Each envelope becomes one record on a fixed topic. The producer runs
//! with `acks=all` and every send is awaited until the broker confirms
//! the record (or fails it), so `enqueue` returning `Ok` means durable.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;

use super::{split_addresses, QueueBackend, QueueError, QueueResult};

/// Topic every producer writes to.
pub const REQUEST_TOPIC: &str = "request_topic";

const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka topic producer.
///
/// [`FutureProducer`] is internally reference counted and thread-safe;
/// one instance serves all request handlers.
#[derive(Clone)]
pub struct KafkaQueue {
    producer: FutureProducer,
    brokers: String,
}

impl std::fmt::Debug for KafkaQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaQueue")
            .field("brokers", &self.brokers)
            .field("topic", &REQUEST_TOPIC)
            .finish()
    }
}

impl KafkaQueue {
    /// Create a producer for a comma-separated broker list.
    ///
    /// No network traffic happens here; call [`QueueBackend::ping`] to
    /// verify the cluster is reachable.
    pub fn connect(brokers: &str) -> QueueResult<Self> {
        let bootstrap = split_addresses(brokers).join(",");
        if bootstrap.is_empty() {
            return Err(QueueError::Connect("empty broker list".to_string()));
        }

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &bootstrap)
            .set("acks", "all")
            .set("enable.idempotence", "true")
            .create()
            .map_err(|e| QueueError::Connect(e.to_string()))?;

        tracing::debug!(brokers = %bootstrap, "Kafka producer created");

        Ok(Self {
            producer,
            brokers: bootstrap,
        })
    }

    pub fn brokers(&self) -> &str {
        &self.brokers
    }
}

#[async_trait]
impl QueueBackend for KafkaQueue {
    fn name(&self) -> &'static str {
        "Kafka"
    }

    async fn ping(&self) -> QueueResult<()> {
        let producer = self.producer.clone();

        // fetch_metadata blocks the calling thread
        let brokers = tokio::task::spawn_blocking(move || {
            producer
                .client()
                .fetch_metadata(Some(REQUEST_TOPIC), METADATA_TIMEOUT)
                .map(|metadata| metadata.brokers().len())
        })
        .await
        .map_err(|e| QueueError::Unavailable(e.to_string()))?
        .map_err(|e| QueueError::Unavailable(e.to_string()))?;

        if brokers == 0 {
            return Err(QueueError::Unavailable("metadata lists no brokers".to_string()));
        }

        tracing::debug!(brokers, topic = REQUEST_TOPIC, "Kafka metadata fetched");
        Ok(())
    }

    async fn enqueue(&self, payload: Bytes) -> QueueResult<()> {
        let record = FutureRecord::<(), [u8]>::to(REQUEST_TOPIC).payload(&payload[..]);

        self.producer
            .send(record, Timeout::Never)
            .await
            .map_err(|(e, _)| QueueError::Enqueue(e.to_string()))?;

        tracing::trace!(topic = REQUEST_TOPIC, bytes = payload.len(), "Kafka record acknowledged");
        Ok(())
    }
}
