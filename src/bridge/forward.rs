//! Per-request forwarding.

use std::time::Instant;

use axum::body::Body;
use axum::http::Request;

use crate::bridge::error::ForwardError;
use crate::envelope::{self, Envelope};
use crate::observability::metrics;
use crate::queue::SharedQueue;

/// Turns inbound requests into enqueued envelopes.
///
/// Cheap to clone; every clone shares the same backend handle.
#[derive(Clone)]
pub struct Bridge {
    queue: SharedQueue,
    max_body_bytes: Option<usize>,
}

impl Bridge {
    pub fn new(queue: SharedQueue) -> Self {
        Self {
            queue,
            max_body_bytes: None,
        }
    }

    /// Cap the captured body size. `None` reads bodies of any length.
    pub fn with_body_limit(mut self, max_body_bytes: Option<usize>) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Label of the backend behind this bridge.
    pub fn queue_name(&self) -> &'static str {
        self.queue.name()
    }

    /// Body text of a successful response.
    pub fn success_message(&self) -> String {
        format!("Request added to {} queue", self.queue_name())
    }

    /// Capture, serialize and enqueue one request.
    ///
    /// The backend is called at most once, and only after the envelope
    /// serialized cleanly. Returns the envelope that was enqueued.
    pub async fn forward(&self, request: Request<Body>) -> Result<Envelope, ForwardError> {
        let envelope = envelope::capture(request, self.max_body_bytes)
            .await
            .map_err(ForwardError::Capture)?;

        let payload = match envelope::serialize(&envelope) {
            Ok(payload) => payload,
            Err(source) => {
                return Err(ForwardError::Serialize {
                    envelope: Box::new(envelope),
                    source,
                })
            }
        };

        let backend = self.queue.name();
        let start = Instant::now();
        let result = self.queue.enqueue(payload).await;
        metrics::record_enqueue(backend, start.elapsed(), result.is_ok());

        match result {
            Ok(()) => Ok(envelope),
            Err(source) => Err(ForwardError::Enqueue {
                backend,
                envelope: Box::new(envelope),
                source,
            }),
        }
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("queue", &self.queue.name())
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
