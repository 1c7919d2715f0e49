//! Shared utilities for integration and load testing.

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use queue_bridge::config::BridgeConfig;
use queue_bridge::queue::{QueueBackend, QueueError, QueueResult};
use queue_bridge::{HttpServer, Shutdown};
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

/// Fake backend that records every blob it is handed.
#[derive(Default)]
pub struct RecordingQueue {
    calls: AtomicUsize,
    blobs: Mutex<Vec<Bytes>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl RecordingQueue {
    pub fn healthy() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every enqueue fails with `detail`.
    pub fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(detail.to_string()),
            ..Default::default()
        })
    }

    /// Every enqueue succeeds after `delay`.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn blobs(&self) -> Vec<Bytes> {
        self.blobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueBackend for RecordingQueue {
    fn name(&self) -> &'static str {
        "Test"
    }

    async fn ping(&self) -> QueueResult<()> {
        Ok(())
    }

    async fn enqueue(&self, payload: Bytes) -> QueueResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(detail) => Err(QueueError::Enqueue(detail.clone())),
            None => {
                self.blobs.lock().unwrap().push(payload);
                Ok(())
            }
        }
    }
}

/// Start a bridge on an ephemeral port in front of `queue`.
#[allow(dead_code)]
pub async fn start_bridge(queue: Arc<RecordingQueue>) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(BridgeConfig::default(), queue);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// In-memory sink for JSON log lines.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl LogCapture {
    /// A subscriber writing every event at any level into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(self.clone())
            .finish()
    }

    /// Events emitted by the bridge itself, one JSON object each.
    pub fn events(&self) -> Vec<Value> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .filter(|event| {
                event["target"]
                    .as_str()
                    .is_some_and(|target| target.starts_with("queue_bridge"))
            })
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
