//! HTTP-to-queue bridge library.
//!
//! Accepts any HTTP request, captures it into an [`Envelope`], and pushes
//! the serialized envelope onto a Redis list or a Kafka topic.

pub mod bridge;
pub mod config;
pub mod envelope;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod queue;

pub use bridge::{Bridge, ForwardError};
pub use config::BridgeConfig;
pub use envelope::Envelope;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use queue::{QueueBackend, SharedQueue};
