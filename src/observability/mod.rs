//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http / bridge / lifecycle produce:
//!     → logging.rs (structured tracing events, pretty or JSON)
//!     → metrics.rs (request outcomes, enqueue latency)
//!
//! Consumers:
//!     → stdout log collection
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Every request emits exactly one outcome event
//! - Request ID flows into every per-request log line
//! - Metrics are recorded through the `metrics` facade; without an
//!   installed recorder they cost next to nothing

pub mod logging;
pub mod metrics;
