//! Forwarding bridge subsystem.
//!
//! # Data Flow
//! ```text
//! RECEIVED
//!     → capture     ──✗──▶ CAPTURE_FAILED   (500, nothing enqueued)
//! CAPTURED
//!     → serialize   ──✗──▶ SERIALIZE_FAILED (500, nothing enqueued)
//! SERIALIZED
//!     → enqueue     ──✗──▶ ENQUEUE_FAILED   (500, backend detail logged)
//! ENQUEUED (200)
//! ```
//!
//! # Design Decisions
//! - At most one enqueue attempt per request; no retry, no requeue
//! - The backend handle is shared by reference; the bridge adds no lock
//! - Every failure is terminal for its request and local to it

pub mod error;
pub mod forward;

pub use error::{ForwardError, RequestOutcome};
pub use forward::Bridge;
