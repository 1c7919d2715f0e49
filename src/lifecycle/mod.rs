//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Metrics → Connect backend → Liveness check → Bind → Serve
//!
//! Shutdown (shutdown.rs + signals.rs):
//!     Ctrl+C or Shutdown::trigger → Stop accepting → Finish in-flight → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: an unreachable backend is fatal before any traffic is accepted
//! - No degraded mode and no reconnect loop
//! - The backend handle is dropped on exit with no extra flush

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{connect_backend, run, run_with_shutdown, StartupError};
