//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route, trace layer)
//!     → request.rs (request ID)
//!     → bridge::Bridge::forward (capture → serialize → enqueue)
//!     → response.rs (JSON body, request ID header)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
