//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with one catch-all handler
//! - Wire up middleware (HTTP trace spans)
//! - Bind server to listener with graceful shutdown
//! - Hand every request to the bridge and log its outcome

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::bridge::{Bridge, ForwardError, RequestOutcome};
use crate::config::BridgeConfig;
use crate::http::request::request_id;
use crate::http::response::{accepted, with_request_id};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::queue::SharedQueue;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub bridge: Bridge,
}

/// HTTP front of the bridge.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server that forwards into `queue`.
    pub fn new(config: BridgeConfig, queue: SharedQueue) -> Self {
        let bridge = Bridge::new(queue).with_body_limit(config.limits.max_body_bytes);
        let router = build_router(AppState { bridge });
        Self { router }
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// Ctrl+C or a message on `shutdown`.
    pub async fn run(self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router: every method on every path reaches the bridge.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(bridge_handler))
        .route("/{*path}", any(bridge_handler))
        .fallback(bridge_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Catch-all handler.
async fn bridge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(request.headers());
    let method = request.method().to_string();

    let response = match state.bridge.forward(request).await {
        Ok(envelope) => {
            metrics::record_request(&method, RequestOutcome::Enqueued, start);
            let message = state.bridge.success_message();
            tracing::info!(
                request_id = %request_id,
                method = %envelope.method(),
                uri = %envelope.uri(),
                "{}",
                message
            );
            accepted(&message)
        }
        Err(err) => {
            metrics::record_request(&method, err.outcome(), start);
            log_failure(&request_id, &err);
            err.into_response()
        }
    };

    with_request_id(response, &request_id)
}

fn log_failure(request_id: &str, err: &ForwardError) {
    match err {
        ForwardError::Capture(source) => {
            tracing::error!(
                request_id = %request_id,
                error = %source,
                "{}",
                err.public_message()
            );
        }
        ForwardError::Serialize { envelope, source } => {
            tracing::error!(
                request_id = %request_id,
                method = %envelope.method(),
                uri = %envelope.uri(),
                header_count = envelope.header_count(),
                body_bytes = envelope.body().len(),
                error = %source,
                "{}",
                err.public_message()
            );
        }
        ForwardError::Enqueue {
            backend,
            envelope,
            source,
        } => {
            tracing::error!(
                request_id = %request_id,
                backend = %backend,
                method = %envelope.method(),
                uri = %envelope.uri(),
                headers = ?envelope.headers(),
                body = %String::from_utf8_lossy(envelope.body()),
                error = %source,
                "{}",
                err.public_message()
            );
        }
    }
}
