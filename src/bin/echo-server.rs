//! Echo target for manual testing.
//!
//! Accepts any method on any path, logs the captured request, and answers
//! with a fixed JSON body.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::any,
    Json, Router,
};
use clap::Parser;
use serde_json::json;

use queue_bridge::envelope::capture;
use queue_bridge::observability::logging::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "echo-server")]
#[command(about = "Logs every request it receives", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "127.0.0.1:8081")]
    listen: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_format)?;

    let app = Router::new()
        .route("/", any(echo))
        .route("/{*path}", any(echo));

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    tracing::info!(address = %listener.local_addr()?, "Echo server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn echo(request: Request<Body>) -> impl IntoResponse {
    let envelope = match capture(request, None).await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read request body");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to read request body" })),
            );
        }
    };

    tracing::info!(method = %envelope.method(), uri = %envelope.uri(), "Request received");
    for (name, values) in envelope.headers() {
        for value in values {
            tracing::info!(header = %name, value = %String::from_utf8_lossy(value), "Header");
        }
    }
    if !envelope.body().is_empty() {
        tracing::info!(body = %String::from_utf8_lossy(envelope.body()), "Body");
    }

    (
        StatusCode::OK,
        Json(json!({ "message": "Request received and printed to console" })),
    )
}
