//! queue-bridge
//!
//! Accepts arbitrary HTTP requests and hands each one to a queue backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                 QUEUE BRIDGE                  │
//!                          │                                               │
//!     Any request          │  ┌─────────┐   ┌──────────┐   ┌───────────┐   │
//!     ─────────────────────┼─▶│  http   │──▶│ envelope │──▶│  bridge   │   │
//!                          │  │ server  │   │ capture  │   │ serialize │   │
//!                          │  └─────────┘   └──────────┘   └─────┬─────┘   │
//!                          │                                     │         │
//!                          │                                     ▼         │     Redis list
//!     200 / 500 JSON       │  ┌──────────┐                ┌───────────┐    │  ┌────────────┐
//!     ◀────────────────────┼──│ response │◀───────────────│   queue   │────┼─▶│     or     │
//!                          │  └──────────┘                │  enqueue  │    │  │ Kafka topic│
//!                          │                              └───────────┘    │  └────────────┘
//!                          │                                               │
//!                          │  config · lifecycle · observability           │
//!                          └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use queue_bridge::config::Cli;
use queue_bridge::lifecycle;
use queue_bridge::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    init_logging(config.observability.log_format)?;

    tracing::info!("queue-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = lifecycle::run(config).await {
        tracing::error!(error = %e, "Failed to initialize server");
        return Err(e.into());
    }

    Ok(())
}
