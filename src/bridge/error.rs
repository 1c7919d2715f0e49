//! Per-request failure taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

use crate::envelope::{Envelope, EnvelopeError};
use crate::queue::QueueError;

/// Terminal state reached by one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Enqueued,
    CaptureFailed,
    SerializeFailed,
    EnqueueFailed,
}

impl RequestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Enqueued => "enqueued",
            RequestOutcome::CaptureFailed => "capture_failed",
            RequestOutcome::SerializeFailed => "serialize_failed",
            RequestOutcome::EnqueueFailed => "enqueue_failed",
        }
    }
}

/// Why a request was not enqueued.
///
/// Failures after capture keep the envelope so it can be logged.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("capture failed: {0}")]
    Capture(#[source] EnvelopeError),

    #[error("serialize failed: {source}")]
    Serialize {
        envelope: Box<Envelope>,
        #[source]
        source: EnvelopeError,
    },

    #[error("enqueue to {backend} failed: {source}")]
    Enqueue {
        backend: &'static str,
        envelope: Box<Envelope>,
        #[source]
        source: QueueError,
    },
}

impl ForwardError {
    pub fn outcome(&self) -> RequestOutcome {
        match self {
            ForwardError::Capture(_) => RequestOutcome::CaptureFailed,
            ForwardError::Serialize { .. } => RequestOutcome::SerializeFailed,
            ForwardError::Enqueue { .. } => RequestOutcome::EnqueueFailed,
        }
    }

    /// Status returned to the caller. Every stage maps to 500.
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Short, stage-identifying text safe to show the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            ForwardError::Capture(_) => "Failed to read request body",
            ForwardError::Serialize { .. } => "Failed to serialize request",
            ForwardError::Enqueue { .. } => "Failed to push to queue",
        }
    }

    /// The captured envelope, when capture got that far.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            ForwardError::Capture(_) => None,
            ForwardError::Serialize { envelope, .. } | ForwardError::Enqueue { envelope, .. } => Some(envelope.as_ref()),
        }
    }
}
