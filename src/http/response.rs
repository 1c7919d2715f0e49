//! Response construction.
//!
//! # Responsibilities
//! - `200 {"message": ...}` on success
//! - `500 {"error": ...}` with a stage message on any failure
//! - Attach the request ID header
//!
//! # Design Decisions
//! - Backend error text never reaches the caller

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::bridge::ForwardError;
use crate::http::request::X_REQUEST_ID;

/// Success body.
pub fn accepted(message: &str) -> Response {
    (StatusCode::OK, Json(json!({ "message": message }))).into_response()
}

/// Failure body.
pub fn failed(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        failed(self.status(), self.public_message())
    }
}

/// Echo the request ID back to the caller.
pub fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), value);
    }
    response
}
