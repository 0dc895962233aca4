//! Handler errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cloudevents_envelope::EnvelopeError;
use thiserror::Error;

/// Body returned for every malformed request.
pub const MALFORMED_PAYLOAD_MESSAGE: &str = "Failed to read the JSON data.";

/// Errors returned by the event handlers
#[derive(Error, Debug)]
pub enum AppError {
    /// The envelope or its payload could not be read
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] EnvelopeError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MalformedPayload(e) => {
                tracing::debug!("Rejecting request: {}", e);
                let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
                (status, MALFORMED_PAYLOAD_MESSAGE).into_response()
            }
        }
    }
}
