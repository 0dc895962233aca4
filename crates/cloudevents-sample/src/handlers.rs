//! Event endpoints

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use cloudevents_envelope::{Envelope, EnvelopeError, STRUCTURED_CONTENT_TYPE};
use std::sync::Arc;

use crate::error::AppError;
use crate::sample;
use crate::AppState;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Reply to a received event with a greeting event, in structured mode
pub async fn receive_and_reply(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let received = decode(&headers, &body)?;
    tracing::info!("Received event {}", received);

    let reply = sample::build_reply(&received, &state.config.reply_source)?;
    tracing::debug!(id = reply.id().unwrap_or_default(), "Replying with event");

    Ok((
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            format!("{}; charset=utf-8", STRUCTURED_CONTENT_TYPE),
        )],
        reply.to_json_string(),
    ))
}

/// Respond with the received event serialized as JSON
pub async fn echo(headers: HeaderMap, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let received = decode(&headers, &body)?;
    let serialized = received.to_json_string();
    tracing::info!("Echo: {}", serialized);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        serialized,
    ))
}

/// Hand the request to the envelope decoder.
///
/// Headers the decoder reads must be visible ASCII; any other header with an
/// opaque value is skipped.
fn decode(headers: &HeaderMap, body: &[u8]) -> Result<Envelope, AppError> {
    let mut pairs = Vec::with_capacity(headers.len());

    for (name, value) in headers {
        match value.to_str() {
            Ok(value) => pairs.push((name.as_str(), value)),
            Err(_) if name.as_str().starts_with("ce-") || *name == header::CONTENT_TYPE => {
                return Err(EnvelopeError::InvalidHeader(name.to_string()).into());
            }
            Err(_) => {}
        }
    }

    Ok(cloudevents_envelope::decode_http(pairs, body)?)
}
