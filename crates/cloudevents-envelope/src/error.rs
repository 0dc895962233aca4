//! Error types for envelope decoding

use thiserror::Error;

/// Errors that can occur while reading an envelope or its payload
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Missing required attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("Invalid value for attribute {name}: {reason}")]
    InvalidAttribute { name: String, reason: String },

    #[error("Unsupported spec version: {0}")]
    UnsupportedSpecVersion(String),

    #[error("Invalid base64 data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Data is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Header {0} is not a valid attribute value")]
    InvalidHeader(String),

    #[error("Event carries both data and data_base64")]
    ConflictingData,

    #[error("Event has no data")]
    MissingData,

    #[error("Batched events are not supported")]
    BatchNotSupported,
}

impl EnvelopeError {
    /// Convert the error to an HTTP status code
    ///
    /// Every decoding failure is the caller's fault, so this is always 400.
    pub fn status_code(&self) -> u16 {
        400
    }

    pub(crate) fn invalid(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        EnvelopeError::InvalidAttribute {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
