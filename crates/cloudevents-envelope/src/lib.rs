//! CloudEvents envelope - types and codecs for a single CloudEvents 1.0 event
//!
//! This crate holds the envelope record and the pure functions that move it
//! between its wire forms. It has no HTTP dependency: callers hand over header
//! pairs and body bytes, and get back an [`Envelope`] tagged with the
//! [`ContentMode`] it arrived in.

pub mod binary;
pub mod data;
pub mod envelope;
pub mod error;
pub mod structured;
pub mod time;

pub mod prelude {
    //! Common imports for code that handles envelopes
    pub use crate::data::Data;
    pub use crate::envelope::{ContentMode, Envelope, EnvelopeBuilder};
    pub use crate::error::EnvelopeError;
    pub use crate::time::EventTime;
    pub use crate::decode_http;
}

// Re-export key types at crate root
pub use data::Data;
pub use envelope::{ContentMode, Envelope, EnvelopeBuilder};
pub use error::EnvelopeError;
pub use time::EventTime;

/// The only CloudEvents version this crate reads and writes.
pub const SPEC_VERSION: &str = "1.0";

/// Media type of a structured-mode event.
pub const STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";

/// Media type of a batched structured-mode request.
pub const BATCH_CONTENT_TYPE: &str = "application/cloudevents-batch+json";

/// Decode one envelope from the parts of an HTTP request.
///
/// A batch content type is rejected. A structured content type wins over
/// `ce-` headers; otherwise a `ce-specversion` header selects binary mode and
/// anything else is read as a structured JSON document.
pub fn decode_http<'a, I>(headers: I, body: &[u8]) -> Result<Envelope, EnvelopeError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let headers: Vec<(&str, &str)> = headers.into_iter().collect();

    let content_type = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
        .map(|(_, v)| *v);

    if content_type.is_some_and(|ct| media_type(ct).eq_ignore_ascii_case(BATCH_CONTENT_TYPE)) {
        return Err(EnvelopeError::BatchNotSupported);
    }

    let is_structured = content_type
        .is_some_and(|ct| media_type(ct).eq_ignore_ascii_case(STRUCTURED_CONTENT_TYPE));
    let is_binary = !is_structured
        && headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("ce-specversion"));

    if is_binary {
        binary::decode(headers, body)
    } else {
        structured::decode(body)
    }
}

/// Strip parameters (`; charset=...`) and whitespace from a media type.
pub(crate) fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or("").trim()
}

/// Whether a content type carries JSON: `application/json` or any `+json` type.
pub(crate) fn is_json_content_type(content_type: &str) -> bool {
    let media = media_type(content_type).to_ascii_lowercase();
    media == "application/json" || media.ends_with("+json")
}
