//! Binary content mode - the CloudEvents HTTP binding
//!
//! Attributes arrive as `ce-<name>` headers and the payload is the raw body,
//! described by the request's `Content-Type`. Attribute values are
//! percent-encoded on the wire and decoded here.

use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::data::Data;
use crate::envelope::{ContentMode, EnvelopeBuilder};
use crate::error::EnvelopeError;
use crate::time::EventTime;
use crate::{is_json_content_type, media_type, Envelope};

const ATTRIBUTE_PREFIX: &str = "ce-";

/// Decode a binary-mode event from header pairs and a body.
///
/// Header names are matched case-insensitively. Any `ce-` header that is not a
/// standard attribute becomes an extension with a string value. A value whose
/// percent-decoding is not UTF-8 is rejected.
pub fn decode<'a, I>(headers: I, body: &[u8]) -> Result<Envelope, EnvelopeError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut builder = EnvelopeBuilder::new().mode(ContentMode::Binary);
    let mut content_type: Option<String> = None;
    let mut ce_content_type: Option<String> = None;

    for (name, value) in headers {
        let name = name.to_ascii_lowercase();

        if name == "content-type" {
            content_type = Some(value.to_string());
            continue;
        }

        let Some(attribute) = name.strip_prefix(ATTRIBUTE_PREFIX) else {
            continue;
        };
        let value = percent_decode_str(value).decode_utf8()?;
        let value: &str = &value;

        builder = match attribute {
            "specversion" => builder.spec_version(value),
            "id" => builder.id(value),
            "type" => builder.ty(value),
            "source" => builder.source(value),
            "subject" => builder.subject(value),
            "time" => builder.time(EventTime::parse(value)?),
            "dataschema" => builder.data_schema(value),
            "datacontenttype" => {
                ce_content_type = Some(value.to_string());
                builder
            }
            "" => builder,
            extension => builder.extension(extension, Value::String(value.to_string())),
        };
    }

    let content_type = content_type.or(ce_content_type);

    if !body.is_empty() {
        builder = builder.data(body_to_data(content_type.as_deref(), body)?);
    }
    if let Some(content_type) = content_type {
        builder = builder.data_content_type(content_type);
    }

    builder.build()
}

fn body_to_data(content_type: Option<&str>, body: &[u8]) -> Result<Data, EnvelopeError> {
    match content_type {
        Some(ct) if is_json_content_type(ct) => Ok(Data::Json(serde_json::from_slice(body)?)),
        Some(ct) if media_type(ct).to_ascii_lowercase().starts_with("text/") => {
            Ok(Data::Text(std::str::from_utf8(body)?.to_string()))
        }
        _ => Ok(Data::Bytes(body.to_vec())),
    }
}
