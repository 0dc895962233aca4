//! Structured content mode - the CloudEvents JSON event format
//!
//! All attributes and the payload live in one JSON object. JSON and text
//! payloads travel in `data`, byte payloads in `data_base64`, and extension
//! attributes sit next to the standard ones at the top level.

use base64::Engine;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::data::Data;
use crate::envelope::{ContentMode, Envelope, EnvelopeBuilder};
use crate::error::EnvelopeError;
use crate::is_json_content_type;
use crate::time::EventTime;

/// Wire shape of a structured event. Unknown members are extensions.
#[derive(Debug, Deserialize)]
struct StructuredEvent {
    #[serde(default)]
    specversion: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default)]
    ty: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    datacontenttype: Option<String>,
    #[serde(default)]
    dataschema: Option<String>,
    #[serde(default, deserialize_with = "present")]
    data: Option<Value>,
    #[serde(default)]
    data_base64: Option<String>,
    #[serde(flatten)]
    extensions: BTreeMap<String, Value>,
}

/// Decode a structured-mode JSON document.
pub fn decode(body: &[u8]) -> Result<Envelope, EnvelopeError> {
    let wire: StructuredEvent = serde_json::from_slice(body)?;

    let data = match (wire.data, wire.data_base64) {
        (Some(_), Some(_)) => return Err(EnvelopeError::ConflictingData),
        (None, Some(encoded)) => {
            Some(Data::Bytes(base64::engine::general_purpose::STANDARD.decode(encoded)?))
        }
        (Some(Value::String(text)), None)
            if wire
                .datacontenttype
                .as_deref()
                .is_some_and(|ct| !is_json_content_type(ct)) =>
        {
            Some(Data::Text(text))
        }
        (Some(value), None) => Some(Data::Json(value)),
        (None, None) => None,
    };

    let mut builder = EnvelopeBuilder::new().mode(ContentMode::Structured);
    if let Some(version) = wire.specversion {
        builder = builder.spec_version(version);
    }
    if let Some(id) = wire.id {
        builder = builder.id(id);
    }
    if let Some(ty) = wire.ty {
        builder = builder.ty(ty);
    }
    if let Some(source) = wire.source {
        builder = builder.source(source);
    }
    if let Some(subject) = wire.subject {
        builder = builder.subject(subject);
    }
    if let Some(time) = wire.time {
        builder = builder.time(EventTime::parse(&time)?);
    }
    if let Some(content_type) = wire.datacontenttype {
        builder = builder.data_content_type(content_type);
    }
    if let Some(schema) = wire.dataschema {
        builder = builder.data_schema(schema);
    }
    for (name, value) in wire.extensions {
        builder = builder.extension(name, value);
    }
    if let Some(data) = data {
        builder = builder.data(data);
    }

    builder.build()
}

/// Encode an envelope as a structured-mode JSON object.
pub fn encode(envelope: &Envelope) -> Value {
    let mut object = Map::new();

    // Extensions first so a standard attribute always wins a name clash.
    for (name, value) in envelope.extensions() {
        object.insert(name.clone(), value.clone());
    }

    if let Some(version) = envelope.spec_version() {
        object.insert("specversion".into(), version.into());
    }
    if let Some(id) = envelope.id() {
        object.insert("id".into(), id.into());
    }
    object.insert("type".into(), envelope.ty().into());
    object.insert("source".into(), envelope.source().into());
    if let Some(subject) = envelope.subject() {
        object.insert("subject".into(), subject.into());
    }
    if let Some(time) = envelope.time() {
        object.insert("time".into(), time.as_str().into());
    }
    if let Some(content_type) = envelope.data_content_type() {
        object.insert("datacontenttype".into(), content_type.into());
    }
    if let Some(schema) = envelope.data_schema() {
        object.insert("dataschema".into(), schema.into());
    }

    match envelope.data() {
        Some(Data::Json(value)) => {
            object.insert("data".into(), value.clone());
        }
        Some(Data::Text(text)) => {
            object.insert("data".into(), text.clone().into());
        }
        Some(Data::Bytes(bytes)) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
            object.insert("data_base64".into(), encoded.into());
        }
        None => {}
    }

    Value::Object(object)
}

/// Keep an explicit `"data": null` as a JSON null payload instead of folding
/// it into an absent member.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_minimal_event() {
        let envelope = decode(br#"{"type":"x","source":"y","data":{"a":1}}"#).unwrap();
        assert_eq!(envelope.ty(), "x");
        assert_eq!(envelope.source(), "y");
        assert_eq!(envelope.data(), Some(&Data::Json(json!({"a": 1}))));
        assert_eq!(envelope.mode(), ContentMode::Structured);
        assert!(envelope.extensions().is_empty());
    }

    #[test]
    fn test_decode_full_event() {
        let body = json!({
            "specversion": "1.0",
            "id": "A234-1234-1234",
            "type": "com.example.someevent",
            "source": "/mycontext",
            "subject": "larger-context",
            "time": "2018-04-05T17:31:00Z",
            "datacontenttype": "application/json",
            "dataschema": "https://example.com/schema",
            "comexampleextension1": "value",
            "comexampleothervalue": 5,
            "data": {"name": "Sam"}
        });
        let envelope = decode(body.to_string().as_bytes()).unwrap();

        assert_eq!(envelope.spec_version(), Some("1.0"));
        assert_eq!(envelope.id(), Some("A234-1234-1234"));
        assert_eq!(envelope.subject(), Some("larger-context"));
        assert_eq!(envelope.data_schema(), Some("https://example.com/schema"));
        assert_eq!(envelope.time().map(|t| t.to_utc().timestamp()), Some(1522949460));
        assert_eq!(envelope.extension("comexampleextension1"), Some(&json!("value")));
        assert_eq!(envelope.extension("comexampleothervalue"), Some(&json!(5)));

        assert_eq!(encode(&envelope), body);
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(decode(b"not json"), Err(EnvelopeError::InvalidJson(_))));
    }

    #[test]
    fn test_decode_requires_type_and_source() {
        assert!(matches!(
            decode(br#"{"source":"y"}"#),
            Err(EnvelopeError::MissingAttribute("type"))
        ));
        assert!(matches!(
            decode(br#"{"type":"x","source":""}"#),
            Err(EnvelopeError::MissingAttribute("source"))
        ));
    }

    #[test]
    fn test_decode_rejects_bad_time() {
        let err = decode(br#"{"type":"x","source":"y","time":"yesterday"}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidAttribute { name, .. } if name == "time"));
    }

    #[test]
    fn test_data_base64_round_trip() {
        let body = br#"{"type":"x","source":"y","datacontenttype":"application/octet-stream","data_base64":"AAEC"}"#;
        let envelope = decode(body).unwrap();
        assert_eq!(envelope.data(), Some(&Data::Bytes(vec![0, 1, 2])));
        assert_eq!(encode(&envelope)["data_base64"], json!("AAEC"));
        assert!(encode(&envelope).get("data").is_none());
    }

    #[test]
    fn test_data_and_data_base64_conflict() {
        let body = br#"{"type":"x","source":"y","data":"a","data_base64":"AAEC"}"#;
        assert!(matches!(decode(body), Err(EnvelopeError::ConflictingData)));
    }

    #[test]
    fn test_string_data_with_text_content_type() {
        let body = br#"{"type":"x","source":"y","datacontenttype":"text/plain","data":"hi"}"#;
        let envelope = decode(body).unwrap();
        assert_eq!(envelope.data(), Some(&Data::Text("hi".into())));
        assert_eq!(encode(&envelope)["data"], json!("hi"));
    }

    #[test]
    fn test_time_keeps_offset_and_precision() {
        for time in ["2020-01-01T00:00:00+02:00", "2020-01-01T00:00:00.1Z"] {
            let body = json!({"type": "x", "source": "y", "time": time});
            let envelope = decode(body.to_string().as_bytes()).unwrap();
            assert_eq!(encode(&envelope), body);
        }
    }

    #[test]
    fn test_explicit_null_data_is_kept() {
        let body = json!({"type": "x", "source": "y", "data": null});
        let envelope = decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(envelope.data(), Some(&Data::Json(Value::Null)));
        assert_eq!(encode(&envelope), body);

        let absent = decode(br#"{"type":"x","source":"y"}"#).unwrap();
        assert!(absent.data().is_none());
    }
}
