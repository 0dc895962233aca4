//! Sample payloads and the reply rule
//!
//! The reply is built by a pure function so the construction rule can be
//! exercised without a server.

use chrono::Utc;
use cloudevents_envelope::{Envelope, EnvelopeError, SPEC_VERSION};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `type` of every reply event.
pub const REPLY_TYPE: &str = "dev.knative.docs.sample";

/// Default `source` of reply events.
pub const DEFAULT_REPLY_SOURCE: &str =
    "https://github.com/knative/docs/docs/serving/samples/cloudevents/cloudevents-dotnet";

const GREETING: &str = "Hello there v1 !!!, ";

/// Payload expected in an inbound event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleInput {
    pub name: String,
}

/// Payload of a reply event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleOutput {
    pub message: String,
}

impl SampleOutput {
    pub fn greet(input: &SampleInput) -> Self {
        Self {
            message: format!("{}{}", GREETING, input.name),
        }
    }
}

/// Build the reply to a received event.
///
/// The reply carries a fresh id and the current time. Extension attributes of
/// the received event are not copied onto the reply.
pub fn build_reply(received: &Envelope, source: &str) -> Result<Envelope, EnvelopeError> {
    let input: SampleInput = received.data_as()?;
    let output = SampleOutput::greet(&input);

    Envelope::builder(REPLY_TYPE, source)
        .spec_version(SPEC_VERSION)
        .id(Uuid::new_v4().to_string())
        .time(Utc::now())
        .data_content_type("application/json")
        .data(serde_json::to_value(output)?)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudevents_envelope::Data;
    use serde_json::json;

    fn received(data: serde_json::Value) -> Envelope {
        Envelope::builder("com.example.greet", "/tests")
            .id("1")
            .extension("traceparent", "00-abc-def-01")
            .data(data)
            .build()
            .unwrap()
    }

    #[test]
    fn test_greet() {
        let output = SampleOutput::greet(&SampleInput { name: "Sam".into() });
        assert_eq!(output.message, "Hello there v1 !!!, Sam");
    }

    #[test]
    fn test_build_reply() {
        let reply = build_reply(&received(json!({"name": "Sam"})), DEFAULT_REPLY_SOURCE).unwrap();

        assert_eq!(reply.ty(), REPLY_TYPE);
        assert_eq!(reply.source(), DEFAULT_REPLY_SOURCE);
        assert_eq!(reply.spec_version(), Some("1.0"));
        assert_eq!(reply.data_content_type(), Some("application/json"));
        assert_eq!(
            reply.data(),
            Some(&Data::Json(json!({"message": "Hello there v1 !!!, Sam"})))
        );
        assert!(reply.time().is_some());
        assert!(!reply.id().unwrap_or_default().is_empty());
    }

    #[test]
    fn test_build_reply_drops_extensions() {
        let reply = build_reply(&received(json!({"name": "Sam"})), DEFAULT_REPLY_SOURCE).unwrap();
        assert!(reply.extensions().is_empty());
    }

    #[test]
    fn test_build_reply_ids_are_unique() {
        let event = received(json!({"name": "Sam"}));
        let a = build_reply(&event, DEFAULT_REPLY_SOURCE).unwrap();
        let b = build_reply(&event, DEFAULT_REPLY_SOURCE).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_build_reply_rejects_wrong_payload() {
        let err = build_reply(&received(json!({"nom": "Sam"})), DEFAULT_REPLY_SOURCE).unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidJson(_)));

        let no_data = Envelope::builder("x", "y").build().unwrap();
        let err = build_reply(&no_data, DEFAULT_REPLY_SOURCE).unwrap_err();
        assert!(matches!(err, EnvelopeError::MissingData));
    }
}
