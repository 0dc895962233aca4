//! The envelope record and its builder

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::data::Data;
use crate::error::EnvelopeError;
use crate::time::EventTime;
use crate::{structured, SPEC_VERSION};

/// How an envelope was carried over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    /// Attributes and payload in one JSON document.
    #[default]
    Structured,
    /// Attributes in `ce-` headers, payload as the raw body.
    Binary,
}

/// A single CloudEvent.
///
/// Envelopes are immutable once built; use [`EnvelopeBuilder`] to create one.
/// `type` and `source` are always present and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    specversion: Option<String>,
    id: Option<String>,
    ty: String,
    source: String,
    subject: Option<String>,
    time: Option<EventTime>,
    datacontenttype: Option<String>,
    dataschema: Option<String>,
    extensions: BTreeMap<String, Value>,
    data: Option<Data>,
    mode: ContentMode,
}

impl Envelope {
    /// Start building an envelope with the two required attributes.
    pub fn builder(ty: impl Into<String>, source: impl Into<String>) -> EnvelopeBuilder {
        EnvelopeBuilder::new().ty(ty).source(source)
    }

    pub fn spec_version(&self) -> Option<&str> {
        self.specversion.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The `type` attribute.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn time(&self) -> Option<&EventTime> {
        self.time.as_ref()
    }

    pub fn data_content_type(&self) -> Option<&str> {
        self.datacontenttype.as_deref()
    }

    pub fn data_schema(&self) -> Option<&str> {
        self.dataschema.as_deref()
    }

    /// Extension attributes, keyed by name.
    pub fn extensions(&self) -> &BTreeMap<String, Value> {
        &self.extensions
    }

    pub fn extension(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    pub fn data(&self) -> Option<&Data> {
        self.data.as_ref()
    }

    /// The content mode this envelope was decoded from.
    pub fn mode(&self) -> ContentMode {
        self.mode
    }

    /// Parse the payload as JSON into a typed struct.
    /// Returns EnvelopeError::MissingData if the event has no payload.
    ///
    /// # Example
    /// ```ignore
    /// #[derive(Deserialize)]
    /// struct SampleInput { name: String }
    ///
    /// let input: SampleInput = envelope.data_as()?;
    /// ```
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        self.data.as_ref().ok_or(EnvelopeError::MissingData)?.parse()
    }

    /// Structured-mode JSON document for this envelope.
    pub fn to_json_value(&self) -> Value {
        structured::encode(self)
    }

    /// Structured-mode JSON text for this envelope.
    pub fn to_json_string(&self) -> String {
        self.to_json_value().to_string()
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_value())
    }
}

/// Builder for [`Envelope`]
#[derive(Debug, Default)]
pub struct EnvelopeBuilder {
    specversion: Option<String>,
    id: Option<String>,
    ty: Option<String>,
    source: Option<String>,
    subject: Option<String>,
    time: Option<EventTime>,
    datacontenttype: Option<String>,
    dataschema: Option<String>,
    extensions: BTreeMap<String, Value>,
    data: Option<Data>,
    mode: ContentMode,
}

impl EnvelopeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec_version(mut self, version: impl Into<String>) -> Self {
        self.specversion = Some(version.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn time(mut self, time: impl Into<EventTime>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn data_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.datacontenttype = Some(content_type.into());
        self
    }

    pub fn data_schema(mut self, schema: impl Into<String>) -> Self {
        self.dataschema = Some(schema.into());
        self
    }

    pub fn extension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(name.into(), value.into());
        self
    }

    pub fn data(mut self, data: impl Into<Data>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn mode(mut self, mode: ContentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate and build the envelope.
    pub fn build(self) -> Result<Envelope, EnvelopeError> {
        let ty = self
            .ty
            .filter(|t| !t.is_empty())
            .ok_or(EnvelopeError::MissingAttribute("type"))?;
        let source = self
            .source
            .filter(|s| !s.is_empty())
            .ok_or(EnvelopeError::MissingAttribute("source"))?;

        if let Some(version) = &self.specversion {
            if version != SPEC_VERSION {
                return Err(EnvelopeError::UnsupportedSpecVersion(version.clone()));
            }
        }

        Ok(Envelope {
            specversion: self.specversion,
            id: self.id,
            ty,
            source,
            subject: self.subject,
            time: self.time,
            datacontenttype: self.datacontenttype,
            dataschema: self.dataschema,
            extensions: self.extensions,
            data: self.data,
            mode: self.mode,
        })
    }
}
