//! Event payload representation

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::EnvelopeError;

/// The `data` of an event.
///
/// | Variant | Structured member | Binary-mode body |
/// |---------|-------------------|------------------|
/// | `Json` | `data` (any JSON value) | JSON content type |
/// | `Text` | `data` (JSON string, non-JSON content type) | `text/*` |
/// | `Bytes` | `data_base64` | anything else |
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl Data {
    /// Render the payload as UTF-8 text.
    ///
    /// A JSON string yields its contents rather than its quoted form, so a
    /// producer that wraps a JSON document in a string still round-trips.
    pub fn to_text(&self) -> Result<String, EnvelopeError> {
        match self {
            Data::Json(Value::String(s)) => Ok(s.clone()),
            Data::Json(value) => Ok(value.to_string()),
            Data::Text(text) => Ok(text.clone()),
            Data::Bytes(bytes) => Ok(std::str::from_utf8(bytes)?.to_string()),
        }
    }

    /// Parse the payload as JSON into a typed struct.
    ///
    /// # Example
    /// ```ignore
    /// #[derive(Deserialize)]
    /// struct Greeting { name: String }
    ///
    /// let greeting: Greeting = data.parse()?;
    /// ```
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        Ok(serde_json::from_str(&self.to_text()?)?)
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        Data::Json(value)
    }
}

impl From<String> for Data {
    fn from(text: String) -> Self {
        Data::Text(text)
    }
}

impl From<Vec<u8>> for Data {
    fn from(bytes: Vec<u8>) -> Self {
        Data::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_parse_json_object() {
        let data = Data::Json(json!({"name": "Sam"}));
        let named: Named = data.parse().unwrap();
        assert_eq!(named.name, "Sam");
    }

    #[test]
    fn test_parse_json_string_holding_document() {
        let data = Data::Json(Value::String(r#"{"name":"Ada"}"#.to_string()));
        let named: Named = data.parse().unwrap();
        assert_eq!(named.name, "Ada");
    }

    #[test]
    fn test_parse_bytes() {
        let data = Data::Bytes(br#"{"name":"Bo"}"#.to_vec());
        assert_eq!(data.parse::<Named>().unwrap(), Named { name: "Bo".into() });
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let data = Data::Json(json!({"a": 1}));
        assert!(matches!(data.parse::<Named>(), Err(EnvelopeError::InvalidJson(_))));
    }

    #[test]
    fn test_bytes_must_be_utf8() {
        let data = Data::Bytes(vec![0xff, 0xfe]);
        assert!(matches!(data.to_text(), Err(EnvelopeError::InvalidUtf8(_))));
    }
}
