//! Application configuration

use std::env;
use url::Url;

use crate::sample::DEFAULT_REPLY_SOURCE;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind the HTTP listener to
    pub host: String,

    /// Port for incoming events (Knative injects `PORT`)
    pub port: u16,

    /// Largest request body accepted, in bytes
    pub max_body_bytes: usize,

    /// `source` attribute stamped on reply events, always an absolute URL
    pub reply_source: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("CLOUDEVENTS_SAMPLE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),

            max_body_bytes: env::var("CLOUDEVENTS_SAMPLE_MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),

            reply_source: parse_reply_source(env::var("CLOUDEVENTS_SAMPLE_REPLY_SOURCE").ok()),
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_bytes: 1024 * 1024,
            reply_source: DEFAULT_REPLY_SOURCE.to_string(),
        }
    }
}

fn parse_reply_source(raw: Option<String>) -> String {
    match raw.map(|s| Url::parse(&s)) {
        Some(Ok(url)) => url.into(),
        Some(Err(e)) => {
            tracing::warn!("Ignoring invalid CLOUDEVENTS_SAMPLE_REPLY_SOURCE: {}", e);
            DEFAULT_REPLY_SOURCE.to_string()
        }
        None => DEFAULT_REPLY_SOURCE.to_string(),
    }
}
