//! Client configuration.

use serde::Deserialize;

/// Base address of the work-order collection in the reference deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/work-orders";

/// Settings shared by every request a client issues.
///
/// `headers` are merged into each request on top of the JSON content-type
/// default. A caller header with the same name (case-insensitive) replaces
/// the default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}
