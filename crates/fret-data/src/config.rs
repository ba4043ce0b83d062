//! API client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the backend API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend REST API.
    pub base_url: String,
    /// Optional User-Agent override.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.fretcompare.com".to_string(),
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Create a configuration pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: None,
        }
    }

    /// Set the User-Agent header sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_without_user_agent() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:3001/api"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert!(config.user_agent.is_none());
    }
}
