//! Transport seam over the backend REST API.
//!
//! The trait keeps the client, resolver, and session testable against an
//! in-memory transport (see [`crate::testing`]); [`HttpTransport`] is the
//! production implementation.

use crate::config::ApiConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;

/// Abstract HTTP transport: JSON in, JSON out.
///
/// The API client layers typed deserialization on top; implementations only
/// move bytes and map failures into [`FetchError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request against `path` with the given query pairs.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError>;

    /// Issue a POST request against `path` with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, FetchError>;
}

/// reqwest-backed transport bound to a base URL.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn into_json(response: reqwest::Response, url: &str) -> Result<Value, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;
        Self::into_json(response, &url).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, FetchError> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;
        Self::into_json(response, &url).await
    }
}
