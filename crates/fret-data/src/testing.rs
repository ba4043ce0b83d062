//! In-memory transport for tests.
//!
//! Stub responses are keyed by `"METHOD path?query"` (query pairs in call
//! order). Unstubbed routes answer 404, which exercises the same error
//! paths a real backend rejection would.

use crate::error::FetchError;
use crate::transport::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Default)]
struct Inner {
    routes: HashMap<String, Value>,
    calls: Vec<String>,
    bodies: HashMap<String, Value>,
}

/// Scriptable [`Transport`] that records every call.
///
/// Clones share state, so a test can keep a handle for assertions after
/// handing the transport to a client.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub a route, e.g. `"GET /products?slugs=fender-strat"`.
    pub fn stub(&self, key: impl Into<String>, response: Value) {
        self.lock().routes.insert(key.into(), response);
    }

    /// Remove a stub, making the route answer 404 again.
    pub fn unstub(&self, key: &str) {
        self.lock().routes.remove(key);
    }

    /// Every call made so far, in order, as route keys.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// The JSON body last posted to a route, if any.
    pub fn body_of(&self, key: &str) -> Option<Value> {
        self.lock().bodies.get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn route_key(method: &str, path: &str, query: &[(&str, String)]) -> String {
        if query.is_empty() {
            format!("{method} {path}")
        } else {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{method} {path}?{}", pairs.join("&"))
        }
    }

    fn respond(&self, key: String) -> Result<Value, FetchError> {
        let mut inner = self.lock();
        inner.calls.push(key.clone());
        inner
            .routes
            .get(&key)
            .cloned()
            .ok_or(FetchError::Http {
                status: 404,
                url: key,
            })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        self.respond(Self::route_key("GET", path, query))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, FetchError> {
        let key = Self::route_key("POST", path, &[]);
        self.lock().bodies.insert(key.clone(), body.clone());
        self.respond(key)
    }
}
