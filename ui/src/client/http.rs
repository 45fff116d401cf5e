//! Browser HTTP transport
//!
//! Sends JSON to the backend with `gloo-net` (the browser `fetch` API).

use aichat_shared::{ApiError, BackendAddress, Transport};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde_json::Value;

/// `fetch`-backed transport bound to one base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Backend base URL, e.g. `http://127.0.0.1:5555`
    base_url: String,
}

impl HttpClient {
    pub fn new(address: &BackendAddress) -> Self {
        Self::with_base_url(&address.base_url())
    }

    pub fn with_base_url(url: &str) -> Self {
        // Normalize URL (remove trailing slash)
        let base_url = url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait(?Send)]
impl Transport for HttpClient {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        tracing::debug!("GET {}", path);

        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        read_json(path, response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        tracing::debug!("POST {}", path);

        let response = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        read_json(path, response).await
    }
}

/// Non-2xx is an error; an empty or non-JSON 2xx body reads as `null` and
/// is left to the typed client to coerce
async fn read_json(path: &str, response: Response) -> Result<Value, ApiError> {
    if !response.ok() {
        return Err(ApiError::status(response.status(), response.status_text()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
        tracing::warn!("Non-JSON body from {}: {}", path, e);
        Value::Null
    }))
}
