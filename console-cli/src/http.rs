//! Native HTTP transport for the shared API client

use std::time::Duration;

use aichat_shared::{paths, ApiError, BackendAddress, ConsoleClient, Transport};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

/// Request timeout for ordinary API calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound for `ping`
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// `reqwest`-backed transport bound to one base URL
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(address: &BackendAddress) -> Self {
        Self::with_base_url(&address.base_url())
    }

    pub fn with_base_url(url: &str) -> Self {
        Self::with_timeout(url, REQUEST_TIMEOUT)
    }

    /// Transport whose every request fails as [`ApiError::Transport`] once
    /// `timeout` elapses
    pub fn with_timeout(url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        tracing::debug!("GET {}", self.url(path));

        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        read_json(path, response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        tracing::debug!("POST {}", self.url(path));

        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        read_json(path, response).await
    }
}

async fn read_json(path: &str, response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::status(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
        ));
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

/// Typed client for `address`
pub fn connect(address: &BackendAddress) -> ConsoleClient<ReqwestTransport> {
    ConsoleClient::new(ReqwestTransport::new(address))
}

/// Same check as the settings screen: the model listing must answer 2xx
/// within [`CHECK_TIMEOUT`]
pub async fn check_connection(address: &BackendAddress) -> Result<(), ApiError> {
    check_connection_with_timeout(address, CHECK_TIMEOUT).await
}

pub async fn check_connection_with_timeout(
    address: &BackendAddress,
    timeout: Duration,
) -> Result<(), ApiError> {
    let url = format!("{}{}", address.base_url(), paths::MODELS);
    tracing::debug!("Probing {}", url);

    let request = Client::new().get(&url).timeout(timeout).send();
    let response = match tokio::time::timeout(timeout, request).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) if e.is_timeout() => return Err(timed_out(timeout)),
        Ok(Err(e)) => return Err(ApiError::Transport(e.to_string())),
        Err(_) => return Err(timed_out(timeout)),
    };

    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::status(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
        ))
    }
}

fn timed_out(timeout: Duration) -> ApiError {
    ApiError::Transport(format!("no response within {} seconds", timeout.as_secs()))
}
