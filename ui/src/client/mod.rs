//! Backend Client Layer
//!
//! This module wires the shared typed [`ConsoleClient`] to the browser:
//!
//! - **HttpClient**: `gloo-net` implementation of the shared `Transport`
//! - **check_connection**: the bounded "test connection" check used by Settings
//!
//! The base URL is fixed when the client is built. Saving a new backend
//! address only affects clients built afterwards (i.e. after a reload).

mod http;

pub use http::HttpClient;

use std::time::Duration;

use aichat_shared::{paths, ApiError, BackendAddress, ConsoleClient};
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

/// Typed client used by every screen
pub type ApiClient = ConsoleClient<HttpClient>;

/// Upper bound for the connection test
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a client bound to `address`
pub fn connect(address: &BackendAddress) -> ApiClient {
    ConsoleClient::new(HttpClient::new(address))
}

/// Check that the model listing at `address` answers 2xx within
/// [`CHECK_TIMEOUT`]. Any other status, a network error or the timeout is
/// a failure.
pub async fn check_connection(address: &BackendAddress) -> Result<(), ApiError> {
    let url = format!("{}{}", address.base_url(), paths::MODELS);
    tracing::debug!("Probing {}", url);

    let request = Box::pin(Request::get(&url).send());
    let timeout = Box::pin(TimeoutFuture::new(CHECK_TIMEOUT.as_millis() as u32));

    match select(request, timeout).await {
        Either::Left((Ok(response), _)) if response.ok() => Ok(()),
        Either::Left((Ok(response), _)) => Err(ApiError::status(
            response.status(),
            response.status_text(),
        )),
        Either::Left((Err(e), _)) => Err(ApiError::Transport(e.to_string())),
        Either::Right(_) => Err(ApiError::Transport(format!(
            "no response within {} seconds",
            CHECK_TIMEOUT.as_secs()
        ))),
    }
}
