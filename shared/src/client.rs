//! Typed client for the console's backend REST surface
//!
//! The HTTP mechanics live behind [`Transport`]: the browser build plugs in
//! `gloo-net`, the CLI plugs in `reqwest`, tests plug in a scripted mock.
//! [`ConsoleClient`] owns the endpoint paths, wraps every mutation payload
//! in a list and coerces malformed list bodies to empty lists.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::messages::{
    Account, AccountKey, AccountRequest, AccountResult, Channel, ChannelId, ChannelRequest,
    ChannelResult, ChannelStatusUpdate, ModelListing, StatusReply,
};

/// Backend endpoint paths, relative to the base URL
pub mod paths {
    pub const ACCOUNT_INFO: &str = "/aichat/account/info";
    pub const ACCOUNT_ADD: &str = "/aichat/account/add";
    pub const ACCOUNT_DELETE: &str = "/aichat/account/delete";
    pub const CHANNEL_INFO: &str = "/aichat/channel/info";
    pub const CHANNEL_ADD: &str = "/aichat/channel/add";
    pub const CHANNEL_DELETE: &str = "/aichat/channel/delete";
    pub const CHANNEL_UPDATE_STATUS: &str = "/aichat/channel/updatestatus";
    pub const MODELS: &str = "/chaynsapi/v1/models";
}

/// JSON-over-HTTP against a fixed base URL.
///
/// Implementations resolve the base URL once, at construction.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, path: &str) -> Result<Value, ApiError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}

/// One typed method per backend endpoint
#[derive(Debug, Clone)]
pub struct ConsoleClient<T> {
    transport: T,
}

impl<T: Transport> ConsoleClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.get_list(paths::ACCOUNT_INFO).await
    }

    pub async fn add_accounts(
        &self,
        accounts: &[AccountRequest],
    ) -> Result<Vec<AccountResult>, ApiError> {
        self.post_list(paths::ACCOUNT_ADD, accounts).await
    }

    pub async fn delete_accounts(
        &self,
        keys: &[AccountKey],
    ) -> Result<Vec<AccountResult>, ApiError> {
        self.post_list(paths::ACCOUNT_DELETE, keys).await
    }

    pub async fn list_channels(&self) -> Result<Vec<Channel>, ApiError> {
        self.get_list(paths::CHANNEL_INFO).await
    }

    pub async fn add_channels(
        &self,
        channels: &[ChannelRequest],
    ) -> Result<Vec<ChannelResult>, ApiError> {
        self.post_list(paths::CHANNEL_ADD, channels).await
    }

    pub async fn delete_channels(&self, ids: &[i64]) -> Result<Vec<ChannelResult>, ApiError> {
        let payload: Vec<ChannelId> = ids.iter().map(|&id| ChannelId { id }).collect();
        self.post_list(paths::CHANNEL_DELETE, &payload).await
    }

    /// Not list-wrapped: the status endpoint takes a single object
    pub async fn update_channel_status(
        &self,
        update: &ChannelStatusUpdate,
    ) -> Result<StatusReply, ApiError> {
        let body = to_body(update)?;
        let reply = self
            .transport
            .post(paths::CHANNEL_UPDATE_STATUS, &body)
            .await?;

        Ok(serde_json::from_value(reply).unwrap_or_else(|e| {
            tracing::warn!("Unexpected body from {}: {}", paths::CHANNEL_UPDATE_STATUS, e);
            StatusReply::default()
        }))
    }

    /// Model catalog; anything but `{data: [...]}` reads as an empty catalog
    pub async fn list_models(&self) -> Result<ModelListing, ApiError> {
        let mut body = self.transport.get(paths::MODELS).await?;
        let data = match body.get_mut("data").map(Value::take) {
            Some(data @ Value::Array(_)) => data,
            _ => {
                tracing::warn!("Model listing has no data array, treating as empty");
                return Ok(ModelListing::default());
            }
        };

        Ok(ModelListing {
            object: body.get("object").and_then(Value::as_str).map(str::to_string),
            data: coerce_list(paths::MODELS, data),
        })
    }

    async fn get_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>, ApiError> {
        let body = self.transport.get(path).await?;
        Ok(coerce_list(path, body))
    }

    async fn post_list<P: Serialize, R: DeserializeOwned + Default>(
        &self,
        path: &str,
        items: &[P],
    ) -> Result<Vec<R>, ApiError> {
        let body = to_body(items)?;
        let reply = self.transport.post(path, &body).await?;
        Ok(coerce_results(path, reply))
    }
}

fn to_body<P: Serialize + ?Sized>(payload: &P) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a list body row by row.
///
/// A non-array body becomes an empty list. A row that does not decode is
/// skipped, so one odd record never hides the rest.
pub fn coerce_list<R: DeserializeOwned>(path: &str, body: Value) -> Vec<R> {
    let rows = match body {
        Value::Array(rows) => rows,
        other => {
            tracing::warn!("Expected a list from {}, got {}", path, value_kind(&other));
            return Vec::new();
        }
    };

    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed row {} from {}: {}", index, path, e);
                None
            }
        })
        .collect()
}

/// Decode per-item mutation results; an unreadable item keeps its place as
/// the default result, whose status counts as a failure
fn coerce_results<R: DeserializeOwned + Default>(path: &str, body: Value) -> Vec<R> {
    let rows = match body {
        Value::Array(rows) => rows,
        other => {
            tracing::warn!("Expected a result list from {}, got {}", path, value_kind(&other));
            return Vec::new();
        }
    };

    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).unwrap_or_else(|e| {
                tracing::warn!("Unreadable result from {}: {}", path, e);
                R::default()
            })
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Get(String),
        Post(String, Value),
    }

    /// Replays queued replies in order and records every call
    #[derive(Debug, Clone, Default)]
    pub struct MockTransport {
        replies: Rc<RefCell<VecDeque<Result<Value, ApiError>>>>,
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl MockTransport {
        pub fn reply(&self, reply: Result<Value, ApiError>) -> &Self {
            self.replies.borrow_mut().push_back(reply);
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn next(&self) -> Result<Value, ApiError> {
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no reply queued".to_string())))
        }
    }

    #[async_trait(?Send)]
    impl Transport for MockTransport {
        async fn get(&self, path: &str) -> Result<Value, ApiError> {
            self.calls.borrow_mut().push(Call::Get(path.to_string()));
            self.next()
        }

        async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
            self.calls
                .borrow_mut()
                .push(Call::Post(path.to_string(), body.clone()));
            self.next()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{Call, MockTransport};
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    fn client() -> (ConsoleClient<MockTransport>, MockTransport) {
        let transport = MockTransport::default();
        (ConsoleClient::new(transport.clone()), transport)
    }

    #[test]
    fn test_non_array_list_bodies_become_empty() {
        let (client, transport) = client();
        for body in [json!({"error": "nope"}), json!(null), json!("text"), json!(42), json!([{"bogus": true}])] {
            transport.reply(Ok(body));
        }

        for _ in 0..5 {
            let accounts = block_on(client.list_accounts()).unwrap();
            assert!(accounts.is_empty());
        }
    }

    #[test]
    fn test_transport_errors_propagate() {
        let (client, transport) = client();
        transport.reply(Err(ApiError::status(500, "Internal Server Error")));

        let err = block_on(client.list_channels()).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_delete_channels_wraps_ids() {
        let (client, transport) = client();
        transport.reply(Ok(json!([{"status": "success"}, {"status": "failed"}])));

        let results = block_on(client.delete_channels(&[4, 9])).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            transport.calls(),
            vec![Call::Post(
                paths::CHANNEL_DELETE.to_string(),
                json!([{"id": 4}, {"id": 9}])
            )]
        );
    }

    #[test]
    fn test_delete_accounts_sends_key_pairs() {
        let (client, transport) = client();
        transport.reply(Ok(json!([{"status": "success"}])));

        let key = AccountKey {
            apiname: "openai-1".to_string(),
            username: "alice".to_string(),
        };
        block_on(client.delete_accounts(&[key])).unwrap();

        assert_eq!(
            transport.calls(),
            vec![Call::Post(
                paths::ACCOUNT_DELETE.to_string(),
                json!([{"apiname": "openai-1", "username": "alice"}])
            )]
        );
    }

    #[test]
    fn test_status_update_is_a_bare_object() {
        let (client, transport) = client();
        transport.reply(Ok(json!({"status": "failed", "message": "unknown channel"})));

        let update = ChannelStatusUpdate {
            channelname: "main".to_string(),
            status: false,
        };
        let reply = block_on(client.update_channel_status(&update)).unwrap();

        assert!(!reply.status.is_success());
        assert_eq!(reply.message.as_deref(), Some("unknown channel"));
        assert_eq!(
            transport.calls(),
            vec![Call::Post(
                paths::CHANNEL_UPDATE_STATUS.to_string(),
                json!({"channelname": "main", "status": false})
            )]
        );
    }

    #[test]
    fn test_models_without_data_array_are_empty() {
        let (client, transport) = client();
        transport
            .reply(Ok(json!({"object": "list", "data": "oops"})))
            .reply(Ok(json!([1, 2, 3])))
            .reply(Ok(json!({"object": "list", "data": [{"id": "m1", "owned_by": "acme"}]})));

        assert!(block_on(client.list_models()).unwrap().data.is_empty());
        assert!(block_on(client.list_models()).unwrap().data.is_empty());

        let listing = block_on(client.list_models()).unwrap();
        assert_eq!(listing.object.as_deref(), Some("list"));
        assert_eq!(listing.data[0].provider(), "acme");
    }

    #[test]
    fn test_one_bad_row_keeps_the_rest() {
        let (client, transport) = client();
        transport
            .reply(Ok(json!([
                {"id": 1, "channelname": "a", "description": null},
                {"id": "two", "channelname": "broken"},
                {"id": 3, "channelname": "c", "description": "ok"}
            ])))
            .reply(Ok(json!([
                {"apiname": "openai-1", "username": "alice", "usecount": null},
                {"username": "no-apiname"},
                {"apiname": "openai-1", "username": "bob", "usecount": 2}
            ])));

        let channels = block_on(client.list_channels()).unwrap();
        assert_eq!(
            channels.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(channels[0].description, "");

        let accounts = block_on(client.list_accounts()).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].usecount, 0);
        assert_eq!(accounts[1].usecount, 2);
    }

    #[test]
    fn test_models_with_loose_fields_are_listed() {
        let (client, transport) = client();
        transport.reply(Ok(json!({
            "object": "list",
            "data": [
                {"id": "gpt-4o", "created": 1700000000.5},
                {"owned_by": "no id"},
                {"id": "claude", "created": "2024-01-01", "owned_by": "anthropic"}
            ]
        })));

        let listing = block_on(client.list_models()).unwrap();
        assert_eq!(listing.object.as_deref(), Some("list"));
        assert_eq!(
            listing.data.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            vec!["gpt-4o", "claude"]
        );
        assert_eq!(listing.data[1].provider(), "anthropic");
        assert_eq!(listing.data[1].extra.get("created"), Some(&json!("2024-01-01")));
    }

    #[test]
    fn test_unreadable_result_counts_as_failure() {
        let (client, transport) = client();
        transport.reply(Ok(json!([{"status": "success"}, "garbage", {"status": "success"}])));

        let results = block_on(client.delete_channels(&[1, 2, 3])).unwrap();
        let tally = crate::view::Tally::of(&results);

        assert_eq!(tally.total, 3);
        assert_eq!(tally.succeeded, 2);
    }
}
