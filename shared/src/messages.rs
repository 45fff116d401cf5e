//! API message types for communication between the console and the backend
//!
//! These types mirror the JSON bodies of the `/aichat/*` and
//! `/chaynsapi/v1/models` endpoints:
//! - Account records and the add/delete payloads
//! - Channel records, the add/delete payloads and the status update
//! - The per-item result objects returned by every mutation
//! - The open-ended model listing

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Lenient field decoding
// ============================================================================

// The backend sends `null` for unset columns; those read like a missing field

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn null_as_max_concurrent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_MAX_CONCURRENT))
}

fn null_as_timeout<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_TIMEOUT_SECS))
}

fn null_as_priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_PRIORITY))
}

// ============================================================================
// Operation results
// ============================================================================

/// Status tag carried by every per-item mutation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationStatus {
    Success,
    Failed,
    /// Missing tag, or one we do not recognize
    #[default]
    Unknown,
}

impl OperationStatus {
    pub fn is_success(self) -> bool {
        matches!(self, OperationStatus::Success)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationStatus::Success => "success",
            OperationStatus::Failed => "failed",
            OperationStatus::Unknown => "unknown",
        }
    }
}

impl Serialize for OperationStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OperationStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(match tag.as_deref() {
            Some("success") => OperationStatus::Success,
            Some("failed") => OperationStatus::Failed,
            _ => OperationStatus::Unknown,
        })
    }
}

/// Anything that reports a per-item status
pub trait HasStatus {
    fn status(&self) -> OperationStatus;
}

/// Generic `{status, message?}` reply
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HasStatus for StatusReply {
    fn status(&self) -> OperationStatus {
        self.status
    }
}

// ============================================================================
// Accounts
// ============================================================================

fn default_true() -> bool {
    true
}

/// Stored credential set for an upstream provider.
///
/// Identified by the `(apiname, username)` pair. The password is accepted
/// from the backend but must never be displayed.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub apiname: String,
    pub username: String,
    #[serde(default, skip_serializing, deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(default)]
    pub authtoken: Option<String>,
    #[serde(default)]
    pub usertobitid: Option<i64>,
    #[serde(default)]
    pub personid: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usecount: i64,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub tokenstatus: bool,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub accountstatus: bool,
}

// Keep the password out of logs
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("apiname", &self.apiname)
            .field("username", &self.username)
            .field("authtoken", &self.authtoken.as_ref().map(|_| "<redacted>"))
            .field("usertobitid", &self.usertobitid)
            .field("personid", &self.personid)
            .field("usecount", &self.usecount)
            .field("tokenstatus", &self.tokenstatus)
            .field("accountstatus", &self.accountstatus)
            .finish()
    }
}

impl Account {
    pub const PASSWORD_MASK: &'static str = "********";

    /// Key used for deletion
    pub fn key(&self) -> AccountKey {
        AccountKey {
            apiname: self.apiname.clone(),
            username: self.username.clone(),
        }
    }

    /// First ten characters of the auth token followed by an ellipsis
    pub fn token_preview(&self) -> Option<String> {
        self.authtoken
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("{}...", t.chars().take(10).collect::<String>()))
    }
}

/// `(apiname, username)` pair identifying an account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountKey {
    pub apiname: String,
    pub username: String,
}

/// One element of the `POST /aichat/account/add` payload.
///
/// Optional fields are omitted from the JSON when `None`: the backend
/// distinguishes an absent field from an explicitly empty one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountRequest {
    pub apiname: String,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authtoken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usertobitid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usecount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenstatus: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountstatus: Option<bool>,
}

/// Per-item result of an account add or delete
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountResult {
    #[serde(default)]
    pub apiname: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub status: OperationStatus,
}

impl HasStatus for AccountResult {
    fn status(&self) -> OperationStatus {
        self.status
    }
}

// ============================================================================
// Channels
// ============================================================================

/// Upstream provider family of a channel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ChannelType {
    #[default]
    OpenAi,
    Anthropic,
    Azure,
    Custom,
    /// A type string this console does not know about
    Other(String),
}

impl ChannelType {
    /// Types offered by the add dialog
    pub const SELECTABLE: [ChannelType; 4] = [
        ChannelType::OpenAi,
        ChannelType::Anthropic,
        ChannelType::Azure,
        ChannelType::Custom,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ChannelType::OpenAi => "openai",
            ChannelType::Anthropic => "anthropic",
            ChannelType::Azure => "azure",
            ChannelType::Custom => "custom",
            ChannelType::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ChannelType::OpenAi => "OpenAI",
            ChannelType::Anthropic => "Anthropic",
            ChannelType::Azure => "Azure",
            ChannelType::Custom => "Custom",
            ChannelType::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "openai" => ChannelType::OpenAi,
            "anthropic" => ChannelType::Anthropic,
            "azure" => ChannelType::Azure,
            "custom" => ChannelType::Custom,
            other => ChannelType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChannelType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChannelType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ChannelType::parse(&s))
    }
}

pub const DEFAULT_MAX_CONCURRENT: i64 = 10;
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;
pub const DEFAULT_PRIORITY: i64 = 1;

fn default_max_concurrent() -> i64 {
    DEFAULT_MAX_CONCURRENT
}

fn default_timeout() -> i64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

/// Configured upstream provider endpoint
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub channelname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channeltype: ChannelType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channelurl: String,
    #[serde(default, skip_serializing, deserialize_with = "null_as_default")]
    pub channelkey: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub channelstatus: bool,
    #[serde(default = "default_max_concurrent", deserialize_with = "null_as_max_concurrent")]
    pub maxconcurrent: i64,
    #[serde(default = "default_timeout", deserialize_with = "null_as_timeout")]
    pub timeout: i64,
    #[serde(default = "default_priority", deserialize_with = "null_as_priority")]
    pub priority: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub createtime: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updatetime: String,
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.id)
            .field("channelname", &self.channelname)
            .field("channeltype", &self.channeltype)
            .field("channelurl", &self.channelurl)
            .field("channelstatus", &self.channelstatus)
            .field("maxconcurrent", &self.maxconcurrent)
            .field("timeout", &self.timeout)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// One element of the `POST /aichat/channel/add` payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelRequest {
    pub channelname: String,
    pub channeltype: ChannelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channelurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channelkey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channelstatus: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxconcurrent: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One element of the `POST /aichat/channel/delete` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId {
    pub id: i64,
}

/// Body of `POST /aichat/channel/updatestatus`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatusUpdate {
    pub channelname: String,
    pub status: bool,
}

impl ChannelStatusUpdate {
    /// Request that flips the channel's current enabled flag
    pub fn flip(channel: &Channel) -> Self {
        Self {
            channelname: channel.channelname.clone(),
            status: !channel.channelstatus,
        }
    }
}

/// Per-item result of a channel add or delete
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelResult {
    #[serde(default)]
    pub status: OperationStatus,
    #[serde(default)]
    pub channelname: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

impl HasStatus for ChannelResult {
    fn status(&self) -> OperationStatus {
        self.status
    }
}

// ============================================================================
// Models
// ============================================================================

/// Body of `GET /chaynsapi/v1/models`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelListing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

/// One entry of the upstream model catalog.
///
/// Only a handful of fields are recognized, and only when they carry the
/// expected JSON type. Everything else, including a recognized field with
/// an unexpected type, is carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for ModelEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut extra = Map::<String, Value>::deserialize(deserializer)?;

        let id = match extra.remove("id") {
            Some(Value::String(id)) => id,
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(D::Error::missing_field("id")),
        };
        let created = match extra.get("created").and_then(Value::as_i64) {
            Some(secs) => {
                extra.remove("created");
                Some(secs)
            }
            None => None,
        };

        Ok(Self {
            id,
            owned_by: take_string(&mut extra, "owned_by"),
            description: take_string(&mut extra, "description"),
            created,
            object: take_string(&mut extra, "object"),
            extra,
        })
    }
}

/// Remove `key` only when it holds a string
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !map.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

impl ModelEntry {
    /// Provider label, `"unknown"` when the upstream omits it
    pub fn provider(&self) -> &str {
        self.owned_by.as_deref().unwrap_or("unknown")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Full record as pretty-printed JSON, passthrough fields included
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_defaults_and_masking() {
        let account: Account = serde_json::from_value(json!({
            "apiname": "openai-1",
            "username": "alice",
            "password": "secret",
            "authtoken": "abcdefghijklmnop"
        }))
        .unwrap();

        assert_eq!(account.usecount, 0);
        assert!(account.tokenstatus);
        assert!(account.accountstatus);
        assert_eq!(account.token_preview().as_deref(), Some("abcdefghij..."));

        // The password never leaves the struct again
        let out = serde_json::to_value(&account).unwrap();
        assert!(out.get("password").is_none());
        assert!(!format!("{:?}", account).contains("secret"));
    }

    #[test]
    fn test_unknown_status_tag_is_not_success() {
        let results: Vec<ChannelResult> = serde_json::from_value(json!([
            {"status": "success", "channelname": "a"},
            {"status": "partial"},
            {}
        ]))
        .unwrap();

        assert!(results[0].status().is_success());
        assert_eq!(results[1].status, OperationStatus::Unknown);
        assert_eq!(results[2].status, OperationStatus::Unknown);
    }

    #[test]
    fn test_channel_type_preserves_unknown_values() {
        let channel: Channel = serde_json::from_value(json!({
            "id": 7,
            "channelname": "gemini",
            "channeltype": "google",
            "channelstatus": false
        }))
        .unwrap();

        assert_eq!(channel.channeltype, ChannelType::Other("google".to_string()));
        assert_eq!(channel.maxconcurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(channel.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(channel.priority, DEFAULT_PRIORITY);
        assert_eq!(serde_json::to_value(&channel.channeltype).unwrap(), json!("google"));
    }

    #[test]
    fn test_status_update_flips_current_flag() {
        let channel: Channel = serde_json::from_value(json!({
            "id": 1,
            "channelname": "main",
            "channelstatus": true
        }))
        .unwrap();

        let update = ChannelStatusUpdate::flip(&channel);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"channelname": "main", "status": false})
        );
    }

    #[test]
    fn test_model_entry_keeps_passthrough_fields() {
        let listing: ModelListing = serde_json::from_value(json!({
            "object": "list",
            "data": [
                {"id": "gpt-4o", "owned_by": "openai", "created": 1700000000, "context_window": 128000},
                {"id": "mystery"}
            ]
        }))
        .unwrap();

        let first = &listing.data[0];
        assert_eq!(first.provider(), "openai");
        assert_eq!(first.extra.get("context_window"), Some(&json!(128000)));
        assert_eq!(first.created_at().unwrap().timestamp(), 1_700_000_000);
        assert!(first.to_pretty_json().contains("context_window"));

        assert_eq!(listing.data[1].provider(), "unknown");
        assert!(listing.data[1].created_at().is_none());
    }

    #[test]
    fn test_null_columns_read_as_defaults() {
        let channel: Channel = serde_json::from_value(json!({
            "id": 1,
            "channelname": "a",
            "channeltype": null,
            "channelurl": null,
            "channelstatus": null,
            "maxconcurrent": null,
            "timeout": null,
            "priority": null,
            "description": null,
            "createtime": null,
            "updatetime": null
        }))
        .unwrap();

        assert_eq!(channel.channeltype, ChannelType::OpenAi);
        assert_eq!(channel.channelurl, "");
        assert!(channel.channelstatus);
        assert_eq!(channel.maxconcurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(channel.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(channel.priority, DEFAULT_PRIORITY);
        assert_eq!(channel.description, "");

        let account: Account = serde_json::from_value(json!({
            "apiname": "openai-1",
            "username": "alice",
            "password": null,
            "usecount": null,
            "tokenstatus": null,
            "accountstatus": null
        }))
        .unwrap();

        assert_eq!(account.password, "");
        assert_eq!(account.usecount, 0);
        assert!(account.tokenstatus && account.accountstatus);
    }

    #[test]
    fn test_model_fields_with_odd_types_stay_in_extra() {
        let model: ModelEntry = serde_json::from_value(json!({
            "id": "gpt-4o",
            "created": 1700000000.5,
            "owned_by": {"org": "openai"},
            "description": null
        }))
        .unwrap();

        assert!(model.created.is_none());
        assert!(model.created_at().is_none());
        assert_eq!(model.provider(), "unknown");
        assert_eq!(model.extra.get("created"), Some(&json!(1700000000.5)));
        assert_eq!(model.extra.get("owned_by"), Some(&json!({"org": "openai"})));

        let raw = model.to_pretty_json();
        assert!(raw.contains("1700000000.5"));
        assert!(raw.contains("\"org\""));
    }

    #[test]
    fn test_model_without_id_is_rejected() {
        assert!(serde_json::from_value::<ModelEntry>(json!({"owned_by": "openai"})).is_err());
        assert!(serde_json::from_value::<ModelEntry>(json!({"id": null})).is_err());
    }
}
