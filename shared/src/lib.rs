//! Shared types for the AI Chat admin console
//!
//! This crate contains everything the browser console and the CLI have in
//! common:
//! - Wire types for the account, channel and model endpoints
//! - The persisted backend address
//! - A transport-agnostic typed API client
//! - View state for lists, forms and bulk selection

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod messages;
pub mod view;

pub use client::{paths, ConsoleClient, Transport};
pub use config::*;
pub use error::*;
pub use forms::*;
pub use messages::*;
pub use view::*;

#[cfg(test)]
mod tests {
    use super::client::mock::{Call, MockTransport};
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_add_account_then_reload() {
        let transport = MockTransport::default();
        let client = ConsoleClient::new(transport.clone());
        let mut accounts: ListState<Account> = ListState::default();
        let mut form: FormState<AccountForm> = FormState::default();

        form.open();
        form.fields.apiname = "openai-1".to_string();
        form.fields.username = "alice".to_string();
        form.fields.password = "secret".to_string();

        transport
            .reply(Ok(json!([{"apiname": "openai-1", "username": "alice", "status": "success"}])))
            .reply(Ok(json!([{"apiname": "openai-1", "username": "alice", "password": "secret"}])));

        let request = form.fields.to_request().unwrap();
        form.begin_submit();
        let results = block_on(client.add_accounts(&[request])).unwrap();
        assert!(first_succeeded(&results));
        form.succeed();

        accounts.begin_load();
        accounts.finish(block_on(client.list_accounts()));

        assert!(!form.open);
        assert_eq!(form.fields, AccountForm::default());
        assert_eq!(accounts.len(), 1);
        assert_eq!(
            transport.calls(),
            vec![
                Call::Post(
                    paths::ACCOUNT_ADD.to_string(),
                    json!([{"apiname": "openai-1", "username": "alice", "password": "secret"}])
                ),
                Call::Get(paths::ACCOUNT_INFO.to_string()),
            ]
        );
    }

    #[test]
    fn test_bulk_delete_reports_partial_success() {
        let transport = MockTransport::default();
        let client = ConsoleClient::new(transport.clone());
        let mut selection = Selection::new();
        for id in [1, 2, 3] {
            selection.toggle(id);
        }

        transport
            .reply(Ok(json!([{"status": "success"}, {"status": "failed"}, {"status": "success"}])))
            .reply(Ok(json!([{"id": 2, "channelname": "kept"}])));

        let results = block_on(client.delete_channels(&selection.ids())).unwrap();
        let tally = Tally::of(&results);
        selection.clear();

        let mut channels: ListState<Channel> = ListState::default();
        channels.begin_load();
        channels.finish(block_on(client.list_channels()));

        assert_eq!(tally.succeeded, 2);
        assert!(selection.is_empty());
        assert_eq!(channels.items()[0].channelname, "kept");
        assert_eq!(
            transport.calls()[0],
            Call::Post(
                paths::CHANNEL_DELETE.to_string(),
                json!([{"id": 1}, {"id": 2}, {"id": 3}])
            )
        );
    }

    #[test]
    fn test_failed_add_keeps_form_open() {
        let transport = MockTransport::default();
        let client = ConsoleClient::new(transport.clone());
        let mut form: FormState<ChannelForm> = FormState::default();
        form.open();
        form.fields.channelname = "dup".to_string();

        transport.reply(Ok(json!([{"status": "failed", "message": "channel exists"}])));

        let request = form.fields.to_request().unwrap();
        form.begin_submit();
        let results = block_on(client.add_channels(&[request])).unwrap();
        if !first_succeeded(&results) {
            let message = results
                .first()
                .and_then(|r| r.message.clone())
                .unwrap_or_default();
            form.fail(format!("Failed to add channel: {}", message));
        }

        assert!(form.open);
        assert_eq!(form.fields.channelname, "dup");
        assert_eq!(form.error.as_deref(), Some("Failed to add channel: channel exists"));
    }
}
