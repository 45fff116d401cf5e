//! Table and JSON rendering for command output

use aichat_shared::{Account, Channel, ModelEntry};
use chrono::Local;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Cut to `width` characters, marking the cut with `…`
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn or_dash(text: Option<&str>) -> &str {
    match text {
        Some(t) if !t.is_empty() => t,
        _ => "-",
    }
}

fn flag(value: bool, on: &'static str, off: &'static str) -> &'static str {
    if value {
        on
    } else {
        off
    }
}

pub fn accounts_table(accounts: &[Account]) -> String {
    let mut lines = vec![
        format!(
            "{:<20} {:<24} {:<10} {:<14} {:<12} {:<14} {:>6} {:<8} {:<8}",
            "API NAME", "USERNAME", "PASSWORD", "AUTH TOKEN", "TOBIT ID", "PERSON ID", "USES", "TOKEN", "ACCOUNT"
        ),
        "-".repeat(128),
    ];

    for account in accounts {
        let tobit_id = account.usertobitid.map(|id| id.to_string());
        lines.push(format!(
            "{:<20} {:<24} {:<10} {:<14} {:<12} {:<14} {:>6} {:<8} {:<8}",
            clip(&account.apiname, 20),
            clip(&account.username, 24),
            Account::PASSWORD_MASK,
            account.token_preview().unwrap_or_else(|| "-".to_string()),
            or_dash(tobit_id.as_deref()),
            clip(or_dash(account.personid.as_deref()), 14),
            account.usecount,
            flag(account.tokenstatus, "valid", "invalid"),
            flag(account.accountstatus, "enabled", "disabled"),
        ));
    }

    lines.push(format!("{} account(s)", accounts.len()));
    lines.join("\n")
}

pub fn channels_table(channels: &[Channel]) -> String {
    let mut lines = vec![
        format!(
            "{:>6} {:<24} {:<10} {:<36} {:<9} {:>5} {:>8} {:>4} {:<20}",
            "ID", "NAME", "TYPE", "URL", "STATUS", "CONC", "TIMEOUT", "PRIO", "UPDATED"
        ),
        "-".repeat(130),
    ];

    for channel in channels {
        lines.push(format!(
            "{:>6} {:<24} {:<10} {:<36} {:<9} {:>5} {:>8} {:>4} {:<20}",
            channel.id,
            clip(&channel.channelname, 24),
            channel.channeltype.as_str(),
            clip(or_dash(Some(channel.channelurl.as_str())), 36),
            flag(channel.channelstatus, "enabled", "disabled"),
            channel.maxconcurrent,
            channel.timeout,
            channel.priority,
            or_dash(Some(channel.updatetime.as_str())),
        ));
    }

    lines.push(format!("{} channel(s)", channels.len()));
    lines.join("\n")
}

pub fn models_table(models: &[ModelEntry]) -> String {
    let mut lines = vec![
        format!("{:<40} {:<16} {:<20} {:<40}", "ID", "PROVIDER", "CREATED", "DESCRIPTION"),
        "-".repeat(118),
    ];

    for model in models {
        let created = model
            .created_at()
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string());
        lines.push(format!(
            "{:<40} {:<16} {:<20} {:<40}",
            clip(&model.id, 40),
            clip(model.provider(), 16),
            or_dash(created.as_deref()),
            clip(or_dash(model.description.as_deref()), 40),
        ));
    }

    lines.push(format!("{} model(s)", models.len()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_accounts_table_masks_secrets() {
        let accounts: Vec<Account> = serde_json::from_value(json!([{
            "apiname": "openai-1",
            "username": "alice",
            "password": "hunter2",
            "authtoken": "sk-abcdefghijklmnop",
            "usecount": 3,
            "tokenstatus": true,
            "accountstatus": false
        }]))
        .unwrap();

        let table = accounts_table(&accounts);
        assert!(!table.contains("hunter2"));
        assert!(!table.contains("sk-abcdefghijklmnop"));
        assert!(table.contains("sk-abcdefg..."));
        assert!(table.contains("disabled"));
        assert!(table.ends_with("1 account(s)"));
    }

    #[test]
    fn test_channels_json_omits_key() {
        let channels: Vec<Channel> = serde_json::from_value(json!([{
            "id": 4,
            "channelname": "anthropic-main",
            "channeltype": "anthropic",
            "channelkey": "secret-key",
            "channelstatus": true
        }]))
        .unwrap();

        let rendered = to_json(&channels).unwrap();
        assert!(rendered.contains("anthropic-main"));
        assert!(!rendered.contains("secret-key"));
        assert!(channels_table(&channels).contains("anthropic"));
    }

    #[test]
    fn test_models_table_falls_back_to_unknown_provider() {
        let models: Vec<ModelEntry> = serde_json::from_value(json!([
            {"id": "gpt-4o", "owned_by": "openai"},
            {"id": "mystery"}
        ]))
        .unwrap();

        let table = models_table(&models);
        assert!(table.contains("openai"));
        assert!(table.contains("unknown"));
        assert!(table.ends_with("2 model(s)"));
    }
}
