//! CLI subcommands for console management
//!
//! Provides commands for managing:
//! - Accounts (list, add, delete)
//! - Channels (list, add, delete, toggle)
//! - Models (list, show)
//! - Config (show, set, reset) for the saved backend address

mod output;

pub use output::{accounts_table, channels_table, models_table, to_json, OutputFormat};

use aichat_shared::{
    first_succeeded, AccountForm, AccountKey, AddressForm, AddressStore, BackendAddress,
    ChannelForm, ChannelStatusUpdate, ChannelType, ConsoleClient, KeyValueStore, Tally,
    DEFAULT_MAX_CONCURRENT, DEFAULT_PRIORITY, DEFAULT_TIMEOUT_SECS,
};
use clap::{Args, Subcommand};
use thiserror::Error;

use crate::http::ReqwestTransport;

/// API client the commands run against
pub type Client = ConsoleClient<ReqwestTransport>;

/// Outcomes the backend reported that should end the process with an error
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No channel named \"{0}\"")]
    UnknownChannel(String),

    #[error("No model with id \"{0}\"")]
    UnknownModel(String),

    #[error("{0}")]
    Rejected(String),
}

// =============================================================================
// Accounts Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List all accounts
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Add an account
    Add(AddAccountArgs),
    /// Delete an account
    Delete {
        /// API name the account belongs to
        apiname: String,
        /// Account username
        username: String,
        /// Force deletion without confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct AddAccountArgs {
    /// API name, usually a channel name
    #[arg(short, long)]
    pub apiname: String,
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long, env = "AICHAT_ACCOUNT_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub authtoken: Option<String>,
    #[arg(long)]
    pub usertobitid: Option<i64>,
    #[arg(long)]
    pub personid: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub usecount: i64,
    /// Mark the token invalid
    #[arg(long)]
    pub token_invalid: bool,
    /// Create the account disabled
    #[arg(long)]
    pub disabled: bool,
}

impl AddAccountArgs {
    pub fn to_form(&self) -> AccountForm {
        AccountForm {
            apiname: self.apiname.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            authtoken: self.authtoken.clone().unwrap_or_default(),
            usertobitid: self.usertobitid,
            personid: self.personid.clone().unwrap_or_default(),
            usecount: self.usecount,
            tokenstatus: !self.token_invalid,
            accountstatus: !self.disabled,
        }
    }
}

impl AccountCommands {
    pub async fn execute(&self, client: &Client) -> anyhow::Result<()> {
        match self {
            AccountCommands::List { format } => {
                let accounts = client.list_accounts().await?;
                match format {
                    OutputFormat::Json => println!("{}", to_json(&accounts)?),
                    OutputFormat::Table => println!("{}", accounts_table(&accounts)),
                }
                Ok(())
            }
            AccountCommands::Add(args) => {
                let request = args.to_form().to_request()?;
                let results = client.add_accounts(&[request]).await?;

                if !first_succeeded(&results) {
                    return Err(CommandError::Rejected("Failed to add account".to_string()).into());
                }
                println!("Account {}/{} added.", args.apiname.trim(), args.username.trim());
                Ok(())
            }
            AccountCommands::Delete {
                apiname,
                username,
                force,
            } => {
                if !force {
                    println!(
                        "Are you sure you want to delete account {}/{}? Use --force to confirm.",
                        apiname, username
                    );
                    return Ok(());
                }

                let key = AccountKey {
                    apiname: apiname.clone(),
                    username: username.clone(),
                };
                let results = client.delete_accounts(&[key]).await?;

                if !first_succeeded(&results) {
                    return Err(CommandError::Rejected("Failed to delete account".to_string()).into());
                }
                println!("Account {}/{} deleted.", apiname, username);
                Ok(())
            }
        }
    }
}

// =============================================================================
// Channels Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ChannelCommands {
    /// List all channels
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Add a channel
    Add(AddChannelArgs),
    /// Delete one or more channels by id
    Delete {
        /// Channel ids
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Force deletion without confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Flip a channel between enabled and disabled
    Toggle {
        /// Channel name
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct AddChannelArgs {
    /// Channel name
    #[arg(short, long)]
    pub name: String,
    /// Provider type
    #[arg(
        short = 't',
        long = "type",
        default_value = "openai",
        value_parser = ["openai", "anthropic", "azure", "custom"]
    )]
    pub channel_type: String,
    /// Upstream base URL
    #[arg(short, long)]
    pub url: Option<String>,
    /// Upstream API key
    #[arg(short, long, env = "AICHAT_CHANNEL_KEY", hide_env_values = true)]
    pub key: Option<String>,
    /// Create the channel disabled
    #[arg(long)]
    pub disabled: bool,
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: i64,
    /// Upstream timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: i64,
    #[arg(long, default_value_t = DEFAULT_PRIORITY)]
    pub priority: i64,
    #[arg(short, long)]
    pub description: Option<String>,
}

impl AddChannelArgs {
    pub fn to_form(&self) -> ChannelForm {
        let mut form = ChannelForm {
            channelname: self.name.clone(),
            channeltype: ChannelType::parse(&self.channel_type),
            channelurl: self.url.clone().unwrap_or_default(),
            channelkey: self.key.clone().unwrap_or_default(),
            channelstatus: !self.disabled,
            description: self.description.clone().unwrap_or_default(),
            ..Default::default()
        };
        // Same zero-means-default rule as the browser form
        form.set_maxconcurrent(&self.max_concurrent.to_string());
        form.set_timeout(&self.timeout.to_string());
        form.set_priority(&self.priority.to_string());
        form
    }
}

impl ChannelCommands {
    pub async fn execute(&self, client: &Client) -> anyhow::Result<()> {
        match self {
            ChannelCommands::List { format } => {
                let channels = client.list_channels().await?;
                match format {
                    OutputFormat::Json => println!("{}", to_json(&channels)?),
                    OutputFormat::Table => println!("{}", channels_table(&channels)),
                }
                Ok(())
            }
            ChannelCommands::Add(args) => {
                let request = args.to_form().to_request()?;
                let name = request.channelname.clone();
                let results = client.add_channels(&[request]).await?;

                if !first_succeeded(&results) {
                    let message = results
                        .first()
                        .and_then(|r| r.message.clone())
                        .unwrap_or_else(|| "Failed to add channel".to_string());
                    return Err(CommandError::Rejected(message).into());
                }
                println!("Channel \"{}\" added.", name);
                Ok(())
            }
            ChannelCommands::Delete { ids, force } => {
                if !force {
                    println!(
                        "Are you sure you want to delete {} channel(s)? Use --force to confirm.",
                        ids.len()
                    );
                    return Ok(());
                }

                let results = client.delete_channels(ids).await?;
                let tally = Tally::of(&results);
                println!("Deleted {} of {} channel(s)", tally.succeeded, ids.len());

                if tally.succeeded < ids.len() {
                    return Err(CommandError::Rejected(format!(
                        "{} channel(s) could not be deleted",
                        ids.len() - tally.succeeded
                    ))
                    .into());
                }
                Ok(())
            }
            ChannelCommands::Toggle { name } => {
                let channels = client.list_channels().await?;
                let channel = channels
                    .iter()
                    .find(|c| &c.channelname == name)
                    .ok_or_else(|| CommandError::UnknownChannel(name.clone()))?;

                let update = ChannelStatusUpdate::flip(channel);
                let reply = client.update_channel_status(&update).await?;

                if !reply.status.is_success() {
                    let message = reply.message.unwrap_or_else(|| reply.status.as_str().to_string());
                    return Err(CommandError::Rejected(format!(
                        "Failed to update status: {}",
                        message
                    ))
                    .into());
                }
                println!(
                    "Channel \"{}\" is now {}.",
                    name,
                    if update.status { "enabled" } else { "disabled" }
                );
                Ok(())
            }
        }
    }
}

// =============================================================================
// Models Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ModelCommands {
    /// List available models
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show the full record of one model
    Show {
        /// Model id
        id: String,
    },
}

impl ModelCommands {
    pub async fn execute(&self, client: &Client) -> anyhow::Result<()> {
        match self {
            ModelCommands::List { format } => {
                let listing = client.list_models().await?;
                match format {
                    OutputFormat::Json => println!("{}", to_json(&listing)?),
                    OutputFormat::Table => println!("{}", models_table(&listing.data)),
                }
                Ok(())
            }
            ModelCommands::Show { id } => {
                let listing = client.list_models().await?;
                let model = listing
                    .data
                    .iter()
                    .find(|m| &m.id == id)
                    .ok_or_else(|| CommandError::UnknownModel(id.clone()))?;
                println!("{}", model.to_pretty_json());
                Ok(())
            }
        }
    }
}

// =============================================================================
// Config Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the saved backend address
    Show,
    /// Save a new backend address
    Set {
        /// Backend host name or IP
        #[arg(long)]
        host: String,
        /// Backend port
        #[arg(long)]
        port: String,
    },
    /// Forget the saved address and go back to the default
    Reset,
}

impl ConfigCommands {
    pub fn execute<S: KeyValueStore>(&self, store: &AddressStore<S>) -> anyhow::Result<()> {
        match self {
            ConfigCommands::Show => {
                let address = store.read();
                println!("Backend:  {}", address);
                println!("Base URL: {}", address.base_url());
                Ok(())
            }
            ConfigCommands::Set { host, port } => {
                let address = AddressForm {
                    host: host.clone(),
                    port: port.clone(),
                }
                .validate()?;
                store.write(&address)?;
                println!("Backend address saved: {}", address.base_url());
                Ok(())
            }
            ConfigCommands::Reset => {
                store.reset()?;
                println!("Backend address reset to {}", BackendAddress::default());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aichat_shared::MemoryStore;
    use clap::Parser;
    use serde_json::json;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand, Debug)]
    enum TestCommands {
        #[command(subcommand)]
        Accounts(AccountCommands),
        #[command(subcommand)]
        Channels(ChannelCommands),
    }

    fn parse(args: &[&str]) -> TestCommands {
        TestCli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_add_account_sends_only_what_was_set() {
        let TestCommands::Accounts(AccountCommands::Add(args)) = parse(&[
            "accounts", "add", "--apiname", "openai-1", "--username", "alice", "--password", "pw",
            "--disabled",
        ]) else {
            panic!("expected accounts add");
        };

        let request = args.to_form().to_request().unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "apiname": "openai-1",
                "username": "alice",
                "password": "pw",
                "accountstatus": false
            })
        );
    }

    #[test]
    fn test_add_channel_defaults_are_omitted() {
        let TestCommands::Channels(ChannelCommands::Add(args)) = parse(&[
            "channels", "add", "--name", "claude", "--type", "anthropic", "--priority", "0",
        ]) else {
            panic!("expected channels add");
        };

        let request = args.to_form().to_request().unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"channelname": "claude", "channeltype": "anthropic"})
        );
    }

    #[test]
    fn test_unknown_channel_type_is_rejected() {
        let result = TestCli::try_parse_from(["test", "channels", "add", "--name", "x", "--type", "gemini"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_channel_delete_requires_ids() {
        assert!(TestCli::try_parse_from(["test", "channels", "delete", "--force"]).is_err());

        let TestCommands::Channels(ChannelCommands::Delete { ids, force }) =
            parse(&["channels", "delete", "3", "7", "--force"])
        else {
            panic!("expected channels delete");
        };
        assert_eq!(ids, vec![3, 7]);
        assert!(force);
    }

    #[test]
    fn test_config_set_validates_port() {
        let store = AddressStore::new(MemoryStore::new());

        let bad = ConfigCommands::Set {
            host: "10.0.0.5".to_string(),
            port: "70000".to_string(),
        };
        assert!(bad.execute(&store).is_err());
        assert_eq!(store.read(), BackendAddress::default());

        let good = ConfigCommands::Set {
            host: " 10.0.0.5 ".to_string(),
            port: "8000".to_string(),
        };
        good.execute(&store).unwrap();
        assert_eq!(store.read(), BackendAddress::new("10.0.0.5", 8000));

        ConfigCommands::Reset.execute(&store).unwrap();
        assert_eq!(store.read(), BackendAddress::default());
    }
}
