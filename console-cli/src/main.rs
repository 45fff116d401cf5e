//! AI Chat Console - admin tooling for the AI Chat backend
//!
//! Serves the browser console and offers the same account, channel and
//! model management from the command line.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use aichat_console::cli;
use aichat_console::http;
use aichat_console::server::{self, AssetSource};
use aichat_console::settings;
use aichat_shared::BackendAddress;

#[derive(Parser, Debug)]
#[command(name = "aichat-console")]
#[command(version)]
#[command(about = "Admin console for the AI Chat backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend host, overriding the saved address for this run
    #[arg(long, env = "AICHAT_HOST")]
    host: Option<String>,

    /// Backend port, overriding the saved address for this run
    #[arg(long, env = "AICHAT_PORT")]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the web console
    Serve {
        /// Port for the web UI
        #[arg(short, long, default_value = "8080", env = "AICHAT_CONSOLE_PORT")]
        port: u16,

        /// Serve the UI from this directory instead of the embedded bundle
        #[arg(long, env = "AICHAT_CONSOLE_DIST")]
        dist: Option<PathBuf>,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },

    /// Check that the backend answers
    Ping,

    /// Manage accounts
    Accounts {
        #[command(subcommand)]
        command: cli::AccountCommands,
    },

    /// Manage channels
    Channels {
        #[command(subcommand)]
        command: cli::ChannelCommands,
    },

    /// Browse models
    Models {
        #[command(subcommand)]
        command: cli::ModelCommands,
    },

    /// Manage the saved backend address
    Config {
        #[command(subcommand)]
        command: cli::ConfigCommands,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Some(Commands::Serve {
            port,
            ref dist,
            no_open,
        }) => {
            let source = match dist {
                Some(dir) => AssetSource::Directory(dir.clone()),
                None => AssetSource::Embedded,
            };
            serve(port, source, !no_open).await?;
        }
        Some(Commands::Ping) => {
            let address = backend_address(&cli);
            info!("Testing connection to {}", address.base_url());
            http::check_connection(&address).await?;
            println!("Connection OK: {}", address.base_url());
        }
        Some(Commands::Accounts { ref command }) => {
            command.execute(&http::connect(&backend_address(&cli))).await?;
        }
        Some(Commands::Channels { ref command }) => {
            command.execute(&http::connect(&backend_address(&cli))).await?;
        }
        Some(Commands::Models { ref command }) => {
            command.execute(&http::connect(&backend_address(&cli))).await?;
        }
        Some(Commands::Config { ref command }) => {
            let store = settings::open_store()?;
            command.execute(&store)?;
        }
        Some(Commands::Version) => {
            println!("AI Chat Console {}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            serve(8080, AssetSource::Embedded, false).await?;
        }
    }

    Ok(())
}

/// Saved address with `--host`/`--port` applied on top
fn backend_address(cli: &Cli) -> BackendAddress {
    let mut address = match settings::open_store() {
        Ok(store) => store.read(),
        Err(e) => {
            tracing::warn!("{}; using the default backend address", e);
            BackendAddress::default()
        }
    };

    if let Some(host) = &cli.host {
        address.host = host.clone();
    }
    if let Some(port) = cli.port {
        address.port = port;
    }
    address
}

async fn serve(port: u16, source: AssetSource, open_browser: bool) -> anyhow::Result<()> {
    let (addr, server_handle) = server::start_server(port, source).await?;
    let ui_url = format!("http://{}", addr);

    if open_browser {
        info!("Opening browser...");
        if let Err(e) = open::that(&ui_url) {
            tracing::warn!("Failed to open browser: {}", e);
            info!("Please open {} in your browser", ui_url);
        }
    }

    info!("");
    info!("   AI Chat Console is running at {}", ui_url);
    info!("   The backend address is set on the Settings page");
    info!("");
    info!("   Press Ctrl+C to stop");
    info!("");

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
        result = server_handle => {
            match result {
                Ok(Err(e)) => tracing::error!("{}", e),
                Err(e) => tracing::error!("Server task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
    }

    info!("AI Chat Console stopped.");
    Ok(())
}
