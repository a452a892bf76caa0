//! Palaver TUI entry point.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use palaver_app::{FileIdentityStore, IdentityStore, Runtime, StatsPoller};
use palaver_client::{Client, Identity, ReconnectPolicy};
use palaver_tui::{TerminalDriver, stats_url_for};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// How often the stats endpoint is polled.
const STATS_INTERVAL: Duration = Duration::from_secs(10);

/// Palaver terminal chat client
#[derive(Parser, Debug)]
#[command(name = "palaver")]
#[command(about = "Terminal client for the Palaver chat protocol")]
#[command(version)]
struct Args {
    /// WebSocket endpoint of the chat server
    #[arg(short, long, default_value = "ws://127.0.0.1:8080/ws/chat")]
    server: String,

    /// Display name (skips the login prompt)
    #[arg(short, long)]
    name: Option<String>,

    /// Stats endpoint; derived from the server URL when omitted
    #[arg(long)]
    stats_url: Option<String>,

    /// Delay between reconnection attempts, in milliseconds
    #[arg(long, default_value = "2000")]
    reconnect_delay_ms: u64,

    /// Maximum reconnection attempts (retries forever when omitted)
    #[arg(long)]
    max_reconnects: Option<u32>,

    /// Append logs to this file (the terminal stays clean)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::sync::Arc::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    let store = FileIdentityStore::default_location();
    let mut identity = match store.load() {
        Ok(identity) => identity.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable identity file");
            Identity::default()
        },
    };
    if let Some(name) = args.name {
        identity.display_name = name;
    }

    let policy = ReconnectPolicy {
        delay: Duration::from_millis(args.reconnect_delay_ms),
        max_attempts: args.max_reconnects,
        ..ReconnectPolicy::default()
    };
    let client = Client::new(identity, policy);
    let driver = TerminalDriver::new(args.server.clone())?;

    let mut runtime = Runtime::new(driver, client, store);
    if let Some(url) = args.stats_url.or_else(|| stats_url_for(&args.server)) {
        runtime = runtime.with_stats(StatsPoller::new(url, STATS_INTERVAL).spawn());
    }

    Ok(runtime.run().await?)
}
