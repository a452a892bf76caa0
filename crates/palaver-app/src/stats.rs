//! Stats polling.
//!
//! Independent of the message protocol: a spawned task issues a read-only
//! request on a fixed interval and forwards the result over a channel. A
//! failed poll has no effect beyond stale numbers until the next tick.

use std::time::Duration;

use palaver_proto::ServerStats;
use tokio::sync::mpsc;

/// Periodic reader of the aggregate server counters.
#[derive(Debug, Clone)]
pub struct StatsPoller {
    http: reqwest::Client,
    url: String,
    interval: Duration,
}

/// Handle to a running stats poll task.
pub struct StatsHandle {
    /// Successive snapshots, newest last.
    pub updates: mpsc::Receiver<ServerStats>,
    abort_handle: tokio::task::AbortHandle,
}

impl StatsHandle {
    /// Stop the poll task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

impl StatsPoller {
    /// Poller for the given endpoint and interval.
    pub fn new(url: impl Into<String>, interval: Duration) -> Self {
        Self { http: reqwest::Client::new(), url: url.into(), interval }
    }

    /// Spawn the poll loop.
    pub fn spawn(self) -> StatsHandle {
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match self.fetch().await {
                    Ok(stats) => {
                        if tx.send(stats).await.is_err() {
                            break;
                        }
                    },
                    Err(e) => tracing::debug!(error = %e, "stats poll failed"),
                }
            }
        });

        StatsHandle { updates: rx, abort_handle: handle.abort_handle() }
    }

    async fn fetch(&self) -> Result<ServerStats, reqwest::Error> {
        self.http.get(&self.url).send().await?.error_for_status()?.json().await
    }
}
