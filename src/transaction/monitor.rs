use crate::core::{
    constants::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLEMENT_TIMEOUT_MS, STATUS_PATH},
    SettlementStatus, SwapError, SwapResult,
};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, sleep, Instant, Interval, MissedTickBehavior};

/// Settlement polling configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Interval between status checks (milliseconds)
    pub poll_interval_ms: u64,
    /// Maximum time to wait for settlement (milliseconds)
    pub timeout_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_ms: DEFAULT_SETTLEMENT_TIMEOUT_MS,
        }
    }
}

/// Source of settlement status for a Relay request.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, request_id: &str) -> SwapResult<SettlementStatus>;
}

/// Relay `/intents/status/v2` client
pub struct RelayStatusClient {
    base_url: String,
    client: reqwest::Client,
}

impl RelayStatusClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> SwapResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SwapError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl StatusSource for RelayStatusClient {
    async fn fetch_status(&self, request_id: &str) -> SwapResult<SettlementStatus> {
        let url = format!("{}{}", self.base_url, STATUS_PATH);

        let resp = self
            .client
            .get(&url)
            .query(&[("requestId", request_id)])
            .send()
            .await
            .map_err(|e| SwapError::NetworkError(format!("status request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(SwapError::NetworkError(format!(
                "Status check failed: {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SwapError::NetworkError(format!("failed to read status response: {}", e)))?;
        let status: SettlementStatus = serde_json::from_str(&body)?;
        debug!("Swap status for {}: {}", request_id, status.status);
        Ok(status)
    }
}

#[derive(Debug)]
enum WatchState {
    Polling { polls: u32 },
    Success(SettlementStatus),
    TimedOut,
    Failed(SwapError),
}

/// Polls Relay until a request settles or the deadline passes.
pub struct SettlementWatcher {
    source: Arc<dyn StatusSource>,
    config: MonitorConfig,
}

impl SettlementWatcher {
    pub fn new(source: Arc<dyn StatusSource>, config: MonitorConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Wait for `request_id` to settle using the configured cadence and deadline.
    pub async fn watch(&self, request_id: &str) -> SwapResult<SettlementStatus> {
        self.watch_with(request_id, self.config.poll_interval_ms, self.config.timeout_ms)
            .await
    }

    /// Poll every `poll_interval_ms` until the status is `success`.
    ///
    /// The first poll fires one interval after the call. A failed poll ends the watch
    /// immediately. When `timeout_ms` elapses first, any poll still in flight is
    /// dropped and `SettlementTimeout` is returned. Both timers belong to this future,
    /// so nothing keeps running once it resolves.
    pub async fn watch_with(
        &self,
        request_id: &str,
        poll_interval_ms: u64,
        timeout_ms: u64,
    ) -> SwapResult<SettlementStatus> {
        let period = Duration::from_millis(poll_interval_ms.max(1));
        let started = Instant::now();

        let deadline = sleep(Duration::from_millis(timeout_ms));
        tokio::pin!(deadline);

        let mut ticker = interval_at(started + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Watching settlement of {} (every {}ms, timeout {}ms)",
            request_id, poll_interval_ms, timeout_ms
        );

        let mut state = WatchState::Polling { polls: 0 };
        loop {
            state = match state {
                WatchState::Polling { polls } => tokio::select! {
                    biased;
                    _ = &mut deadline => WatchState::TimedOut,
                    result = self.next_poll(&mut ticker, request_id) => {
                        Self::advance(request_id, polls + 1, result)
                    }
                },
                WatchState::Success(status) => {
                    info!(
                        "Request {} settled after {}ms",
                        request_id,
                        started.elapsed().as_millis()
                    );
                    return Ok(status);
                }
                WatchState::TimedOut => {
                    warn!("Swap timed out: {} not settled after {}ms", request_id, timeout_ms);
                    return Err(SwapError::SettlementTimeout {
                        request_id: request_id.to_string(),
                        timeout_ms,
                    });
                }
                WatchState::Failed(err) => return Err(err),
            };
        }
    }

    async fn next_poll(&self, ticker: &mut Interval, request_id: &str) -> SwapResult<SettlementStatus> {
        ticker.tick().await;
        self.source.fetch_status(request_id).await
    }

    fn advance(request_id: &str, polls: u32, result: SwapResult<SettlementStatus>) -> WatchState {
        match result {
            Ok(status) if status.status.is_success() => WatchState::Success(status),
            Ok(status) => {
                if status.status.is_failure() {
                    warn!(
                        "Relay reports {} for {} (poll {}), still waiting",
                        status.status, request_id, polls
                    );
                } else {
                    debug!("Swap status {} for {} (poll {})", status.status, request_id, polls);
                }
                WatchState::Polling { polls }
            }
            Err(err) => {
                warn!("Status check for {} failed on poll {}: {}", request_id, polls, err);
                WatchState::Failed(err)
            }
        }
    }
}
