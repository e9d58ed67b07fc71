use crate::core::{constants::*, error::SwapResult, SwapError};
use crate::transaction::monitor::MonitorConfig;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rpc_url: String,
    pub relay_api_url: String,
    pub poll_interval_ms: u64,
    pub settlement_timeout_ms: u64,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> SwapResult<Self> {
        let rpc_url = env::var("RPC_URL")
            .or_else(|_| env::var("SOLANA_RPC_URL"))
            .unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());

        let relay_api_url = env::var("RELAY_API_URL")
            .unwrap_or_else(|_| DEFAULT_RELAY_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            rpc_url,
            relay_api_url,
            poll_interval_ms: env::var("SETTLEMENT_POLL_INTERVAL_MS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            settlement_timeout_ms: env::var("SETTLEMENT_TIMEOUT_MS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_SETTLEMENT_TIMEOUT_MS),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_HTTP_TIMEOUT),
        })
    }

    pub fn validate(&self) -> SwapResult<()> {
        for (name, url) in [("RPC URL", &self.rpc_url), ("Relay API URL", &self.relay_api_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SwapError::ConfigError(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.poll_interval_ms == 0 {
            return Err(SwapError::ConfigError(
                "Poll interval must be greater than 0".to_string(),
            ));
        }

        if self.settlement_timeout_ms <= self.poll_interval_ms {
            return Err(SwapError::ConfigError(
                "Settlement timeout must be longer than the poll interval".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(SwapError::ConfigError(
                "HTTP timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            poll_interval_ms: self.poll_interval_ms,
            timeout_ms: self.settlement_timeout_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            relay_api_url: DEFAULT_RELAY_API_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            settlement_timeout_ms: DEFAULT_SETTLEMENT_TIMEOUT_MS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT,
        }
    }
}
