use crate::core::{constants::QUOTE_PATH, Quote, QuoteRequest, SwapError, SwapResult};
use crate::utils::with_timing;
use log::{debug, info};
use std::time::Duration;

/// Client for the Relay quote endpoint.
pub struct QuoteClient {
    base_url: String,
    client: reqwest::Client,
}

impl QuoteClient {
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

    /// Request a quote for bridging the fixed SOL amount from `origin_address`
    /// on Solana to `destination_address` on Base.
    pub async fn request_quote(
        &self,
        origin_address: &str,
        destination_address: &str,
    ) -> SwapResult<Quote> {
        let request = QuoteRequest::fixed_pair(origin_address, destination_address);
        with_timing("getRelayQuote", self.send(&request)).await
    }

    async fn send(&self, request: &QuoteRequest) -> SwapResult<Quote> {
        let url = format!("{}{}", self.base_url, QUOTE_PATH);
        debug!("POST {} for {} -> {}", url, request.user, request.recipient);

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SwapError::NetworkError(format!("quote request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SwapError::NetworkError(format!(
                "quote endpoint returned status {}: {}",
                status, body
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SwapError::NetworkError(format!("failed to read quote response: {}", e)))?;
        let quote: Quote = serde_json::from_str(&body)?;

        info!("Received quote with {} step(s)", quote.steps.len());
        Ok(quote)
    }
}
