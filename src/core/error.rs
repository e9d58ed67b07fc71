use solana_client::client_error::ClientError;
use thiserror::Error;

pub type SwapResult<T> = Result<T, SwapError>;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Invalid quote: {0}")]
    InvalidQuoteShape(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Failed to build transaction: {0}")]
    BuildError(String),

    #[error("Submission failed: {0}")]
    SubmissionError(String),

    #[error("Swap timed out: request {request_id} not settled after {timeout_ms}ms")]
    SettlementTimeout { request_id: String, timeout_ms: u64 },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SwapError {
    /// True when the transfer may still complete on its own; the caller should
    /// check status later rather than start a new swap.
    pub fn is_settlement_pending(&self) -> bool {
        matches!(self, SwapError::SettlementTimeout { .. })
    }

    /// True when nothing was signed or broadcast, so re-initiating is safe.
    pub fn is_safe_to_retry(&self) -> bool {
        matches!(
            self,
            SwapError::InvalidQuoteShape(_)
                | SwapError::BuildError(_)
                | SwapError::InvalidAddress(_)
                | SwapError::ConfigError(_)
        )
    }
}

impl From<reqwest::Error> for SwapError {
    fn from(err: reqwest::Error) -> Self {
        SwapError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::SerializationError(err.to_string())
    }
}

impl From<ClientError> for SwapError {
    fn from(err: ClientError) -> Self {
        SwapError::NetworkError(format!("RPC error: {}", err))
    }
}
