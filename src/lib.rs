pub mod cli;
pub mod core;
pub mod executor;
pub mod quotes;
pub mod transaction;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use core::{Config, Quote, QuoteRequest, SettlementStatus, SubmissionResult, SwapError, SwapResult};
pub use executor::SwapOrchestrator;
pub use quotes::QuoteClient;
pub use transaction::{SettlementWatcher, SubmissionGateway, TransactionBuilder};
