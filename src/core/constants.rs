// Relay chain identifiers
pub const RELAY_SOLANA_CHAIN_ID: u64 = 792703809;
pub const RELAY_BASE_CHAIN_ID: u64 = 8453;

// Currencies of the bridged pair
pub const ORIGIN_CURRENCY: &str = "11111111111111111111111111111111"; // native SOL
pub const DESTINATION_CURRENCY: &str = "0x0000000000000000000000000000000000000000"; // native ETH on Base

// 0.01 SOL in lamports
pub const BRIDGE_AMOUNT_LAMPORTS: u64 = 10_000_000;

// Relay API
pub const DEFAULT_RELAY_API_URL: &str = "https://api.relay.link";
pub const QUOTE_PATH: &str = "/quote";
pub const STATUS_PATH: &str = "/intents/status/v2";

// RPC Configuration
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_HTTP_TIMEOUT: u64 = 30;

// Settlement polling
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;
pub const DEFAULT_SETTLEMENT_TIMEOUT_MS: u64 = 60_000;

// Quote step kind that carries a chain transaction
pub const TRANSACTION_STEP_KIND: &str = "transaction";
