use crate::core::{SwapError, SwapResult};
use log::info;
use solana_sdk::{
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::Keypair,
    signer::SeedDerivable,
};
use std::future::Future;
use std::str::FromStr;
use std::time::Instant;

/// Await `fut` and log how long it took under `name`.
pub async fn with_timing<F, T>(name: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let result = fut.await;
    info!("{} took {} milliseconds", name, start.elapsed().as_millis());
    result
}

/// Parse a base58 Solana address
pub fn parse_pubkey(input: &str) -> SwapResult<Pubkey> {
    Pubkey::from_str(input.trim())
        .map_err(|e| SwapError::InvalidAddress(format!("{}: {}", input, e)))
}

/// Check that `input` is a 0x-prefixed, 20 byte EVM address
pub fn validate_evm_address(input: &str) -> SwapResult<()> {
    let body = input
        .strip_prefix("0x")
        .ok_or_else(|| SwapError::InvalidAddress(format!("{}: missing 0x prefix", input)))?;

    if body.len() != 40 {
        return Err(SwapError::InvalidAddress(format!(
            "{}: expected 40 hex characters, got {}",
            input,
            body.len()
        )));
    }

    hex::decode(body)
        .map(|_| ())
        .map_err(|e| SwapError::InvalidAddress(format!("{}: {}", input, e)))
}

/// Format lamports as SOL
pub fn format_lamports(lamports: u64) -> String {
    let whole = lamports / LAMPORTS_PER_SOL;
    let frac = lamports % LAMPORTS_PER_SOL;
    if frac == 0 {
        return format!("{} SOL", whole);
    }
    let frac = format!("{:09}", frac);
    format!("{}.{} SOL", whole, frac.trim_end_matches('0'))
}

/// Load a keypair from a base58 string or a JSON byte array.
///
/// Some wallets export 65 byte keys with a leading version byte, or only the
/// 32 byte seed; both are accepted.
pub fn parse_keypair(private_key: &str) -> SwapResult<Keypair> {
    let private_key = private_key.trim();

    if private_key.starts_with('[') && private_key.ends_with(']') {
        let bytes: Vec<u8> = serde_json::from_str(private_key)
            .map_err(|_| SwapError::ConfigError("Invalid private key format".to_string()))?;
        return Keypair::from_bytes(&bytes)
            .map_err(|_| SwapError::ConfigError("Invalid private key".to_string()));
    }

    let mut bytes = bs58::decode(private_key)
        .into_vec()
        .map_err(|_| SwapError::ConfigError("Invalid base58 private key format".to_string()))?;

    if bytes.len() == 65 {
        bytes.remove(0);
    }

    match bytes.len() {
        32 => Keypair::from_seed(&bytes)
            .map_err(|e| SwapError::ConfigError(format!("Invalid seed: {}", e))),
        64 => Keypair::from_bytes(&bytes)
            .map_err(|e| SwapError::ConfigError(format!("Invalid keypair: {}", e))),
        n => Err(SwapError::ConfigError(format!(
            "Private key must be 32 (seed) or 64 (keypair) bytes, got {}",
            n
        ))),
    }
}
