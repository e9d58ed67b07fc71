use crate::core::{SwapError, SwapResult};
use crate::transaction::rpc::ChainEndpoint;
use futures::future::try_join_all;
use log::{debug, info};
use solana_sdk::{
    account::Account,
    address_lookup_table::{self, state::AddressLookupTable, AddressLookupTableAccount},
    pubkey::Pubkey,
};
use std::str::FromStr;

/// Parse ALT account data fetched for `address`
pub fn parse_lookup_table(address: &Pubkey, account: &Account) -> SwapResult<AddressLookupTableAccount> {
    if account.owner != address_lookup_table::program::id() {
        return Err(SwapError::BuildError(format!(
            "Account {} is owned by {}, not the address lookup table program",
            address, account.owner
        )));
    }

    let table = AddressLookupTable::deserialize(&account.data)
        .map_err(|e| SwapError::BuildError(format!("Failed to parse ALT account {}: {}", address, e)))?;

    Ok(AddressLookupTableAccount {
        key: *address,
        addresses: table.addresses.to_vec(),
    })
}

/// Resolve every ALT referenced by a quote item, preserving order.
///
/// Tables are fetched concurrently. A table the chain does not know about fails the
/// whole resolution; it is never skipped.
pub async fn resolve_lookup_tables(
    chain: &dyn ChainEndpoint,
    addresses: &[String],
) -> SwapResult<Vec<AddressLookupTableAccount>> {
    if addresses.is_empty() {
        return Ok(vec![]);
    }

    let keys = addresses
        .iter()
        .map(|address| {
            Pubkey::from_str(address).map_err(|e| {
                SwapError::BuildError(format!("Invalid lookup table address {}: {}", address, e))
            })
        })
        .collect::<SwapResult<Vec<_>>>()?;

    let tables = try_join_all(keys.iter().map(|key| resolve_one(chain, key))).await?;

    info!(
        "Resolved {} ALT(s) with {} addresses",
        tables.len(),
        tables.iter().map(|t| t.addresses.len()).sum::<usize>()
    );
    Ok(tables)
}

async fn resolve_one(chain: &dyn ChainEndpoint, key: &Pubkey) -> SwapResult<AddressLookupTableAccount> {
    let table = chain
        .lookup_table(key)
        .await?
        .ok_or_else(|| SwapError::BuildError(format!("Address lookup table {} not found", key)))?;

    debug!("Loaded ALT {} with {} addresses", key, table.addresses.len());
    Ok(table)
}
