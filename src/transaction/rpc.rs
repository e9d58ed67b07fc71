use crate::core::SwapResult;
use crate::transaction::alt::parse_lookup_table;
use async_trait::async_trait;
use log::debug;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    address_lookup_table::AddressLookupTableAccount,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use std::sync::Arc;

/// Operations the bridge needs from a Solana node.
#[async_trait]
pub trait ChainEndpoint: Send + Sync {
    /// Most recent blockhash; never cached.
    async fn latest_blockhash(&self) -> SwapResult<Hash>;

    /// Resolve an address lookup table. `Ok(None)` when no such account exists.
    async fn lookup_table(&self, address: &Pubkey) -> SwapResult<Option<AddressLookupTableAccount>>;

    /// Broadcast a fully signed transaction.
    async fn send_transaction(&self, transaction: &VersionedTransaction) -> SwapResult<Signature>;
}

/// `ChainEndpoint` backed by a JSON-RPC node.
#[derive(Clone)]
pub struct RpcChainEndpoint {
    rpc_client: Arc<RpcClient>,
}

impl RpcChainEndpoint {
    pub fn new(rpc_url: String) -> Self {
        let rpc_client = RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed());
        Self::with_client(Arc::new(rpc_client))
    }

    pub fn with_client(rpc_client: Arc<RpcClient>) -> Self {
        Self { rpc_client }
    }

    pub fn url(&self) -> String {
        self.rpc_client.url()
    }
}

#[async_trait]
impl ChainEndpoint for RpcChainEndpoint {
    async fn latest_blockhash(&self) -> SwapResult<Hash> {
        let blockhash = self.rpc_client.get_latest_blockhash().await?;
        debug!("Latest blockhash: {}", blockhash);
        Ok(blockhash)
    }

    async fn lookup_table(&self, address: &Pubkey) -> SwapResult<Option<AddressLookupTableAccount>> {
        debug!("Fetching ALT from RPC: {}", address);
        let account = self
            .rpc_client
            .get_account_with_commitment(address, self.rpc_client.commitment())
            .await?
            .value;

        match account {
            Some(account) => parse_lookup_table(address, &account).map(Some),
            None => Ok(None),
        }
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> SwapResult<Signature> {
        let signature = self.rpc_client.send_transaction(transaction).await?;
        Ok(signature)
    }
}
