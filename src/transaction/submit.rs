use crate::core::{SubmissionResult, SwapError, SwapResult};
use crate::transaction::{rpc::ChainEndpoint, BuiltTransaction};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::VersionedTransaction,
};
use std::sync::Arc;

/// Wallet capability that signs a transaction for `address` and broadcasts it
/// through `connection`.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_and_send(
        &self,
        transaction: VersionedTransaction,
        connection: &dyn ChainEndpoint,
        address: &Pubkey,
    ) -> SwapResult<Signature>;
}

/// Signs with a local keypair
pub struct KeypairSigner {
    keypair: Keypair,
}

impl KeypairSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[async_trait]
impl TransactionSigner for KeypairSigner {
    async fn sign_and_send(
        &self,
        transaction: VersionedTransaction,
        connection: &dyn ChainEndpoint,
        address: &Pubkey,
    ) -> SwapResult<Signature> {
        if *address != self.keypair.pubkey() {
            return Err(SwapError::SubmissionError(format!(
                "Keypair {} cannot sign for {}",
                self.keypair.pubkey(),
                address
            )));
        }

        let signed = VersionedTransaction::try_new(transaction.message, &[&self.keypair])
            .map_err(|e| SwapError::SubmissionError(format!("Failed to sign transaction: {}", e)))?;

        debug!("Sending signed v0 transaction...");
        connection.send_transaction(&signed).await
    }
}

/// Hands built transactions to a signer and reports the signature
pub struct SubmissionGateway {
    chain: Arc<dyn ChainEndpoint>,
}

impl SubmissionGateway {
    pub fn new(chain: Arc<dyn ChainEndpoint>) -> Self {
        Self { chain }
    }

    /// Sign and broadcast `built` as `payer`. Not retried.
    pub async fn submit(
        &self,
        built: BuiltTransaction,
        payer: &Pubkey,
        signer: &dyn TransactionSigner,
    ) -> SwapResult<SubmissionResult> {
        if built.payer() != payer {
            return Err(SwapError::SubmissionError(format!(
                "Transaction payer {} does not match signing address {}",
                built.payer(),
                payer
            )));
        }

        let signature = signer
            .sign_and_send(built.into_transaction(), self.chain.as_ref(), payer)
            .await
            .map_err(|e| match e {
                SwapError::SubmissionError(_) => e,
                other => SwapError::SubmissionError(other.to_string()),
            })?;

        info!("Transaction sent: {}", signature);
        Ok(SubmissionResult {
            signature,
            submitted_at: Utc::now().timestamp(),
        })
    }
}
