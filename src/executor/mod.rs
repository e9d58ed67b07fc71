
use crate::core::{
    constants::TRANSACTION_STEP_KIND, Config, Quote, StepItem, SubmissionResult, SwapError,
    SwapResult,
};
use crate::transaction::{
    ChainEndpoint, MonitorConfig, RelayStatusClient, RpcChainEndpoint, SettlementWatcher,
    StatusSource, SubmissionGateway, TransactionBuilder, TransactionSigner,
};
use crate::utils::with_timing;
use log::info;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

/// Runs a quoted bridge transfer: build, sign and send, then wait for settlement.
pub struct SwapOrchestrator {
    builder: TransactionBuilder,
    gateway: SubmissionGateway,
    watcher: SettlementWatcher,
}

impl SwapOrchestrator {
    pub fn new(
        chain: Arc<dyn ChainEndpoint>,
        status_source: Arc<dyn StatusSource>,
        monitor_config: MonitorConfig,
    ) -> Self {
        Self {
            builder: TransactionBuilder::new(chain.clone()),
            gateway: SubmissionGateway::new(chain),
            watcher: SettlementWatcher::new(status_source, monitor_config),
        }
    }

    /// Wire up the RPC node and Relay status client named in `config`.
    pub fn from_config(config: &Config) -> SwapResult<Self> {
        let chain = Arc::new(RpcChainEndpoint::new(config.rpc_url.clone()));
        let status = Arc::new(RelayStatusClient::new(
            &config.relay_api_url,
            config.http_timeout_secs,
        )?);
        Ok(Self::new(chain, status, config.monitor_config()))
    }

    /// Execute `quote` from `origin_address`, signing through `signer`.
    ///
    /// Returns the submission once Relay reports the transfer settled. A quote of the
    /// wrong shape is rejected before anything touches the chain or the wallet.
    pub async fn execute_swap(
        &self,
        quote: &Quote,
        origin_address: &Pubkey,
        signer: &dyn TransactionSigner,
    ) -> SwapResult<SubmissionResult> {
        let (request_id, item) = validate_quote(quote)?;

        let built = with_timing("build_transaction", self.builder.build(item, origin_address)).await?;

        let submission = with_timing(
            "submit_transaction",
            self.gateway.submit(built, origin_address, signer),
        )
        .await?;
        info!("Transaction sent {}", submission.signature);

        let status = with_timing("wait_for_settlement", self.watcher.watch(request_id)).await?;
        info!("Swap completed: {} ({})", request_id, status.status);

        Ok(submission)
    }
}

/// Check that `quote` is one transaction step with one item and return its
/// request id and item.
pub fn validate_quote(quote: &Quote) -> SwapResult<(&str, &StepItem)> {
    let step = match quote.steps.as_slice() {
        [step] => step,
        steps => {
            return Err(SwapError::InvalidQuoteShape(format!(
                "expected 1 step, got {}",
                steps.len()
            )))
        }
    };

    let item = match step.items.as_slice() {
        [item] => item,
        items => {
            return Err(SwapError::InvalidQuoteShape(format!(
                "expected 1 item, got {}",
                items.len()
            )))
        }
    };

    if step.kind != TRANSACTION_STEP_KIND {
        return Err(SwapError::InvalidQuoteShape(format!(
            "step is not a transaction: {}",
            step.kind
        )));
    }

    let request_id = step
        .request_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SwapError::InvalidQuoteShape("step has no requestId".to_string()))?;

    Ok((request_id, item))
}
