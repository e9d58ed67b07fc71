//! In-memory stand-ins for the chain, the wallet and the Relay status API.

use crate::core::{
    AccountKey, InstructionDescriptor, Quote, RelayStatus, SettlementStatus, Step, StepItem,
    StepItemData, SwapError, SwapResult,
};
use crate::transaction::{ChainEndpoint, StatusSource, TransactionSigner};
use async_trait::async_trait;
use solana_sdk::{
    address_lookup_table::AddressLookupTableAccount,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    system_program,
    transaction::VersionedTransaction,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct FakeChain {
    pub blockhash: Hash,
    tables: HashMap<Pubkey, AddressLookupTableAccount>,
    fail_sends: bool,
    pub blockhash_calls: AtomicUsize,
    pub lookup_calls: AtomicUsize,
    pub sent: Mutex<Vec<VersionedTransaction>>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self {
            blockhash: Hash::new_unique(),
            tables: HashMap::new(),
            fail_sends: false,
            blockhash_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_table(mut self, key: Pubkey, addresses: Vec<Pubkey>) -> Self {
        self.tables
            .insert(key, AddressLookupTableAccount { key, addresses });
        self
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn total_calls(&self) -> usize {
        self.blockhash_calls.load(Ordering::SeqCst)
            + self.lookup_calls.load(Ordering::SeqCst)
            + self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainEndpoint for FakeChain {
    async fn latest_blockhash(&self) -> SwapResult<Hash> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.blockhash)
    }

    async fn lookup_table(&self, address: &Pubkey) -> SwapResult<Option<AddressLookupTableAccount>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tables.get(address).cloned())
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> SwapResult<Signature> {
        if self.fail_sends {
            return Err(SwapError::NetworkError(
                "RPC error: Blockhash not found".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }
}

/// Signer that records what it was given without touching the chain.
pub struct RecordingSigner {
    reject: Option<String>,
    pub calls: AtomicUsize,
    pub received: Mutex<Vec<VersionedTransaction>>,
}

impl RecordingSigner {
    pub fn accepting() -> Self {
        Self {
            reject: None,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            reject: Some(reason.to_string()),
            ..Self::accepting()
        }
    }
}

#[async_trait]
impl TransactionSigner for RecordingSigner {
    async fn sign_and_send(
        &self,
        transaction: VersionedTransaction,
        _connection: &dyn ChainEndpoint,
        _address: &Pubkey,
    ) -> SwapResult<Signature> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.reject {
            return Err(SwapError::SubmissionError(reason.clone()));
        }
        self.received.lock().unwrap().push(transaction);
        Ok(Signature::new_unique())
    }
}

/// Status source that replays a script, then repeats a fallback status.
pub struct ScriptedStatus {
    script: Mutex<VecDeque<SwapResult<SettlementStatus>>>,
    fallback: RelayStatus,
    delay: Option<Duration>,
    pub started: AtomicUsize,
    pub completed: AtomicUsize,
}

impl ScriptedStatus {
    pub fn new(script: Vec<SwapResult<SettlementStatus>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: RelayStatus::Pending,
            delay: None,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn always(status: RelayStatus) -> Self {
        Self {
            fallback: status,
            ..Self::new(vec![])
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl StatusSource for ScriptedStatus {
    async fn fetch_status(&self, _request_id: &str) -> SwapResult<SettlementStatus> {
        self.started.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        self.completed.fetch_add(1, Ordering::SeqCst);
        next.unwrap_or_else(|| Ok(SettlementStatus::new(self.fallback.clone())))
    }
}

/// Deposit-shaped item: a transfer into `table_entry` plus a memo, with one ALT.
pub fn bridge_item(payer: &Pubkey, table: &Pubkey, table_entry: &Pubkey) -> StepItem {
    let memo_program = Pubkey::new_unique();
    StepItem {
        status: Some("incomplete".to_string()),
        data: Some(StepItemData {
            instructions: Some(vec![
                InstructionDescriptor {
                    program_id: system_program::id().to_string(),
                    keys: vec![
                        AccountKey {
                            pubkey: payer.to_string(),
                            is_signer: true,
                            is_writable: true,
                        },
                        AccountKey {
                            pubkey: table_entry.to_string(),
                            is_signer: false,
                            is_writable: true,
                        },
                    ],
                    data: "0200000080969800".to_string(),
                },
                InstructionDescriptor {
                    program_id: memo_program.to_string(),
                    keys: vec![AccountKey {
                        pubkey: payer.to_string(),
                        is_signer: true,
                        is_writable: false,
                    }],
                    data: hex::encode("0x92b9"),
                },
            ]),
            address_lookup_table_addresses: Some(vec![table.to_string()]),
        }),
    }
}

pub fn quote_with(kind: &str, items_per_step: &[usize], item: &StepItem) -> Quote {
    Quote {
        steps: items_per_step
            .iter()
            .enumerate()
            .map(|(i, &count)| Step {
                id: Some(format!("step-{}", i)),
                kind: kind.to_string(),
                request_id: Some(format!("0x{:02x}", i)),
                items: vec![item.clone(); count],
                ..Step::default()
            })
            .collect(),
        ..Quote::default()
    }
}
