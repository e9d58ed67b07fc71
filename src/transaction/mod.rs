pub mod alt;
pub mod monitor;
pub mod rpc;
pub mod submit;

use crate::core::{AccountKey, InstructionDescriptor, StepItem, SwapError, SwapResult};
use log::{debug, info};
use solana_sdk::{
    address_lookup_table::AddressLookupTableAccount,
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::{v0, VersionedMessage},
    packet::PACKET_DATA_SIZE,
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use std::str::FromStr;
use std::sync::Arc;

pub use monitor::{MonitorConfig, RelayStatusClient, SettlementWatcher, StatusSource};
pub use rpc::{ChainEndpoint, RpcChainEndpoint};
pub use submit::{KeypairSigner, SubmissionGateway, TransactionSigner};

/// An unsigned v0 transaction compiled from a quote item.
///
/// Holds the blockhash fetched when it was built, so it is consumed by the
/// submission step and never reused.
#[derive(Debug)]
pub struct BuiltTransaction {
    payer: Pubkey,
    instructions: Vec<Instruction>,
    lookup_tables: Vec<AddressLookupTableAccount>,
    recent_blockhash: Hash,
    transaction: VersionedTransaction,
    serialized_size: usize,
}

impl BuiltTransaction {
    fn compile(
        payer: Pubkey,
        instructions: Vec<Instruction>,
        lookup_tables: Vec<AddressLookupTableAccount>,
        recent_blockhash: Hash,
    ) -> SwapResult<Self> {
        let message = v0::Message::try_compile(&payer, &instructions, &lookup_tables, recent_blockhash)
            .map_err(|e| SwapError::BuildError(format!("Failed to compile v0 message: {}", e)))?;

        let required_signatures = message.header.num_required_signatures as usize;
        let transaction = VersionedTransaction {
            signatures: vec![Signature::default(); required_signatures],
            message: VersionedMessage::V0(message),
        };

        let serialized_size = bincode::serialized_size(&transaction)
            .map_err(|e| SwapError::BuildError(format!("Failed to serialize transaction: {}", e)))?
            as usize;
        if serialized_size > PACKET_DATA_SIZE {
            return Err(SwapError::BuildError(format!(
                "Transaction is {} bytes, limit is {}",
                serialized_size, PACKET_DATA_SIZE
            )));
        }

        Ok(Self {
            payer,
            instructions,
            lookup_tables,
            recent_blockhash,
            transaction,
            serialized_size,
        })
    }

    pub fn payer(&self) -> &Pubkey {
        &self.payer
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn lookup_tables(&self) -> &[AddressLookupTableAccount] {
        &self.lookup_tables
    }

    pub fn recent_blockhash(&self) -> &Hash {
        &self.recent_blockhash
    }

    pub fn transaction(&self) -> &VersionedTransaction {
        &self.transaction
    }

    pub fn serialized_size(&self) -> usize {
        self.serialized_size
    }

    pub fn into_transaction(self) -> VersionedTransaction {
        self.transaction
    }
}

/// Turns quote items into submittable transactions
pub struct TransactionBuilder {
    chain: Arc<dyn ChainEndpoint>,
}

impl TransactionBuilder {
    pub fn new(chain: Arc<dyn ChainEndpoint>) -> Self {
        Self { chain }
    }

    /// Build an unsigned v0 transaction paid for by `payer`.
    ///
    /// Lookup tables and the blockhash are fetched from the chain on every call.
    pub async fn build(&self, item: &StepItem, payer: &Pubkey) -> SwapResult<BuiltTransaction> {
        let data = item.data.as_ref();

        let descriptors = data
            .and_then(|d| d.instructions.as_deref())
            .unwrap_or(&[]);
        let instructions = decode_instructions(descriptors)?;

        let table_addresses = data
            .and_then(|d| d.address_lookup_table_addresses.as_deref())
            .unwrap_or(&[]);
        let lookup_tables = alt::resolve_lookup_tables(self.chain.as_ref(), table_addresses).await?;

        let recent_blockhash = self.chain.latest_blockhash().await?;

        let built = BuiltTransaction::compile(*payer, instructions, lookup_tables, recent_blockhash)?;
        info!(
            "Built v0 transaction: {} instruction(s), {} ALT(s), {} bytes",
            built.instructions.len(),
            built.lookup_tables.len(),
            built.serialized_size
        );
        Ok(built)
    }
}

/// Decode quote instruction descriptors into Solana instructions
pub fn decode_instructions(descriptors: &[InstructionDescriptor]) -> SwapResult<Vec<Instruction>> {
    descriptors.iter().map(decode_instruction).collect()
}

fn decode_instruction(descriptor: &InstructionDescriptor) -> SwapResult<Instruction> {
    let program_id = parse_key(&descriptor.program_id, "program id")?;

    let accounts = descriptor
        .keys
        .iter()
        .map(decode_account)
        .collect::<SwapResult<Vec<_>>>()?;

    let data = hex::decode(&descriptor.data).map_err(|e| {
        SwapError::BuildError(format!(
            "Invalid hex data for program {}: {}",
            descriptor.program_id, e
        ))
    })?;

    debug!(
        "Decoded instruction for {} with {} account(s), {} data byte(s)",
        program_id,
        accounts.len(),
        data.len()
    );

    Ok(Instruction {
        program_id,
        accounts,
        data,
    })
}

fn decode_account(key: &AccountKey) -> SwapResult<AccountMeta> {
    let pubkey = parse_key(&key.pubkey, "account")?;
    Ok(AccountMeta {
        pubkey,
        is_signer: key.is_signer,
        is_writable: key.is_writable,
    })
}

fn parse_key(value: &str, what: &str) -> SwapResult<Pubkey> {
    Pubkey::from_str(value)
        .map_err(|e| SwapError::BuildError(format!("Invalid {} {}: {}", what, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StepItemData;
    use crate::testing::{bridge_item, FakeChain};
    use solana_sdk::system_program;
    use std::sync::atomic::Ordering;

    fn descriptor(program_id: &str, data: &str, keys: Vec<AccountKey>) -> InstructionDescriptor {
        InstructionDescriptor {
            program_id: program_id.to_string(),
            keys,
            data: data.to_string(),
        }
    }

    #[test]
    fn test_decode_instruction_maps_flags_and_data() {
        let signer = Pubkey::new_unique();
        let readonly = Pubkey::new_unique();
        let descriptors = vec![descriptor(
            &system_program::id().to_string(),
            "0200000080969800",
            vec![
                AccountKey { pubkey: signer.to_string(), is_signer: true, is_writable: true },
                AccountKey { pubkey: readonly.to_string(), is_signer: false, is_writable: false },
            ],
        )];

        let instructions = decode_instructions(&descriptors).unwrap();
        assert_eq!(instructions.len(), 1);

        let ix = &instructions[0];
        assert_eq!(ix.program_id, system_program::id());
        assert_eq!(ix.accounts[0], AccountMeta::new(signer, true));
        assert_eq!(ix.accounts[1], AccountMeta::new_readonly(readonly, false));
        assert_eq!(ix.data, vec![2, 0, 0, 0, 0x80, 0x96, 0x98, 0]);
    }

    #[test]
    fn test_decode_rejects_bad_hex_and_keys() {
        let program = system_program::id().to_string();

        let bad_hex = vec![descriptor(&program, "0g", vec![])];
        assert!(matches!(decode_instructions(&bad_hex), Err(SwapError::BuildError(_))));

        let bad_program = vec![descriptor("nope", "00", vec![])];
        assert!(matches!(decode_instructions(&bad_program), Err(SwapError::BuildError(_))));

        let bad_account = vec![descriptor(
            &program,
            "00",
            vec![AccountKey { pubkey: "nope".to_string(), is_signer: false, is_writable: false }],
        )];
        assert!(matches!(decode_instructions(&bad_account), Err(SwapError::BuildError(_))));
    }

    #[tokio::test]
    async fn test_build_without_instructions_yields_empty_transaction() {
        let chain = Arc::new(FakeChain::new());
        let builder = TransactionBuilder::new(chain.clone());
        let payer = Pubkey::new_unique();

        for item in [
            StepItem::default(),
            StepItem {
                status: None,
                data: Some(StepItemData::default()),
            },
        ] {
            let built = builder.build(&item, &payer).await.unwrap();
            assert!(built.instructions().is_empty());
            assert!(built.lookup_tables().is_empty());
            assert!(built.transaction().message.instructions().is_empty());
            assert_eq!(built.payer(), &payer);
        }
    }

    #[tokio::test]
    async fn test_build_two_instructions_one_table() {
        let payer = Pubkey::new_unique();
        let table = Pubkey::new_unique();
        let table_entry = Pubkey::new_unique();
        let chain = Arc::new(FakeChain::new().with_table(table, vec![table_entry]));
        let builder = TransactionBuilder::new(chain.clone());

        let built = builder
            .build(&bridge_item(&payer, &table, &table_entry), &payer)
            .await
            .unwrap();

        assert_eq!(built.instructions().len(), 2);
        assert_eq!(built.lookup_tables().len(), 1);
        assert_eq!(built.lookup_tables()[0].key, table);
        assert_eq!(built.recent_blockhash(), &chain.blockhash);

        let message = &built.transaction().message;
        assert_eq!(message.instructions().len(), 2);
        assert_eq!(message.address_table_lookups().map(|l| l.len()), Some(1));
        assert_eq!(message.recent_blockhash(), &chain.blockhash);
        assert_eq!(chain.blockhash_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_build_is_unsigned() {
        let payer = Pubkey::new_unique();
        let table = Pubkey::new_unique();
        let entry = Pubkey::new_unique();
        let chain = Arc::new(FakeChain::new().with_table(table, vec![entry]));

        let built = TransactionBuilder::new(chain)
            .build(&bridge_item(&payer, &table, &entry), &payer)
            .await
            .unwrap();

        let tx = built.into_transaction();
        assert_eq!(tx.signatures.len(), 1);
        assert_eq!(tx.signatures[0], Signature::default());
    }

    #[tokio::test]
    async fn test_unresolvable_table_fails_without_transaction() {
        let payer = Pubkey::new_unique();
        let chain = Arc::new(FakeChain::new());
        let builder = TransactionBuilder::new(chain.clone());

        let result = builder
            .build(
                &bridge_item(&payer, &Pubkey::new_unique(), &Pubkey::new_unique()),
                &payer,
            )
            .await;

        assert!(matches!(result, Err(SwapError::BuildError(_))));
        // aborted before the blockhash fetch
        assert_eq!(chain.blockhash_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blockhash_fetched_per_build() {
        let payer = Pubkey::new_unique();
        let chain = Arc::new(FakeChain::new());
        let builder = TransactionBuilder::new(chain.clone());

        builder.build(&StepItem::default(), &payer).await.unwrap();
        builder.build(&StepItem::default(), &payer).await.unwrap();

        assert_eq!(chain.blockhash_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_oversized_transaction_rejected() {
        let payer = Pubkey::new_unique();
        let chain = Arc::new(FakeChain::new());
        let item = StepItem {
            status: None,
            data: Some(StepItemData {
                instructions: Some(vec![descriptor(
                    &system_program::id().to_string(),
                    &"ab".repeat(PACKET_DATA_SIZE),
                    vec![],
                )]),
                address_lookup_table_addresses: None,
            }),
        };

        let err = TransactionBuilder::new(chain)
            .build(&item, &payer)
            .await
            .unwrap_err();
        assert!(matches!(err, SwapError::BuildError(_)));
    }
}
