use crate::core::constants::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use solana_sdk::signature::Signature;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// Body of a Relay `/quote` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub user: String,
    pub recipient: String,
    pub origin_chain_id: u64,
    pub destination_chain_id: u64,
    pub origin_currency: String,
    pub destination_currency: String,
    /// Smallest unit of the origin currency, sent as a decimal string.
    pub amount: String,
    pub trade_type: TradeType,
}

impl QuoteRequest {
    /// Request for the one pair this crate bridges: 0.01 SOL on Solana to ETH on Base.
    pub fn fixed_pair(user: &str, recipient: &str) -> Self {
        Self {
            user: user.to_string(),
            recipient: recipient.to_string(),
            origin_chain_id: RELAY_SOLANA_CHAIN_ID,
            destination_chain_id: RELAY_BASE_CHAIN_ID,
            origin_currency: ORIGIN_CURRENCY.to_string(),
            destination_currency: DESTINATION_CURRENCY.to_string(),
            amount: BRIDGE_AMOUNT_LAMPORTS.to_string(),
            trade_type: TradeType::ExactInput,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub items: Vec<StepItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepItem {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<StepItemData>,
}

/// Solana payload of a transaction step item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepItemData {
    #[serde(default)]
    pub instructions: Option<Vec<InstructionDescriptor>>,
    #[serde(default)]
    pub address_lookup_table_addresses: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionDescriptor {
    pub program_id: String,
    #[serde(default)]
    pub keys: Vec<AccountKey>,
    /// Hex encoded instruction data.
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKey {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub signature: Signature,
    pub submitted_at: i64,
}

/// Relay intent status. Unrecognised values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelayStatus {
    Waiting,
    Pending,
    Submitted,
    Success,
    Delayed,
    Refund,
    Failure,
    Unknown(String),
}

impl RelayStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RelayStatus::Success)
    }

    /// Provider reports the transfer went wrong. Not terminal for the watcher.
    pub fn is_failure(&self) -> bool {
        matches!(self, RelayStatus::Refund | RelayStatus::Failure)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RelayStatus::Waiting => "waiting",
            RelayStatus::Pending => "pending",
            RelayStatus::Submitted => "submitted",
            RelayStatus::Success => "success",
            RelayStatus::Delayed => "delayed",
            RelayStatus::Refund => "refund",
            RelayStatus::Failure => "failure",
            RelayStatus::Unknown(other) => other,
        }
    }
}

impl From<String> for RelayStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "waiting" => RelayStatus::Waiting,
            "pending" => RelayStatus::Pending,
            "submitted" => RelayStatus::Submitted,
            "success" => RelayStatus::Success,
            "delayed" => RelayStatus::Delayed,
            "refund" => RelayStatus::Refund,
            "failure" => RelayStatus::Failure,
            _ => RelayStatus::Unknown(value),
        }
    }
}

impl From<RelayStatus> for String {
    fn from(status: RelayStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One response from the Relay status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementStatus {
    pub status: RelayStatus,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub in_tx_hashes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tx_hashes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub updated_at: Option<i64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub origin_chain_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub destination_chain_id: Option<u64>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

// Only `status` is load-bearing; the extras must never fail a poll.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

impl SettlementStatus {
    pub fn new(status: RelayStatus) -> Self {
        Self {
            status,
            in_tx_hashes: Vec::new(),
            tx_hashes: Vec::new(),
            updated_at: None,
            origin_chain_id: None,
            destination_chain_id: None,
            metadata: Map::new(),
        }
    }
}
