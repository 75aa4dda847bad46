use serde::{Deserialize, Serialize};

use super::lenient::de_u64;

/// The single network the contracts are deployed on.
///
/// Fixed per deployment; distinct from whatever network the user's wallet is on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractNetwork {
    pub chain_id: u64,
    pub name: String,
}

/// Confirmation of a settled write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TxReceipt {
    pub tx_hash: String,
    #[serde(deserialize_with = "de_u64")]
    pub block_number: u64,
    /// Address that signed the transaction
    pub signer: String,
}
