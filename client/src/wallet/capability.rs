//! # Capability Resolver
//!
//! Combines the synced connection state with the fixed contract network into
//! the flags pages branch on:
//!
//! - `can_read`: always true, reads go through a fixed endpoint
//! - `is_on_contract_network`: the wallet's chain equals the contract chain
//! - `can_write`: ready AND connected AND on the contract network
//!
//! There is no partial-write mode. A write is only ever enabled together with
//! a resolved, non-empty signer address.

use std::sync::Arc;

use lib_core::AppError;
use shared::ContractNetwork;
use thiserror::Error;

use super::memo::Memo;
use super::signer::SignerAddress;
use super::snapshot::SyncedConnectionState;

/// Why a write is not allowed right now.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteDenied {
    #[error("Wallet is still connecting, please wait")]
    NotReady,

    #[error("Connect a wallet to continue")]
    NoWallet,

    #[error("Switch your wallet to chain {expected} to continue")]
    WrongNetwork { expected: u64, actual: Option<u64> },
}

impl From<WriteDenied> for AppError {
    fn from(denied: WriteDenied) -> Self {
        AppError::CapabilityDenied(denied.to_string())
    }
}

/// What the client is allowed to do with the current wallet state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityView {
    pub contract_chain_id: u64,
    /// Chain the wallet is attached to; `None` before any wallet is attached.
    pub user_chain_id: Option<u64>,
    pub is_ready: bool,
    pub is_connected: bool,
    pub is_on_contract_network: bool,
    pub can_read: bool,
    pub can_write: bool,
    signer: Option<SignerAddress>,
}

impl CapabilityView {
    /// Signer address, present exactly when `can_write` is true.
    pub fn signer(&self) -> Option<&SignerAddress> {
        self.signer.as_ref()
    }

    /// Obtain the signer for a write, or the reason writes are denied.
    ///
    /// Checks run in lifecycle order: settling first, then wallet, then network.
    pub fn write_permit(&self) -> Result<SignerAddress, WriteDenied> {
        if !self.is_ready {
            return Err(WriteDenied::NotReady);
        }
        if !self.is_connected {
            return Err(WriteDenied::NoWallet);
        }
        if !self.is_on_contract_network {
            return Err(WriteDenied::WrongNetwork {
                expected: self.contract_chain_id,
                actual: self.user_chain_id,
            });
        }
        self.signer.clone().ok_or(WriteDenied::NoWallet)
    }
}

/// Pure resolution of a [`CapabilityView`].
///
/// A user chain id of `None` or `0` is never on the contract network.
pub fn resolve_capabilities(
    synced: &SyncedConnectionState,
    user_chain_id: Option<u64>,
    contract_chain_id: u64,
) -> CapabilityView {
    let user_chain_id = user_chain_id.filter(|id| *id != 0);
    let is_on_contract_network = user_chain_id == Some(contract_chain_id);

    let signer = synced
        .signer_address()
        .and_then(SignerAddress::new)
        .filter(|_| is_on_contract_network);

    CapabilityView {
        contract_chain_id,
        user_chain_id,
        is_ready: synced.is_ready,
        is_connected: synced.is_ready && synced.synced_is_connected,
        is_on_contract_network,
        can_read: true,
        can_write: signer.is_some(),
        signer,
    }
}

/// Memoized resolver bound to the deployment's contract network.
///
/// Equal inputs return the same `Arc`, so watchers comparing identity do not
/// re-fire.
pub struct CapabilityResolver {
    network: ContractNetwork,
    memo: Memo<(SyncedConnectionState, Option<u64>), CapabilityView>,
}

impl CapabilityResolver {
    pub fn new(network: ContractNetwork) -> Self {
        Self {
            network,
            memo: Memo::new(),
        }
    }

    pub fn network(&self) -> &ContractNetwork {
        &self.network
    }

    pub fn resolve(
        &self,
        synced: &SyncedConnectionState,
        user_chain_id: Option<u64>,
    ) -> Arc<CapabilityView> {
        let contract_chain_id = self.network.chain_id;
        self.memo
            .get_or_compute((synced.clone(), user_chain_id), |(synced, chain)| {
                resolve_capabilities(synced, *chain, contract_chain_id)
            })
    }
}
