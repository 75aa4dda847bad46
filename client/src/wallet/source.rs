//! Wallet provider interface.
//!
//! The real provider lives outside this crate (a browser extension bridge, a
//! hardware wallet daemon). [`MemoryWallet`] is an in-process stand-in that
//! walks the same lifecycle and is used by the demo binary and tests.

use async_channel::Sender;
use async_trait::async_trait;
use lib_core::{AppError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::snapshot::ConnectionSnapshot;

/// One provider emission: the lifecycle snapshot plus the wallet's chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalletUpdate {
    pub snapshot: ConnectionSnapshot,
    pub chain_id: Option<u64>,
}

/// Source of wallet connection state.
///
/// `connect`, `disconnect` and `switch_chain` only start transitions; their
/// outcome is observed through later snapshots.
#[async_trait]
pub trait WalletSource: Send + Sync {
    fn snapshot(&self) -> ConnectionSnapshot;

    fn user_chain_id(&self) -> Option<u64>;

    async fn connect(&self) -> Result<()>;

    async fn disconnect(&self) -> Result<()>;

    async fn switch_chain(&self, chain_id: u64) -> Result<()>;
}

/// In-process wallet with a fixed account.
///
/// Every state change is also pushed to the attached update channel, in order.
pub struct MemoryWallet {
    account: String,
    chain_id: u64,
    state: RwLock<WalletUpdate>,
    updates: Option<Sender<WalletUpdate>>,
}

impl MemoryWallet {
    /// A disconnected wallet that will connect as `account` on `chain_id`.
    pub fn new(account: impl Into<String>, chain_id: u64) -> Self {
        Self {
            account: account.into(),
            chain_id,
            state: RwLock::new(WalletUpdate::default()),
            updates: None,
        }
    }

    /// Push every emission to `updates` as well.
    pub fn with_updates(mut self, updates: Sender<WalletUpdate>) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Emit an arbitrary snapshot, keeping the current chain.
    pub fn emit(&self, snapshot: ConnectionSnapshot) {
        let update = {
            let mut state = self.state.write();
            state.snapshot = snapshot;
            state.clone()
        };
        self.publish(update);
    }

    /// Replay the burst a provider emits when a page reloads with a remembered
    /// session: reconnecting, reconnecting-but-looks-connected, connected.
    pub fn reload(&self) {
        self.state.write().chain_id = Some(self.chain_id);
        self.emit(ConnectionSnapshot::reconnecting());
        self.emit(ConnectionSnapshot {
            is_reconnecting: true,
            ..ConnectionSnapshot::connected(self.account.clone())
        });
        self.emit(ConnectionSnapshot::connected(self.account.clone()));
    }

    fn publish(&self, update: WalletUpdate) {
        debug!(?update, "Wallet emitted update");
        if let Some(tx) = &self.updates {
            if tx.try_send(update).is_err() {
                warn!("Wallet update channel closed, dropping update");
            }
        }
    }
}

#[async_trait]
impl WalletSource for MemoryWallet {
    fn snapshot(&self) -> ConnectionSnapshot {
        self.state.read().snapshot.clone()
    }

    fn user_chain_id(&self) -> Option<u64> {
        self.state.read().chain_id
    }

    async fn connect(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(AppError::Internal("Wallet has no account to connect".to_string()));
        }
        self.emit(ConnectionSnapshot::connecting());
        tokio::task::yield_now().await;
        self.state.write().chain_id = Some(self.chain_id);
        self.emit(ConnectionSnapshot::connected(self.account.clone()));
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.state.write().chain_id = None;
        self.emit(ConnectionSnapshot::disconnected());
        Ok(())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<()> {
        if chain_id == 0 {
            return Err(AppError::InvalidInput("Chain id must be non-zero".to_string()));
        }
        let update = {
            let mut state = self.state.write();
            state.chain_id = Some(chain_id);
            state.clone()
        };
        self.publish(update);
        Ok(())
    }
}
