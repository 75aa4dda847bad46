//! # Wallet Session
//!
//! Wires a [`WalletSource`] through the synchronizer and resolver.
//!
//! Updates can be pulled ([`WalletSession::refresh`]) or pushed through an
//! ordered channel ([`spawn_listener`]); either way each update runs through
//! the same synchronizer, so the ready gate and signer notifications see the
//! emissions in provider order.
//!
//! The two modes are exclusive. Once a listener is attached, the channel is
//! the only input: `connect`, `disconnect` and `switch_to_contract_network`
//! stop pulling and return the last view the listener processed, since a
//! pulled final state would otherwise be followed by older queued emissions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_channel::Receiver;
use lib_core::Result;
use parking_lot::Mutex;
use shared::ContractNetwork;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::capability::{CapabilityResolver, CapabilityView};
use super::signer::SignerSink;
use super::source::{WalletSource, WalletUpdate};
use super::sync::ConnectionSynchronizer;

struct SessionState {
    synchronizer: ConnectionSynchronizer,
    chain_id: Option<u64>,
}

pub struct WalletSession {
    source: Arc<dyn WalletSource>,
    resolver: CapabilityResolver,
    state: Mutex<SessionState>,
    listener_attached: AtomicBool,
}

impl WalletSession {
    pub fn new(
        source: Arc<dyn WalletSource>,
        network: ContractNetwork,
        sink: Arc<dyn SignerSink>,
    ) -> Self {
        Self {
            source,
            resolver: CapabilityResolver::new(network),
            state: Mutex::new(SessionState {
                synchronizer: ConnectionSynchronizer::new(sink),
                chain_id: None,
            }),
            listener_attached: AtomicBool::new(false),
        }
    }

    pub fn network(&self) -> &ContractNetwork {
        self.resolver.network()
    }

    /// Capability view for the last processed update.
    pub fn current(&self) -> Arc<CapabilityView> {
        let state = self.state.lock();
        self.resolver.resolve(state.synchronizer.current(), state.chain_id)
    }

    /// Process one provider emission.
    pub fn apply(&self, update: &WalletUpdate) -> Arc<CapabilityView> {
        let mut state = self.state.lock();
        let synced = state.synchronizer.observe(&update.snapshot);
        state.chain_id = update.chain_id;
        self.resolver.resolve(&synced, update.chain_id)
    }

    /// Pull the source's current state and process it.
    pub fn refresh(&self) -> Arc<CapabilityView> {
        let update = WalletUpdate {
            snapshot: self.source.snapshot(),
            chain_id: self.source.user_chain_id(),
        };
        self.apply(&update)
    }

    /// Whether a [`spawn_listener`] task owns the update stream.
    pub fn has_listener(&self) -> bool {
        self.listener_attached.load(Ordering::SeqCst)
    }

    /// View after a user-initiated transition: pulled in pull mode, the
    /// listener's latest in push mode.
    fn after_transition(&self) -> Arc<CapabilityView> {
        if self.has_listener() {
            self.current()
        } else {
            self.refresh()
        }
    }

    pub async fn connect(&self) -> Result<Arc<CapabilityView>> {
        info!("Connecting wallet");
        self.source.connect().await?;
        Ok(self.after_transition())
    }

    pub async fn disconnect(&self) -> Result<Arc<CapabilityView>> {
        info!("Disconnecting wallet");
        self.source.disconnect().await?;
        Ok(self.after_transition())
    }

    /// Ask the wallet to move to the contract network.
    pub async fn switch_to_contract_network(&self) -> Result<Arc<CapabilityView>> {
        let chain_id = self.network().chain_id;
        info!(chain_id, network = %self.network().name, "Switching wallet network");
        self.source.switch_chain(chain_id).await?;
        Ok(self.after_transition())
    }
}

/// Process pushed wallet updates in order and publish capability views.
///
/// A new view is published only when it differs by identity from the last
/// one, which the memoized resolver guarantees for equal inputs. The task ends
/// when the update channel closes.
///
/// Attaching a listener switches the session to push mode for good.
pub fn spawn_listener(
    session: Arc<WalletSession>,
    updates: Receiver<WalletUpdate>,
) -> (JoinHandle<()>, watch::Receiver<Arc<CapabilityView>>) {
    session.listener_attached.store(true, Ordering::SeqCst);
    let (tx, rx) = watch::channel(session.current());

    let handle = tokio::spawn(async move {
        while let Ok(update) = updates.recv().await {
            let view = session.apply(&update);
            let published = tx.send_if_modified(|current| {
                if Arc::ptr_eq(current, &view) {
                    false
                } else {
                    *current = view;
                    true
                }
            });
            if published {
                debug!("Published new capability view");
            }
        }
        debug!("Wallet update channel closed, listener stopping");
    });

    (handle, rx)
}
