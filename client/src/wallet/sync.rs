//! # Connection Synchronizer
//!
//! Wallet providers emit a burst of transient states on page load: briefly
//! disconnected, then reconnecting, then connected as some address, all within
//! milliseconds. Reading `address`/`is_connected` directly during that burst
//! either flashes a disconnected UI or trusts an address that is about to change.
//!
//! The synchronizer collapses any such burst into one transition,
//! not-ready → ready(final state). It holds `is_ready = false` for the whole
//! connecting/reconnecting phase, even when intermediate snapshots already look
//! connected, and only publishes signer changes for settled states.

use std::sync::Arc;

use tracing::{debug, info};

use super::signer::SignerSink;
use super::snapshot::{ConnectionSnapshot, SyncedConnectionState};

/// Classify a raw snapshot into the consumer-facing view.
///
/// Pure and infallible; correct for every combination of the four flags.
pub fn synchronize(snapshot: &ConnectionSnapshot) -> SyncedConnectionState {
    if snapshot.is_settling() {
        return SyncedConnectionState::not_ready();
    }

    SyncedConnectionState {
        is_ready: true,
        synced_address: snapshot.address.clone(),
        synced_is_connected: snapshot.is_connected,
    }
}

/// Stateful wrapper around [`synchronize`] that notifies a [`SignerSink`].
///
/// Snapshots must be fed in the order the provider emitted them. The sink is
/// called only for ready states, and only when the resolved signer differs
/// from the last one published (so repeated identical snapshots notify once,
/// and a disconnect notifies `None` exactly once).
pub struct ConnectionSynchronizer {
    sink: Arc<dyn SignerSink>,
    /// `None` until the first ready state has been published.
    published: Option<Option<String>>,
    current: SyncedConnectionState,
}

impl ConnectionSynchronizer {
    pub fn new(sink: Arc<dyn SignerSink>) -> Self {
        Self {
            sink,
            published: None,
            current: SyncedConnectionState::not_ready(),
        }
    }

    /// Latest synced state.
    pub fn current(&self) -> &SyncedConnectionState {
        &self.current
    }

    /// Process the next provider snapshot.
    pub fn observe(&mut self, snapshot: &ConnectionSnapshot) -> SyncedConnectionState {
        let synced = synchronize(snapshot);

        if !synced.is_ready {
            if self.current.is_ready {
                debug!("Wallet provider is settling, holding ready gate closed");
            }
            self.current = synced.clone();
            return synced;
        }

        let signer = synced.signer_address().map(str::to_string);
        if self.published.as_ref() != Some(&signer) {
            info!(
                signer = signer.as_deref().unwrap_or("<none>"),
                "Resolved signer address changed"
            );
            self.sink.set_signer_address(signer.as_deref());
            self.published = Some(signer);
        }

        self.current = synced.clone();
        synced
    }
}
