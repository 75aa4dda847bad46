//! Provider snapshots and the synced view derived from them.

use serde::{Deserialize, Serialize};

/// Instantaneous state reported by the wallet provider.
///
/// While `is_connecting` or `is_reconnecting` is set, `address` and
/// `is_connected` are not authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionSnapshot {
    pub address: Option<String>,
    pub is_connected: bool,
    pub is_connecting: bool,
    pub is_reconnecting: bool,
}

impl ConnectionSnapshot {
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// User-initiated handshake in progress.
    pub fn connecting() -> Self {
        Self {
            is_connecting: true,
            ..Self::default()
        }
    }

    /// Automatic reattachment after a reload, not yet confirmed.
    pub fn reconnecting() -> Self {
        Self {
            is_reconnecting: true,
            ..Self::default()
        }
    }

    pub fn connected(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            is_connected: true,
            ..Self::default()
        }
    }

    /// True while the provider has not settled.
    pub fn is_settling(&self) -> bool {
        self.is_connecting || self.is_reconnecting
    }
}

/// Consumer-facing projection of a [`ConnectionSnapshot`].
///
/// Produced by [`synchronize`](super::sync::synchronize), which guarantees that
/// `synced_is_connected` is never true while `is_ready` is false and that
/// `synced_address` is `None` whenever `is_ready` is false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SyncedConnectionState {
    pub is_ready: bool,
    pub synced_address: Option<String>,
    pub synced_is_connected: bool,
}

impl SyncedConnectionState {
    pub fn not_ready() -> Self {
        Self::default()
    }

    /// The address writes may be signed with: ready, connected and non-empty.
    pub fn signer_address(&self) -> Option<&str> {
        if !self.is_ready || !self.synced_is_connected {
            return None;
        }
        self.synced_address.as_deref().filter(|a| !a.trim().is_empty())
    }
}
