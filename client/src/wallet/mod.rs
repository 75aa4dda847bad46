//! # Wallet Connection Model
//!
//! Turns the raw, flickering lifecycle reported by a wallet provider into the
//! capability flags the rest of the client branches on.
//!
//! ```text
//! WalletSource ──snapshot──▶ ConnectionSynchronizer ──synced──▶ CapabilityResolver ──▶ CapabilityView
//!                                   │
//!                                   └──▶ SignerSink::set_signer_address (ready states only)
//! ```
//!
//! ## Modules
//!
//! - **[`snapshot`]**: raw provider snapshot and its synced projection
//! - **[`sync`]**: the ready gate and signer notifications
//! - **[`signer`]**: signer sink, signer cell, explicit signer address
//! - **[`memo`]**: equality-gated memo for referential stability
//! - **[`capability`]**: can-read / can-write / network flags and write permits
//! - **[`source`]**: provider interface and an in-process wallet
//! - **[`session`]**: wiring of all of the above

pub mod capability;
pub mod memo;
pub mod session;
pub mod signer;
pub mod snapshot;
pub mod source;
pub mod sync;

pub use capability::{resolve_capabilities, CapabilityResolver, CapabilityView, WriteDenied};
pub use memo::Memo;
pub use session::{spawn_listener, WalletSession};
pub use signer::{SignerAddress, SignerCell, SignerSink};
pub use snapshot::{ConnectionSnapshot, SyncedConnectionState};
pub use source::{MemoryWallet, WalletSource, WalletUpdate};
pub use sync::{synchronize, ConnectionSynchronizer};
