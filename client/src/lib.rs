//! # TokenTalk Client - Library Root
//!
//! Client-side core of a token-community platform: projects tied to a token,
//! comment threads that earn Contribution Reward Tokens (CRT), leaderboards,
//! and sponsored campaigns that pay token rewards pro rata to CRT earned.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    client (this crate)                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  wallet    - ready gate, signer notifications, capabilities  │
//! │  services  - reads, live queries, gated writes, simulator    │
//! │  campaign  - campaign status and display ordering            │
//! │  listing   - comment ordering and project search             │
//! │  core      - contract adapter traits, errors                 │
//! │  debug     - logging                                         │
//! └──────────────────────────────────────────────────────────────┘
//!          │                                   │
//!          │ WalletSource                      │ ContractReader / ContractWriter
//!          ▼                                   ▼
//! ┌─────────────────┐               ┌──────────────────────────┐
//! │ Wallet provider │               │  Contracts (or simulator)│
//! └─────────────────┘               └──────────────────────────┘
//! ```
//!
//! ## Core Concepts
//!
//! ### Ready Gate
//!
//! Wallet providers flicker through intermediate states while restoring a
//! session. Nothing downstream reacts until the provider has settled, and the
//! signer sink only hears about settled, changed signers.
//!
//! ### Explicit Signers
//!
//! Every write takes the signer it was authorized for. A write permit comes
//! from a [`wallet::CapabilityView`], so a write can never run on behalf of an
//! address other than the one the user saw.
//!
//! ### Reads
//!
//! Reads are plain async calls wrapped in [`services::Loadable`]. Request
//! tokens drop responses that arrive after a newer request for the same key,
//! and live views refresh on an explicit timer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use client::services::{InMemoryContracts, WriteActions};
//! use client::wallet::{MemoryWallet, SignerCell, WalletSession};
//! use shared::ContractNetwork;
//!
//! # async fn demo() -> client::Result<()> {
//! let network = ContractNetwork { chain_id: 31337, name: "Local".to_string() };
//! let wallet = Arc::new(MemoryWallet::new("0x1111111111111111111111111111111111111111", 31337));
//! let session = WalletSession::new(wallet, network, Arc::new(SignerCell::new()));
//!
//! let view = session.connect().await?;
//! let actions = WriteActions::new(Arc::new(InMemoryContracts::new()));
//! actions.mint_test_tokens(&view, 1_000).await?;
//! # Ok(())
//! # }
//! ```

pub mod campaign;
pub mod core;
pub mod debug;
pub mod listing;
pub mod services;
pub mod wallet;

pub use core::{AppError, Result};
