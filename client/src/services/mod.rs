//! # Services
//!
//! Everything that talks to the contract adapter.
//!
//! - **[`reads`]**: loading states, request tokens, stale-response suppression
//! - **[`live`]**: periodically refreshed views
//! - **[`actions`]**: capability-gated writes
//! - **[`memory`]**: in-memory contract simulator

pub mod actions;
pub mod live;
pub mod memory;
pub mod reads;

pub use actions::WriteActions;
pub use live::LiveQuery;
pub use memory::InMemoryContracts;
pub use reads::{load, Loadable, QueryCache, RequestToken, RequestTracker};
