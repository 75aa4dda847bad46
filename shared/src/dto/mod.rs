//! # Contract Records
//!
//! All data structures returned by contract reads or passed to contract writes.
//!
//! ## Module Organization
//!
//! - [`project`] - Projects, comments, leaderboard entries, user stats
//! - [`campaign`] - Sponsor campaigns and per-user campaign rewards
//! - [`network`] - Contract network descriptor, transaction receipts
//! - [`lenient`] - Deserializers that normalize untrusted numeric encodings

pub mod campaign;
pub mod lenient;
pub mod network;
pub mod project;

pub use campaign::*;
pub use network::*;
pub use project::*;
