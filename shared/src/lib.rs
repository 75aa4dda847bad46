//! # Shared Records Library
//!
//! This library defines the records exchanged between the client core and the
//! contract data adapter: projects, comments, leaderboards, user stats,
//! campaigns, campaign rewards, write requests, and transaction receipts.
//!
//! ## Structure
//!
//! - **[`dto`]**: Records returned by reads and accepted by writes
//!   - **[`dto::project`]**: Projects, comments, leaderboard and user stats
//!   - **[`dto::campaign`]**: Campaigns and per-user campaign rewards
//!   - **[`dto::network`]**: Contract network descriptor and transaction receipts
//!   - **[`dto::lenient`]**: Forgiving numeric deserializers
//! - **[`utils`]**: Display helpers
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::format_token_amount`]**: Render base-unit amounts with decimals
//!
//! ## Wire Format
//!
//! Records mirror the contract adapter's JSON shape:
//! - Field names are **camelCase** (`isActive`, `endTime`)
//! - Token amounts are `u128` base units, serialized as decimal strings
//! - Numeric fields accept numbers, decimal strings, `0x` hex strings and floats;
//!   malformed values coerce to zero instead of failing the whole record
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::campaign::Campaign;
//!
//! let raw = r#"{"id":"0x1","projectId":7,"name":"Launch week","rewardPool":"5000",
//!              "endTime":"1700000000","isActive":1}"#;
//! let campaign: Campaign = serde_json::from_str(raw).unwrap();
//! assert_eq!(campaign.id, 1);
//! assert!(campaign.is_active);
//! assert_eq!(campaign.reward_pool, 5000);
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a records library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
