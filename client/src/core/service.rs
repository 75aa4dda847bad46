//! # Contract Adapter Traits
//!
//! The boundary to the deployed contracts. Implementations own the wire
//! protocol; this crate only relies on the contract below.
//!
//! - Reads need no wallet and may fail; callers degrade failures to empty or
//!   error states (see [`crate::services::reads`]).
//! - Writes take the signer explicitly and resolve only once the underlying
//!   transaction is confirmed. A failed write must return an error, never a
//!   receipt.

use async_trait::async_trait;
use lib_core::Result;
use shared::{
    Campaign, CampaignReward, Comment, LeaderboardEntry, NewProject, Project, SponsorRequest,
    TxReceipt, UserStats,
};

use crate::wallet::SignerAddress;

/// Read side of the contract adapter.
#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>>;

    async fn get_project(&self, project_id: u64) -> Result<Project>;

    async fn list_comments(&self, project_id: u64) -> Result<Vec<Comment>>;

    /// CRT leaderboard of a project, best first.
    async fn leaderboard(&self, project_id: u64) -> Result<Vec<LeaderboardEntry>>;

    async fn user_stats(&self, project_id: u64, address: &str) -> Result<UserStats>;

    async fn list_campaigns(&self, project_id: u64) -> Result<Vec<Campaign>>;

    async fn get_campaign(&self, campaign_id: u64) -> Result<Campaign>;

    async fn user_campaign_reward(&self, campaign_id: u64, address: &str) -> Result<CampaignReward>;
}

/// Write side of the contract adapter.
#[async_trait]
pub trait ContractWriter: Send + Sync {
    async fn create_project(&self, signer: &SignerAddress, project: NewProject) -> Result<TxReceipt>;

    async fn post_comment(
        &self,
        signer: &SignerAddress,
        project_id: u64,
        content: String,
    ) -> Result<TxReceipt>;

    async fn like_comment(&self, signer: &SignerAddress, comment_id: u64) -> Result<TxReceipt>;

    /// Fund a new campaign on a project from the signer's token balance.
    async fn sponsor_project(&self, signer: &SignerAddress, request: SponsorRequest) -> Result<TxReceipt>;

    async fn claim_campaign_reward(&self, signer: &SignerAddress, campaign_id: u64) -> Result<TxReceipt>;

    async fn distribute_campaign_rewards(
        &self,
        signer: &SignerAddress,
        campaign_id: u64,
    ) -> Result<TxReceipt>;

    /// Test networks only: credit the signer with test tokens.
    async fn mint_test_tokens(&self, signer: &SignerAddress, amount: u128) -> Result<TxReceipt>;
}
