use serde::{Deserialize, Serialize};

use super::lenient::{amount, de_bool, de_i64, de_u64};

/// A time-boxed, sponsor-funded reward pool layered on a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Campaign {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(deserialize_with = "de_u64")]
    pub project_id: u64,
    pub sponsor: String,
    pub name: String,
    /// Sponsor funds to distribute, in base units
    #[serde(with = "amount")]
    pub reward_pool: u128,
    /// Unix seconds
    #[serde(deserialize_with = "de_i64")]
    pub start_time: i64,
    /// Unix seconds
    #[serde(deserialize_with = "de_i64")]
    pub end_time: i64,
    #[serde(deserialize_with = "de_bool")]
    pub is_active: bool,
    #[serde(deserialize_with = "de_bool")]
    pub rewards_distributed: bool,
    /// CRT earned by all participants during the campaign
    #[serde(deserialize_with = "de_u64")]
    pub total_crt: u64,
    #[serde(deserialize_with = "de_u64")]
    pub participant_count: u64,
}

/// A user's share of one campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampaignReward {
    #[serde(deserialize_with = "de_u64")]
    pub campaign_id: u64,
    pub address: String,
    /// CRT the user earned inside the campaign window
    #[serde(deserialize_with = "de_u64")]
    pub crt: u64,
    /// Reward owed once distributed, in base units (0 before distribution)
    #[serde(with = "amount")]
    pub reward: u128,
    #[serde(deserialize_with = "de_bool")]
    pub claimed: bool,
}

/// Input for sponsoring a project with a new campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorRequest {
    pub project_id: u64,
    pub name: String,
    #[serde(with = "amount")]
    pub amount: u128,
    pub duration_secs: u64,
}
