//! # Campaign Ordering
//!
//! Orders campaigns so actionable ones surface first:
//!
//! 1. **Awaiting payout**: no longer running, rewards not distributed yet.
//!    This holds no matter how long ago the campaign ended.
//! 2. **Active**: running, soonest-ending first.
//! 3. **Ended**: rewards distributed.
//!
//! Order inside the first and last group follows the input (the sort is stable).

use std::cmp::Ordering;

use chrono::TimeDelta;
use lib_utils::time::now_unix;
use shared::Campaign;

/// Display status of a campaign. Variant order is sort priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CampaignStatus {
    AwaitingPayout,
    Active,
    Ended,
}

impl CampaignStatus {
    /// Status at wall-clock time `now` (unix seconds).
    ///
    /// A campaign flagged active whose end time has passed is treated as no
    /// longer running.
    pub fn of(campaign: &Campaign, now: i64) -> Self {
        if campaign.is_active && now < campaign.end_time {
            CampaignStatus::Active
        } else if !campaign.rewards_distributed {
            CampaignStatus::AwaitingPayout
        } else {
            CampaignStatus::Ended
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::AwaitingPayout => "Awaiting payout",
            CampaignStatus::Active => "Active",
            CampaignStatus::Ended => "Ended",
        }
    }
}

/// Seconds left for an active campaign, `None` otherwise.
pub fn time_remaining(campaign: &Campaign, now: i64) -> Option<i64> {
    match CampaignStatus::of(campaign, now) {
        CampaignStatus::Active => Some(campaign.end_time - now),
        _ => None,
    }
}

/// Countdown label such as `2d 4h`, `3h 10m` or `45s`; `None` unless active.
///
/// An end time too far out to represent (a "never ends" sentinel) reads `no end`.
pub fn format_time_remaining(campaign: &Campaign, now: i64) -> Option<String> {
    let Some(left) = TimeDelta::try_seconds(time_remaining(campaign, now)?) else {
        return Some("no end".to_string());
    };
    let (days, hours, minutes) = (
        left.num_days(),
        left.num_hours() % 24,
        left.num_minutes() % 60,
    );
    Some(if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", left.num_seconds())
    })
}

fn compare(a: &Campaign, b: &Campaign, now: i64) -> Ordering {
    let (sa, sb) = (CampaignStatus::of(a, now), CampaignStatus::of(b, now));
    sa.cmp(&sb).then_with(|| match sa {
        CampaignStatus::Active => a.end_time.cmp(&b.end_time),
        _ => Ordering::Equal,
    })
}

/// Sort campaigns for display at time `now`.
pub fn sort_campaigns(campaigns: &mut [Campaign], now: i64) {
    campaigns.sort_by(|a, b| compare(a, b, now));
}

/// [`sort_campaigns`] at the current wall-clock time.
pub fn sort_campaigns_now(campaigns: &mut [Campaign]) {
    sort_campaigns(campaigns, now_unix());
}
