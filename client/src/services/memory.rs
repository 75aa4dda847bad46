//! # In-Memory Contract Simulator
//!
//! Implements both adapter traits against process memory, simulating how the
//! deployed contracts behave:
//!
//! - Posting a comment earns the author [`COMMENT_CRT`].
//! - A like earns the liker [`LIKE_CRT_LIKER`] and the author [`LIKE_CRT_AUTHOR`].
//!   Each address may like a comment once, and never its own.
//! - CRT earned while a campaign runs also counts toward that campaign.
//! - Sponsoring moves tokens from the sponsor into a new campaign pool.
//! - Once a campaign has ended, anyone may distribute it: the pool is split
//!   pro rata to campaign CRT (refunded to the sponsor if nobody took part).
//! - Each participant claims once, after distribution.
//!
//! Time can be pinned for tests with [`InMemoryContracts::set_time`], and
//! reads can be failed with [`InMemoryContracts::set_offline`].

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lib_core::{AppError, Result};
use lib_utils::time::now_unix;
use parking_lot::RwLock;
use shared::{
    Campaign, CampaignReward, Comment, LeaderboardEntry, NewProject, Project, SponsorRequest,
    TxReceipt, UserStats,
};
use tracing::debug;

use crate::core::service::{ContractReader, ContractWriter};
use crate::wallet::SignerAddress;

pub const COMMENT_CRT: u64 = 10;
pub const LIKE_CRT_LIKER: u64 = 1;
pub const LIKE_CRT_AUTHOR: u64 = 2;
/// Largest single test-token mint: 1,000 tokens of 18 decimals.
pub const MINT_LIMIT: u128 = 1_000 * 10u128.pow(18);

/// Addresses compare case-insensitively.
fn norm(address: &str) -> String {
    address.to_ascii_lowercase()
}

/// `amount * part / total` without overflowing for `part <= total`.
fn pro_rata(amount: u128, part: u64, total: u64) -> u128 {
    let (part, total) = (part as u128, total as u128);
    amount / total * part + amount % total * part / total
}

#[derive(Default)]
struct Ledger {
    projects: Vec<Project>,
    comments: Vec<Comment>,
    likes: HashSet<(u64, String)>,
    stats: HashMap<(u64, String), UserStats>,
    campaigns: Vec<Campaign>,
    campaign_crt: HashMap<(u64, String), u64>,
    /// (reward, claimed) per campaign participant
    rewards: HashMap<(u64, String), (u128, bool)>,
    balances: HashMap<String, u128>,
    next_id: u64,
    block: u64,
}

impl Ledger {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn receipt(&mut self, signer: &SignerAddress) -> TxReceipt {
        self.block += 1;
        TxReceipt {
            tx_hash: format!("0x{:064x}", self.block),
            block_number: self.block,
            signer: signer.to_string(),
        }
    }

    fn project_mut(&mut self, project_id: u64) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", project_id)))
    }

    fn campaign_mut(&mut self, campaign_id: u64) -> Result<&mut Campaign> {
        self.campaigns
            .iter_mut()
            .find(|c| c.id == campaign_id)
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", campaign_id)))
    }

    /// Stats row for a user, registering them as a project participant on first touch.
    fn stats_mut(&mut self, project_id: u64, address: &str) -> &mut UserStats {
        let key = (project_id, norm(address));
        if !self.stats.contains_key(&key) {
            if let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) {
                project.participant_count += 1;
            }
        }
        self.stats.entry(key).or_insert_with(|| UserStats {
            address: address.to_string(),
            project_id,
            ..UserStats::default()
        })
    }

    /// Credit CRT to a user, including every campaign of the project running at `now`.
    fn award(&mut self, project_id: u64, address: &str, crt: u64, now: i64) {
        self.stats_mut(project_id, address).crt += crt;

        for campaign in self.campaigns.iter_mut().filter(|c| {
            c.project_id == project_id && !c.rewards_distributed && c.start_time <= now && now < c.end_time
        }) {
            let earned = self
                .campaign_crt
                .entry((campaign.id, norm(address)))
                .or_insert(0);
            if *earned == 0 {
                campaign.participant_count += 1;
            }
            *earned += crt;
            campaign.total_crt += crt;
        }
    }
}

pub struct InMemoryContracts {
    ledger: RwLock<Ledger>,
    latency: Duration,
    pinned_time: RwLock<Option<i64>>,
    offline: AtomicBool,
}

impl Default for InMemoryContracts {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContracts {
    pub fn new() -> Self {
        Self {
            ledger: RwLock::new(Ledger::default()),
            latency: Duration::ZERO,
            pinned_time: RwLock::new(None),
            offline: AtomicBool::new(false),
        }
    }

    /// Delay every call by `latency` to mimic network and confirmation time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Pin the simulator clock (unix seconds).
    pub fn set_time(&self, now: i64) {
        *self.pinned_time.write() = Some(now);
    }

    /// Move a pinned clock forward; pins it at wall-clock time first if needed.
    pub fn advance_time(&self, secs: i64) {
        let mut pinned = self.pinned_time.write();
        *pinned = Some(pinned.unwrap_or_else(now_unix) + secs);
    }

    /// Make every call fail with an adapter error, as if the endpoint were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn now(&self) -> i64 {
        self.pinned_time.read().unwrap_or_else(now_unix)
    }

    async fn settle(&self) -> Result<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Adapter("contract endpoint unreachable".to_string()));
        }
        Ok(())
    }

    /// Campaign as a contract view would report it at `now`.
    fn campaign_view(campaign: &Campaign, now: i64) -> Campaign {
        Campaign {
            is_active: campaign.is_active && now < campaign.end_time,
            ..campaign.clone()
        }
    }
}

#[async_trait]
impl ContractReader for InMemoryContracts {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.settle().await?;
        Ok(self.ledger.read().projects.clone())
    }

    async fn get_project(&self, project_id: u64) -> Result<Project> {
        self.settle().await?;
        self.ledger
            .read()
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", project_id)))
    }

    async fn list_comments(&self, project_id: u64) -> Result<Vec<Comment>> {
        self.settle().await?;
        let ledger = self.ledger.read();
        if !ledger.projects.iter().any(|p| p.id == project_id) {
            return Err(AppError::NotFound(format!("Project {} not found", project_id)));
        }
        Ok(ledger
            .comments
            .iter()
            .filter(|c| c.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn leaderboard(&self, project_id: u64) -> Result<Vec<LeaderboardEntry>> {
        self.settle().await?;
        let ledger = self.ledger.read();
        let mut rows: Vec<&UserStats> = ledger
            .stats
            .values()
            .filter(|s| s.project_id == project_id && s.crt > 0)
            .collect();
        rows.sort_by(|a, b| b.crt.cmp(&a.crt).then_with(|| norm(&a.address).cmp(&norm(&b.address))));

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, s)| LeaderboardEntry {
                rank: i as u64 + 1,
                address: s.address.clone(),
                crt: s.crt,
                comment_count: s.comment_count,
                likes_received: s.likes_received,
            })
            .collect())
    }

    async fn user_stats(&self, project_id: u64, address: &str) -> Result<UserStats> {
        self.settle().await?;
        let ledger = self.ledger.read();
        let mut stats = ledger
            .stats
            .get(&(project_id, norm(address)))
            .cloned()
            .unwrap_or_else(|| UserStats {
                address: address.to_string(),
                project_id,
                ..UserStats::default()
            });
        stats.token_balance = ledger.balances.get(&norm(address)).copied().unwrap_or(0);
        Ok(stats)
    }

    async fn list_campaigns(&self, project_id: u64) -> Result<Vec<Campaign>> {
        self.settle().await?;
        let now = self.now();
        Ok(self
            .ledger
            .read()
            .campaigns
            .iter()
            .filter(|c| c.project_id == project_id)
            .map(|c| Self::campaign_view(c, now))
            .collect())
    }

    async fn get_campaign(&self, campaign_id: u64) -> Result<Campaign> {
        self.settle().await?;
        let now = self.now();
        self.ledger
            .read()
            .campaigns
            .iter()
            .find(|c| c.id == campaign_id)
            .map(|c| Self::campaign_view(c, now))
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", campaign_id)))
    }

    async fn user_campaign_reward(&self, campaign_id: u64, address: &str) -> Result<CampaignReward> {
        self.settle().await?;
        let ledger = self.ledger.read();
        if !ledger.campaigns.iter().any(|c| c.id == campaign_id) {
            return Err(AppError::NotFound(format!("Campaign {} not found", campaign_id)));
        }
        let key = (campaign_id, norm(address));
        let (reward, claimed) = ledger.rewards.get(&key).copied().unwrap_or((0, false));
        Ok(CampaignReward {
            campaign_id,
            address: address.to_string(),
            crt: ledger.campaign_crt.get(&key).copied().unwrap_or(0),
            reward,
            claimed,
        })
    }
}

#[async_trait]
impl ContractWriter for InMemoryContracts {
    async fn create_project(&self, signer: &SignerAddress, project: NewProject) -> Result<TxReceipt> {
        self.settle().await?;
        let now = self.now();
        let mut ledger = self.ledger.write();

        if ledger
            .projects
            .iter()
            .any(|p| norm(&p.token_address) == norm(&project.token_address))
        {
            return Err(AppError::Transaction(
                "A project for this token already exists".to_string(),
            ));
        }

        let id = ledger.next_id();
        ledger.projects.push(Project {
            id,
            name: project.name,
            description: project.description,
            token_address: project.token_address,
            token_symbol: project.token_symbol,
            creator: signer.to_string(),
            created_at: now,
            ..Project::default()
        });
        debug!(project_id = id, "Simulator created project");
        Ok(ledger.receipt(signer))
    }

    async fn post_comment(&self, signer: &SignerAddress, project_id: u64, content: String) -> Result<TxReceipt> {
        self.settle().await?;
        let now = self.now();
        let mut ledger = self.ledger.write();

        ledger.project_mut(project_id)?.comment_count += 1;
        let id = ledger.next_id();
        ledger.comments.push(Comment {
            id,
            project_id,
            author: signer.to_string(),
            content,
            likes: 0,
            crt_earned: COMMENT_CRT,
            created_at: now,
        });
        ledger.stats_mut(project_id, signer.as_str()).comment_count += 1;
        ledger.award(project_id, signer.as_str(), COMMENT_CRT, now);
        Ok(ledger.receipt(signer))
    }

    async fn like_comment(&self, signer: &SignerAddress, comment_id: u64) -> Result<TxReceipt> {
        self.settle().await?;
        let now = self.now();
        let mut ledger = self.ledger.write();

        let (project_id, author) = {
            let comment = ledger
                .comments
                .iter()
                .find(|c| c.id == comment_id)
                .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))?;
            (comment.project_id, comment.author.clone())
        };
        if norm(&author) == norm(signer.as_str()) {
            return Err(AppError::Transaction("Cannot like your own comment".to_string()));
        }
        if !ledger.likes.insert((comment_id, norm(signer.as_str()))) {
            return Err(AppError::Transaction("Comment already liked".to_string()));
        }

        if let Some(comment) = ledger.comments.iter_mut().find(|c| c.id == comment_id) {
            comment.likes += 1;
            comment.crt_earned += LIKE_CRT_AUTHOR;
        }
        ledger.stats_mut(project_id, signer.as_str()).likes_given += 1;
        ledger.stats_mut(project_id, &author).likes_received += 1;
        ledger.award(project_id, signer.as_str(), LIKE_CRT_LIKER, now);
        ledger.award(project_id, &author, LIKE_CRT_AUTHOR, now);
        Ok(ledger.receipt(signer))
    }

    async fn sponsor_project(&self, signer: &SignerAddress, request: SponsorRequest) -> Result<TxReceipt> {
        self.settle().await?;
        let now = self.now();
        let mut ledger = self.ledger.write();

        ledger.project_mut(request.project_id)?;
        let balance = ledger.balances.entry(norm(signer.as_str())).or_insert(0);
        if *balance < request.amount {
            return Err(AppError::Transaction("Insufficient token balance".to_string()));
        }
        *balance -= request.amount;

        let id = ledger.next_id();
        ledger.campaigns.push(Campaign {
            id,
            project_id: request.project_id,
            sponsor: signer.to_string(),
            name: request.name,
            reward_pool: request.amount,
            start_time: now,
            end_time: now.saturating_add(i64::try_from(request.duration_secs).unwrap_or(i64::MAX)),
            is_active: true,
            ..Campaign::default()
        });
        debug!(campaign_id = id, project_id = request.project_id, "Simulator opened campaign");
        Ok(ledger.receipt(signer))
    }

    async fn claim_campaign_reward(&self, signer: &SignerAddress, campaign_id: u64) -> Result<TxReceipt> {
        self.settle().await?;
        let mut ledger = self.ledger.write();

        if !ledger.campaign_mut(campaign_id)?.rewards_distributed {
            return Err(AppError::Transaction(
                "Rewards have not been distributed yet".to_string(),
            ));
        }
        let key = (campaign_id, norm(signer.as_str()));
        let amount = match ledger.rewards.get_mut(&key) {
            Some((_, true)) => {
                return Err(AppError::Transaction("Reward already claimed".to_string()));
            }
            Some((amount, claimed)) if *amount > 0 => {
                *claimed = true;
                *amount
            }
            _ => return Err(AppError::Transaction("No reward to claim".to_string())),
        };
        *ledger.balances.entry(key.1).or_insert(0) += amount;
        Ok(ledger.receipt(signer))
    }

    async fn distribute_campaign_rewards(&self, signer: &SignerAddress, campaign_id: u64) -> Result<TxReceipt> {
        self.settle().await?;
        let now = self.now();
        let mut ledger = self.ledger.write();

        let campaign = ledger.campaign_mut(campaign_id)?;
        if campaign.rewards_distributed {
            return Err(AppError::Transaction("Rewards already distributed".to_string()));
        }
        if now < campaign.end_time {
            return Err(AppError::Transaction("Campaign is still running".to_string()));
        }
        campaign.rewards_distributed = true;
        campaign.is_active = false;
        let (pool, total, sponsor) = (campaign.reward_pool, campaign.total_crt, campaign.sponsor.clone());

        if total == 0 {
            *ledger.balances.entry(norm(&sponsor)).or_insert(0) += pool;
        } else {
            let shares: Vec<(String, u128)> = ledger
                .campaign_crt
                .iter()
                .filter(|((cid, _), _)| *cid == campaign_id)
                .map(|((_, address), crt)| (address.clone(), pro_rata(pool, *crt, total)))
                .collect();
            for (address, reward) in shares {
                ledger.rewards.insert((campaign_id, address), (reward, false));
            }
        }
        debug!(campaign_id, total_crt = total, "Simulator distributed campaign");
        Ok(ledger.receipt(signer))
    }

    async fn mint_test_tokens(&self, signer: &SignerAddress, amount: u128) -> Result<TxReceipt> {
        self.settle().await?;
        if amount > MINT_LIMIT {
            return Err(AppError::InvalidInput(
                "Mint amount exceeds the 1000 token limit".to_string(),
            ));
        }
        let mut ledger = self.ledger.write();
        *ledger.balances.entry(norm(signer.as_str())).or_insert(0) += amount;
        Ok(ledger.receipt(signer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: i64 = 1_700_000_000;
    const TOKEN: &str = "0x6982508145454Ce325dDbE47a25d4ec3d2311933";

    fn signer(address: &str) -> SignerAddress {
        SignerAddress::new(address).unwrap()
    }

    async fn seeded() -> (InMemoryContracts, u64) {
        let contracts = InMemoryContracts::new();
        contracts.set_time(T);
        contracts
            .create_project(
                &signer("0xCreator"),
                NewProject {
                    name: "Pepe Forum".to_string(),
                    description: "All things PEPE".to_string(),
                    token_address: TOKEN.to_string(),
                    token_symbol: "PEPE".to_string(),
                },
            )
            .await
            .unwrap();
        let project_id = contracts.list_projects().await.unwrap()[0].id;
        (contracts, project_id)
    }

    #[tokio::test]
    async fn test_comment_and_like_accounting() {
        let (contracts, project) = seeded().await;
        let (alice, bob) = (signer("0xAlice"), signer("0xBob"));

        contracts.post_comment(&alice, project, "gm".to_string()).await.unwrap();
        let comment_id = contracts.list_comments(project).await.unwrap()[0].id;
        contracts.like_comment(&bob, comment_id).await.unwrap();

        let comment = &contracts.list_comments(project).await.unwrap()[0];
        assert_eq!(comment.likes, 1);
        assert_eq!(comment.crt_earned, COMMENT_CRT + LIKE_CRT_AUTHOR);

        let board = contracts.leaderboard(project).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].address, "0xAlice");
        assert_eq!(board[0].crt, COMMENT_CRT + LIKE_CRT_AUTHOR);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].crt, LIKE_CRT_LIKER);

        let project = contracts.get_project(project).await.unwrap();
        assert_eq!(project.comment_count, 1);
        assert_eq!(project.participant_count, 2);
    }

    #[tokio::test]
    async fn test_like_rules() {
        let (contracts, project) = seeded().await;
        let alice = signer("0xAlice");
        contracts.post_comment(&alice, project, "gm".to_string()).await.unwrap();
        let comment_id = contracts.list_comments(project).await.unwrap()[0].id;

        assert_eq!(
            contracts.like_comment(&alice, comment_id).await,
            Err(AppError::Transaction("Cannot like your own comment".to_string()))
        );

        contracts.like_comment(&signer("0xBob"), comment_id).await.unwrap();
        // Same address, different casing.
        assert_eq!(
            contracts.like_comment(&signer("0xBOB"), comment_id).await,
            Err(AppError::Transaction("Comment already liked".to_string()))
        );
        assert!(matches!(
            contracts.like_comment(&alice, 999).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_campaign_lifecycle() {
        let (contracts, project) = seeded().await;
        let (sponsor, alice, bob) = (signer("0xSponsor"), signer("0xAlice"), signer("0xBob"));

        contracts.mint_test_tokens(&sponsor, 900).await.unwrap();
        let request = SponsorRequest {
            project_id: project,
            name: "Launch week".to_string(),
            amount: 900,
            duration_secs: 3600,
        };
        contracts.sponsor_project(&sponsor, request.clone()).await.unwrap();
        assert_eq!(
            contracts.sponsor_project(&sponsor, request).await,
            Err(AppError::Transaction("Insufficient token balance".to_string()))
        );

        let campaign_id = contracts.list_campaigns(project).await.unwrap()[0].id;

        // Each posts once and likes the other: 10 + 2 + 1 = 13 CRT apiece.
        contracts.post_comment(&alice, project, "first".to_string()).await.unwrap();
        contracts.post_comment(&bob, project, "second".to_string()).await.unwrap();
        let comments = contracts.list_comments(project).await.unwrap();
        contracts.like_comment(&bob, comments[0].id).await.unwrap();
        contracts.like_comment(&alice, comments[1].id).await.unwrap();

        assert_eq!(
            contracts.distribute_campaign_rewards(&sponsor, campaign_id).await,
            Err(AppError::Transaction("Campaign is still running".to_string()))
        );
        assert_eq!(
            contracts.claim_campaign_reward(&alice, campaign_id).await,
            Err(AppError::Transaction("Rewards have not been distributed yet".to_string()))
        );

        contracts.advance_time(3600);
        let campaign = contracts.get_campaign(campaign_id).await.unwrap();
        assert!(!campaign.is_active);
        assert_eq!(campaign.total_crt, 26);
        assert_eq!(campaign.participant_count, 2);

        contracts.distribute_campaign_rewards(&bob, campaign_id).await.unwrap();
        let reward = contracts.user_campaign_reward(campaign_id, "0xAlice").await.unwrap();
        assert_eq!((reward.crt, reward.reward, reward.claimed), (13, 450, false));

        contracts.claim_campaign_reward(&alice, campaign_id).await.unwrap();
        assert_eq!(
            contracts.claim_campaign_reward(&alice, campaign_id).await,
            Err(AppError::Transaction("Reward already claimed".to_string()))
        );
        assert_eq!(
            contracts.claim_campaign_reward(&sponsor, campaign_id).await,
            Err(AppError::Transaction("No reward to claim".to_string()))
        );

        let stats = contracts.user_stats(project, "0xalice").await.unwrap();
        assert_eq!(stats.token_balance, 450);
        assert!(contracts.get_campaign(campaign_id).await.unwrap().rewards_distributed);
    }

    #[tokio::test]
    async fn test_empty_campaign_refunds_sponsor() {
        let (contracts, project) = seeded().await;
        let sponsor = signer("0xSponsor");
        contracts.mint_test_tokens(&sponsor, 500).await.unwrap();
        contracts
            .sponsor_project(
                &sponsor,
                SponsorRequest {
                    project_id: project,
                    name: "Quiet week".to_string(),
                    amount: 500,
                    duration_secs: 60,
                },
            )
            .await
            .unwrap();
        let campaign_id = contracts.list_campaigns(project).await.unwrap()[0].id;

        contracts.advance_time(60);
        contracts.distribute_campaign_rewards(&sponsor, campaign_id).await.unwrap();

        let stats = contracts.user_stats(project, "0xSponsor").await.unwrap();
        assert_eq!(stats.token_balance, 500);
    }

    #[tokio::test]
    async fn test_offline_and_limits() {
        let (contracts, _) = seeded().await;
        assert!(matches!(
            contracts.mint_test_tokens(&signer("0xA"), MINT_LIMIT + 1).await,
            Err(AppError::InvalidInput(_))
        ));

        contracts.set_offline(true);
        assert!(matches!(contracts.list_projects().await, Err(AppError::Adapter(_))));
        contracts.set_offline(false);
        assert_eq!(contracts.list_projects().await.unwrap().len(), 1);
    }

    #[test]
    fn test_pro_rata_does_not_overflow() {
        assert_eq!(pro_rata(900, 13, 26), 450);
        assert_eq!(pro_rata(u128::MAX, 1, 1), u128::MAX);
        assert_eq!(pro_rata(u128::MAX, 1, 2), u128::MAX / 2);
    }
}
