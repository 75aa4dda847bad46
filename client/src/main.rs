//! TokenTalk demo: walks one user session against the in-memory contracts.
//!
//! ```bash
//! cargo run --bin tokentalk-demo
//! # replay a recorded provider trace (JSON array of wallet updates)
//! cargo run --bin tokentalk-demo -- trace.json
//! ```

use std::sync::Arc;
use std::time::Duration;

use client::campaign::{format_time_remaining, sort_campaigns, CampaignStatus};
use client::core::{AppError, ContractReader, Result};
use client::debug;
use client::listing::{sort_comments, CommentOrder};
use client::services::{load, InMemoryContracts, LiveQuery, WriteActions};
use client::wallet::{
    spawn_listener, CapabilityView, MemoryWallet, SignerCell, WalletSession, WalletSource,
    WalletUpdate,
};
use lib_core::config::{init_config, Config};
use lib_utils::time::{format_unix, now_unix};
use shared::{format_token_amount, truncate_address, NewProject, SponsorRequest};
use tokio::sync::watch;
use tracing::{error, info, warn};

const DEMO_ACCOUNT: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
const FRIEND_ACCOUNT: &str = "0x2546BcD3c84621e976D8185a91A922aE77ECEc30";
const DEMO_TOKEN: &str = "0x6982508145454Ce325dDbE47a25d4ec3d2311933";
/// Chain the demo wallet starts on, so the network switch is exercised.
const WALLET_HOME_CHAIN: u64 = 1;
const TOKEN_DECIMALS: u32 = 18;

#[tokio::main]
async fn main() {
    let _guard = debug::init_logger();

    if let Err(e) = run().await {
        error!(error = %e, "Demo failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

fn load_config() -> Config {
    match init_config() {
        Ok(config) => config.clone(),
        Err(e) => {
            warn!(error = %e, "Configuration unavailable, using local devnet defaults");
            Config {
                contract_chain_id: 31337,
                contract_network_name: "Local Devnet".to_string(),
                live_refresh_secs: 15,
                simulated_latency_ms: 0,
            }
        }
    }
}

async fn wait_for(
    views: &mut watch::Receiver<Arc<CapabilityView>>,
    what: &str,
    ready: impl Fn(&CapabilityView) -> bool,
) -> Result<Arc<CapabilityView>> {
    let view = views
        .wait_for(|view| ready(view))
        .await
        .map_err(|_| AppError::Internal(format!("Wallet listener stopped while waiting for {}", what)))?;
    Ok(Arc::clone(&view))
}

async fn run() -> Result<()> {
    let config = load_config();
    let network = config.contract_network();
    info!(chain_id = network.chain_id, network = %network.name, "Starting TokenTalk demo");

    let contracts = Arc::new(InMemoryContracts::new().with_latency(config.simulated_latency()));
    let actions = WriteActions::new(contracts.clone());

    // Wallet -> ordered update channel -> listener -> capability views
    let (updates_tx, updates_rx) = async_channel::unbounded();
    let wallet = Arc::new(MemoryWallet::new(DEMO_ACCOUNT, WALLET_HOME_CHAIN).with_updates(updates_tx.clone()));
    let signer = Arc::new(SignerCell::new());
    let session = Arc::new(WalletSession::new(wallet.clone(), network.clone(), signer.clone()));
    let (listener, mut views) = spawn_listener(session, updates_rx);

    wallet.connect().await?;
    let view = wait_for(&mut views, "connection", |v| v.is_ready && v.is_connected).await?;
    if let Err(denied) = view.write_permit() {
        info!(reason = %denied, "Writes disabled");
        wallet.switch_chain(network.chain_id).await?;
    }
    wait_for(&mut views, "network switch", |v| v.can_write).await?;
    info!(signer = ?signer.get(), "Wallet ready for writes");

    // Replay a page reload: the synchronizer holds writes until the burst settles.
    views.borrow_and_update();
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| AppError::InvalidInput(format!("Cannot read trace {}: {}", path, e)))?;
            let trace: Vec<WalletUpdate> = serde_json::from_str(&raw)?;
            info!(path = %path, updates = trace.len(), "Replaying provider trace");
            for update in trace {
                if updates_tx.send(update).await.is_err() {
                    break;
                }
            }
        }
        None => wallet.reload(),
    }
    // A trace that changes nothing publishes nothing.
    let _ = tokio::time::timeout(Duration::from_secs(1), views.changed()).await;
    let view = wait_for(&mut views, "reload", |v| v.is_ready).await?;
    view.write_permit()?;

    actions
        .create_project(
            &view,
            NewProject {
                name: "Pepe Forum".to_string(),
                description: "Community hub for PEPE holders".to_string(),
                token_address: DEMO_TOKEN.to_string(),
                token_symbol: "PEPE".to_string(),
            },
        )
        .await?;
    let project = contracts
        .list_projects()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("Demo project".to_string()))?;

    actions.post_comment(&view, project.id, "gm, first!").await?;
    actions.post_comment(&view, project.id, "Sponsoring a launch week campaign").await?;

    // A second community member likes the first comment.
    let friend = MemoryWallet::new(FRIEND_ACCOUNT, network.chain_id);
    let friend_session = WalletSession::new(Arc::new(friend), network.clone(), Arc::new(SignerCell::new()));
    let friend_view = friend_session.connect().await?;
    let mut comments = contracts.list_comments(project.id).await?;
    sort_comments(&mut comments, CommentOrder::Oldest);
    if let Some(first) = comments.first() {
        actions.like_comment(&friend_view, first.id).await?;
        actions.post_comment(&friend_view, project.id, "wagmi").await?;
    }

    let pool = 500 * 10u128.pow(TOKEN_DECIMALS);
    actions.mint_test_tokens(&view, pool).await?;
    actions
        .sponsor_project(
            &view,
            SponsorRequest {
                project_id: project.id,
                name: "Launch week".to_string(),
                amount: pool,
                duration_secs: 7 * 86_400,
            },
        )
        .await?;

    let reader: Arc<dyn ContractReader> = contracts.clone();
    let project_id = project.id;
    let (project, comments, campaigns) = futures::future::join3(
        load("project", reader.get_project(project_id)),
        load("comments", reader.list_comments(project_id)),
        load("campaigns", reader.list_campaigns(project_id)),
    )
    .await;

    if let Some(project) = project.value() {
        info!(
            project = %project.name,
            comments = project.comment_count,
            participants = project.participant_count,
            creator = %truncate_address(&project.creator),
            "Project page loaded"
        );
    }
    let mut comments = comments.or_default();
    sort_comments(&mut comments, CommentOrder::MostLiked);
    for comment in &comments {
        info!(author = %truncate_address(&comment.author), likes = comment.likes, crt = comment.crt_earned, "{}", comment.content);
    }

    let now = now_unix();
    let mut campaigns = campaigns.or_default();
    sort_campaigns(&mut campaigns, now);
    for campaign in &campaigns {
        info!(
            campaign = %campaign.name,
            status = CampaignStatus::of(campaign, now).label(),
            pool = %format_token_amount(campaign.reward_pool, TOKEN_DECIMALS),
            ends_at = %format_unix(campaign.end_time),
            remaining = ?format_time_remaining(campaign, now),
            "Campaign"
        );
    }

    let leaderboard_reader = reader.clone();
    let mut leaderboard = LiveQuery::spawn("leaderboard", config.live_refresh_period(), move || {
        let reader = leaderboard_reader.clone();
        async move { reader.leaderboard(project_id).await }
    });
    for entry in leaderboard.next().await.or_default() {
        info!(rank = entry.rank, address = %truncate_address(&entry.address), crt = entry.crt, "Leaderboard");
    }
    drop(leaderboard);

    // Disconnect: writes are refused from here on.
    wallet.disconnect().await?;
    let view = wait_for(&mut views, "disconnect", |v| v.is_ready && !v.is_connected).await?;
    if let Err(e) = actions.post_comment(&view, project_id, "still here?").await {
        info!(reason = %e.user_message(), "Write refused after disconnect");
    }
    info!(signer = ?signer.get(), "Session closed");

    // The session keeps the wallet, and with it the update channel, alive.
    listener.abort();
    Ok(())
}
