//! # Wallet Session Scenarios
//!
//! Provider lifecycles driven through the full session: synchronizer,
//! signer notifications, capability views and gated writes.

use std::sync::Arc;

use client::core::{AppError, ContractReader};
use client::services::{InMemoryContracts, WriteActions};
use client::wallet::{
    spawn_listener, ConnectionSnapshot, MemoryWallet, SignerSink, WalletSession, WalletSource,
    WalletUpdate,
};
use parking_lot::Mutex;
use shared::ContractNetwork;

const CHAIN: u64 = 31337;
const ALICE: &str = "0x1111111111111111111111111111111111111111";
const BOB: &str = "0x2222222222222222222222222222222222222222";

#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<Option<String>>>,
}

impl RecordingSink {
    fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().clone()
    }
}

impl SignerSink for RecordingSink {
    fn set_signer_address(&self, address: Option<&str>) {
        self.calls.lock().push(address.map(str::to_string));
    }
}

fn network() -> ContractNetwork {
    ContractNetwork {
        chain_id: CHAIN,
        name: "Local Devnet".to_string(),
    }
}

fn update(snapshot: ConnectionSnapshot, chain_id: Option<u64>) -> WalletUpdate {
    WalletUpdate { snapshot, chain_id }
}

fn session_with(wallet: Arc<MemoryWallet>) -> (WalletSession, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (WalletSession::new(wallet, network(), sink.clone()), sink)
}

#[tokio::test]
async fn test_reload_burst_notifies_once_and_never_writes_early() {
    // Arrange
    let (tx, rx) = async_channel::unbounded();
    let wallet = Arc::new(MemoryWallet::new(ALICE, CHAIN).with_updates(tx));
    let (session, sink) = session_with(wallet.clone());

    // Act
    wallet.reload();
    let mut views = Vec::new();
    while let Ok(update) = rx.try_recv() {
        views.push(session.apply(&update));
    }

    // Assert
    let writable: Vec<bool> = views.iter().map(|v| v.can_write).collect();
    assert_eq!(writable, vec![false, false, true]);
    assert!(views[..2].iter().all(|v| !v.is_ready && v.signer().is_none()));
    assert_eq!(sink.calls(), vec![Some(ALICE.to_string())]);
}

#[tokio::test]
async fn test_listener_publishes_views_in_provider_order() {
    // Arrange
    let (tx, rx) = async_channel::unbounded();
    let wallet = Arc::new(MemoryWallet::new(ALICE, CHAIN).with_updates(tx));
    let (session, sink) = session_with(wallet.clone());
    let (listener, mut views) = spawn_listener(Arc::new(session), rx);

    // Act
    wallet.connect().await.unwrap();
    let connected = views.wait_for(|v| v.can_write).await.unwrap().clone();

    wallet.disconnect().await.unwrap();
    let disconnected = views.wait_for(|v| v.is_ready && !v.is_connected).await.unwrap().clone();

    // Assert
    assert_eq!(connected.signer().map(|s| s.as_str()), Some(ALICE));
    assert!(!disconnected.can_write);
    assert!(disconnected.can_read);
    assert_eq!(sink.calls(), vec![Some(ALICE.to_string()), None]);

    listener.abort();
}

#[tokio::test]
async fn test_transitions_do_not_pull_while_listener_attached() {
    // Arrange
    let (tx, rx) = async_channel::unbounded();
    let wallet = Arc::new(MemoryWallet::new(ALICE, CHAIN).with_updates(tx));
    let (session, sink) = session_with(wallet.clone());
    let session = Arc::new(session);
    assert!(!session.has_listener());
    let (listener, mut views) = spawn_listener(session.clone(), rx);
    assert!(session.has_listener());

    wallet.connect().await.unwrap();
    let connected = views.wait_for(|v| v.can_write).await.unwrap().clone();

    // Act: the listener has not run yet, so the queued disconnect is unprocessed.
    let returned = session.disconnect().await.unwrap();

    // Assert
    assert!(Arc::ptr_eq(&returned, &connected));
    assert_eq!(sink.calls(), vec![Some(ALICE.to_string())]);

    let settled = views.wait_for(|v| !v.is_connected).await.unwrap().clone();
    assert!(settled.is_ready);
    assert!(Arc::ptr_eq(&session.current(), &settled));
    assert_eq!(sink.calls(), vec![Some(ALICE.to_string()), None]);

    listener.abort();
}

#[tokio::test]
async fn test_equal_updates_keep_view_identity() {
    let wallet = Arc::new(MemoryWallet::new(ALICE, CHAIN));
    let (session, sink) = session_with(wallet);

    let first = session.apply(&update(ConnectionSnapshot::connected(ALICE), Some(CHAIN)));
    let second = session.apply(&update(ConnectionSnapshot::connected(ALICE), Some(CHAIN)));
    let switched = session.apply(&update(ConnectionSnapshot::connected(ALICE), Some(1)));

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&second, &switched));
    assert!(!switched.can_write);
    assert_eq!(sink.calls(), vec![Some(ALICE.to_string())]);
}

#[tokio::test]
async fn test_account_switch_notifies_new_signer() {
    let wallet = Arc::new(MemoryWallet::new(ALICE, CHAIN));
    let (session, sink) = session_with(wallet);

    session.apply(&update(ConnectionSnapshot::connected(ALICE), Some(CHAIN)));
    session.apply(&update(ConnectionSnapshot::reconnecting(), Some(CHAIN)));
    let view = session.apply(&update(ConnectionSnapshot::connected(BOB), Some(CHAIN)));

    assert_eq!(view.write_permit().unwrap().as_str(), BOB);
    assert_eq!(sink.calls(), vec![Some(ALICE.to_string()), Some(BOB.to_string())]);
}

#[tokio::test]
async fn test_writes_refused_until_settled_on_contract_network() {
    // Arrange
    let contracts = Arc::new(InMemoryContracts::new());
    let actions = WriteActions::new(contracts.clone());
    let wallet = Arc::new(MemoryWallet::new(ALICE, 1));
    let (session, _sink) = session_with(wallet);

    // Act: settling, then connected on the wrong chain
    let settling = session.apply(&update(ConnectionSnapshot::reconnecting(), Some(1)));
    let denied_settling = actions.mint_test_tokens(&settling, 10).await;
    let wrong_chain = session.connect().await.unwrap();
    let denied_chain = actions.mint_test_tokens(&wrong_chain, 10).await;
    let switched = session.switch_to_contract_network().await.unwrap();
    let allowed = actions.mint_test_tokens(&switched, 10).await;

    // Assert
    assert_eq!(
        denied_settling,
        Err(AppError::CapabilityDenied("Wallet is still connecting, please wait".to_string()))
    );
    assert_eq!(
        denied_chain,
        Err(AppError::CapabilityDenied(format!("Switch your wallet to chain {} to continue", CHAIN)))
    );
    assert_eq!(allowed.unwrap().signer, ALICE);

    let stats = contracts.user_stats(0, ALICE).await.unwrap();
    assert_eq!(stats.token_balance, 10);
}

#[tokio::test]
async fn test_stale_address_after_disconnect_is_never_a_signer() {
    let wallet = Arc::new(MemoryWallet::new(ALICE, CHAIN));
    let (session, sink) = session_with(wallet);

    session.apply(&update(ConnectionSnapshot::connected(ALICE), Some(CHAIN)));
    let view = session.apply(&update(
        ConnectionSnapshot {
            address: Some(ALICE.to_string()),
            ..ConnectionSnapshot::disconnected()
        },
        Some(CHAIN),
    ));

    assert!(view.is_ready && !view.is_connected);
    assert!(view.signer().is_none());
    assert_eq!(sink.calls(), vec![Some(ALICE.to_string()), None]);
}
