//! # Write Actions
//!
//! Every write goes through [`WriteActions`], which:
//!
//! 1. Takes a write permit from the caller's [`CapabilityView`]. If writes are
//!    denied (still connecting, no wallet, wrong network) the call is rejected
//!    synchronously with a descriptive reason, before anything is sent.
//! 2. Validates the input.
//! 3. Calls the adapter with the signer threaded through explicitly.
//!
//! Failures come back as [`AppError`]s whose `user_message()` is suitable for a
//! dismissable error next to the control that triggered it.

use std::sync::Arc;

use lib_core::{AppError, Result};
use lib_utils::validation::{validate_address, validate_max_length, validate_not_empty};
use shared::{NewProject, SponsorRequest, TxReceipt};
use tracing::{info, warn};

use crate::core::service::ContractWriter;
use crate::wallet::{CapabilityView, SignerAddress};

/// Longest comment accepted, in characters.
pub const MAX_COMMENT_CHARS: usize = 1000;
/// Longest project name accepted, in characters.
pub const MAX_PROJECT_NAME_CHARS: usize = 64;
/// Longest campaign, in seconds (90 days).
pub const MAX_CAMPAIGN_SECS: u64 = 90 * 24 * 60 * 60;

pub struct WriteActions {
    writer: Arc<dyn ContractWriter>,
}

impl WriteActions {
    pub fn new(writer: Arc<dyn ContractWriter>) -> Self {
        Self { writer }
    }

    pub async fn create_project(&self, view: &CapabilityView, project: NewProject) -> Result<TxReceipt> {
        let signer = permit(view, "create_project")?;
        validate_not_empty(&project.name, "Project name").map_err(AppError::InvalidInput)?;
        validate_max_length(&project.name, MAX_PROJECT_NAME_CHARS, "Project name")
            .map_err(AppError::InvalidInput)?;
        validate_not_empty(&project.token_symbol, "Token symbol").map_err(AppError::InvalidInput)?;
        validate_address(&project.token_address).map_err(AppError::InvalidInput)?;

        let result = self.writer.create_project(&signer, project).await;
        settle("create_project", &signer, result)
    }

    pub async fn post_comment(&self, view: &CapabilityView, project_id: u64, content: &str) -> Result<TxReceipt> {
        let signer = permit(view, "post_comment")?;
        let content = content.trim();
        validate_not_empty(content, "Comment").map_err(AppError::InvalidInput)?;
        validate_max_length(content, MAX_COMMENT_CHARS, "Comment").map_err(AppError::InvalidInput)?;

        let result = self
            .writer
            .post_comment(&signer, project_id, content.to_string())
            .await;
        settle("post_comment", &signer, result)
    }

    pub async fn like_comment(&self, view: &CapabilityView, comment_id: u64) -> Result<TxReceipt> {
        let signer = permit(view, "like_comment")?;
        let result = self.writer.like_comment(&signer, comment_id).await;
        settle("like_comment", &signer, result)
    }

    pub async fn sponsor_project(&self, view: &CapabilityView, request: SponsorRequest) -> Result<TxReceipt> {
        let signer = permit(view, "sponsor_project")?;
        validate_not_empty(&request.name, "Campaign name").map_err(AppError::InvalidInput)?;
        if request.amount == 0 {
            return Err(AppError::InvalidInput("Sponsor amount must be greater than 0".to_string()));
        }
        if request.duration_secs == 0 || request.duration_secs > MAX_CAMPAIGN_SECS {
            return Err(AppError::InvalidInput(
                "Campaign duration must be between 1 second and 90 days".to_string(),
            ));
        }

        let result = self.writer.sponsor_project(&signer, request).await;
        settle("sponsor_project", &signer, result)
    }

    pub async fn claim_campaign_reward(&self, view: &CapabilityView, campaign_id: u64) -> Result<TxReceipt> {
        let signer = permit(view, "claim_campaign_reward")?;
        let result = self.writer.claim_campaign_reward(&signer, campaign_id).await;
        settle("claim_campaign_reward", &signer, result)
    }

    pub async fn distribute_campaign_rewards(
        &self,
        view: &CapabilityView,
        campaign_id: u64,
    ) -> Result<TxReceipt> {
        let signer = permit(view, "distribute_campaign_rewards")?;
        let result = self.writer.distribute_campaign_rewards(&signer, campaign_id).await;
        settle("distribute_campaign_rewards", &signer, result)
    }

    pub async fn mint_test_tokens(&self, view: &CapabilityView, amount: u128) -> Result<TxReceipt> {
        let signer = permit(view, "mint_test_tokens")?;
        if amount == 0 {
            return Err(AppError::InvalidInput("Mint amount must be greater than 0".to_string()));
        }
        let result = self.writer.mint_test_tokens(&signer, amount).await;
        settle("mint_test_tokens", &signer, result)
    }
}

fn permit(view: &CapabilityView, action: &'static str) -> Result<SignerAddress> {
    view.write_permit().map_err(|denied| {
        warn!(action, reason = %denied, "Write rejected by capability check");
        AppError::from(denied)
    })
}

fn settle(action: &'static str, signer: &SignerAddress, result: Result<TxReceipt>) -> Result<TxReceipt> {
    match result {
        Ok(receipt) => {
            info!(action, signer = %signer, tx = %receipt.tx_hash, block = receipt.block_number, "Write confirmed");
            Ok(receipt)
        }
        Err(e) => {
            warn!(action, signer = %signer, error = %e, "Write failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{resolve_capabilities, SyncedConnectionState};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    const CHAIN: u64 = 31337;

    /// Writer that records signers and can be told to revert.
    #[derive(Default)]
    struct RecordingWriter {
        signers: Mutex<Vec<String>>,
        revert: bool,
    }

    impl RecordingWriter {
        fn receipt(&self, signer: &SignerAddress) -> Result<TxReceipt> {
            if self.revert {
                return Err(AppError::Transaction("execution reverted".to_string()));
            }
            self.signers.lock().push(signer.to_string());
            Ok(TxReceipt {
                tx_hash: "0x01".to_string(),
                block_number: 1,
                signer: signer.to_string(),
            })
        }
    }

    #[async_trait]
    impl ContractWriter for RecordingWriter {
        async fn create_project(&self, signer: &SignerAddress, _project: NewProject) -> Result<TxReceipt> {
            self.receipt(signer)
        }
        async fn post_comment(&self, signer: &SignerAddress, _project_id: u64, _content: String) -> Result<TxReceipt> {
            self.receipt(signer)
        }
        async fn like_comment(&self, signer: &SignerAddress, _comment_id: u64) -> Result<TxReceipt> {
            self.receipt(signer)
        }
        async fn sponsor_project(&self, signer: &SignerAddress, _request: SponsorRequest) -> Result<TxReceipt> {
            self.receipt(signer)
        }
        async fn claim_campaign_reward(&self, signer: &SignerAddress, _campaign_id: u64) -> Result<TxReceipt> {
            self.receipt(signer)
        }
        async fn distribute_campaign_rewards(&self, signer: &SignerAddress, _campaign_id: u64) -> Result<TxReceipt> {
            self.receipt(signer)
        }
        async fn mint_test_tokens(&self, signer: &SignerAddress, _amount: u128) -> Result<TxReceipt> {
            self.receipt(signer)
        }
    }

    fn writable_view() -> CapabilityView {
        let synced = SyncedConnectionState {
            is_ready: true,
            synced_address: Some("0xA".to_string()),
            synced_is_connected: true,
        };
        resolve_capabilities(&synced, Some(CHAIN), CHAIN)
    }

    #[tokio::test]
    async fn test_denied_write_never_reaches_adapter() {
        let writer = Arc::new(RecordingWriter::default());
        let actions = WriteActions::new(writer.clone());

        let settling = resolve_capabilities(&SyncedConnectionState::not_ready(), Some(CHAIN), CHAIN);
        let err = actions.post_comment(&settling, 1, "gm").await.unwrap_err();
        assert_eq!(err.user_message(), "Wallet is still connecting, please wait");

        let synced = SyncedConnectionState {
            is_ready: true,
            synced_address: Some("0xA".to_string()),
            synced_is_connected: true,
        };
        let wrong_chain = resolve_capabilities(&synced, Some(1), CHAIN);
        let err = actions.like_comment(&wrong_chain, 1).await.unwrap_err();
        assert_eq!(err, AppError::CapabilityDenied(format!("Switch your wallet to chain {CHAIN} to continue")));

        assert!(writer.signers.lock().is_empty());
    }

    #[tokio::test]
    async fn test_signer_is_threaded_through() {
        let writer = Arc::new(RecordingWriter::default());
        let actions = WriteActions::new(writer.clone());

        let receipt = actions.post_comment(&writable_view(), 1, "  gm  ").await.unwrap();
        assert_eq!(receipt.signer, "0xA");
        assert_eq!(*writer.signers.lock(), vec!["0xA".to_string()]);
    }

    #[tokio::test]
    async fn test_input_validation() {
        let actions = WriteActions::new(Arc::new(RecordingWriter::default()));
        let view = writable_view();

        assert!(matches!(
            actions.post_comment(&view, 1, "   ").await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            actions.post_comment(&view, 1, &"x".repeat(MAX_COMMENT_CHARS + 1)).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            actions.mint_test_tokens(&view, 0).await,
            Err(AppError::InvalidInput(_))
        ));

        let bad_token = NewProject {
            name: "Forum".to_string(),
            description: String::new(),
            token_address: "not-an-address".to_string(),
            token_symbol: "TKN".to_string(),
        };
        assert!(matches!(
            actions.create_project(&view, bad_token).await,
            Err(AppError::InvalidInput(_))
        ));

        let endless = SponsorRequest {
            project_id: 1,
            name: "Forever".to_string(),
            amount: 10,
            duration_secs: MAX_CAMPAIGN_SECS + 1,
        };
        assert!(matches!(
            actions.sponsor_project(&view, endless).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_propagates() {
        let writer = Arc::new(RecordingWriter {
            revert: true,
            ..RecordingWriter::default()
        });
        let actions = WriteActions::new(writer);

        let err = actions.claim_campaign_reward(&writable_view(), 3).await.unwrap_err();
        assert_eq!(err.user_message(), "execution reverted");
    }
}
