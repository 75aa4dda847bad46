use serde::{Deserialize, Serialize};

use super::lenient::{amount, de_i64, de_u64};

/// A token-specific discussion forum backed by a reward pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Address of the token contract the project is about
    pub token_address: String,
    pub token_symbol: String,
    pub creator: String,
    /// Reward pool balance, in base units
    #[serde(with = "amount")]
    pub pool_balance: u128,
    #[serde(deserialize_with = "de_u64")]
    pub comment_count: u64,
    #[serde(deserialize_with = "de_u64")]
    pub participant_count: u64,
    /// Unix seconds
    #[serde(deserialize_with = "de_i64")]
    pub created_at: i64,
}

/// A comment posted on a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(deserialize_with = "de_u64")]
    pub project_id: u64,
    pub author: String,
    pub content: String,
    #[serde(deserialize_with = "de_u64")]
    pub likes: u64,
    /// CRT the author earned through this comment (posting plus likes received)
    #[serde(deserialize_with = "de_u64")]
    pub crt_earned: u64,
    #[serde(deserialize_with = "de_i64")]
    pub created_at: i64,
}

/// One row of a project's CRT leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(deserialize_with = "de_u64")]
    pub rank: u64,
    pub address: String,
    #[serde(deserialize_with = "de_u64")]
    pub crt: u64,
    #[serde(deserialize_with = "de_u64")]
    pub comment_count: u64,
    #[serde(deserialize_with = "de_u64")]
    pub likes_received: u64,
}

/// A user's activity and accrued rewards within one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
    pub address: String,
    #[serde(deserialize_with = "de_u64")]
    pub project_id: u64,
    #[serde(deserialize_with = "de_u64")]
    pub crt: u64,
    #[serde(deserialize_with = "de_u64")]
    pub comment_count: u64,
    #[serde(deserialize_with = "de_u64")]
    pub likes_given: u64,
    #[serde(deserialize_with = "de_u64")]
    pub likes_received: u64,
    /// Test-token wallet balance, in base units
    #[serde(with = "amount")]
    pub token_balance: u128,
}

/// Input for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub token_address: String,
    pub token_symbol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_adapter_json() {
        let raw = r#"{
            "id": "3",
            "name": "Pepe Forum",
            "tokenAddress": "0x6982508145454Ce325dDbE47a25d4ec3d2311933",
            "tokenSymbol": "PEPE",
            "poolBalance": "0x3635c9adc5dea00000",
            "commentCount": 12,
            "createdAt": 1700000000
        }"#;
        let project: Project = serde_json::from_str(raw).unwrap();
        assert_eq!(project.id, 3);
        assert_eq!(project.pool_balance, 1_000_000_000_000_000_000_000);
        assert_eq!(project.comment_count, 12);
        assert_eq!(project.participant_count, 0);
        assert!(project.description.is_empty());
    }

    #[test]
    fn test_comment_serializes_camel_case() {
        let comment = Comment {
            id: 1,
            project_id: 2,
            author: "0xabc".to_string(),
            content: "gm".to_string(),
            likes: 3,
            crt_earned: 16,
            created_at: 10,
        };
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["projectId"], 2);
        assert_eq!(json["crtEarned"], 16);
    }
}
