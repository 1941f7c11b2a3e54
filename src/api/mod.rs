//! Request/response shapes for the transport layer
//!
//! The HTTP surface itself lives outside this crate; these are the wire
//! shapes it exchanges with clients, serialized in the camelCase format
//! the client expects. The transport maps engine results into these
//! structures and engine errors into status codes via
//! [`MiningError::category`](crate::types::MiningError::category).

use crate::types::{Account, Coin, RewardOutcome, UserId, Withdrawal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Stable external user identity
    pub identity: UserId,

    /// Optional display name for first-time provisioning
    pub display_name: Option<String>,
}

/// Response of `POST /auth/login`
///
/// The token is issued by the transport's token layer; the engine only
/// supplies the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub account: Account,
}

/// Response of `GET /mining/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub balance: Decimal,
}

/// Response of `POST /mining/collect`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectResponse {
    pub collected: Decimal,
    pub new_balance: Decimal,
}

impl From<RewardOutcome> for CollectResponse {
    fn from(outcome: RewardOutcome) -> Self {
        CollectResponse {
            collected: outcome.reward,
            new_balance: outcome.new_balance,
        }
    }
}

/// Response of `POST /mining/ad`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRewardResponse {
    pub reward: Decimal,
    pub new_balance: Decimal,
}

impl From<RewardOutcome> for AdRewardResponse {
    fn from(outcome: RewardOutcome) -> Self {
        AdRewardResponse {
            reward: outcome.reward,
            new_balance: outcome.new_balance,
        }
    }
}

/// Response of `GET /withdraw/coins`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinListResponse {
    pub coins: Vec<Coin>,
}

/// Response of `POST /withdraw`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResponse {
    pub withdrawal: Withdrawal,
}

/// Response of `GET /withdraw/history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub count: usize,
    pub withdrawals: Vec<Withdrawal>,
}

impl HistoryResponse {
    /// Build a history response from the engine's listing
    pub fn new(withdrawals: Vec<Withdrawal>) -> Self {
        HistoryResponse {
            count: withdrawals.len(),
            withdrawals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountStatus;
    use chrono::Utc;

    #[test]
    fn test_login_request_accepts_camel_case() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"identity": 1001, "displayName": "alice"}"#).unwrap();

        assert_eq!(request.identity, 1001);
        assert_eq!(request.display_name.as_deref(), Some("alice"));
    }

    #[test]
    fn test_login_response_embeds_account() {
        let response = LoginResponse {
            token: "token-123".to_string(),
            account: Account {
                identity: 1001,
                name: "alice".to_string(),
                balance: Decimal::ZERO,
                status: AccountStatus::Active,
                email: String::new(),
                created_at: Utc::now(),
            },
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["token"], "token-123");
        assert_eq!(value["account"]["identity"], 1001);
        assert_eq!(value["account"]["status"], "active");
    }

    #[test]
    fn test_collect_response_uses_camel_case_fields() {
        let response = CollectResponse::from(RewardOutcome {
            reward: Decimal::new(10, 0),
            new_balance: Decimal::new(60, 0),
        });

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("collected").is_some());
        assert!(value.get("newBalance").is_some());
    }

    #[test]
    fn test_ad_reward_response_uses_camel_case_fields() {
        let response = AdRewardResponse::from(RewardOutcome {
            reward: Decimal::new(50, 0),
            new_balance: Decimal::new(50, 0),
        });

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("reward").is_some());
        assert!(value.get("newBalance").is_some());
    }

    #[test]
    fn test_history_response_counts_records() {
        let response = HistoryResponse::new(Vec::new());
        assert_eq!(response.count, 0);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["count"], 0);
        assert!(value["withdrawals"].as_array().unwrap().is_empty());
    }
}
