//! Wire contract of the faucet service and the trait the session talks to.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timeout - the faucet took too long to respond")]
    Timeout,

    #[error("Connection error - unable to reach the faucet: {reason}")]
    Connect { reason: String },

    #[error("Network error: {reason}")]
    Network { reason: String },

    #[error("HTTP error {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("Failed to parse faucet response: {reason}")]
    Decode { reason: String },

    #[error("Invalid faucet URL: {reason}")]
    InvalidUrl { reason: String },
}

impl ApiError {
    /// Server-supplied explanation, when the error carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub can_claim: bool,
    #[serde(default)]
    pub cooldown_remaining: u64,
    #[serde(default)]
    pub faucet_balance: f64,
    #[serde(default)]
    pub mock_mode: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub nonce: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub wallet: String,
    pub signature: String,
    pub message: String,
    pub nonce: String,
    pub captcha_token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ClaimResponse {
    pub success: bool,
    #[serde(default)]
    pub tx_signature: Option<String>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub next_claim_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub cooldown_remaining: Option<u64>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsResponse {
    pub total_claims: u64,
    pub unique_wallets: u64,
}

/// Error body of non-2xx responses.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}

/// Why the faucet turned a claim down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NoTokenAccount,
    WalletTooNew,
    Cooldown { remaining_seconds: u64 },
    Other { error: Option<String>, detail: Option<String> },
}

impl Rejection {
    /// Rejections shown as the "overflow" state: the wallet lacks $POOP or history.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Rejection::NoTokenAccount | Rejection::WalletTooNew)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Granted {
        tx_signature: Option<String>,
        next_claim_at: Option<DateTime<Utc>>,
    },
    Rejected(Rejection),
}

impl From<ClaimResponse> for ClaimOutcome {
    fn from(response: ClaimResponse) -> Self {
        if response.success {
            return ClaimOutcome::Granted {
                tx_signature: response.tx_signature,
                next_claim_at: response.next_claim_at,
            };
        }
        let rejection = match response.error.as_deref() {
            Some("no_token_account") => Rejection::NoTokenAccount,
            Some("wallet_too_new") => Rejection::WalletTooNew,
            Some("cooldown") => Rejection::Cooldown {
                remaining_seconds: response.cooldown_remaining.unwrap_or(0),
            },
            _ => Rejection::Other {
                error: response.error,
                detail: response.detail,
            },
        };
        ClaimOutcome::Rejected(rejection)
    }
}

/// Accepts RFC 3339 timestamps and offset-less ISO timestamps (read as UTC).
fn de_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

#[async_trait]
pub trait FaucetApi: Send + Sync {
    async fn status(&self, wallet: Option<&str>) -> Result<StatusResponse, ApiError>;

    async fn challenge(&self, wallet: &str) -> Result<Challenge, ApiError>;

    async fn claim(&self, request: &ClaimRequest) -> Result<ClaimResponse, ApiError>;

    async fn stats(&self) -> Result<StatsResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_defaults_optional_fields() {
        let status: StatusResponse = serde_json::from_str(r#"{"can_claim": true}"#).unwrap();
        assert!(status.can_claim);
        assert_eq!(status.cooldown_remaining, 0);
        assert!(!status.mock_mode);
    }

    #[test]
    fn success_with_offsetless_timestamp() {
        let body = r#"{"success": true, "tx_signature": "5xyz", "next_claim_at": "2026-10-16T13:00:00.250"}"#;
        let response: ClaimResponse = serde_json::from_str(body).unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 10, 16, 13, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(
            ClaimOutcome::from(response),
            ClaimOutcome::Granted {
                tx_signature: Some("5xyz".to_string()),
                next_claim_at: Some(expected),
            }
        );
    }

    #[test]
    fn success_with_rfc3339_timestamp() {
        let body = r#"{"success": true, "next_claim_at": "2026-10-16T15:00:00+02:00"}"#;
        let response: ClaimResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.next_claim_at,
            Some(Utc.with_ymd_and_hms(2026, 10, 16, 13, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejection_codes_map_to_reasons() {
        let parse = |body: &str| ClaimOutcome::from(serde_json::from_str::<ClaimResponse>(body).unwrap());

        assert_eq!(
            parse(r#"{"success": false, "error": "no_token_account"}"#),
            ClaimOutcome::Rejected(Rejection::NoTokenAccount)
        );
        assert_eq!(
            parse(r#"{"success": false, "error": "wallet_too_new"}"#),
            ClaimOutcome::Rejected(Rejection::WalletTooNew)
        );
        assert_eq!(
            parse(r#"{"success": false, "error": "cooldown", "cooldown_remaining": 120}"#),
            ClaimOutcome::Rejected(Rejection::Cooldown { remaining_seconds: 120 })
        );
        assert_eq!(
            parse(r#"{"success": false, "detail": "faucet empty"}"#),
            ClaimOutcome::Rejected(Rejection::Other {
                error: None,
                detail: Some("faucet empty".to_string()),
            })
        );
    }

    #[test]
    fn overflow_rejections() {
        assert!(Rejection::NoTokenAccount.is_overflow());
        assert!(Rejection::WalletTooNew.is_overflow());
        assert!(!Rejection::Cooldown { remaining_seconds: 1 }.is_overflow());
    }

    #[test]
    fn claim_request_sends_null_captcha() {
        let request = ClaimRequest {
            wallet: "W".into(),
            signature: "S".into(),
            message: "M".into(),
            nonce: "N".into(),
            captcha_token: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["captcha_token"].is_null());
    }
}
