//! Domain Models
//!
//! Display copies of the resources served under `/api/v1/connect`.
//! Uses `rust_decimal` for all monetary values; they travel as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};

/// Smallest withdrawal the console will submit
pub const MINIMUM_WITHDRAWAL: Decimal = dec!(50);

/// Stripe Connect onboarding status of the calling organization
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingStatus {
    /// Connected account id (empty until onboarding starts)
    #[serde(default)]
    pub account_id: String,

    #[serde(default)]
    pub onboarding_completed: bool,

    #[serde(default)]
    pub payouts_enabled: bool,

    #[serde(default)]
    pub charges_enabled: bool,

    /// Wallet summary the backend attaches to the status
    #[serde(default, with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_earned: Decimal,

    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_withdrawn: Decimal,

    #[serde(default)]
    pub can_withdraw: bool,

    #[serde(default, with = "rust_decimal::serde::float")]
    pub minimum_withdrawal: Decimal,
}

impl OnboardingStatus {
    /// An account exists but the hosted flow was not finished
    pub fn is_resumable(&self) -> bool {
        !self.onboarding_completed && !self.account_id.is_empty()
    }
}

/// Wallet snapshot of a developer organization
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalance {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_earned: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_withdrawn: Decimal,

    #[serde(default, with = "rust_decimal::serde::float")]
    pub pending_withdrawals: Decimal,

    #[serde(default)]
    pub can_withdraw: bool,

    #[serde(default, with = "rust_decimal::serde::float")]
    pub minimum_withdrawal: Decimal,
}

/// A function execution credited to the developer wallet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,

    pub executed_at: DateTime<Utc>,

    #[serde(default)]
    pub function_id: String,

    #[serde(default)]
    pub function_name: String,

    /// Paying organization
    #[serde(default)]
    pub user_organization: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    #[serde(default, with = "rust_decimal::serde::float")]
    pub platform_fee: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub net_amount: Decimal,

    /// completed, failed, refunded, ...
    pub status: String,
}

/// A payout request of the developer wallet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRecord {
    pub id: String,

    pub requested_at: DateTime<Utc>,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// pending, processing, completed, failed, rejected
    pub status: String,

    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub failure_reason: Option<String>,
}

/// A developer the calling organization has paid
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedDeveloper {
    pub organization_id: String,

    #[serde(default)]
    pub stripe_account_id: Option<String>,

    #[serde(default)]
    pub onboarding_completed: bool,

    #[serde(default)]
    pub payouts_enabled: bool,

    #[serde(default)]
    pub charges_enabled: bool,

    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_earned: Decimal,

    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_withdrawn: Decimal,

    /// Date string, displayed verbatim
    #[serde(default)]
    pub joined_at: String,
}

/// `GET /wallet/transactions`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transactions: Vec<TransactionRecord>,

    #[serde(default)]
    pub total: u32,

    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub limit: u32,
}

/// `GET /withdrawals/history`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub withdrawals: Vec<WithdrawalRecord>,

    #[serde(default)]
    pub total: u32,

    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub limit: u32,
}

/// `GET /connected-developers`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedDeveloperPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub developers: Vec<ConnectedDeveloper>,

    #[serde(default)]
    pub total: u32,

    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub limit: u32,
}

/// Body of `POST /onboard` and `POST /refresh-onboarding`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingRequest {
    /// Where the hosted flow sends the user if the link expires
    pub refresh_url: String,

    /// Where the hosted flow sends the user when done
    pub return_url: String,
}

impl OnboardingRequest {
    /// Build the redirect pair from the console's page origin
    pub fn for_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            refresh_url: format!("{origin}/connect/refresh"),
            return_url: format!("{origin}/connect/complete"),
        }
    }
}

/// Hosted onboarding link returned by the backend
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingLink {
    #[serde(default)]
    pub account_id: String,

    pub onboarding_url: String,

    #[serde(default)]
    pub message: String,
}

/// Body of `POST /withdrawals/request`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Backend acknowledgement of a withdrawal request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    #[serde(default)]
    pub withdrawal_id: String,

    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub estimated_arrival: Option<String>,
}

/// Body of `POST /payments/execute`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub function_id: String,

    pub version: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    pub developer_organization_id: String,
}

/// Receipt of a function execution payment
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub transaction_id: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub platform_fee: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub net_amount: Decimal,

    /// Payer balance after the transfer
    #[serde(with = "rust_decimal::serde::float")]
    pub user_balance: Decimal,

    /// Developer balance after the transfer
    #[serde(with = "rust_decimal::serde::float")]
    pub developer_balance: Decimal,

    #[serde(default)]
    pub message: String,
}

/// Missing and `null` lists both decode as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Error body returned by the backend on non-success statuses
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
