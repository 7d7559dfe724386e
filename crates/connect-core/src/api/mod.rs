//! Connect API
//!
//! Abstraction over the remote payments backend. Every call carries the
//! caller's [`Session`]; implementations turn it into the
//! `X-Organization-ID` and `Authorization` headers.

mod mock;

pub use mock::{Call, MockConnectApi};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::model::{
    ConnectedDeveloperPage, OnboardingLink, OnboardingRequest, OnboardingStatus, PaymentReceipt,
    PaymentRequest, TransactionPage, WalletBalance, WithdrawalPage, WithdrawalReceipt,
};
use crate::session::Session;

/// Base path of every console endpoint
pub const API_BASE_PATH: &str = "/api/v1/connect";

/// Rows fetched for each history table
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Payments backend client (Strategy pattern)
///
/// Futures are not `Send`: the browser fetch backend cannot provide it.
#[async_trait(?Send)]
pub trait ConnectApi {
    /// Rows requested per history table
    fn history_limit(&self) -> u32 {
        DEFAULT_HISTORY_LIMIT
    }

    /// `GET /status`
    async fn status(&self, session: &Session) -> Result<OnboardingStatus>;

    /// `GET /wallet/balance`
    async fn wallet_balance(&self, session: &Session) -> Result<WalletBalance>;

    /// `GET /wallet/transactions?limit=N`
    async fn transactions(&self, session: &Session, limit: u32) -> Result<TransactionPage>;

    /// `GET /withdrawals/history?limit=N`
    async fn withdrawal_history(&self, session: &Session, limit: u32) -> Result<WithdrawalPage>;

    /// `POST /onboard`
    async fn start_onboarding(
        &self,
        session: &Session,
        request: &OnboardingRequest,
    ) -> Result<OnboardingLink>;

    /// `POST /refresh-onboarding`
    async fn refresh_onboarding(
        &self,
        session: &Session,
        request: &OnboardingRequest,
    ) -> Result<OnboardingLink>;

    /// `POST /withdrawals/request`
    async fn request_withdrawal(&self, session: &Session, amount: Decimal)
    -> Result<WithdrawalReceipt>;

    /// `GET /connected-developers`
    async fn connected_developers(&self, session: &Session) -> Result<ConnectedDeveloperPage>;

    /// `POST /payments/execute`
    async fn execute_payment(
        &self,
        session: &Session,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt>;
}
