//! Mock Connect API
//!
//! Scripted backend for tests and demos. Each endpoint answers with the
//! response it was given (or a 404 when unscripted) and every call is
//! recorded.

use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{ConnectApi, DEFAULT_HISTORY_LIMIT};
use crate::error::{ConsoleError, Result};
use crate::model::{
    ConnectedDeveloperPage, OnboardingLink, OnboardingRequest, OnboardingStatus, PaymentReceipt,
    PaymentRequest, TransactionPage, WalletBalance, WithdrawalPage, WithdrawalReceipt,
};
use crate::session::Session;

/// A request observed by the mock
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Status,
    WalletBalance,
    Transactions { limit: u32 },
    WithdrawalHistory { limit: u32 },
    StartOnboarding(OnboardingRequest),
    RefreshOnboarding(OnboardingRequest),
    RequestWithdrawal { amount: Decimal },
    ConnectedDevelopers,
    ExecutePayment(PaymentRequest),
}

struct Slot<T>(Mutex<Option<Result<T>>>);

impl<T: Clone> Slot<T> {
    fn empty() -> Self {
        Self(Mutex::new(None))
    }

    fn set(&self, response: Result<T>) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(response);
        }
    }

    fn get(&self, endpoint: &str) -> Result<T> {
        self.0
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .unwrap_or_else(|| {
                Err(ConsoleError::Api {
                    status: 404,
                    message: Some(format!("{endpoint} not scripted")),
                })
            })
    }
}

/// Mock backend with per-endpoint scripted responses
pub struct MockConnectApi {
    status: Slot<OnboardingStatus>,
    balance: Slot<WalletBalance>,
    transactions: Slot<TransactionPage>,
    withdrawals: Slot<WithdrawalPage>,
    onboarding: Slot<OnboardingLink>,
    withdrawal: Slot<WithdrawalReceipt>,
    developers: Slot<ConnectedDeveloperPage>,
    payment: Slot<PaymentReceipt>,
    history_limit: u32,
    calls: Mutex<Vec<(Call, Session)>>,
}

impl Default for MockConnectApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnectApi {
    pub fn new() -> Self {
        Self {
            status: Slot::empty(),
            balance: Slot::empty(),
            transactions: Slot::empty(),
            withdrawals: Slot::empty(),
            onboarding: Slot::empty(),
            withdrawal: Slot::empty(),
            developers: Slot::empty(),
            payment: Slot::empty(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_status(self, response: Result<OnboardingStatus>) -> Self {
        self.status.set(response);
        self
    }

    pub fn with_balance(self, response: Result<WalletBalance>) -> Self {
        self.balance.set(response);
        self
    }

    pub fn with_transactions(self, response: Result<TransactionPage>) -> Self {
        self.transactions.set(response);
        self
    }

    pub fn with_withdrawals(self, response: Result<WithdrawalPage>) -> Self {
        self.withdrawals.set(response);
        self
    }

    /// Answer for both `/onboard` and `/refresh-onboarding`
    pub fn with_onboarding(self, response: Result<OnboardingLink>) -> Self {
        self.onboarding.set(response);
        self
    }

    pub fn with_withdrawal(self, response: Result<WithdrawalReceipt>) -> Self {
        self.withdrawal.set(response);
        self
    }

    pub fn with_developers(self, response: Result<ConnectedDeveloperPage>) -> Self {
        self.developers.set(response);
        self
    }

    pub fn with_payment(self, response: Result<PaymentReceipt>) -> Self {
        self.payment.set(response);
        self
    }

    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    /// Replace the balance answer between calls
    pub fn set_balance(&self, response: Result<WalletBalance>) {
        self.balance.set(response);
    }

    /// Requests seen so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(call, _)| call.clone()).collect())
            .unwrap_or_default()
    }

    /// Sessions that accompanied each request
    pub fn sessions(&self) -> Vec<Session> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, session)| session.clone()).collect())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    fn record(&self, call: Call, session: &Session) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((call, session.clone()));
        }
    }
}

#[async_trait(?Send)]
impl ConnectApi for MockConnectApi {
    fn history_limit(&self) -> u32 {
        self.history_limit
    }

    async fn status(&self, session: &Session) -> Result<OnboardingStatus> {
        self.record(Call::Status, session);
        self.status.get("/status")
    }

    async fn wallet_balance(&self, session: &Session) -> Result<WalletBalance> {
        self.record(Call::WalletBalance, session);
        self.balance.get("/wallet/balance")
    }

    async fn transactions(&self, session: &Session, limit: u32) -> Result<TransactionPage> {
        self.record(Call::Transactions { limit }, session);
        self.transactions.get("/wallet/transactions")
    }

    async fn withdrawal_history(&self, session: &Session, limit: u32) -> Result<WithdrawalPage> {
        self.record(Call::WithdrawalHistory { limit }, session);
        self.withdrawals.get("/withdrawals/history")
    }

    async fn start_onboarding(
        &self,
        session: &Session,
        request: &OnboardingRequest,
    ) -> Result<OnboardingLink> {
        self.record(Call::StartOnboarding(request.clone()), session);
        self.onboarding.get("/onboard")
    }

    async fn refresh_onboarding(
        &self,
        session: &Session,
        request: &OnboardingRequest,
    ) -> Result<OnboardingLink> {
        self.record(Call::RefreshOnboarding(request.clone()), session);
        self.onboarding.get("/refresh-onboarding")
    }

    async fn request_withdrawal(
        &self,
        session: &Session,
        amount: Decimal,
    ) -> Result<WithdrawalReceipt> {
        self.record(Call::RequestWithdrawal { amount }, session);
        self.withdrawal.get("/withdrawals/request")
    }

    async fn connected_developers(&self, session: &Session) -> Result<ConnectedDeveloperPage> {
        self.record(Call::ConnectedDevelopers, session);
        self.developers.get("/connected-developers")
    }

    async fn execute_payment(
        &self,
        session: &Session,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt> {
        self.record(Call::ExecutePayment(request.clone()), session);
        self.payment.get("/payments/execute")
    }
}
