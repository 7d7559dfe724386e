//! Developer View
//!
//! Payee side of the console: onboarding status, wallet, history tables
//! and withdrawal requests.
//!
//! ## Flow
//!
//! ```text
//! load_dashboard_data ──┬── GET /status ──────────────┐
//!                       ├── GET /wallet/balance ──────┤  join (settle all),
//!                       ├── GET /wallet/transactions ─┤  apply each slot
//!                       └── GET /withdrawals/history ─┘  on its own
//! ```
//!
//! Each operation is split into a network half (`fetch_*`/`submit_*`, free
//! functions) and a state half (`DeveloperState::begin_*`/`finish_*`) so a
//! reactive UI can hold the state in a signal while the request is in
//! flight. The `async` methods on [`DeveloperState`] compose both halves.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::ConnectApi;
use crate::error::{ConsoleError, Result};
use crate::format::{self, Badge, BadgeTier};
use crate::model::{
    MINIMUM_WITHDRAWAL, OnboardingLink, OnboardingRequest, OnboardingStatus, TransactionPage,
    TransactionRecord, WalletBalance, WithdrawalPage, WithdrawalReceipt, WithdrawalRecord,
};
use crate::session::Session;
use crate::status::{Banner, ViewStatus};

pub const LOAD_FAILED: &str = "Failed to load dashboard data";
pub const ONBOARDING_FAILED: &str = "Failed to create onboarding link";
pub const WITHDRAWAL_FAILED: &str = "Failed to request withdrawal";
pub const ONBOARDING_OPENED: &str =
    "Onboarding link opened in new tab. Complete the process and refresh this page.";
pub const INSUFFICIENT_BALANCE: &str = "Insufficient balance";

/// Characters of the payer organization id shown in the transaction table
const PAYER_ID_CHARS: usize = 12;

// ============================================================================
// Network half
// ============================================================================

/// The four dashboard reads, each settled on its own
#[derive(Clone, Debug)]
pub struct DashboardSnapshot {
    pub status: Result<OnboardingStatus>,
    pub balance: Result<WalletBalance>,
    pub transactions: Result<TransactionPage>,
    pub withdrawals: Result<WithdrawalPage>,
}

impl DashboardSnapshot {
    /// First failed read, in request order
    pub fn first_error(&self) -> Option<&ConsoleError> {
        self.status
            .as_ref()
            .err()
            .or_else(|| self.balance.as_ref().err())
            .or_else(|| self.transactions.as_ref().err())
            .or_else(|| self.withdrawals.as_ref().err())
    }
}

/// Issue the four reads concurrently and wait for all of them
pub async fn fetch_dashboard<A: ConnectApi + ?Sized>(
    api: &A,
    session: &Session,
    limit: u32,
) -> Result<DashboardSnapshot> {
    session.require_token()?;

    tracing::debug!(organization = %session.organization_id, limit, "loading developer dashboard");

    let (status, balance, transactions, withdrawals) = futures::join!(
        api.status(session),
        api.wallet_balance(session),
        api.transactions(session, limit),
        api.withdrawal_history(session, limit),
    );

    Ok(DashboardSnapshot {
        status,
        balance,
        transactions,
        withdrawals,
    })
}

/// Ask the backend for a hosted onboarding link.
///
/// `resume` targets `/refresh-onboarding` for an account whose link expired.
pub async fn create_onboarding_link<A: ConnectApi + ?Sized>(
    api: &A,
    session: &Session,
    origin: &str,
    resume: bool,
) -> Result<OnboardingLink> {
    session.require_token()?;

    let request = OnboardingRequest::for_origin(origin);
    if resume {
        api.refresh_onboarding(session, &request).await
    } else {
        api.start_onboarding(session, &request).await
    }
}

/// Client-side guards of a withdrawal request
pub fn validate_withdrawal(amount: Decimal, balance: Option<&WalletBalance>) -> Result<()> {
    if amount < MINIMUM_WITHDRAWAL {
        return Err(ConsoleError::Validation(format!(
            "Minimum withdrawal amount is ${MINIMUM_WITHDRAWAL}"
        )));
    }

    match balance {
        Some(wallet) if amount <= wallet.balance => Ok(()),
        _ => Err(ConsoleError::Validation(INSUFFICIENT_BALANCE.into())),
    }
}

/// Validate locally, then submit the withdrawal
pub async fn submit_withdrawal<A: ConnectApi + ?Sized>(
    api: &A,
    session: &Session,
    amount: Decimal,
    balance: Option<&WalletBalance>,
) -> Result<WithdrawalReceipt> {
    session.require_token()?;
    validate_withdrawal(amount, balance)?;

    tracing::debug!(%amount, "requesting withdrawal");
    api.request_withdrawal(session, amount).await
}

// ============================================================================
// State half
// ============================================================================

/// Everything the developer view shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeveloperState {
    pub status: Option<OnboardingStatus>,
    pub balance: Option<WalletBalance>,
    pub transactions: Vec<TransactionRecord>,
    pub withdrawals: Vec<WithdrawalRecord>,
    pub view: ViewStatus,

    /// Amount typed into the withdrawal form
    pub withdraw_amount: Decimal,
}

impl Default for DeveloperState {
    fn default() -> Self {
        Self {
            status: None,
            balance: None,
            transactions: Vec::new(),
            withdrawals: Vec::new(),
            view: ViewStatus::default(),
            withdraw_amount: MINIMUM_WITHDRAWAL,
        }
    }
}

impl DeveloperState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_onboarded(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.onboarding_completed)
    }

    pub fn begin_load(&mut self) {
        self.view.begin_refresh();
    }

    /// Apply every settled read; a failed read empties its slot
    pub fn finish_load(&mut self, outcome: Result<DashboardSnapshot>) {
        let snapshot = match outcome {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.view.fail(err.user_message(LOAD_FAILED));
                return;
            }
        };

        let banner = snapshot.first_error().map(|err| {
            tracing::warn!(error = %err, "dashboard read failed");
            err.user_message(LOAD_FAILED)
        });

        self.status = snapshot.status.ok();
        self.balance = snapshot.balance.ok();
        self.transactions = snapshot
            .transactions
            .map(|page| page.transactions)
            .unwrap_or_default();
        self.withdrawals = snapshot
            .withdrawals
            .map(|page| page.withdrawals)
            .unwrap_or_default();

        match banner {
            Some(message) => self.view.fail(message),
            None => self.view.finish(),
        }
    }

    /// Start of a submit action
    pub fn begin_action(&mut self) {
        self.view.begin();
    }

    /// Record an onboarding outcome; returns the URL to open
    pub fn finish_onboarding(&mut self, outcome: Result<OnboardingLink>) -> Option<String> {
        match outcome {
            Ok(link) => {
                self.view.succeed(ONBOARDING_OPENED);
                Some(link.onboarding_url)
            }
            Err(err) => {
                self.view.fail(err.user_message(ONBOARDING_FAILED));
                None
            }
        }
    }

    /// Record a withdrawal outcome; returns true when the dashboard should reload
    pub fn finish_withdrawal(&mut self, outcome: Result<WithdrawalReceipt>) -> bool {
        match outcome {
            Ok(receipt) => {
                self.view
                    .succeed(format!("Withdrawal request created! {}", receipt.message));
                true
            }
            Err(err) => {
                self.view.fail(err.user_message(WITHDRAWAL_FAILED));
                false
            }
        }
    }

    /// Start a withdrawal of `amount`; returns the balance the guards check against
    pub fn begin_withdrawal(&mut self, amount: Decimal) -> Option<WalletBalance> {
        self.begin_action();
        self.withdraw_amount = amount;
        self.balance.clone()
    }

    /// Drives the withdraw button's disabled state
    pub fn can_submit_withdrawal(&self) -> bool {
        validate_withdrawal(self.withdraw_amount, self.balance.as_ref()).is_ok()
    }

    // The async forms below hold `&mut self` across the await. The web
    // frontend cannot, so it runs the same begin/fetch/finish steps itself.

    /// Reload status, balance and both histories
    pub async fn load_dashboard_data<A: ConnectApi + ?Sized>(&mut self, api: &A, session: &Session) {
        self.begin_load();
        let outcome = fetch_dashboard(api, session, api.history_limit()).await;
        self.finish_load(outcome);
    }

    /// Create an onboarding link; returns the hosted URL to open
    pub async fn start_onboarding<A: ConnectApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
        origin: &str,
    ) -> Option<String> {
        self.begin_action();
        let outcome = create_onboarding_link(api, session, origin, false).await;
        self.finish_onboarding(outcome)
    }

    /// Fresh link for an account whose onboarding was left unfinished
    pub async fn refresh_onboarding<A: ConnectApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
        origin: &str,
    ) -> Option<String> {
        self.begin_action();
        let outcome = create_onboarding_link(api, session, origin, true).await;
        self.finish_onboarding(outcome)
    }

    /// Submit a withdrawal; reloads the dashboard on success
    pub async fn request_withdrawal<A: ConnectApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
        amount: Decimal,
    ) {
        let balance = self.begin_withdrawal(amount);
        let outcome = submit_withdrawal(api, session, amount, balance.as_ref()).await;
        if self.finish_withdrawal(outcome) {
            self.load_dashboard_data(api, session).await;
        }
    }

    /// Render model of the current state
    pub fn panels(&self) -> DeveloperPanels {
        let onboarded = self.is_onboarded();

        let onboarding = match &self.status {
            Some(status) if status.onboarding_completed => OnboardingPanel::Complete {
                account_id: if status.account_id.is_empty() {
                    "N/A".into()
                } else {
                    status.account_id.clone()
                },
                payouts_enabled: format::yes_no(status.payouts_enabled).into(),
                charges_enabled: format::yes_no(status.charges_enabled).into(),
            },
            status => OnboardingPanel::CallToAction {
                resumable: status.as_ref().is_some_and(OnboardingStatus::is_resumable),
            },
        };

        let balance = self
            .balance
            .as_ref()
            .filter(|_| onboarded)
            .map(|wallet| BalancePanel {
                balance: format::usd(wallet.balance),
                total_earned: format::usd(wallet.total_earned),
                total_withdrawn: format::usd(wallet.total_withdrawn),
                pending_withdrawals: format::usd(wallet.pending_withdrawals),
                withdrawal: wallet.can_withdraw.then(|| WithdrawalForm {
                    minimum: format::usd(wallet.minimum_withdrawal),
                    amount: format::usd(self.withdraw_amount),
                    enabled: self.can_submit_withdrawal(),
                }),
            });

        let transactions = (onboarded && !self.transactions.is_empty()).then(|| {
            self.transactions
                .iter()
                .map(TransactionRow::from)
                .collect()
        });

        let withdrawals = (onboarded && !self.withdrawals.is_empty()).then(|| {
            self.withdrawals
                .iter()
                .map(WithdrawalRow::from)
                .collect()
        });

        DeveloperPanels {
            loading: self.view.loading,
            banner: self.view.banner.clone(),
            onboarding,
            balance,
            transactions,
            withdrawals,
        }
    }
}

// ============================================================================
// Render model
// ============================================================================

/// What the developer view renders, already formatted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperPanels {
    pub loading: bool,
    pub banner: Option<Banner>,
    pub onboarding: OnboardingPanel,
    pub balance: Option<BalancePanel>,
    pub transactions: Option<Vec<TransactionRow>>,
    pub withdrawals: Option<Vec<WithdrawalRow>>,
}

/// Stripe Connect status card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OnboardingPanel {
    /// "Start Onboarding"; `resumable` offers a fresh link for an existing account
    CallToAction { resumable: bool },
    Complete {
        account_id: String,
        payouts_enabled: String,
        charges_enabled: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePanel {
    pub balance: String,
    pub total_earned: String,
    pub total_withdrawn: String,
    pub pending_withdrawals: String,
    /// Present only when the backend allows a withdrawal
    pub withdrawal: Option<WithdrawalForm>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalForm {
    pub minimum: String,
    pub amount: String,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub function_name: String,
    pub user_organization: String,
    pub amount: String,
    pub platform_fee: String,
    pub net_amount: String,
    pub status: Badge,
}

impl From<&TransactionRecord> for TransactionRow {
    fn from(tx: &TransactionRecord) -> Self {
        Self {
            id: tx.id.clone(),
            date: format::date(&tx.executed_at),
            function_name: tx.function_name.clone(),
            user_organization: format::abbreviate(&tx.user_organization, PAYER_ID_CHARS),
            amount: format::usd(tx.amount),
            platform_fee: format::usd(tx.platform_fee),
            net_amount: format::usd(tx.net_amount),
            status: Badge {
                label: tx.status.clone(),
                tier: BadgeTier::for_transaction(&tx.status),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRow {
    pub id: String,
    pub requested: String,
    pub amount: String,
    pub status: Badge,
    pub completed: String,
    pub reason: String,
}

impl From<&WithdrawalRecord> for WithdrawalRow {
    fn from(wd: &WithdrawalRecord) -> Self {
        Self {
            id: wd.id.clone(),
            requested: format::date(&wd.requested_at),
            amount: format::usd(wd.amount),
            status: Badge {
                label: wd.status.clone(),
                tier: BadgeTier::for_withdrawal(&wd.status),
            },
            completed: format::optional_date(wd.completed_at.as_ref()),
            reason: wd
                .failure_reason
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| "-".into()),
        }
    }
}
