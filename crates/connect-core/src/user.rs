//! User View
//!
//! Payer side of the console: pay a developer for a function execution and
//! list the developers already paid.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::api::ConnectApi;
use crate::error::{ConsoleError, Result};
use crate::format;
use crate::model::{ConnectedDeveloper, PaymentReceipt, PaymentRequest};
use crate::session::Session;
use crate::status::{Banner, ViewStatus};

pub const PAYMENT_FAILED: &str = "Failed to process payment";

/// Characters of a developer organization id shown in the table
const DEVELOPER_ID_CHARS: usize = 20;

/// Inputs of the "execute function and pay" form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    pub function_id: String,
    pub version: String,
    pub amount: Decimal,
    pub developer_organization_id: String,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            function_id: "func-test-123".into(),
            version: "v1.0.0".into(),
            amount: dec!(5.00),
            developer_organization_id: String::new(),
        }
    }
}

impl PaymentForm {
    /// Local guards; the same ones disable the submit button
    pub fn validate(&self) -> Result<()> {
        if self.function_id.trim().is_empty() {
            return Err(ConsoleError::Validation("Function ID is required".into()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(ConsoleError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn to_request(&self) -> PaymentRequest {
        PaymentRequest {
            function_id: self.function_id.trim().to_string(),
            version: self.version.trim().to_string(),
            amount: self.amount,
            developer_organization_id: self.developer_organization_id.trim().to_string(),
        }
    }
}

/// Validate locally, then submit the payment
pub async fn submit_payment<A: ConnectApi + ?Sized>(
    api: &A,
    session: &Session,
    form: &PaymentForm,
) -> Result<PaymentReceipt> {
    session.require_token()?;
    form.validate()?;

    let request = form.to_request();
    tracing::debug!(
        function = %request.function_id,
        developer = %request.developer_organization_id,
        amount = %request.amount,
        "executing function payment"
    );
    api.execute_payment(session, &request).await
}

/// Developers paid by this organization.
///
/// Returns `None` without a token; the read is non-critical either way.
pub async fn fetch_connected_developers<A: ConnectApi + ?Sized>(
    api: &A,
    session: &Session,
) -> Option<Result<Vec<ConnectedDeveloper>>> {
    if !session.has_token() {
        return None;
    }
    Some(
        api.connected_developers(session)
            .await
            .map(|page| page.developers),
    )
}

/// Everything the user view shows
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserState {
    pub form: PaymentForm,
    pub view: ViewStatus,
    pub last_receipt: Option<PaymentReceipt>,
    pub developers: Vec<ConnectedDeveloper>,
    pub loading_developers: bool,
}

impl UserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit button state
    pub fn can_submit(&self) -> bool {
        !self.view.loading && self.form.validate().is_ok()
    }

    pub fn begin_developers(&mut self) {
        self.loading_developers = true;
    }

    /// Apply the developers read; failures are logged, never shown
    pub fn finish_developers(&mut self, outcome: Option<Result<Vec<ConnectedDeveloper>>>) {
        self.loading_developers = false;
        match outcome {
            Some(Ok(developers)) => self.developers = developers,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "failed to load connected developers");
            }
            None => {}
        }
    }

    /// Start a payment; returns the form to submit
    pub fn begin_payment(&mut self) -> PaymentForm {
        self.view.begin_loading();
        self.last_receipt = None;
        self.form.clone()
    }

    /// Record a payment outcome; returns true when the developers list should refresh
    pub fn finish_payment(&mut self, outcome: Result<PaymentReceipt>) -> bool {
        match outcome {
            Ok(receipt) => {
                self.view.succeed(format!(
                    "Payment successful! Transaction ID: {}",
                    receipt.transaction_id
                ));
                self.last_receipt = Some(receipt);
                true
            }
            Err(err) => {
                self.view.fail(err.user_message(PAYMENT_FAILED));
                false
            }
        }
    }

    // The async forms below hold `&mut self` across the await. The web
    // frontend cannot, so it runs the same begin/fetch/finish steps itself.

    /// Refresh the developers this organization has paid
    pub async fn load_connected_developers<A: ConnectApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
    ) {
        if !session.has_token() {
            return;
        }
        self.begin_developers();
        let outcome = fetch_connected_developers(api, session).await;
        self.finish_developers(outcome);
    }

    /// Pay for a function execution with the current form
    pub async fn execute_function_and_pay<A: ConnectApi + ?Sized>(
        &mut self,
        api: &A,
        session: &Session,
    ) {
        let form = self.begin_payment();
        let outcome = submit_payment(api, session, &form).await;
        if self.finish_payment(outcome) {
            self.load_connected_developers(api, session).await;
        }
    }

    /// Render model of the current state
    pub fn panels(&self) -> UserPanels {
        UserPanels {
            banner: self.view.banner.clone(),
            submit_label: if self.view.loading {
                "Processing...".into()
            } else {
                format!("Execute Function & Pay {}", format::usd(self.form.amount))
            },
            submit_enabled: self.can_submit(),
            receipt: self.last_receipt.as_ref().map(ReceiptPanel::from),
            developers: if self.loading_developers {
                DevelopersPanel::Loading
            } else if self.developers.is_empty() {
                DevelopersPanel::Empty
            } else {
                DevelopersPanel::Rows(self.developers.iter().map(DeveloperRow::from).collect())
            },
        }
    }
}

/// What the user view renders, already formatted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPanels {
    pub banner: Option<Banner>,
    pub submit_label: String,
    pub submit_enabled: bool,
    pub receipt: Option<ReceiptPanel>,
    pub developers: DevelopersPanel,
}

/// Transaction details card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptPanel {
    pub transaction_id: String,
    pub amount: String,
    pub platform_fee: String,
    pub net_amount: String,
    pub user_balance: String,
    pub developer_balance: String,
}

impl From<&PaymentReceipt> for ReceiptPanel {
    fn from(receipt: &PaymentReceipt) -> Self {
        Self {
            transaction_id: receipt.transaction_id.clone(),
            amount: format::usd(receipt.amount),
            platform_fee: format::usd(receipt.platform_fee),
            net_amount: format::usd(receipt.net_amount),
            user_balance: format::usd(receipt.user_balance),
            developer_balance: format::usd(receipt.developer_balance),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "rows", rename_all = "snake_case")]
pub enum DevelopersPanel {
    Loading,
    Empty,
    Rows(Vec<DeveloperRow>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperRow {
    pub organization_id: String,
    pub onboarded: bool,
    pub balance: String,
    pub total_earned: String,
    pub joined_at: String,
}

impl From<&ConnectedDeveloper> for DeveloperRow {
    fn from(dev: &ConnectedDeveloper) -> Self {
        Self {
            organization_id: format::abbreviate(&dev.organization_id, DEVELOPER_ID_CHARS),
            onboarded: dev.onboarding_completed,
            balance: format::usd(dev.balance),
            total_earned: format::usd(dev.total_earned),
            joined_at: dev.joined_at.clone(),
        }
    }
}
