//! Developer Dashboard

use connect_core::developer::{
    BalancePanel, DeveloperPanels, OnboardingPanel, TransactionRow, WithdrawalRow,
    create_onboarding_link, fetch_dashboard, submit_withdrawal,
};
use connect_core::{ConnectApi, DeveloperState, Session};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::parse_amount;
use crate::api;
use crate::components::{BannerView, InfoItem, StatusBadge};

#[component]
pub fn DeveloperPage(session: Memo<Session>) -> impl IntoView {
    let state = RwSignal::new(DeveloperState::new());
    let amount_input = RwSignal::new(state.with_untracked(|s| s.withdraw_amount.to_string()));
    let panels = Memo::new(move |_| state.with(DeveloperState::panels));

    // Panels minus the live withdrawal amount; typing must not rebuild the page
    let layout = Memo::new(move |_| {
        let mut layout = panels.get();
        if let Some(form) = layout.balance.as_mut().and_then(|b| b.withdrawal.as_mut()) {
            form.amount.clear();
            form.enabled = false;
        }
        layout
    });

    let load = move || {
        let session = session.get_untracked();
        state.update(DeveloperState::begin_load);
        spawn_local(async move {
            let api = api::client();
            let outcome = fetch_dashboard(&api, &session, api.history_limit()).await;
            state.update(|s| s.finish_load(outcome));
        });
    };

    // On mount and on every session change
    Effect::new(move |_| {
        session.track();
        load();
    });

    let onboard = move |resume: bool| {
        let session = session.get_untracked();
        state.update(DeveloperState::begin_action);
        spawn_local(async move {
            let outcome =
                create_onboarding_link(&api::client(), &session, &api::origin(), resume).await;
            if let Some(url) = state.try_update(|s| s.finish_onboarding(outcome)).flatten() {
                api::open_in_new_tab(&url);
            }
        });
    };

    let withdraw = move |_: leptos::ev::MouseEvent| {
        let session = session.get_untracked();
        let Some((amount, balance)) = state.try_update(|s| {
            let amount = s.withdraw_amount;
            (amount, s.begin_withdrawal(amount))
        }) else {
            return;
        };
        spawn_local(async move {
            let outcome = submit_withdrawal(&api::client(), &session, amount, balance.as_ref()).await;
            if state.try_update(|s| s.finish_withdrawal(outcome)).unwrap_or(false) {
                load();
            }
        });
    };

    let on_amount = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        state.update(|s| s.withdraw_amount = parse_amount(&raw));
        amount_input.set(raw);
    };

    move || {
        let current = layout.get();
        if current.loading {
            return view! { <div class="loading">"Loading dashboard..."</div> }.into_any();
        }

        let onboarding = match current.onboarding {
            OnboardingPanel::CallToAction { resumable } => view! {
                <div>
                    <p class="muted">
                        "Complete Stripe Connect onboarding to start receiving payments from users."
                    </p>
                    <button class="btn btn-primary" on:click=move |_| onboard(false)>
                        "Start Onboarding"
                    </button>
                    <Show when=move || resumable>
                        <button class="btn btn-secondary" on:click=move |_| onboard(true)>
                            "Get a New Onboarding Link"
                        </button>
                    </Show>
                    <p class="tip">
                        "💡 "<strong>"Tip:"</strong>
                        " After completing onboarding, click \"Refresh Status\" to update your account status."
                    </p>
                </div>
            }
            .into_any(),
            OnboardingPanel::Complete { account_id, payouts_enabled, charges_enabled } => view! {
                <div>
                    <p>
                        <span class="status-badge success">"Onboarding Complete"</span>
                    </p>
                    <div class="info-grid">
                        <InfoItem label="Account ID" value=account_id />
                        <InfoItem label="Payouts Enabled" value=payouts_enabled />
                        <InfoItem label="Charges Enabled" value=charges_enabled />
                    </div>
                </div>
            }
            .into_any(),
        };

        view! {
            <div>
                <BannerView banner=current.banner />

                <div class="card">
                    <div class="card-header">
                        <h2>"Stripe Connect Status"</h2>
                        <button class="btn btn-secondary" on:click=move |_| load()>
                            "🔄 Refresh Status"
                        </button>
                    </div>
                    {onboarding}
                </div>

                {current.balance.map(|balance| balance_card(balance, panels, amount_input, on_amount, withdraw))}
                {current.transactions.map(transactions_card)}
                {current.withdrawals.map(withdrawals_card)}
            </div>
        }
        .into_any()
    }
}

fn balance_card(
    balance: BalancePanel,
    panels: Memo<DeveloperPanels>,
    amount_input: RwSignal<String>,
    on_amount: impl Fn(leptos::ev::Event) + 'static,
    withdraw: impl Fn(leptos::ev::MouseEvent) + 'static,
) -> impl IntoView {
    let live_form = move || {
        panels.with(|p| {
            p.balance
                .as_ref()
                .and_then(|b| b.withdrawal.as_ref())
                .map(|f| (f.amount.clone(), f.enabled))
                .unwrap_or_default()
        })
    };

    let form = balance.withdrawal.map(|form| {
        view! {
            <div class="withdraw">
                <h3>"Request Withdrawal"</h3>
                <p class="muted">"Minimum withdrawal: "{form.minimum}</p>
                <div class="withdraw-row">
                    <div class="form-group">
                        <label for="withdrawAmount">"Amount (USD)"</label>
                        <input
                            id="withdrawAmount"
                            type="number"
                            min="50"
                            step="0.01"
                            prop:value=move || amount_input.get()
                            on:input=on_amount
                        />
                    </div>
                    <button
                        class="btn btn-primary"
                        disabled=move || !live_form().1
                        on:click=withdraw
                    >
                        "Withdraw "{move || live_form().0}
                    </button>
                </div>
            </div>
        }
    });

    view! {
        <div class="card">
            <h2>"Wallet Balance"</h2>
            <div class="info-grid">
                <InfoItem label="Current Balance" value=balance.balance />
                <InfoItem label="Total Earned" value=balance.total_earned />
                <InfoItem label="Total Withdrawn" value=balance.total_withdrawn />
                <InfoItem label="Pending Withdrawals" value=balance.pending_withdrawals />
            </div>
            {form}
        </div>
    }
}

fn transactions_card(rows: Vec<TransactionRow>) -> impl IntoView {
    view! {
        <div class="card">
            <h2>"Recent Transactions"</h2>
            <table>
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Function"</th>
                        <th>"User Org"</th>
                        <th>"Amount"</th>
                        <th>"Platform Fee"</th>
                        <th>"Net Amount"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| view! {
                            <tr>
                                <td>{row.date}</td>
                                <td>{row.function_name}</td>
                                <td class="mono">{row.user_organization}</td>
                                <td>{row.amount}</td>
                                <td>{row.platform_fee}</td>
                                <td class="success">{row.net_amount}</td>
                                <td><StatusBadge badge=row.status /></td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

fn withdrawals_card(rows: Vec<WithdrawalRow>) -> impl IntoView {
    view! {
        <div class="card">
            <h2>"Withdrawal History"</h2>
            <table>
                <thead>
                    <tr>
                        <th>"Requested"</th>
                        <th>"Amount"</th>
                        <th>"Status"</th>
                        <th>"Completed"</th>
                        <th>"Reason"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| view! {
                            <tr>
                                <td>{row.requested}</td>
                                <td>{row.amount}</td>
                                <td><StatusBadge badge=row.status /></td>
                                <td>{row.completed}</td>
                                <td>{row.reason}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
