//! User Dashboard

use connect_core::user::{
    DeveloperRow, DevelopersPanel, ReceiptPanel, fetch_connected_developers, submit_payment,
};
use connect_core::{Session, UserState};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::parse_amount;
use crate::api;
use crate::components::{BannerView, InfoItem};

#[component]
pub fn UserPage(session: Memo<Session>) -> impl IntoView {
    let state = RwSignal::new(UserState::new());
    let amount_input = RwSignal::new(state.with_untracked(|s| s.form.amount.to_string()));
    let panels = Memo::new(move |_| state.with(UserState::panels));

    let load_developers = move || {
        let session = session.get_untracked();
        if !session.has_token() {
            return;
        }
        state.update(UserState::begin_developers);
        spawn_local(async move {
            let outcome = fetch_connected_developers(&api::client(), &session).await;
            state.update(|s| s.finish_developers(outcome));
        });
    };

    // On mount and on every session change
    Effect::new(move |_| {
        session.track();
        load_developers();
    });

    let pay = move |_: leptos::ev::MouseEvent| {
        let session = session.get_untracked();
        let Some(form) = state.try_update(UserState::begin_payment) else {
            return;
        };
        spawn_local(async move {
            let outcome = submit_payment(&api::client(), &session, &form).await;
            if state.try_update(|s| s.finish_payment(outcome)).unwrap_or(false) {
                load_developers();
            }
        });
    };

    view! {
        <div>
            <div class="card">
                <h2>"Execute Function & Pay Developer"</h2>
                <p class="muted">
                    "When you execute a function, the amount is deducted from your wallet balance and transferred to the developer's wallet."
                </p>

                {move || view! { <BannerView banner=panels.with(|p| p.banner.clone()) /> }}

                <div class="form-group">
                    <label for="functionId">"Function ID"</label>
                    <input
                        id="functionId"
                        type="text"
                        placeholder="Enter function ID"
                        prop:value=move || state.with(|s| s.form.function_id.clone())
                        on:input=move |ev| state.update(|s| s.form.function_id = event_target_value(&ev))
                    />
                    <small>"This is a test function ID. In production, this would come from your function catalog."</small>
                </div>

                <div class="form-group">
                    <label for="version">"Function Version"</label>
                    <input
                        id="version"
                        type="text"
                        placeholder="e.g., v1.0.0"
                        prop:value=move || state.with(|s| s.form.version.clone())
                        on:input=move |ev| state.update(|s| s.form.version = event_target_value(&ev))
                    />
                    <small>"The version of the function to execute. Default: v1.0.0"</small>
                </div>

                <div class="form-group">
                    <label for="developerOrgId">"Developer Organization ID"</label>
                    <input
                        id="developerOrgId"
                        type="text"
                        placeholder="Enter developer organization ID"
                        prop:value=move || state.with(|s| s.form.developer_organization_id.clone())
                        on:input=move |ev| {
                            state.update(|s| s.form.developer_organization_id = event_target_value(&ev));
                        }
                    />
                    <small>"The organization ID of the developer who owns the function."</small>
                </div>

                <div class="form-group">
                    <label for="amount">"Amount (USD)"</label>
                    <input
                        id="amount"
                        type="number"
                        min="0.01"
                        step="0.01"
                        prop:value=move || amount_input.get()
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            state.update(|s| s.form.amount = parse_amount(&raw));
                            amount_input.set(raw);
                        }
                    />
                    <small>"This would typically be the function's price per API request."</small>
                </div>

                <button
                    class="btn btn-primary"
                    disabled=move || !panels.with(|p| p.submit_enabled)
                    on:click=pay
                >
                    {move || panels.with(|p| p.submit_label.clone())}
                </button>
            </div>

            {move || panels.with(|p| p.receipt.clone()).map(receipt_card)}

            <div class="card">
                <h2>"Connected Developers"</h2>
                <p class="muted">"Developers you have paid for function executions"</p>
                {move || match panels.with(|p| p.developers.clone()) {
                    DevelopersPanel::Loading => {
                        view! { <div class="empty">"Loading..."</div> }.into_any()
                    }
                    DevelopersPanel::Empty => {
                        view! {
                            <div class="empty">
                                "No connected developers yet. Execute a function to see developers here."
                            </div>
                        }
                        .into_any()
                    }
                    DevelopersPanel::Rows(rows) => developers_table(rows).into_any(),
                }}
            </div>

            <div class="card">
                <h2>"How It Works"</h2>
                <ol>
                    <li><strong>"User Tops Up Wallet"</strong>" - Users add funds to their account balance via Stripe Payment Intent"</li>
                    <li><strong>"Execute Function"</strong>" - User executes a function and the price is deducted from their balance"</li>
                    <li><strong>"Developer Gets Paid"</strong>" - The amount (minus platform fee) is added to the developer's wallet"</li>
                    <li><strong>"Developer Withdraws"</strong>" - When balance reaches $50+, developer can withdraw to their bank account via Stripe Connect"</li>
                </ol>
            </div>

            <div class="card">
                <h2>"Testing Notes"</h2>
                <div class="alert alert-info">
                    <strong>"Before testing function execution:"</strong>
                    <ol>
                        <li>"Make sure you have a user account with sufficient balance in the database"</li>
                        <li>"The developer organization must exist in the database"</li>
                        <li>"In production, the function_id would reference an actual function in your functions table"</li>
                    </ol>
                </div>
            </div>
        </div>
    }
}

fn receipt_card(receipt: ReceiptPanel) -> impl IntoView {
    view! {
        <div class="card">
            <h2>"Transaction Details"</h2>
            <div class="info-grid">
                <InfoItem label="Transaction ID" value=receipt.transaction_id />
                <InfoItem label="Amount Paid" value=receipt.amount />
                <InfoItem label="Platform Fee" value=receipt.platform_fee />
                <InfoItem label="Developer Receives" value=receipt.net_amount />
                <InfoItem label="Your New Balance" value=receipt.user_balance />
                <InfoItem label="Developer Balance" value=receipt.developer_balance />
            </div>
        </div>
    }
}

fn developers_table(rows: Vec<DeveloperRow>) -> impl IntoView {
    view! {
        <table>
            <thead>
                <tr>
                    <th>"Developer Org ID"</th>
                    <th>"Status"</th>
                    <th>"Balance"</th>
                    <th>"Total Earned"</th>
                    <th>"Connected Since"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| view! {
                        <tr>
                            <td class="mono">{row.organization_id}</td>
                            <td>
                                {if row.onboarded {
                                    view! { <span class="success">"✓ Onboarded"</span> }.into_any()
                                } else {
                                    view! { <span class="warning">"⚠ Pending"</span> }.into_any()
                                }}
                            </td>
                            <td><strong>{row.balance}</strong></td>
                            <td class="success">{row.total_earned}</td>
                            <td class="muted">{row.joined_at}</td>
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
