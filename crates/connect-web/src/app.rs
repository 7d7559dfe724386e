//! Main App Component

use connect_core::{ShellState, Tab};
use leptos::prelude::*;

use crate::pages::{DeveloperPage, UserPage};
use crate::storage::LocalStorageTokenStore;

/// Root application component: token, organization and tab selection
#[component]
pub fn App() -> impl IntoView {
    let shell = RwSignal::new(ShellState::restore(&LocalStorageTokenStore::new()));

    // Views reload when either half of the session changes
    let session = Memo::new(move |_| shell.with(ShellState::session));
    let active_tab = Memo::new(move |_| shell.with(|s| s.active_tab));

    let on_token = move |ev: leptos::ev::Event| {
        let token = event_target_value(&ev);
        shell.update(|s| {
            if let Err(e) = s.set_token(token, &LocalStorageTokenStore::new()) {
                tracing::warn!(error = %e, "token not persisted");
            }
        });
    };

    view! {
        <div class="container">
            <h1>"🎯 Stripe Connect Marketplace - Testing Dashboard"</h1>
            <p class="subtitle">
                "Test the complete Stripe Connect Express integration for your Function Marketplace"
            </p>

            <div class="card card-auth">
                <h3>"⚠️ Authentication Required"</h3>
                <div class="form-group">
                    <label for="jwtToken">"JWT Token:"</label>
                    <input
                        id="jwtToken"
                        type="password"
                        class="mono"
                        placeholder="Paste your JWT Bearer token here"
                        prop:value=move || shell.with(|s| s.token.clone())
                        on:input=on_token
                    />
                    <small>"This token is stored in localStorage."</small>
                </div>
                <Show when=move || shell.with(ShellState::needs_token)>
                    <div class="alert alert-error">
                        "❌ "<strong>"Missing JWT Token:"</strong>
                        " You must provide a valid JWT token to use this dashboard."
                    </div>
                </Show>
            </div>

            <div class="org-selector">
                <label for="orgId">"Organization ID (for testing):"</label>
                <input
                    id="orgId"
                    type="text"
                    placeholder="Enter your organization ID"
                    prop:value=move || shell.with(|s| s.organization_id.clone())
                    on:input=move |ev| shell.update(|s| s.set_organization_id(event_target_value(&ev)))
                />
            </div>

            <div class="tabs">
                {Tab::all()
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                class=move || {
                                    if active_tab.get() == tab { "tab active" } else { "tab" }
                                }
                                on:click=move |_| shell.update(|s| s.select(tab))
                            >
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            {move || match active_tab.get() {
                Tab::Developer => view! { <DeveloperPage session=session /> }.into_any(),
                Tab::User => view! { <UserPage session=session /> }.into_any(),
            }}
        </div>
    }
}
