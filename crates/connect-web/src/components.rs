//! UI Components

use connect_core::format::Badge;
use connect_core::status::Banner;
use leptos::prelude::*;

/// Error / success alert
#[component]
pub fn BannerView(banner: Option<Banner>) -> impl IntoView {
    banner.map(|banner| {
        view! {
            <div class=banner.class()>{banner.message().to_string()}</div>
        }
    })
}

/// Label over a value, used in the status and balance cards
#[component]
pub fn InfoItem(#[prop(into)] label: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="info-item">
            <span class="info-label">{label}</span>
            <span class="info-value">{value}</span>
        </div>
    }
}

#[component]
pub fn StatusBadge(badge: Badge) -> impl IntoView {
    view! { <span class=badge.tier.class()>{badge.label}</span> }
}
