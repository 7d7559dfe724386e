//! API Client

use connect_runtime::HttpConnectApi;

/// Origin the console was served from
pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

/// Client for the forwarded API on the serving origin
pub fn client() -> HttpConnectApi {
    HttpConnectApi::for_origin(&origin())
}

/// Open the hosted onboarding page in a new tab
pub fn open_in_new_tab(url: &str) {
    let opened = web_sys::window().and_then(|w| w.open_with_url_and_target(url, "_blank").ok().flatten());
    if opened.is_none() {
        tracing::warn!("could not open {}", url);
    }
}
