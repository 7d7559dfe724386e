//! connect-console Web Frontend
//!
//! Leptos-based WASM frontend. All state transitions live in
//! `connect-core`; the components here only bind signals to them.

mod api;
mod app;
mod components;
mod logging;
mod pages;
mod storage;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount::mount_to_body(App);
}
