//! # widget
//!
//! Leptos + WASM cookie-consent widget for the marketing site.
//!
//! This crate renders the banner and preferences modal driven by the
//! `consent` core, backs it with cookie and `localStorage` tiers, and mirrors
//! consent signals to DOM events for third-party scripts. It also carries the
//! site's small page glue (theme toggle, section switching).

pub mod app;
pub mod components;
pub mod state;
pub mod storage;
pub mod util;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
