//! # chatbot-widget
//!
//! Leptos + WASM binding for the chat widget. The controller, wire types
//! and routing rules live in the `chat` crate; this crate adds the
//! `<ChatWidget/>` component, the `fetch` transport and the page entry
//! point.

pub mod app;
pub mod components;
pub mod config;
pub mod net;

/// WASM entry point: install the panic hook and console logger, then mount
/// the demo page.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("chatbot widget loaded (endpoint: {})", config::API_URL);
    leptos::mount::mount_to_body(app::App);
}
