//! AI Chat Admin Console Entry Point
//!
//! This is the main entry point for the console WASM application.
//! It initializes logging and mounts the Leptos app to the DOM.

use aichat_console_ui::App;
use leptos::*;
use tracing_wasm::WASMLayerConfigBuilder;

fn main() {
    console_error_panic_hook::set_once();

    // Initialize WASM tracing
    let config = WASMLayerConfigBuilder::default()
        .set_max_level(tracing::Level::DEBUG)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);

    tracing::info!("Starting AI Chat admin console");

    // Mount the app
    mount_to_body(|| view! { <App /> });
}
