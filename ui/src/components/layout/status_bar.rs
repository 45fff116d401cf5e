//! Status Bar Component

use leptos::*;

use crate::state::AppState;

/// Status bar at the bottom of the screen
#[component]
pub fn StatusBar() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let base_url = app_state.address.base_url();

    view! {
        <footer class="h-6 flex items-center justify-between px-3 bg-slate-900 border-t border-slate-800 text-xs text-slate-500 flex-shrink-0">
            <div class="flex items-center gap-1.5">
                <span class="text-slate-400">"Backend:"</span>
                <span class="font-mono">{base_url}</span>
            </div>

            <span>{concat!("AI API Console v", env!("CARGO_PKG_VERSION"))}</span>
        </footer>
    }
}
