//! App Shell Component
//!
//! Main layout container: tab bar on top, the routed screen in the middle,
//! status bar at the bottom. Holds no business state.

use leptos::*;

use super::{MainTabs, StatusBar};

/// Main application shell layout
#[component]
pub fn AppShell(
    /// Main content (routes)
    children: Children,
) -> impl IntoView {
    view! {
        <div class="h-screen flex flex-col bg-slate-900 text-white overflow-hidden">
            <MainTabs />

            <main class="flex-1 overflow-hidden flex flex-col min-w-0">
                <div class="flex-1 overflow-auto">
                    {children()}
                </div>
            </main>

            <StatusBar />
        </div>
    }
}
