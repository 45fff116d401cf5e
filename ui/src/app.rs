//! Root Application Component
//!
//! This module contains the main App component that sets up:
//! - Routing for the four console tabs
//! - Global state provider (backend address and client)
//! - Layout structure with AppShell

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::accounts::AccountsPage;
use crate::components::channels::ChannelsPage;
use crate::components::layout::AppShell;
use crate::components::models::ModelsPage;
use crate::components::settings::SettingsPage;
use crate::state::AppState;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Resolve the backend address once; screens share the client
    provide_context(AppState::new());

    view! {
        <Title text="AI API Console" />
        <Router>
            <AppShell>
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path="/accounts" /> } />
                    <Route path="/accounts" view=AccountsPage />
                    <Route path="/channels" view=ChannelsPage />
                    <Route path="/models" view=ModelsPage />
                    <Route path="/settings" view=SettingsPage />

                    // Catch-all for 404
                    <Route path="/*any" view=NotFoundPage />
                </Routes>
            </AppShell>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex-1 flex items-center justify-center p-6">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-slate-600 mb-4">"404"</h1>
                <p class="text-xl text-slate-400 mb-6">"Page not found"</p>
                <A href="/accounts" class="px-4 py-2 bg-blue-500 hover:bg-blue-600 text-white rounded-lg">
                    "Go to Accounts"
                </A>
            </div>
        </div>
    }
}
