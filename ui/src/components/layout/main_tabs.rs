//! Main Navigation Tabs Component
//!
//! Horizontal tabs switching between the four console screens.

use leptos::*;
use leptos_router::*;

use crate::components::common::{ChannelIcon, KeyIcon, ModelIcon, SettingsIcon};
use crate::state::AppState;

/// Main navigation tabs at the top of the app
#[component]
pub fn MainTabs() -> impl IntoView {
    view! {
        <header class="bg-slate-800 border-b border-slate-700 flex-shrink-0">
            <div class="h-14 flex items-center px-4 gap-4">
                // Logo
                <A href="/accounts" class="flex items-center gap-2 text-white flex-shrink-0">
                    <div class="w-8 h-8 bg-gradient-to-br from-blue-500 to-purple-600 rounded-lg flex items-center justify-center">
                        <span class="text-white text-sm font-bold">"AI"</span>
                    </div>
                    <span class="text-lg font-bold">"API Console"</span>
                </A>

                <nav class="flex items-center gap-1 ml-6">
                    <MainTab href="/accounts" label="Accounts">
                        <KeyIcon class="w-4 h-4" />
                    </MainTab>
                    <MainTab href="/channels" label="Channels">
                        <ChannelIcon class="w-4 h-4" />
                    </MainTab>
                    <MainTab href="/models" label="Models">
                        <ModelIcon class="w-4 h-4" />
                    </MainTab>
                    <MainTab href="/settings" label="Settings">
                        <SettingsIcon class="w-4 h-4" />
                    </MainTab>
                </nav>

                <div class="flex items-center gap-3 ml-auto">
                    <BackendBadge />
                </div>
            </div>
        </header>
    }
}

/// Individual main tab; active when the path is `href` or below it
#[component]
fn MainTab(
    href: &'static str,
    label: &'static str,
    children: Children,
) -> impl IntoView {
    let location = use_location();

    view! {
        <A
            href=href
            class=move || {
                let pathname = location.pathname.get();
                let is_active = pathname == href || pathname.starts_with(&format!("{}/", href));

                let base = "flex items-center gap-2 px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if is_active {
                    format!("{} bg-blue-500 text-white", base)
                } else {
                    format!("{} text-slate-400 hover:text-white hover:bg-slate-700", base)
                }
            }
        >
            {children()}
            {label}
        </A>
    }
}

/// Address the running client talks to
#[component]
fn BackendBadge() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let label = app_state.address.to_string();

    view! {
        <A
            href="/settings"
            class="flex items-center gap-2 px-3 py-1.5 rounded-full text-xs font-medium bg-slate-900 text-slate-400 hover:text-white"
        >
            <div class="w-2 h-2 rounded-full bg-blue-400" />
            <span class="font-mono">{label}</span>
        </A>
    }
}
