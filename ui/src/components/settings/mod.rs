//! Backend Settings Component
//!
//! Edits the persisted backend address:
//! - Host/port form with a live URL preview
//! - Save with validation and a short "saved" notice
//! - Reset to the default address behind a confirmation
//! - Connection test against the model listing
//!
//! The running client keeps the address it was built with; a saved change
//! applies after a page reload.

use aichat_shared::{AddressForm, BackendAddress};
use leptos::*;

use crate::client::{self, CHECK_TIMEOUT};
use crate::components::common::{
    ConfirmModal, ErrorBanner, NoticeBanner, RefreshIcon, TextField, WarningIcon,
};
use crate::state::AppState;

/// How long the "saved" notice stays up
const SAVED_NOTICE_MS: u32 = 3_000;

/// Connection test progress
#[derive(Debug, Clone, PartialEq)]
enum TestState {
    Idle,
    Running,
    Passed,
    Failed(String),
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let state = store_value(app_state);

    let form = create_rw_signal(AddressForm::from(&state.with_value(|s| s.store.read())));
    let (error, set_error) = create_signal(Option::<String>::None);
    let (saved, set_saved) = create_signal(false);
    let (test, set_test) = create_signal(TestState::Idle);
    let (confirm_reset, set_confirm_reset) = create_signal(false);

    // Bumped on save/reset so the reload hint re-reads storage; also lets a
    // stale "saved" timer tell it was superseded
    let (revision, set_revision) = create_signal(0u32);

    let reload_pending = move || {
        let _ = revision.get();
        state.with_value(AppState::reload_pending)
    };

    let on_save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_saved.set(false);

        let address = match form.with_untracked(AddressForm::validate) {
            Ok(address) => address,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        if let Err(e) = state.with_value(|s| s.store.write(&address)) {
            tracing::warn!("Failed to save backend address: {}", e);
            set_error.set(Some(e.to_string()));
            return;
        }

        tracing::info!("Saved backend address {}", address);
        form.set(AddressForm::from(&address));
        set_saved.set(true);
        set_revision.update(|r| *r += 1);

        let shown_at = revision.get_untracked();
        gloo_timers::callback::Timeout::new(SAVED_NOTICE_MS, move || {
            if revision.get_untracked() == shown_at {
                set_saved.set(false);
            }
        })
        .forget();
    };

    let on_reset = move || {
        set_confirm_reset.set(false);
        set_saved.set(false);
        set_test.set(TestState::Idle);

        match state.with_value(|s| s.store.reset()) {
            Ok(()) => {
                set_error.set(None);
                form.set(AddressForm::from(&state.with_value(|s| s.store.read())));
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
        set_revision.update(|r| *r += 1);
    };

    // Tests what is typed, not what is saved
    let on_test = move |_| {
        let address = match form.with_untracked(AddressForm::validate) {
            Ok(address) => address,
            Err(e) => {
                set_test.set(TestState::Failed(e.to_string()));
                return;
            }
        };

        set_test.set(TestState::Running);
        spawn_local(async move {
            match client::check_connection(&address).await {
                Ok(()) => set_test.set(TestState::Passed),
                Err(e) => {
                    tracing::warn!("Connection test to {} failed: {}", address, e);
                    set_test.set(TestState::Failed(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="flex-1 overflow-auto p-6 bg-slate-900">
            <div class="max-w-3xl mx-auto">
                <div class="mb-6">
                    <h1 class="text-2xl font-bold text-white">"Backend"</h1>
                    <p class="text-slate-400 mt-1">"Address of the API server this console talks to"</p>
                </div>

                {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
                <Show when=move || saved.get()>
                    <NoticeBanner message="Settings saved".to_string() />
                </Show>

                <form class="bg-slate-800 rounded-xl border border-slate-700 p-6 space-y-4" on:submit=on_save>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <div class="md:col-span-2">
                            <TextField
                                label="Host"
                                placeholder="e.g. localhost or 192.168.1.100"
                                value=Signal::derive(move || form.with(|f| f.host.clone()))
                                on_input=move |v: String| form.update(|f| f.host = v)
                            />
                        </div>
                        <TextField
                            label="Port"
                            input_type="number"
                            placeholder="5555"
                            value=Signal::derive(move || form.with(|f| f.port.clone()))
                            on_input=move |v: String| form.update(|f| f.port = v)
                        />
                    </div>

                    <div class="bg-slate-900 rounded-lg px-4 py-3">
                        <span class="text-xs text-slate-500 uppercase tracking-wider">"Full address"</span>
                        <code class="block text-sm text-blue-300 font-mono mt-1">
                            {move || form.with(AddressForm::preview_url)}
                        </code>
                    </div>

                    <TestResult test=test />

                    <div class="flex flex-wrap justify-end gap-3 pt-2">
                        <button
                            type="button"
                            class="px-4 py-2 text-slate-300 hover:text-white hover:bg-slate-700 rounded-lg transition-colors"
                            on:click=move |_| set_confirm_reset.set(true)
                        >
                            "Reset to Default"
                        </button>
                        <button
                            type="button"
                            class="px-4 py-2 bg-slate-700 hover:bg-slate-600 disabled:opacity-50 text-white rounded-lg transition-colors"
                            disabled=move || test.get() == TestState::Running
                            on:click=on_test
                        >
                            {move || if test.get() == TestState::Running { "Testing..." } else { "Test Connection" }}
                        </button>
                        <button
                            type="submit"
                            class="px-4 py-2 bg-blue-500 hover:bg-blue-600 text-white font-medium rounded-lg transition-colors"
                        >
                            "Save"
                        </button>
                    </div>
                </form>

                <Show when=reload_pending>
                    <div class="flex items-center justify-between gap-4 mt-6 bg-amber-500/10 border border-amber-500/30 rounded-lg p-4">
                        <div class="flex items-center gap-3">
                            <WarningIcon class="w-5 h-5 text-amber-400 flex-shrink-0" />
                            <p class="text-sm text-amber-300">
                                "The console is still using "
                                <code class="font-mono">{state.with_value(|s| s.address.to_string())}</code>
                                ". Reload the page to apply the saved address."
                            </p>
                        </div>
                        <button
                            class="flex items-center gap-2 px-3 py-1.5 text-sm text-amber-200 hover:bg-amber-500/20 rounded-lg transition-colors"
                            on:click=move |_| reload_page()
                        >
                            <RefreshIcon class="w-4 h-4" />
                            "Reload"
                        </button>
                    </div>
                </Show>

                <div class="mt-6 text-sm text-slate-400 space-y-1">
                    <p>{format!("Default address: {}", BackendAddress::default())}</p>
                    <p>"The address is stored in this browser only."</p>
                    <p>{format!(
                        "Test Connection requests the model listing and gives up after {} seconds.",
                        CHECK_TIMEOUT.as_secs()
                    )}</p>
                </div>

                <Show when=move || confirm_reset.get()>
                    <ConfirmModal
                        title="Reset Settings".to_string()
                        message=format!("Reset the backend address to {}?", BackendAddress::default())
                        confirm_label="Reset"
                        busy=Signal::derive(|| false)
                        on_cancel=move || set_confirm_reset.set(false)
                        on_confirm=on_reset
                    />
                </Show>
            </div>
        </div>
    }
}

#[component]
fn TestResult(test: ReadSignal<TestState>) -> impl IntoView {
    move || match test.get() {
        TestState::Idle | TestState::Running => ().into_view(),
        TestState::Passed => view! {
            <p class="text-sm text-green-400">"Connection OK"</p>
        }
        .into_view(),
        TestState::Failed(reason) => view! {
            <p class="text-sm text-red-400">{format!("Connection test failed. {}", reason)}</p>
        }
        .into_view(),
    }
}

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            tracing::warn!("Failed to reload the page: {:?}", e);
        }
    }
}
