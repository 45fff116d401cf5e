//! Model Catalog Component
//!
//! Read-only view of the models the backend exposes. Entries are shown as
//! they come; a click opens the raw record.

use aichat_shared::{ListState, ModelEntry};
use chrono::Local;
use leptos::*;

use crate::components::common::{EmptyState, ErrorBanner, Modal, ModelIcon, RefreshIcon, Spinner};
use crate::state::AppState;

#[component]
pub fn ModelsPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let client = store_value(app_state.client.clone());

    let models = create_rw_signal(ListState::<ModelEntry>::default());
    let (object, set_object) = create_signal(Option::<String>::None);
    let selected = create_rw_signal(Option::<ModelEntry>::None);

    let load = move || {
        models.update(ListState::begin_load);
        spawn_local(async move {
            let client = client.get_value();
            let result = client.list_models().await.map(|listing| {
                set_object.set(listing.object);
                listing.data
            });
            if let Err(e) = &result {
                tracing::warn!("Failed to load models: {}", e);
                set_object.set(None);
            }
            models.update(|state| state.finish(result));
        });
    };

    create_effect(move |_| load());

    let loading = move || models.with(ListState::is_loading);

    view! {
        <div class="flex-1 overflow-auto p-6 bg-slate-900">
            <div class="max-w-7xl mx-auto">
                <div class="flex items-center justify-between mb-6">
                    <div>
                        <h1 class="text-2xl font-bold text-white">"Models"</h1>
                        <p class="text-slate-400 mt-1">"Models available through the configured channels"</p>
                    </div>

                    <button
                        class="flex items-center gap-2 px-4 py-2 bg-slate-700 hover:bg-slate-600 disabled:opacity-50 \
                               text-white rounded-lg transition-colors"
                        disabled=loading
                        on:click=move |_| load()
                    >
                        <RefreshIcon class="w-4 h-4" />
                        {move || if loading() { "Refreshing..." } else { "Refresh" }}
                    </button>
                </div>

                {move || models.with(|s| s.error().map(str::to_string)).map(|message| view! {
                    <ErrorBanner message=message on_retry=move |_| load() />
                })}

                <Show when=move || !loading() fallback=|| view! { <Spinner /> }>
                    {move || {
                        let items = models.with(|s| s.items().to_vec());
                        if items.is_empty() {
                            return view! {
                                <EmptyState title="No models available" hint="Check that the backend has enabled channels" />
                            }.into_view();
                        }

                        view! {
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-4 mb-6">
                                <StatCard label="Total models" value=items.len().to_string() />
                                {object.get().map(|object| view! { <StatCard label="Object type" value=object /> })}
                            </div>

                            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                                {items.into_iter().map(|model| view! {
                                    <ModelCard model=model on_open=move |m: ModelEntry| selected.set(Some(m)) />
                                }).collect::<Vec<_>>()}
                            </div>
                        }.into_view()
                    }}
                </Show>

                {move || selected.get().map(|model| view! {
                    <ModelDetailModal model=model on_close=move || selected.set(None) />
                })}
            </div>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="bg-slate-800 rounded-xl border border-slate-700 p-4">
            <div class="text-xs text-slate-400 uppercase tracking-wider">{label}</div>
            <div class="text-2xl font-bold text-white mt-1">{value}</div>
        </div>
    }
}

#[component]
fn ModelCard(
    model: ModelEntry,
    on_open: impl Fn(ModelEntry) + 'static,
) -> impl IntoView {
    let id = model.id.clone();
    let provider = model.provider().to_string();
    let description = model.description.clone().filter(|d| !d.is_empty());

    view! {
        <button
            class="text-left bg-slate-800 rounded-xl border border-slate-700 p-4 hover:border-blue-500/50 \
                   hover:bg-slate-700/30 transition-colors"
            on:click=move |_| on_open(model.clone())
        >
            <div class="flex items-start justify-between gap-3 mb-2">
                <div class="flex items-center gap-2 min-w-0">
                    <ModelIcon class="w-4 h-4 text-purple-400 flex-shrink-0" />
                    <h3 class="text-sm font-semibold text-white truncate">{id.clone()}</h3>
                </div>
                <span class="px-2 py-0.5 rounded-full text-xs bg-blue-500/10 text-blue-400 flex-shrink-0">
                    {provider}
                </span>
            </div>
            {description.map(|d| view! { <p class="text-sm text-slate-400 line-clamp-2 mb-2">{d}</p> })}
            <div class="text-xs text-slate-500 font-mono truncate" title=id.clone()>"ID: "{id}</div>
        </button>
    }
}

#[component]
fn ModelDetailModal(
    model: ModelEntry,
    on_close: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let created = model
        .created_at()
        .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string());

    view! {
        <Modal title="Model Details".to_string() on_close=on_close width="max-w-2xl">
            <div class="space-y-6">
                <dl class="grid grid-cols-2 gap-4">
                    <Detail label="Model ID" value=model.id.clone() />
                    <Detail label="Owner" value=model.owned_by.clone().unwrap_or_else(|| "N/A".to_string()) />
                    {created.map(|at| view! { <Detail label="Created" value=at /> })}
                    {model.object.clone().map(|object| view! { <Detail label="Object type" value=object /> })}
                </dl>

                {model.description.clone().filter(|d| !d.is_empty()).map(|d| view! {
                    <div>
                        <h3 class="text-sm font-medium text-slate-300 mb-1">"Description"</h3>
                        <p class="text-sm text-slate-400">{d}</p>
                    </div>
                })}

                <div>
                    <h3 class="text-sm font-medium text-slate-300 mb-1">"Raw data"</h3>
                    <pre class="text-xs text-slate-300 font-mono bg-slate-900 rounded-lg p-4 overflow-auto max-h-80">
                        {model.to_pretty_json()}
                    </pre>
                </div>
            </div>
        </Modal>
    }
}

#[component]
fn Detail(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <dt class="text-xs text-slate-500 uppercase tracking-wider">{label}</dt>
            <dd class="text-sm text-white mt-0.5 break-all">{value}</dd>
        </div>
    }
}
