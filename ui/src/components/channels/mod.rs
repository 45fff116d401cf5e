//! Channels Management Component
//!
//! Upstream provider endpoints:
//! - Channel table with per-row checkboxes and a select-all header
//! - Clickable status badge that asks the backend to flip the flag
//! - Add dialog
//! - Bulk and single delete behind confirmation modals
//!
//! Nothing is mutated locally: every successful call is followed by a
//! full reload of the list.

mod dialog;
mod table;

use aichat_shared::{
    first_succeeded, Channel, ChannelForm, ChannelStatusUpdate, FormState, ListState, Selection,
    Tally,
};
use leptos::*;

use crate::components::common::{
    ConfirmModal, ErrorBanner, NoticeBanner, PlusIcon, RefreshIcon, Spinner, TrashIcon,
};
use crate::state::AppState;
use dialog::AddChannelDialog;
use table::ChannelsTable;

/// What the open delete confirmation applies to
#[derive(Debug, Clone, PartialEq)]
enum DeleteTarget {
    Selected(Vec<i64>),
    Single { id: i64, name: String },
}

impl DeleteTarget {
    fn ids(&self) -> Vec<i64> {
        match self {
            DeleteTarget::Selected(ids) => ids.clone(),
            DeleteTarget::Single { id, .. } => vec![*id],
        }
    }

    fn prompt(&self) -> String {
        match self {
            DeleteTarget::Selected(ids) => format!("Delete {} selected channel(s)?", ids.len()),
            DeleteTarget::Single { name, .. } => format!("Delete channel \"{}\"?", name),
        }
    }
}

// ============================================================================
// Main Component
// ============================================================================

#[component]
pub fn ChannelsPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let client = store_value(app_state.client.clone());

    let channels = create_rw_signal(ListState::<Channel>::default());
    let selection = create_rw_signal(Selection::new());
    let dialog = create_rw_signal(FormState::<ChannelForm>::default());

    let (action_error, set_action_error) = create_signal(Option::<String>::None);
    let (notice, set_notice) = create_signal(Option::<String>::None);
    let deleting = create_rw_signal(Option::<DeleteTarget>::None);
    let (working, set_working) = create_signal(false);

    let busy = Signal::derive(move || {
        channels.with(ListState::is_loading) || dialog.with(|d| d.submitting) || working.get()
    });

    let load = move || {
        channels.update(ListState::begin_load);
        spawn_local(async move {
            let client = client.get_value();
            let result = client.list_channels().await;
            if let Err(e) = &result {
                tracing::warn!("Failed to load channels: {}", e);
            }
            channels.update(|state| state.finish(result));
        });
    };

    // Fetch data on mount
    create_effect(move |_| load());

    let on_refresh = move |_| {
        set_action_error.set(None);
        set_notice.set(None);
        load();
    };

    let on_toggle_status = move |channel: Channel| {
        let update = ChannelStatusUpdate::flip(&channel);
        set_working.set(true);
        set_action_error.set(None);

        spawn_local(async move {
            let client = client.get_value();
            match client.update_channel_status(&update).await {
                Ok(reply) if reply.status.is_success() => {
                    tracing::info!("Channel {} enabled={}", update.channelname, update.status);
                    load();
                }
                Ok(reply) => set_action_error.set(Some(format!(
                    "Failed to update status: {}",
                    reply.message.unwrap_or_else(|| "unknown error".to_string())
                ))),
                Err(e) => set_action_error.set(Some(format!("Failed to update status: {}", e))),
            }
            set_working.set(false);
        });
    };

    let on_add = move || {
        let request = match dialog.with_untracked(|d| d.fields.to_request()) {
            Ok(request) => request,
            Err(e) => {
                dialog.update(|d| d.fail(e.to_string()));
                return;
            }
        };

        dialog.update(FormState::begin_submit);
        set_notice.set(None);

        spawn_local(async move {
            let client = client.get_value();
            match client.add_channels(&[request]).await {
                Ok(results) if first_succeeded(&results) => {
                    let name = results[0]
                        .channelname
                        .clone()
                        .unwrap_or_else(|| "Channel".to_string());
                    set_notice.set(Some(format!("Channel \"{}\" added", name)));
                    dialog.update(FormState::succeed);
                    load();
                }
                Ok(results) => {
                    let reason = results
                        .first()
                        .and_then(|r| r.message.clone())
                        .unwrap_or_else(|| "Failed to add channel".to_string());
                    dialog.update(|d| d.fail(reason));
                }
                Err(e) => {
                    tracing::warn!("Add channel failed: {}", e);
                    dialog.update(|d| d.fail(e.to_string()));
                }
            }
        });
    };

    let on_confirm_delete = move || {
        let Some(target) = deleting.get_untracked() else {
            return;
        };
        set_working.set(true);
        set_action_error.set(None);
        set_notice.set(None);

        spawn_local(async move {
            let client = client.get_value();
            let ids = target.ids();
            match (client.delete_channels(&ids).await, &target) {
                (Ok(results), DeleteTarget::Selected(_)) => {
                    let tally = Tally::of(&results);
                    tracing::info!("Bulk delete: {}", tally);
                    set_notice.set(Some(format!(
                        "Deleted {} of {} channel(s)",
                        tally.succeeded, tally.total
                    )));
                    selection.update(Selection::clear);
                    load();
                }
                (Ok(results), DeleteTarget::Single { .. }) if first_succeeded(&results) => load(),
                (Ok(_), DeleteTarget::Single { .. }) => {
                    set_action_error.set(Some("Failed to delete channel".to_string()))
                }
                (Err(e), _) => {
                    tracing::warn!("Delete channels failed: {}", e);
                    set_action_error.set(Some(format!("Failed to delete: {}", e)));
                }
            }
            set_working.set(false);
            deleting.set(None);
        });
    };

    view! {
        <div class="flex-1 overflow-auto p-6 bg-slate-900">
            <div class="max-w-7xl mx-auto">
                // Header
                <div class="flex items-center justify-between mb-6">
                    <div>
                        <h1 class="text-2xl font-bold text-white">"Channels"</h1>
                        <p class="text-slate-400 mt-1">"Upstream provider endpoints and their limits"</p>
                    </div>

                    <div class="flex items-center gap-3">
                        <button
                            class="flex items-center gap-2 px-4 py-2 bg-red-500/10 hover:bg-red-500/20 text-red-400 \
                                   disabled:opacity-50 disabled:cursor-not-allowed rounded-lg transition-colors"
                            disabled=move || busy.get() || selection.with(Selection::is_empty)
                            on:click=move |_| {
                                let ids = selection.with_untracked(Selection::ids);
                                deleting.set(Some(DeleteTarget::Selected(ids)));
                            }
                        >
                            <TrashIcon class="w-4 h-4" />
                            {move || format!("Delete Selected ({})", selection.with(Selection::len))}
                        </button>
                        <button
                            class="flex items-center gap-2 px-4 py-2 bg-slate-700 hover:bg-slate-600 disabled:opacity-50 \
                                   text-white rounded-lg transition-colors"
                            disabled=move || busy.get()
                            on:click=on_refresh
                        >
                            <RefreshIcon class="w-4 h-4" />
                            "Refresh"
                        </button>
                        <button
                            class="flex items-center gap-2 px-4 py-2 bg-blue-500 hover:bg-blue-600 disabled:opacity-50 \
                                   text-white font-medium rounded-lg transition-colors"
                            disabled=move || busy.get()
                            on:click=move |_| dialog.update(FormState::open)
                        >
                            <PlusIcon class="w-4 h-4" />
                            "Add Channel"
                        </button>
                    </div>
                </div>

                {move || notice.get().map(|message| view! { <NoticeBanner message=message /> })}
                {move || action_error.get().map(|message| view! { <ErrorBanner message=message /> })}
                {move || channels.with(|s| s.error().map(str::to_string)).map(|message| view! {
                    <ErrorBanner message=message on_retry=move |_| load() />
                })}

                <Show
                    when=move || !channels.with(ListState::is_loading)
                    fallback=|| view! { <Spinner /> }
                >
                    <ChannelsTable
                        channels=channels
                        selection=selection
                        busy=busy
                        on_toggle_status=on_toggle_status
                        on_delete=move |channel: Channel| deleting.set(Some(DeleteTarget::Single {
                            id: channel.id,
                            name: channel.channelname,
                        }))
                    />
                </Show>

                <Show when=move || dialog.with(|d| d.open)>
                    <AddChannelDialog dialog=dialog on_submit=on_add />
                </Show>

                {move || deleting.get().map(|target| view! {
                    <ConfirmModal
                        title="Delete Channels".to_string()
                        message=target.prompt()
                        busy=working
                        on_cancel=move || deleting.set(None)
                        on_confirm=on_confirm_delete
                    />
                })}
            </div>
        </div>
    }
}
