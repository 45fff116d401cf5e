//! Channel table with selection checkboxes

use aichat_shared::{Channel, ListState, Selection};
use leptos::*;

use crate::components::common::{ChannelIcon, EmptyState, TrashIcon};

const TH: &str = "px-4 py-3 text-left text-xs font-medium text-slate-400 uppercase tracking-wider";
const TD: &str = "px-4 py-3 whitespace-nowrap text-sm text-slate-300";

#[component]
pub fn ChannelsTable(
    channels: RwSignal<ListState<Channel>>,
    selection: RwSignal<Selection>,
    #[prop(into)] busy: Signal<bool>,
    on_toggle_status: impl Fn(Channel) + Clone + 'static,
    on_delete: impl Fn(Channel) + Clone + 'static,
) -> impl IntoView {
    let all_ids = move || channels.with(|s| s.items().iter().map(|c| c.id).collect::<Vec<_>>());

    view! {
        <div class="bg-slate-800 rounded-xl border border-slate-700 overflow-hidden">
            {move || {
                let items = channels.with(|s| s.items().to_vec());

                if items.is_empty() {
                    return view! {
                        <EmptyState title="No channels" hint="Add a channel to connect an upstream provider" />
                    }.into_view();
                }

                let on_toggle_status = on_toggle_status.clone();
                let on_delete = on_delete.clone();

                view! {
                    <div class="overflow-x-auto">
                        <table class="w-full">
                            <thead class="bg-slate-800/50 border-b border-slate-700">
                                <tr>
                                    <th class="px-4 py-3 w-10">
                                        <input
                                            type="checkbox"
                                            class="w-4 h-4 rounded border-slate-600 bg-slate-900"
                                            prop:checked=move || {
                                                let ids = all_ids();
                                                selection.with(|s| s.covers(&ids))
                                            }
                                            on:change=move |_| {
                                                let ids = all_ids();
                                                selection.update(|s| s.toggle_all(&ids));
                                            }
                                        />
                                    </th>
                                    <th class=TH>"ID"</th>
                                    <th class=TH>"Name"</th>
                                    <th class=TH>"Type"</th>
                                    <th class=TH>"URL"</th>
                                    <th class=TH>"Status"</th>
                                    <th class=TH>"Concurrency"</th>
                                    <th class=TH>"Timeout (s)"</th>
                                    <th class=TH>"Priority"</th>
                                    <th class=TH>"Description"</th>
                                    <th class=TH>"Created"</th>
                                    <th class=TH>"Updated"</th>
                                    <th class="px-4 py-3 text-right text-xs font-medium text-slate-400 uppercase tracking-wider">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-slate-700">
                                {items.into_iter().map(|channel| {
                                    let id = channel.id;
                                    let on_toggle_status = on_toggle_status.clone();
                                    let on_delete = on_delete.clone();
                                    let toggle_target = channel.clone();
                                    let delete_target = channel.clone();

                                    view! {
                                        <tr class=move || {
                                            if selection.with(|s| s.contains(id)) {
                                                "bg-blue-500/5 transition-colors"
                                            } else {
                                                "hover:bg-slate-700/30 transition-colors"
                                            }
                                        }>
                                            <td class="px-4 py-3">
                                                <input
                                                    type="checkbox"
                                                    class="w-4 h-4 rounded border-slate-600 bg-slate-900"
                                                    prop:checked=move || selection.with(|s| s.contains(id))
                                                    on:change=move |_| selection.update(|s| s.toggle(id))
                                                />
                                            </td>
                                            <td class=TD>{id}</td>
                                            <td class="px-4 py-3 whitespace-nowrap">
                                                <div class="flex items-center gap-2">
                                                    <ChannelIcon class="w-4 h-4 text-blue-400" />
                                                    <span class="text-sm font-medium text-white">{channel.channelname.clone()}</span>
                                                </div>
                                            </td>
                                            <td class=TD>{channel.channeltype.label().to_string()}</td>
                                            <td class="px-4 py-3 text-sm text-slate-400 font-mono max-w-xs truncate" title=channel.channelurl.clone()>
                                                {or_dash(&channel.channelurl)}
                                            </td>
                                            <td class="px-4 py-3 whitespace-nowrap">
                                                <StatusToggle
                                                    enabled=channel.channelstatus
                                                    busy=busy
                                                    on_click=move || on_toggle_status(toggle_target.clone())
                                                />
                                            </td>
                                            <td class=TD>{channel.maxconcurrent}</td>
                                            <td class=TD>{channel.timeout}</td>
                                            <td class=TD>{channel.priority}</td>
                                            <td class="px-4 py-3 text-sm text-slate-400 max-w-xs truncate" title=channel.description.clone()>
                                                {or_dash(&channel.description)}
                                            </td>
                                            <td class=TD>{or_dash(&channel.createtime)}</td>
                                            <td class=TD>{or_dash(&channel.updatetime)}</td>
                                            <td class="px-4 py-3 whitespace-nowrap text-right">
                                                <button
                                                    class="p-2 text-slate-400 hover:text-red-400 hover:bg-red-500/10 disabled:opacity-50 rounded-lg transition-colors"
                                                    title="Delete channel"
                                                    disabled=move || busy.get()
                                                    on:click=move |_| on_delete(delete_target.clone())
                                                >
                                                    <TrashIcon class="w-4 h-4" />
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    </div>
                }.into_view()
            }}
        </div>
    }
}

/// Status badge that doubles as the toggle button
#[component]
fn StatusToggle(
    enabled: bool,
    #[prop(into)] busy: Signal<bool>,
    on_click: impl Fn() + 'static,
) -> impl IntoView {
    let (class, label) = if enabled {
        ("bg-green-500/20 text-green-400 border-green-500/30 hover:bg-green-500/30", "Enabled")
    } else {
        ("bg-slate-500/20 text-slate-400 border-slate-500/30 hover:bg-slate-500/30", "Disabled")
    };

    view! {
        <button
            class=format!(
                "inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium border transition-colors disabled:opacity-50 {}",
                class
            )
            title="Click to toggle"
            disabled=move || busy.get()
            on:click=move |_| on_click()
        >
            {label}
        </button>
    }
}

fn or_dash(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}
