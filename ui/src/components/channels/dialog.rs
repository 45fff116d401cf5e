//! Add-channel dialog

use aichat_shared::{ChannelForm, ChannelType, FormState};
use leptos::*;

use crate::components::common::{CheckboxField, Modal, TextField, INPUT_CLASS};

#[component]
pub fn AddChannelDialog(
    dialog: RwSignal<FormState<ChannelForm>>,
    on_submit: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let field = move |read: fn(&ChannelForm) -> String| {
        Signal::derive(move || dialog.with(|d| read(&d.fields)))
    };
    let edit = move |write: fn(&mut ChannelForm, String)| {
        move |value: String| dialog.update(|d| write(&mut d.fields, value))
    };
    let submitting = move || dialog.with(|d| d.submitting);

    view! {
        <Modal title="Add Channel".to_string() on_close=move || dialog.update(FormState::close)>
            <form
                class="space-y-4"
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    on_submit();
                }
            >
                {move || dialog.with(|d| d.error.clone()).map(|err| view! {
                    <div class="bg-red-500/10 border border-red-500/30 rounded-lg p-3">
                        <p class="text-sm text-red-400">{err}</p>
                    </div>
                })}

                <TextField
                    label="Channel Name"
                    required=true
                    placeholder="e.g. openai-channel-1"
                    value=field(|f| f.channelname.clone())
                    on_input=edit(|f, v| f.channelname = v)
                />

                <div class="space-y-1">
                    <label class="block text-sm font-medium text-slate-300">
                        "Channel Type"<span class="text-red-400">" *"</span>
                    </label>
                    <select
                        class=INPUT_CLASS
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            dialog.update(|d| d.fields.channeltype = ChannelType::parse(&value));
                        }
                    >
                        {ChannelType::SELECTABLE.into_iter().map(|kind| {
                            let value = kind.as_str().to_string();
                            let label = kind.label().to_string();
                            view! {
                                <option
                                    value=value
                                    selected=move || dialog.with(|d| d.fields.channeltype == kind)
                                >
                                    {label}
                                </option>
                            }
                        }).collect::<Vec<_>>()}
                    </select>
                </div>

                <TextField
                    label="Channel URL"
                    placeholder="e.g. https://api.openai.com/v1"
                    value=field(|f| f.channelurl.clone())
                    on_input=edit(|f, v| f.channelurl = v)
                />
                <TextField
                    label="API Key"
                    input_type="password"
                    placeholder="Upstream API key"
                    value=field(|f| f.channelkey.clone())
                    on_input=edit(|f, v| f.channelkey = v)
                />

                <div class="grid grid-cols-3 gap-4">
                    <TextField
                        label="Max Concurrency"
                        input_type="number"
                        value=field(|f| f.maxconcurrent.to_string())
                        on_input=edit(|f, v| f.set_maxconcurrent(&v))
                    />
                    <TextField
                        label="Timeout (s)"
                        input_type="number"
                        value=field(|f| f.timeout.to_string())
                        on_input=edit(|f, v| f.set_timeout(&v))
                    />
                    <TextField
                        label="Priority"
                        input_type="number"
                        value=field(|f| f.priority.to_string())
                        on_input=edit(|f, v| f.set_priority(&v))
                    />
                </div>

                <div class="space-y-1">
                    <label class="block text-sm font-medium text-slate-300">"Description"</label>
                    <textarea
                        class=INPUT_CLASS
                        rows="3"
                        placeholder="Optional"
                        prop:value=move || dialog.with(|d| d.fields.description.clone())
                        on:input=move |ev| dialog.update(|d| d.fields.description = event_target_value(&ev))
                    />
                </div>

                <CheckboxField
                    label="Enabled"
                    checked=Signal::derive(move || dialog.with(|d| d.fields.channelstatus))
                    on_change=move |checked: bool| dialog.update(|d| d.fields.channelstatus = checked)
                />

                <div class="flex justify-end gap-3 pt-2">
                    <button
                        type="button"
                        class="px-4 py-2 text-slate-300 hover:text-white hover:bg-slate-700 rounded-lg transition-colors"
                        on:click=move |_| dialog.update(FormState::close)
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        class="px-4 py-2 bg-blue-500 hover:bg-blue-600 disabled:opacity-50 disabled:cursor-not-allowed \
                               text-white font-medium rounded-lg transition-colors"
                        disabled=submitting
                    >
                        {move || if submitting() { "Adding..." } else { "Add" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
