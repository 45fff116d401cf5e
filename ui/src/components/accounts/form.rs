//! Inline add-account form

use aichat_shared::{AccountForm, Channel, FormState};
use leptos::*;

use crate::components::common::{CheckboxField, TextField, INPUT_CLASS};

/// Fields are edited in place on `form`; `on_submit` validates and sends
#[component]
pub fn AddAccountForm(
    form: RwSignal<FormState<AccountForm>>,
    channels: RwSignal<Vec<Channel>>,
    on_submit: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let field = move |read: fn(&AccountForm) -> String| {
        Signal::derive(move || form.with(|f| read(&f.fields)))
    };
    let edit = move |write: fn(&mut AccountForm, String)| {
        move |value: String| form.update(|f| write(&mut f.fields, value))
    };

    view! {
        <form
            class="bg-slate-800 rounded-xl border border-slate-700 p-6 mb-6 space-y-4"
            on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                on_submit();
            }
        >
            <h2 class="text-lg font-semibold text-white">"Add Account"</h2>

            {move || form.with(|f| f.error.clone()).map(|err| view! {
                <div class="bg-red-500/10 border border-red-500/30 rounded-lg p-3">
                    <p class="text-sm text-red-400">{err}</p>
                </div>
            })}

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                // API name comes from the configured channels
                <div class="space-y-1">
                    <label class="block text-sm font-medium text-slate-300">
                        "API Name"<span class="text-red-400">" *"</span>
                    </label>
                    <select
                        class=INPUT_CLASS
                        prop:value=move || form.with(|f| f.fields.apiname.clone())
                        on:change=move |ev| form.update(|f| f.fields.apiname = event_target_value(&ev))
                    >
                        <option value="">"Select a channel"</option>
                        {move || channels.get().into_iter().map(|channel| {
                            let name = channel.channelname;
                            view! { <option value=name.clone()>{name.clone()}</option> }
                        }).collect::<Vec<_>>()}
                    </select>
                </div>

                <TextField
                    label="Username"
                    required=true
                    placeholder="Account username"
                    value=field(|f| f.username.clone())
                    on_input=edit(|f, v| f.username = v)
                />
                <TextField
                    label="Password"
                    input_type="password"
                    required=true
                    placeholder="Account password"
                    value=field(|f| f.password.clone())
                    on_input=edit(|f, v| f.password = v)
                />
                <TextField
                    label="Auth Token"
                    placeholder="Optional"
                    value=field(|f| f.authtoken.clone())
                    on_input=edit(|f, v| f.authtoken = v)
                />
                <TextField
                    label="User Tobit ID"
                    input_type="number"
                    placeholder="Optional"
                    value=field(|f| f.usertobitid.map(|id| id.to_string()).unwrap_or_default())
                    on_input=edit(|f, v| f.set_usertobitid(&v))
                />
                <TextField
                    label="Person ID"
                    placeholder="Optional"
                    value=field(|f| f.personid.clone())
                    on_input=edit(|f, v| f.personid = v)
                />
                <TextField
                    label="Use Count"
                    input_type="number"
                    placeholder="0"
                    value=field(|f| f.usecount.to_string())
                    on_input=edit(|f, v| f.set_usecount(&v))
                />

                <div class="flex items-end gap-6 pb-2">
                    <CheckboxField
                        label="Token valid"
                        checked=Signal::derive(move || form.with(|f| f.fields.tokenstatus))
                        on_change=move |checked: bool| form.update(|f| f.fields.tokenstatus = checked)
                    />
                    <CheckboxField
                        label="Account enabled"
                        checked=Signal::derive(move || form.with(|f| f.fields.accountstatus))
                        on_change=move |checked: bool| form.update(|f| f.fields.accountstatus = checked)
                    />
                </div>
            </div>

            <div class="flex justify-end gap-3 pt-2">
                <button
                    type="button"
                    class="px-4 py-2 text-slate-300 hover:text-white hover:bg-slate-700 disabled:opacity-50 rounded-lg transition-colors"
                    disabled=move || form.with(|f| f.submitting)
                    on:click=move |_| form.update(FormState::close)
                >
                    "Cancel"
                </button>
                <button
                    type="submit"
                    class="px-4 py-2 bg-blue-500 hover:bg-blue-600 disabled:opacity-50 disabled:cursor-not-allowed \
                           text-white font-medium rounded-lg transition-colors"
                    disabled=move || form.with(|f| f.submitting)
                >
                    {move || if form.with(|f| f.submitting) { "Adding..." } else { "Add" }}
                </button>
            </div>
        </form>
    }
}
