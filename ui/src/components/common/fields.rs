//! Labelled form inputs

use leptos::*;

pub const INPUT_CLASS: &str = "w-full px-3 py-2 rounded-lg bg-slate-900 border border-slate-700 text-white text-sm \
                               placeholder-slate-500 focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-transparent";

/// Text, password or number input bound to a signal
#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: impl Fn(String) + 'static,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
    #[prop(default = false)] required: bool,
) -> impl IntoView {
    view! {
        <div class="space-y-1">
            <label class="block text-sm font-medium text-slate-300">
                {label}
                {required.then(|| view! { <span class="text-red-400">" *"</span> })}
            </label>
            <input
                type=input_type
                class=INPUT_CLASS
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn CheckboxField(
    label: &'static str,
    #[prop(into)] checked: Signal<bool>,
    on_change: impl Fn(bool) + 'static,
) -> impl IntoView {
    view! {
        <label class="flex items-center gap-2 text-sm text-slate-300 cursor-pointer">
            <input
                type="checkbox"
                class="w-4 h-4 rounded border-slate-600 bg-slate-900 text-blue-500"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change(event_target_checked(&ev))
            />
            {label}
        </label>
    }
}
