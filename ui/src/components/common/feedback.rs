//! Banners, badges and modals shared by every screen

use leptos::*;

use super::{CheckIcon, CloseIcon, WarningIcon};

/// Inline error with an optional retry action
#[component]
pub fn ErrorBanner(
    message: String,
    #[prop(optional, into)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between gap-4 bg-red-500/10 border border-red-500/30 rounded-lg p-4 mb-6">
            <div class="flex items-center gap-3">
                <WarningIcon class="w-5 h-5 text-red-400 flex-shrink-0" />
                <p class="text-sm text-red-400">{message}</p>
            </div>
            {on_retry.map(|retry| view! {
                <button
                    class="px-3 py-1.5 text-sm text-red-300 hover:text-white hover:bg-red-500/20 rounded-lg transition-colors"
                    on:click=move |_| retry.call(())
                >
                    "Retry"
                </button>
            })}
        </div>
    }
}

/// Success notice
#[component]
pub fn NoticeBanner(message: String) -> impl IntoView {
    view! {
        <div class="flex items-center gap-3 bg-green-500/10 border border-green-500/30 rounded-lg p-4 mb-6">
            <CheckIcon class="w-5 h-5 text-green-400 flex-shrink-0" />
            <p class="text-sm text-green-400">{message}</p>
        </div>
    }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16">
            <div class="animate-spin w-8 h-8 border-4 border-blue-500 border-t-transparent rounded-full" />
        </div>
    }
}

/// Centered placeholder for an empty list
#[component]
pub fn EmptyState(
    title: &'static str,
    hint: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-16 text-center">
            <p class="text-lg font-medium text-white mb-1">{title}</p>
            <p class="text-sm text-slate-400">{hint}</p>
        </div>
    }
}

/// Enabled/disabled pill
#[component]
pub fn StatusBadge(
    enabled: bool,
    #[prop(default = "Enabled")] on_label: &'static str,
    #[prop(default = "Disabled")] off_label: &'static str,
) -> impl IntoView {
    let (class, label) = if enabled {
        ("bg-green-500/20 text-green-400 border-green-500/30", on_label)
    } else {
        ("bg-slate-500/20 text-slate-400 border-slate-500/30", off_label)
    };

    view! {
        <span class=format!(
            "inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium border {}",
            class
        )>
            {label}
        </span>
    }
}

/// Modal frame: backdrop, title bar with close button, body
#[component]
pub fn Modal(
    title: String,
    on_close: impl Fn() + 'static + Clone,
    #[prop(default = "max-w-lg")] width: &'static str,
    children: Children,
) -> impl IntoView {
    let on_close_backdrop = on_close.clone();
    let on_close_header = on_close;

    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center">
            // Backdrop
            <div
                class="absolute inset-0 bg-black/60 backdrop-blur-sm"
                on:click=move |_| on_close_backdrop()
            />

            <div class=format!(
                "relative bg-slate-800 rounded-xl border border-slate-700 shadow-2xl w-full mx-4 max-h-[90vh] flex flex-col {}",
                width
            )>
                <div class="flex items-center justify-between px-6 py-4 border-b border-slate-700">
                    <h2 class="text-lg font-semibold text-white truncate">{title}</h2>
                    <button
                        class="p-1 text-slate-400 hover:text-white rounded transition-colors"
                        on:click=move |_| on_close_header()
                    >
                        <CloseIcon class="w-5 h-5" />
                    </button>
                </div>

                <div class="p-6 overflow-auto">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Yes/no confirmation for destructive actions
#[component]
pub fn ConfirmModal(
    title: String,
    message: String,
    #[prop(default = "Delete")] confirm_label: &'static str,
    #[prop(into)] busy: Signal<bool>,
    on_cancel: impl Fn() + 'static + Clone,
    on_confirm: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let on_cancel_button = on_cancel.clone();

    view! {
        <Modal title=title on_close=on_cancel width="max-w-md">
            <p class="text-sm text-slate-300 mb-6">{message}</p>
            <div class="flex justify-end gap-3">
                <button
                    class="px-4 py-2 text-slate-300 hover:text-white hover:bg-slate-700 rounded-lg transition-colors"
                    on:click=move |_| on_cancel_button()
                >
                    "Cancel"
                </button>
                <button
                    class="px-4 py-2 bg-red-500 hover:bg-red-600 disabled:opacity-50 disabled:cursor-not-allowed \
                           text-white font-medium rounded-lg transition-colors"
                    disabled=move || busy.get()
                    on:click={
                        let on_confirm = on_confirm.clone();
                        move |_| on_confirm()
                    }
                >
                    {move || if busy.get() { "Working..." } else { confirm_label }}
                </button>
            </div>
        </Modal>
    }
}
