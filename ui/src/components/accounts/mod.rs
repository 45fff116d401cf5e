//! Accounts Management Component
//!
//! Provider credentials stored by the backend:
//! - Account table with masked password and token preview
//! - Inline add form; the API name is picked from the channel list
//! - Delete behind a confirmation modal
//!
//! Accounts are only ever added or deleted, never edited in place.

mod form;

use aichat_shared::{first_succeeded, Account, AccountForm, Channel, FormState, ListState};
use leptos::*;

use crate::components::common::{
    ConfirmModal, EmptyState, ErrorBanner, KeyIcon, PlusIcon, RefreshIcon, Spinner, StatusBadge,
    TrashIcon,
};
use crate::state::AppState;
use form::AddAccountForm;

// ============================================================================
// Main Component
// ============================================================================

#[component]
pub fn AccountsPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let client = store_value(app_state.client.clone());

    let accounts = create_rw_signal(ListState::<Account>::default());
    let channels = create_rw_signal(Vec::<Channel>::new());
    let form = create_rw_signal(FormState::<AccountForm>::default());

    // Error from the last add or delete
    let (action_error, set_action_error) = create_signal(Option::<String>::None);
    let deleting = create_rw_signal(Option::<Account>::None);
    let (delete_busy, set_delete_busy) = create_signal(false);

    let busy = Signal::derive(move || {
        accounts.with(ListState::is_loading) || form.with(|f| f.submitting) || delete_busy.get()
    });

    let load = move || {
        accounts.update(ListState::begin_load);
        spawn_local(async move {
            let client = client.get_value();
            let result = client.list_accounts().await;
            if let Err(e) = &result {
                tracing::warn!("Failed to load accounts: {}", e);
            }
            accounts.update(|state| state.finish(result));
        });
    };

    // Channel names feed the API name select
    let load_channels = move || {
        spawn_local(async move {
            let client = client.get_value();
            match client.list_channels().await {
                Ok(list) => channels.set(list),
                Err(e) => {
                    tracing::warn!("Failed to load channels for account form: {}", e);
                    set_action_error.set(Some(format!("Failed to load channel list: {}", e)));
                }
            }
        });
    };

    // Fetch data on mount
    create_effect(move |_| {
        load();
        load_channels();
    });

    let on_refresh = move |_| {
        set_action_error.set(None);
        load();
    };

    let on_submit = move || {
        let request = match form.with_untracked(|f| f.fields.to_request()) {
            Ok(request) => request,
            Err(e) => {
                form.update(|f| f.fail(e.to_string()));
                return;
            }
        };

        form.update(FormState::begin_submit);
        set_action_error.set(None);

        spawn_local(async move {
            let client = client.get_value();
            match client.add_accounts(&[request]).await {
                Ok(results) if first_succeeded(&results) => {
                    tracing::info!("Account added");
                    form.update(FormState::succeed);
                    load();
                }
                Ok(_) => form.update(|f| f.fail("Failed to add account")),
                Err(e) => {
                    tracing::warn!("Add account failed: {}", e);
                    form.update(|f| f.fail(e.to_string()));
                }
            }
        });
    };

    let on_confirm_delete = move || {
        let Some(account) = deleting.get_untracked() else {
            return;
        };
        set_delete_busy.set(true);
        set_action_error.set(None);

        spawn_local(async move {
            let client = client.get_value();
            match client.delete_accounts(&[account.key()]).await {
                Ok(results) if first_succeeded(&results) => {
                    tracing::info!("Deleted account {} ({})", account.username, account.apiname);
                    load();
                }
                Ok(_) => set_action_error.set(Some("Failed to delete account".to_string())),
                Err(e) => set_action_error.set(Some(e.to_string())),
            }
            set_delete_busy.set(false);
            deleting.set(None);
        });
    };

    view! {
        <div class="flex-1 overflow-auto p-6 bg-slate-900">
            <div class="max-w-7xl mx-auto">
                // Header
                <div class="flex items-center justify-between mb-6">
                    <div>
                        <h1 class="text-2xl font-bold text-white">"Accounts"</h1>
                        <p class="text-slate-400 mt-1">"Credentials used to call upstream AI providers"</p>
                    </div>

                    <div class="flex items-center gap-3">
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
                            on:click=move |_| form.update(FormState::toggle)
                        >
                            <PlusIcon class="w-4 h-4" />
                            {move || if form.with(|f| f.open) { "Cancel" } else { "Add Account" }}
                        </button>
                    </div>
                </div>

                {move || action_error.get().map(|message| view! { <ErrorBanner message=message /> })}

                {move || accounts.with(|s| s.error().map(str::to_string)).map(|message| view! {
                    <ErrorBanner message=message on_retry=move |_| load() />
                })}

                <Show when=move || form.with(|f| f.open)>
                    <AddAccountForm
                        form=form
                        channels=channels
                        on_submit=on_submit
                    />
                </Show>

                <Show
                    when=move || !accounts.with(ListState::is_loading)
                    fallback=|| view! { <Spinner /> }
                >
                    <AccountsTable
                        accounts=accounts
                        busy=busy
                        on_delete=move |account: Account| deleting.set(Some(account))
                    />
                </Show>

                {move || deleting.get().map(|account| view! {
                    <ConfirmModal
                        title="Delete Account".to_string()
                        message=format!(
                            "Delete account {} ({})? This cannot be undone.",
                            account.username, account.apiname
                        )
                        busy=delete_busy
                        on_cancel=move || deleting.set(None)
                        on_confirm=on_confirm_delete
                    />
                })}
            </div>
        </div>
    }
}

// ============================================================================
// Accounts Table Component
// ============================================================================

#[component]
fn AccountsTable(
    accounts: RwSignal<ListState<Account>>,
    #[prop(into)] busy: Signal<bool>,
    on_delete: impl Fn(Account) + Clone + 'static,
) -> impl IntoView {
    view! {
        <div class="bg-slate-800 rounded-xl border border-slate-700 overflow-hidden">
            <div class="px-6 py-4 border-b border-slate-700 text-sm text-slate-400">
                {move || format!("Account list ({})", accounts.with(ListState::len))}
            </div>
            {move || {
                let items = accounts.with(|s| s.items().to_vec());

                if items.is_empty() {
                    return view! {
                        <EmptyState title="No accounts" hint="Add an account to start routing requests" />
                    }.into_view();
                }

                let on_delete = on_delete.clone();
                view! {
                    <div class="overflow-x-auto">
                        <table class="w-full">
                            <thead class="bg-slate-800/50 border-b border-slate-700">
                                <tr>
                                    <Th label="API Name" />
                                    <Th label="Username" />
                                    <Th label="Password" />
                                    <Th label="Auth Token" />
                                    <Th label="User Tobit ID" />
                                    <Th label="Person ID" />
                                    <Th label="Use Count" />
                                    <Th label="Token" />
                                    <Th label="Account" />
                                    <th class="px-6 py-4 text-right text-xs font-medium text-slate-400 uppercase tracking-wider">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-slate-700">
                                {items.into_iter().map(|account| {
                                    let on_delete = on_delete.clone();
                                    let target = account.clone();

                                    view! {
                                        <tr class="hover:bg-slate-700/30 transition-colors">
                                            <td class="px-6 py-4 whitespace-nowrap">
                                                <div class="flex items-center gap-3">
                                                    <div class="w-8 h-8 rounded-lg bg-amber-500/10 flex items-center justify-center">
                                                        <KeyIcon class="w-4 h-4 text-amber-400" />
                                                    </div>
                                                    <span class="text-sm font-medium text-white">{account.apiname.clone()}</span>
                                                </div>
                                            </td>
                                            <Td text=account.username.clone() />
                                            <td class="px-6 py-4 whitespace-nowrap">
                                                <code class="text-sm text-slate-500 font-mono">{Account::PASSWORD_MASK}</code>
                                            </td>
                                            <td class="px-6 py-4 whitespace-nowrap">
                                                {match account.token_preview() {
                                                    Some(preview) => view! {
                                                        <code
                                                            class="text-sm text-slate-400 font-mono bg-slate-900 px-2 py-1 rounded"
                                                            title=account.authtoken.clone().unwrap_or_default()
                                                        >
                                                            {preview}
                                                        </code>
                                                    }.into_view(),
                                                    None => view! { <span class="text-slate-600">"-"</span> }.into_view(),
                                                }}
                                            </td>
                                            <Td text=account.usertobitid.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()) />
                                            <Td text=account.personid.clone().filter(|p| !p.is_empty()).unwrap_or_else(|| "-".to_string()) />
                                            <Td text=account.usecount.to_string() />
                                            <td class="px-6 py-4 whitespace-nowrap">
                                                <StatusBadge enabled=account.tokenstatus on_label="Valid" off_label="Invalid" />
                                            </td>
                                            <td class="px-6 py-4 whitespace-nowrap">
                                                <StatusBadge enabled=account.accountstatus />
                                            </td>
                                            <td class="px-6 py-4 whitespace-nowrap text-right">
                                                <button
                                                    class="p-2 text-slate-400 hover:text-red-400 hover:bg-red-500/10 disabled:opacity-50 rounded-lg transition-colors"
                                                    title="Delete account"
                                                    disabled=move || busy.get()
                                                    on:click=move |_| on_delete(target.clone())
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

#[component]
fn Th(label: &'static str) -> impl IntoView {
    view! {
        <th class="px-6 py-4 text-left text-xs font-medium text-slate-400 uppercase tracking-wider">{label}</th>
    }
}

#[component]
fn Td(text: String) -> impl IntoView {
    view! {
        <td class="px-6 py-4 whitespace-nowrap text-sm text-slate-300">{text}</td>
    }
}
