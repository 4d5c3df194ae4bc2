use gpportal_shared::fmt::usd;
use gpportal_shared::protocol::ListInvestmentsRequest;
use gpportal_shared::{Investment, InvestmentStatus, NewInvestment};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{use_api, ApiError};
use crate::components::icons::{Plus, Search};
use crate::components::{flash, AddInvestmentDialog, Toast};

fn status_badge(status: InvestmentStatus) -> &'static str {
    match status {
        InvestmentStatus::Active => "badge badge-success",
        InvestmentStatus::Closed => "badge badge-neutral",
        InvestmentStatus::Pending => "badge badge-warning",
    }
}

/// The investor's positions, with a dialog to record a new commitment.
#[component]
pub fn InvestmentsPage() -> impl IntoView {
    let api = use_api();

    let (rows, set_rows) = signal(Vec::<Investment>::new());
    let (query, set_query) = signal(String::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (note, set_note) = signal(Option::<(String, bool)>::None);
    let (dialog_open, set_dialog_open) = signal(false);

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                match api.send(&ListInvestmentsRequest).await {
                    Ok(found) => set_rows.set(found),
                    Err(err) if err.is_abort() => return,
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_is_loading.set(false);
            });
        }
    };
    load();

    let visible = Signal::derive(move || {
        let needle = query.get().to_lowercase();
        rows.get()
            .into_iter()
            .filter(|row| needle.is_empty() || row.deal_name.to_lowercase().contains(&needle))
            .collect::<Vec<_>>()
    });

    let invested = Memo::new(move |_| rows.get().iter().map(|r| r.investment_total).sum::<f64>());
    let distributed =
        Memo::new(move |_| rows.get().iter().map(|r| r.distribution_total).sum::<f64>());

    let on_add = {
        let api = api.clone();
        let load = load.clone();
        move |investment: NewInvestment| {
            let api = api.clone();
            let load = load.clone();
            spawn_local(async move {
                match api.send(&investment).await {
                    Ok(_) => {
                        flash(set_note, "Investment recorded.".to_string(), false);
                        load();
                    }
                    Err(err) if err.is_abort() => {}
                    Err(ApiError::Conflict) => flash(
                        set_note,
                        "An investment with that id already exists.".to_string(),
                        true,
                    ),
                    Err(err) => flash(set_note, err.to_string(), true),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-3">
                <div>
                    <h1 class="text-2xl font-bold">"Investments"</h1>
                    <p class="text-base-content/70">"Your commitments and distributions"</p>
                </div>
                <div class="flex items-center gap-2">
                    <label class="input input-bordered flex items-center gap-2 w-full sm:w-56">
                        <Search attr:class="h-4 w-4 text-base-content/50" />
                        <input
                            type="text"
                            class="grow"
                            placeholder="Search by deal"
                            on:input=move |ev| set_query.set(event_target_value(&ev))
                            prop:value=query
                        />
                    </label>
                    <button class="btn btn-primary gap-2" on:click=move |_| set_dialog_open.set(true)>
                        <Plus attr:class="h-4 w-4" />
                        "Add investment"
                    </button>
                </div>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="stats shadow w-full">
                <div class="stat">
                    <div class="stat-title">"Total invested"</div>
                    <div class="stat-value text-primary text-2xl">{move || usd(invested.get())}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Total distributions"</div>
                    <div class="stat-value text-secondary text-2xl">{move || usd(distributed.get())}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Positions"</div>
                    <div class="stat-value text-2xl">{move || rows.get().len()}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body p-0">
                    <div class="overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Deal"</th>
                                    <th>"Status"</th>
                                    <th class="text-right">"Invested"</th>
                                    <th class="text-right">"Distributions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || is_loading.get()>
                                    <tr>
                                        <td colspan="4" class="text-center py-8">
                                            <span class="loading loading-spinner text-primary"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || visible.get()
                                    key=|row| row.id
                                    children=move |row: Investment| {
                                        view! {
                                            <tr class="hover">
                                                <td class="font-medium">{row.deal_name.clone()}</td>
                                                <td>
                                                    <span class=status_badge(row.status)>
                                                        {row.status.to_string()}
                                                    </span>
                                                </td>
                                                <td class="text-right">{usd(row.investment_total)}</td>
                                                <td class="text-right">{usd(row.distribution_total)}</td>
                                            </tr>
                                        }
                                    }
                                />
                                <Show when=move || !is_loading.get() && visible.get().is_empty()>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/60">
                                            "No investments on file."
                                        </td>
                                    </tr>
                                </Show>
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            <AddInvestmentDialog open=dialog_open set_open=set_dialog_open on_add=on_add />
            <Toast note=note />
        </div>
    }
}
