use gpportal_shared::fmt::usd;
use gpportal_shared::protocol::{
    AdminInvestmentSummaryRequest, AdminListInvestmentsRequest, ListUsersRequest,
};
use gpportal_shared::{Investment, InvestmentStatus, InvestmentSummary, UserSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::Search;

fn status_badge(status: InvestmentStatus) -> &'static str {
    match status {
        InvestmentStatus::Active => "badge badge-success",
        InvestmentStatus::Closed => "badge badge-neutral",
        InvestmentStatus::Pending => "badge badge-warning",
    }
}

/// Portfolio-wide investment totals and every position on the books.
#[component]
pub fn AdminInvestmentsPage() -> impl IntoView {
    let api = use_api();

    let (summary, set_summary) = signal(InvestmentSummary::default());
    let (rows, set_rows) = signal(Vec::<Investment>::new());
    let (users, set_users) = signal(Vec::<UserSummary>::new());
    let (query, set_query) = signal(String::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            let totals = api.send(&AdminInvestmentSummaryRequest).await;
            let list = api.send(&AdminListInvestmentsRequest).await;
            match (totals, list) {
                (Ok(totals), Ok(list)) => {
                    set_summary.set(totals);
                    set_rows.set(list);
                }
                (Err(err), _) | (_, Err(err)) => {
                    if err.is_abort() {
                        return;
                    }
                    set_error_msg.set(Some(err.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    }

    {
        let api = api.clone();
        spawn_local(async move {
            match api.send(&ListUsersRequest).await {
                Ok(list) => set_users.set(list),
                Err(err) if err.is_abort() => {}
                Err(err) => log::error!("user list load failed: {err}"),
            }
        });
    }

    let visible = Signal::derive(move || {
        let needle = query.get().to_lowercase();
        rows.get()
            .into_iter()
            .filter(|row| needle.is_empty() || row.deal_name.to_lowercase().contains(&needle))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-3">
                <div>
                    <h1 class="text-2xl font-bold">"Investments"</h1>
                    <p class="text-base-content/70">"Every position across the portal"</p>
                </div>
                <label class="input input-bordered flex items-center gap-2 w-full sm:w-64">
                    <Search attr:class="h-4 w-4 text-base-content/50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search by deal"
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        prop:value=query
                    />
                </label>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="stats shadow w-full">
                <div class="stat">
                    <div class="stat-title">"Total invested"</div>
                    <div class="stat-value text-primary text-2xl">
                        {move || usd(summary.get().total_invested)}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Total distributed"</div>
                    <div class="stat-value text-secondary text-2xl">
                        {move || usd(summary.get().total_distributed)}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Active"</div>
                    <div class="stat-value text-2xl">{move || summary.get().active_count}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Closed"</div>
                    <div class="stat-value text-2xl">{move || summary.get().closed_count}</div>
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
                                    <th>"Added by"</th>
                                    <th class="text-right">"Invested"</th>
                                    <th class="text-right">"Distributions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || is_loading.get()>
                                    <tr>
                                        <td colspan="5" class="text-center py-8">
                                            <span class="loading loading-spinner text-primary"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || visible.get()
                                    key=|row| row.id
                                    children=move |row: Investment| {
                                        let added_by = move || {
                                            row.uploaded_by_id
                                                .and_then(|id| {
                                                    users.with(|list| {
                                                        list.iter()
                                                            .find(|u| u.id == id)
                                                            .map(|u| u.email.clone())
                                                    })
                                                })
                                                .unwrap_or_else(|| "-".to_string())
                                        };
                                        view! {
                                            <tr class="hover">
                                                <td class="font-medium">{row.deal_name.clone()}</td>
                                                <td>
                                                    <span class=status_badge(row.status)>
                                                        {row.status.to_string()}
                                                    </span>
                                                </td>
                                                <td>{added_by}</td>
                                                <td class="text-right">{usd(row.investment_total)}</td>
                                                <td class="text-right">{usd(row.distribution_total)}</td>
                                            </tr>
                                        }
                                    }
                                />
                                <Show when=move || !is_loading.get() && visible.get().is_empty()>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/60">
                                            "No investments recorded."
                                        </td>
                                    </tr>
                                </Show>
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}
