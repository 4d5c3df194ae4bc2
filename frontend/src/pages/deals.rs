use gpportal_shared::fmt::{short_date, usd};
use gpportal_shared::protocol::ListDealsRequest;
use gpportal_shared::Deal;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::Search;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// Open deals, searchable by name or stage.
#[component]
pub fn DealsPage() -> impl IntoView {
    let api = use_api();

    let (deals, set_deals) = signal(Vec::<Deal>::new());
    let (query, set_query) = signal(String::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.send(&ListDealsRequest).await {
                Ok(rows) => set_deals.set(rows),
                Err(err) if err.is_abort() => return,
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_loading.set(false);
        });
    }

    let visible = Signal::derive(move || {
        let needle = query.get().to_lowercase();
        deals
            .get()
            .into_iter()
            .filter(|deal| {
                needle.is_empty()
                    || deal.name.to_lowercase().contains(&needle)
                    || deal
                        .deal_stage
                        .as_deref()
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(&needle)
            })
            .collect::<Vec<_>>()
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-3">
                <div>
                    <h1 class="text-2xl font-bold">"Deals"</h1>
                    <p class="text-base-content/70">"Open offerings from your GP"</p>
                </div>
                <label class="input input-bordered flex items-center gap-2 w-full sm:w-64">
                    <Search attr:class="h-4 w-4 text-base-content/50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search deals"
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

            <div class="card bg-base-100 shadow">
                <div class="card-body p-0">
                    <div class="overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Deal"</th>
                                    <th>"Stage"</th>
                                    <th>"Sponsors"</th>
                                    <th>"Close date"</th>
                                    <th class="text-right">"Offering size"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || is_loading.get()>
                                    <tr>
                                        <td colspan="6" class="text-center py-8">
                                            <span class="loading loading-spinner text-primary"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || visible.get()
                                    key=|deal| deal.id
                                    children=move |deal: Deal| {
                                        let detail = AppRoute::DealDetail(deal.id).to_path();
                                        view! {
                                            <tr class="hover">
                                                <td class="font-medium">{deal.name.clone()}</td>
                                                <td>
                                                    {deal.deal_stage.clone().map(|stage| view! {
                                                        <span class="badge badge-outline">{stage}</span>
                                                    })}
                                                </td>
                                                <td>{deal.sponsors.clone().unwrap_or_else(|| "-".to_string())}</td>
                                                <td>
                                                    {deal
                                                        .close_date
                                                        .map(|d| short_date(&d))
                                                        .unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td class="text-right">
                                                    {deal
                                                        .offering_size
                                                        .map(usd)
                                                        .unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td class="text-right">
                                                    <Link to=detail attr:class="btn btn-ghost btn-xs">
                                                        "View"
                                                    </Link>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                                <Show when=move || !is_loading.get() && visible.get().is_empty()>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/60">
                                            "No deals match your search."
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
