use gpportal_shared::fmt::usd;
use gpportal_shared::protocol::{InvestmentSummaryRequest, ListDealsRequest};
use gpportal_shared::InvestmentSummary;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::{FileText, Landmark, TrendingUp};
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// Landing screen: portfolio totals plus shortcuts into the portal.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();

    let (summary, set_summary) = signal(InvestmentSummary::default());
    let (open_deals, set_open_deals) = signal(0usize);
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            let totals = api.send(&InvestmentSummaryRequest).await;
            let deals = api.send(&ListDealsRequest).await;
            match (totals, deals) {
                (Ok(totals), Ok(deals)) => {
                    set_summary.set(totals);
                    set_open_deals.set(deals.len());
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

    let greeting = move || {
        auth.session.with(|s| {
            s.profile()
                .and_then(|p| p.entity_name.clone())
                .unwrap_or_else(|| "Investor".to_string())
        })
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Dashboard"</h1>
                <p class="text-base-content/70">{move || format!("Welcome back, {}", greeting())}</p>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <div class="stats stats-vertical lg:stats-horizontal shadow w-full bg-base-100">
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
                        <div class="stat-title">"Active investments"</div>
                        <div class="stat-value text-2xl">
                            {move || summary.get().active_count}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Open deals"</div>
                        <div class="stat-value text-2xl">{move || open_deals.get()}</div>
                    </div>
                </div>
            </Show>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <Link to=AppRoute::Deals.to_path() attr:class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                    <div class="card-body">
                        <Landmark attr:class="h-6 w-6 text-primary" />
                        <h2 class="card-title text-base">"Browse deals"</h2>
                        <p class="text-sm text-base-content/70">
                            "Review open offerings and record your interest."
                        </p>
                    </div>
                </Link>
                <Link to=AppRoute::Documents.to_path() attr:class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                    <div class="card-body">
                        <FileText attr:class="h-6 w-6 text-primary" />
                        <h2 class="card-title text-base">"Documents"</h2>
                        <p class="text-sm text-base-content/70">
                            "Statements, agreements and everything shared with you."
                        </p>
                    </div>
                </Link>
                <Link to=AppRoute::Investments.to_path() attr:class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                    <div class="card-body">
                        <TrendingUp attr:class="h-6 w-6 text-primary" />
                        <h2 class="card-title text-base">"Investments"</h2>
                        <p class="text-sm text-base-content/70">
                            "Your positions and distributions in one place."
                        </p>
                    </div>
                </Link>
            </div>
        </div>
    }
}
