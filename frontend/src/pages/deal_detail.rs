use gpportal_shared::fmt::{short_date, usd};
use gpportal_shared::protocol::{GetDealRequest, ShowInterestRequest};
use gpportal_shared::{Deal, UploadMeta};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::api::{use_api, ApiError};
use crate::components::icons::{ArrowLeft, CircleCheck, Upload};
use crate::components::{flash, Toast};
use crate::validate::is_pdf_filename;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// Paperwork every investor completes before funding.
const REQUIRED_DOCS: [&str; 3] = [
    "Operating agreement (LLC)",
    "EIN confirmation",
    "Voided check",
];

#[component]
pub fn DealDetailPage(deal_id: i64) -> impl IntoView {
    let api = use_api();

    let (deal, set_deal) = signal(Option::<Deal>::None);
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (note, set_note) = signal(Option::<(String, bool)>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.send(&GetDealRequest { id: deal_id }).await {
                Ok(found) => set_deal.set(Some(found)),
                Err(err) if err.is_abort() => return,
                Err(ApiError::NotFound) => set_error_msg.set(Some("Deal not found.".to_string())),
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_loading.set(false);
        });
    }

    // ---- Interest ----

    let (interest_sent, set_interest_sent) = signal(false);
    let (interest_sending, set_interest_sending) = signal(false);

    let on_interest = {
        let api = api.clone();
        move |_| {
            if interest_sending.get_untracked() {
                return;
            }
            set_interest_sending.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api.send(&ShowInterestRequest { deal_id }).await {
                    Ok(_) => {
                        set_interest_sent.set(true);
                        flash(
                            set_note,
                            "Interest recorded. The GP will follow up.".to_string(),
                            false,
                        );
                    }
                    Err(err) if err.is_abort() => return,
                    Err(ApiError::Conflict) => {
                        set_interest_sent.set(true);
                        flash(
                            set_note,
                            "You already expressed interest in this deal.".to_string(),
                            false,
                        );
                    }
                    Err(err) => flash(set_note, err.to_string(), true),
                }
                set_interest_sending.set(false);
            });
        }
    };

    // ---- Voided check upload ----

    let check_input: NodeRef<html::Input> = NodeRef::new();
    let check_file = RwSignal::new_local(Option::<web_sys::File>::None);
    let (is_uploading, set_is_uploading) = signal(false);

    let on_pick = move |ev| {
        let input = event_target::<HtmlInputElement>(&ev);
        let picked = input.files().and_then(|list| list.get(0));
        check_file.set(picked);
    };

    let on_upload = {
        let api = api.clone();
        move |_| {
            let Some(file) = check_file.get_untracked() else {
                flash(set_note, "Choose a PDF first.".to_string(), true);
                return;
            };
            if !is_pdf_filename(&file.name()) {
                flash(
                    set_note,
                    "Voided checks must be PDF files.".to_string(),
                    true,
                );
                return;
            }
            let deal_name = deal.with_untracked(|loaded| loaded.as_ref().map(|d| d.name.clone()));
            set_is_uploading.set(true);
            let api = api.clone();
            spawn_local(async move {
                let meta = UploadMeta {
                    label: Some("Voided check".to_string()),
                    deal_name,
                    profile_name: None,
                };
                match api.upload_document(&file, &meta).await {
                    Ok(_) => {
                        flash(set_note, "Voided check uploaded.".to_string(), false);
                        check_file.set(None);
                        if let Some(input) = check_input.get_untracked() {
                            input.set_value("");
                        }
                    }
                    Err(err) if err.is_abort() => return,
                    Err(err) => flash(set_note, err.to_string(), true),
                }
                set_is_uploading.set(false);
            });
        }
    };

    // ---- View ----

    let fact = |label: &'static str, value: String| {
        view! {
            <div>
                <div class="text-xs uppercase text-base-content/50">{label}</div>
                <div class="font-medium">{value}</div>
            </div>
        }
    };

    view! {
        <div class="space-y-6">
            <Link to=AppRoute::Deals.to_path() attr:class="btn btn-ghost btn-sm gap-2">
                <ArrowLeft attr:class="h-4 w-4" />
                "Back to deals"
            </Link>

            <Show when=move || is_loading.get()>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            {move || {
                deal.get().map(|deal| {
                    let stage = deal.deal_stage.clone();
                    let funding = deal
                        .funding_instructions
                        .clone()
                        .unwrap_or_else(|| {
                            "Funding instructions will be shared by the GP before close."
                                .to_string()
                        });
                    view! {
                        <div class="space-y-6">
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <div class="flex flex-col sm:flex-row sm:items-start sm:justify-between gap-4">
                                        <div>
                                            <h1 class="text-2xl font-bold">{deal.name.clone()}</h1>
                                            {stage.map(|stage| view! {
                                                <span class="badge badge-outline mt-2">{stage}</span>
                                            })}
                                        </div>
                                        <button
                                            class="btn btn-primary"
                                            disabled=move || interest_sent.get() || interest_sending.get()
                                            on:click=on_interest.clone()
                                        >
                                            {move || if interest_sending.get() {
                                                view! { <span class="loading loading-spinner loading-sm"></span> }
                                                    .into_any()
                                            } else if interest_sent.get() {
                                                view! {
                                                    <CircleCheck attr:class="h-4 w-4" />
                                                    "Interest sent"
                                                }
                                                    .into_any()
                                            } else {
                                                "I'm interested".into_any()
                                            }}
                                        </button>
                                    </div>
                                    <div class="grid grid-cols-2 lg:grid-cols-4 gap-4 mt-4">
                                        {fact("Type", deal.deal_type.clone().unwrap_or_else(|| "-".to_string()))}
                                        {fact("Subtype", deal.deal_subtype.clone().unwrap_or_else(|| "-".to_string()))}
                                        {fact("Sponsors", deal.sponsors.clone().unwrap_or_else(|| "-".to_string()))}
                                        {fact(
                                            "Close date",
                                            deal.close_date.map(|d| short_date(&d)).unwrap_or_else(|| "-".to_string()),
                                        )}
                                        {fact(
                                            "Offering size",
                                            deal.offering_size.map(usd).unwrap_or_else(|| "-".to_string()),
                                        )}
                                        {fact(
                                            "Unit price",
                                            deal.unit_price.map(usd).unwrap_or_else(|| "-".to_string()),
                                        )}
                                        {fact("Status", deal.status.clone().unwrap_or_else(|| "-".to_string()))}
                                    </div>
                                </div>
                            </div>

                            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body">
                                        <h2 class="card-title">"Required paperwork"</h2>
                                        <ul class="space-y-2 mt-2">
                                            {REQUIRED_DOCS
                                                .iter()
                                                .map(|doc| view! {
                                                    <li class="flex items-center gap-2">
                                                        <CircleCheck attr:class="h-4 w-4 text-base-content/40" />
                                                        <span>{*doc}</span>
                                                    </li>
                                                })
                                                .collect_view()}
                                        </ul>
                                        <div class="divider"></div>
                                        <h3 class="font-semibold">"Upload your voided check"</h3>
                                        <input
                                            type="file"
                                            accept=".pdf"
                                            class="file-input file-input-bordered w-full"
                                            node_ref=check_input
                                            on:change=on_pick
                                        />
                                        <button
                                            class="btn btn-secondary mt-2"
                                            disabled=move || is_uploading.get()
                                            on:click=on_upload.clone()
                                        >
                                            {move || if is_uploading.get() {
                                                view! { <span class="loading loading-spinner loading-sm"></span> }
                                                    .into_any()
                                            } else {
                                                view! {
                                                    <Upload attr:class="h-4 w-4" />
                                                    "Upload"
                                                }
                                                    .into_any()
                                            }}
                                        </button>
                                    </div>
                                </div>

                                <div class="card bg-base-100 shadow">
                                    <div class="card-body">
                                        <h2 class="card-title">"Funding instructions"</h2>
                                        <p class="whitespace-pre-line text-base-content/80">{funding}</p>
                                    </div>
                                </div>
                            </div>
                        </div>
                    }
                })
            }}

            <Toast note=note />
        </div>
    }
}
