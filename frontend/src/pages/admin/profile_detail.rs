use gpportal_shared::protocol::AdminGetProfileRequest;
use gpportal_shared::ProfileRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{use_api, ApiError};
use crate::components::icons::ArrowLeft;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn AdminProfileDetailPage(profile_id: i64) -> impl IntoView {
    let api = use_api();

    let (profile, set_profile) = signal(Option::<ProfileRecord>::None);
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.send(&AdminGetProfileRequest { id: profile_id }).await {
                Ok(found) => set_profile.set(Some(found)),
                Err(err) if err.is_abort() => return,
                Err(ApiError::NotFound) => {
                    set_error_msg.set(Some("Profile not found.".to_string()))
                }
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_loading.set(false);
        });
    }

    let field = |label: &'static str, value: Option<String>| {
        view! {
            <div>
                <div class="text-xs uppercase text-base-content/50">{label}</div>
                <div class="font-medium">{value.unwrap_or_else(|| "-".to_string())}</div>
            </div>
        }
    };

    view! {
        <div class="space-y-6 max-w-2xl">
            <Link to=AppRoute::AdminProfiles.to_path() attr:class="btn btn-ghost btn-sm gap-2">
                <ArrowLeft attr:class="h-4 w-4" />
                "Back to profiles"
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
                profile.get().map(|record| {
                    view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h1 class="card-title text-2xl">
                                    {record
                                        .entity_name
                                        .clone()
                                        .unwrap_or_else(|| "Unnamed entity".to_string())}
                                </h1>
                                <div class="grid grid-cols-1 sm:grid-cols-2 gap-4 mt-4">
                                    {field("Profile type", record.profile_type.clone())}
                                    {field("Jurisdiction", record.jurisdiction.clone())}
                                    {field("Tax classification", record.tax_classification.clone())}
                                    {field("Contact email", record.contact_email.clone())}
                                    {field("Contact phone", record.contact_phone.clone())}
                                    {field("Account id", record.user_id.map(|id| id.to_string()))}
                                </div>
                            </div>
                        </div>
                    }
                })
            }}
        </div>
    }
}
