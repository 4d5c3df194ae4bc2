use gpportal_shared::protocol::{AdminListProfilesRequest, ListUsersRequest};
use gpportal_shared::{ProfileRecord, UserSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::Search;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// Every investor profile on file.
#[component]
pub fn AdminProfilesPage() -> impl IntoView {
    let api = use_api();

    let (profiles, set_profiles) = signal(Vec::<ProfileRecord>::new());
    let (users, set_users) = signal(Vec::<UserSummary>::new());
    let (query, set_query) = signal(String::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.send(&AdminListProfilesRequest).await {
                Ok(rows) => set_profiles.set(rows),
                Err(err) if err.is_abort() => return,
                Err(err) => set_error_msg.set(Some(err.to_string())),
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
        profiles
            .get()
            .into_iter()
            .filter(|profile| {
                needle.is_empty()
                    || profile
                        .entity_name
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
                    <h1 class="text-2xl font-bold">"Profiles"</h1>
                    <p class="text-base-content/70">"Investing entities across all accounts"</p>
                </div>
                <label class="input input-bordered flex items-center gap-2 w-full sm:w-64">
                    <Search attr:class="h-4 w-4 text-base-content/50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search by entity"
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
                                    <th>"Entity"</th>
                                    <th>"Type"</th>
                                    <th>"Jurisdiction"</th>
                                    <th>"Account"</th>
                                    <th></th>
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
                                    key=|profile| profile.id
                                    children=move |profile: ProfileRecord| {
                                        let account = move || {
                                            profile
                                                .user_id
                                                .and_then(|id| {
                                                    users.with(|list| {
                                                        list.iter()
                                                            .find(|u| u.id == id)
                                                            .map(|u| u.email.clone())
                                                    })
                                                })
                                                .unwrap_or_else(|| "-".to_string())
                                        };
                                        let detail = AppRoute::AdminProfileDetail(profile.id).to_path();
                                        view! {
                                            <tr class="hover">
                                                <td class="font-medium">
                                                    {profile
                                                        .entity_name
                                                        .clone()
                                                        .unwrap_or_else(|| "Unnamed entity".to_string())}
                                                </td>
                                                <td>
                                                    {profile
                                                        .profile_type
                                                        .clone()
                                                        .unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td>
                                                    {profile
                                                        .jurisdiction
                                                        .clone()
                                                        .unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td>{account}</td>
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
                                        <td colspan="5" class="text-center py-8 text-base-content/60">
                                            "No profiles match your search."
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
