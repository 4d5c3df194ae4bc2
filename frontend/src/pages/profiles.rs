use gpportal_shared::protocol::{MyProfileRequest, UpdateProfileRequest};
use gpportal_shared::{ProfileDraft, ProfileRecord};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::{use_auth, AuthEvent};
use crate::components::{flash, Toast};
use crate::validate::{is_valid_email, is_valid_phone};

/// The investing entity on file with the GP. One profile per account.
#[component]
pub fn ProfilesPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();

    let (profile_id, set_profile_id) = signal(Option::<i64>::None);
    let (entity_name, set_entity_name) = signal(String::new());
    let (jurisdiction, set_jurisdiction) = signal(String::new());
    let (tax_classification, set_tax_classification) = signal(String::new());
    let (profile_type, set_profile_type) = signal(String::new());
    let (contact_email, set_contact_email) = signal(String::new());
    let (contact_phone, set_contact_phone) = signal(String::new());

    let (is_loading, set_is_loading) = signal(true);
    let (is_saving, set_is_saving) = signal(false);
    let (note, set_note) = signal(Option::<(String, bool)>::None);

    let fill = move |record: &ProfileRecord| {
        set_profile_id.set(Some(record.id));
        set_entity_name.set(record.entity_name.clone().unwrap_or_default());
        set_jurisdiction.set(record.jurisdiction.clone().unwrap_or_default());
        set_tax_classification.set(record.tax_classification.clone().unwrap_or_default());
        set_profile_type.set(record.profile_type.clone().unwrap_or_default());
        set_contact_email.set(record.contact_email.clone().unwrap_or_default());
        set_contact_phone.set(record.contact_phone.clone().unwrap_or_default());
    };

    {
        let api = api.clone();
        spawn_local(async move {
            match api.send(&MyProfileRequest).await {
                Ok(record) => fill(&record),
                Err(err) if err.is_abort() => return,
                // First save will create the record instead.
                Err(err) => log::warn!("profile load failed: {err}"),
            }
            set_is_loading.set(false);
        });
    }

    let on_save = {
        let api = api.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let name = entity_name.get_untracked().trim().to_string();
            if name.is_empty() {
                flash(set_note, "Entity name is required.".to_string(), true);
                return;
            }
            let email = contact_email.get_untracked().trim().to_string();
            if !email.is_empty() && !is_valid_email(&email) {
                flash(set_note, "Enter a valid contact email.".to_string(), true);
                return;
            }
            let phone = contact_phone.get_untracked().trim().to_string();
            if !phone.is_empty() && !is_valid_phone(&phone) {
                flash(
                    set_note,
                    "Phone numbers need exactly 10 digits.".to_string(),
                    true,
                );
                return;
            }
            let non_empty = |s: String| {
                let s = s.trim().to_string();
                (!s.is_empty()).then_some(s)
            };
            let draft = ProfileDraft {
                entity_name: name,
                jurisdiction: non_empty(jurisdiction.get_untracked()),
                tax_classification: non_empty(tax_classification.get_untracked()),
                profile_type: non_empty(profile_type.get_untracked()),
                contact_email: non_empty(email),
                contact_phone: non_empty(phone),
            };

            let existing_id = profile_id.get_untracked();
            set_is_saving.set(true);
            let api = api.clone();
            spawn_local(async move {
                let saved = match existing_id {
                    Some(id) => api.send(&UpdateProfileRequest { id, draft }).await,
                    None => api.send(&draft).await,
                };
                match saved {
                    Ok(record) => {
                        fill(&record);
                        // Keep the header greeting and contact line current.
                        auth.apply(AuthEvent::ProfileLoaded(record));
                        flash(set_note, "Profile saved.".to_string(), false);
                    }
                    Err(err) if err.is_abort() => return,
                    Err(err) => flash(set_note, err.to_string(), true),
                }
                set_is_saving.set(false);
            });
        }
    };

    let text_field = move |label: &'static str,
                           placeholder: &'static str,
                           value: ReadSignal<String>,
                           set_value: WriteSignal<String>| {
        view! {
            <label class="form-control w-full">
                <div class="label"><span class="label-text">{label}</span></div>
                <input
                    type="text"
                    class="input input-bordered w-full"
                    placeholder=placeholder
                    on:input=move |ev| set_value.set(event_target_value(&ev))
                    prop:value=value
                />
            </label>
        }
    };

    view! {
        <div class="space-y-6 max-w-3xl">
            <div>
                <h1 class="text-2xl font-bold">"Investor profile"</h1>
                <p class="text-base-content/70">
                    "How your investing entity appears on subscription paperwork"
                </p>
            </div>

            <Show when=move || is_loading.get()>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || !is_loading.get()>
                <form class="card bg-base-100 shadow" on:submit=on_save.clone()>
                    <div class="card-body space-y-2">
                        <label class="form-control w-full">
                            <div class="label"><span class="label-text">"Entity name"</span></div>
                            <input
                                type="text"
                                required
                                class="input input-bordered w-full"
                                placeholder="Example Holdings LLC"
                                on:input=move |ev| set_entity_name.set(event_target_value(&ev))
                                prop:value=entity_name
                            />
                        </label>
                        <div class="grid grid-cols-1 sm:grid-cols-2 gap-x-4">
                            {text_field("Jurisdiction", "Delaware", jurisdiction, set_jurisdiction)}
                            {text_field(
                                "Tax classification",
                                "Partnership",
                                tax_classification,
                                set_tax_classification,
                            )}
                            {text_field("Profile type", "LLC", profile_type, set_profile_type)}
                            {text_field(
                                "Contact email",
                                "ops@example.com",
                                contact_email,
                                set_contact_email,
                            )}
                            {text_field("Contact phone", "5551234567", contact_phone, set_contact_phone)}
                        </div>
                        <div class="card-actions justify-end mt-4">
                            <button type="submit" class="btn btn-primary" disabled=move || is_saving.get()>
                                {move || if is_saving.get() {
                                    view! { <span class="loading loading-spinner loading-sm"></span> }
                                        .into_any()
                                } else {
                                    "Save profile".into_any()
                                }}
                            </button>
                        </div>
                    </div>
                </form>
            </Show>

            <Toast note=note />
        </div>
    }
}
