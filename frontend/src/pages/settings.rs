use gpportal_shared::Role;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::{flash, Toast};
use crate::validate::{is_valid_email, is_valid_phone, password_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Account,
    Security,
}

/// Account preferences. Everything here stays on the client; the backend
/// has no settings endpoint yet.
#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();

    let (tab, set_tab) = signal(Tab::Account);
    let (note, set_note) = signal(Option::<(String, bool)>::None);

    let role_label = move || {
        auth.session.with(|s| match s.role() {
            Some(Role::Admin) => "Administrator",
            _ => "Investor",
        })
    };

    // ---- Account tab ----

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (phone, set_phone) = signal(String::new());

    let on_save_account = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if first_name.get_untracked().trim().is_empty()
            || last_name.get_untracked().trim().is_empty()
        {
            flash(
                set_note,
                "First and last name are required.".to_string(),
                true,
            );
            return;
        }
        let email = email.get_untracked();
        if !email.trim().is_empty() && !is_valid_email(email.trim()) {
            flash(set_note, "Enter a valid email address.".to_string(), true);
            return;
        }
        let phone = phone.get_untracked();
        if !phone.trim().is_empty() && !is_valid_phone(phone.trim()) {
            flash(
                set_note,
                "Phone numbers need exactly 10 digits.".to_string(),
                true,
            );
            return;
        }
        flash(set_note, "Settings saved.".to_string(), false);
    };

    // ---- Security tab ----

    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());

    let on_save_password = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let password = new_password.get_untracked();
        if let Some(problem) = password_error(&password) {
            flash(set_note, problem.to_string(), true);
            return;
        }
        if password != confirm_password.get_untracked() {
            flash(set_note, "Passwords do not match.".to_string(), true);
            return;
        }
        set_new_password.set(String::new());
        set_confirm_password.set(String::new());
        flash(set_note, "Password updated.".to_string(), false);
    };

    view! {
        <div class="space-y-6 max-w-2xl">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-2xl font-bold">"Settings"</h1>
                    <p class="text-base-content/70">"Your account preferences"</p>
                </div>
                <span class="badge badge-outline">{role_label}</span>
            </div>

            <div role="tablist" class="tabs tabs-boxed w-fit">
                <a
                    role="tab"
                    class="tab"
                    class:tab-active=move || tab.get() == Tab::Account
                    on:click=move |_| set_tab.set(Tab::Account)
                >
                    "Account"
                </a>
                <a
                    role="tab"
                    class="tab"
                    class:tab-active=move || tab.get() == Tab::Security
                    on:click=move |_| set_tab.set(Tab::Security)
                >
                    "Security"
                </a>
            </div>

            <Show when=move || tab.get() == Tab::Account>
                <form class="card bg-base-100 shadow" on:submit=on_save_account>
                    <div class="card-body space-y-2">
                        <div class="grid grid-cols-1 sm:grid-cols-2 gap-x-4">
                            <label class="form-control w-full">
                                <div class="label"><span class="label-text">"First name"</span></div>
                                <input
                                    type="text"
                                    required
                                    class="input input-bordered w-full"
                                    on:input=move |ev| set_first_name.set(event_target_value(&ev))
                                    prop:value=first_name
                                />
                            </label>
                            <label class="form-control w-full">
                                <div class="label"><span class="label-text">"Last name"</span></div>
                                <input
                                    type="text"
                                    required
                                    class="input input-bordered w-full"
                                    on:input=move |ev| set_last_name.set(event_target_value(&ev))
                                    prop:value=last_name
                                />
                            </label>
                        </div>
                        <label class="form-control w-full">
                            <div class="label"><span class="label-text">"Email"</span></div>
                            <input
                                type="email"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                            />
                        </label>
                        <label class="form-control w-full">
                            <div class="label"><span class="label-text">"Phone"</span></div>
                            <input
                                type="tel"
                                class="input input-bordered w-full"
                                placeholder="5551234567"
                                on:input=move |ev| set_phone.set(event_target_value(&ev))
                                prop:value=phone
                            />
                        </label>
                        <div class="card-actions justify-end mt-4">
                            <button type="submit" class="btn btn-primary">"Save"</button>
                        </div>
                    </div>
                </form>
            </Show>

            <Show when=move || tab.get() == Tab::Security>
                <form class="card bg-base-100 shadow" on:submit=on_save_password>
                    <div class="card-body space-y-2">
                        <label class="form-control w-full">
                            <div class="label"><span class="label-text">"New password"</span></div>
                            <input
                                type="password"
                                required
                                class="input input-bordered w-full"
                                on:input=move |ev| set_new_password.set(event_target_value(&ev))
                                prop:value=new_password
                            />
                        </label>
                        <label class="form-control w-full">
                            <div class="label"><span class="label-text">"Confirm password"</span></div>
                            <input
                                type="password"
                                required
                                class="input input-bordered w-full"
                                on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                                prop:value=confirm_password
                            />
                        </label>
                        <div class="card-actions justify-end mt-4">
                            <button type="submit" class="btn btn-primary">"Update password"</button>
                        </div>
                    </div>
                </form>
            </Show>

            <Toast note=note />
        </div>
    }
}
