use gpportal_shared::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::stage_route;
use crate::api::use_client;
use crate::auth::{register, use_auth, AuthEvent, AuthStage, RegisterOutcome};
use crate::validate::{is_valid_email, password_error};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Registration form. The email is prefilled from the flow when the entry
/// screen sent the user here; a taken email flips the flow to the password
/// screen instead.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_client();
    let router = use_router();

    // A direct visit starts a fresh flow; an existing flow at another
    // stage moves the user to that screen.
    Effect::new(move |_| {
        let session = auth.session.get();
        if session.is_authenticated() {
            return;
        }
        match session.flow() {
            None => auth.apply(AuthEvent::RegistrationStarted {
                email: String::new(),
            }),
            Some(flow) if flow.stage != AuthStage::Register => {
                router.navigate(&stage_route(flow.stage).to_path());
            }
            Some(_) => {}
        }
    });

    let initial_email = auth
        .session
        .with_untracked(|s| s.flow().map(|f| f.email.clone()).unwrap_or_default());
    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(initial_email);
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let first = first_name.get_untracked().trim().to_string();
        let last = last_name.get_untracked().trim().to_string();
        let address = email.get_untracked().trim().to_lowercase();
        let secret = password.get_untracked();

        if first.is_empty() || last.is_empty() {
            set_error_msg.set(Some("Enter your first and last name.".to_string()));
            return;
        }
        if !is_valid_email(&address) {
            set_error_msg.set(Some("Enter a valid email address.".to_string()));
            return;
        }
        if let Some(problem) = password_error(&secret) {
            set_error_msg.set(Some(problem.to_string()));
            return;
        }
        if secret != confirm.get_untracked() {
            set_error_msg.set(Some("Passwords do not match.".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let request = RegisterRequest {
            first_name: first,
            last_name: last,
            email: address,
            password: secret,
        };
        let client = client.clone();
        spawn_local(async move {
            match register(&auth, &client, request).await {
                Ok(RegisterOutcome::OtpSent) => {
                    router.navigate(&AppRoute::AuthOtp.to_path());
                }
                Ok(RegisterOutcome::ExistingAccount) => {
                    // The flow already moved to the password stage.
                    router.navigate(&AppRoute::AuthPassword.to_path());
                }
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    let on_signin = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&AppRoute::AuthStart.to_path());
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create your account"</h1>
                    <p class="text-base-content/70">"Access deals and documents from your GP"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="grid grid-cols-2 gap-3">
                            <div class="form-control">
                                <label class="label" for="first-name">
                                    <span class="label-text">"First name"</span>
                                </label>
                                <input
                                    id="first-name"
                                    type="text"
                                    on:input=move |ev| set_first_name.set(event_target_value(&ev))
                                    prop:value=first_name
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="last-name">
                                    <span class="label-text">"Last name"</span>
                                </label>
                                <input
                                    id="last-name"
                                    type="text"
                                    on:input=move |ev| set_last_name.set(event_target_value(&ev))
                                    prop:value=last_name
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="reg-email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="reg-password"
                                type="password"
                                placeholder="At least 8 characters"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-confirm">
                                <span class="label-text">"Confirm password"</span>
                            </label>
                            <input
                                id="reg-confirm"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_confirm.set(event_target_value(&ev))
                                prop:value=confirm
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2 text-base-content/70">
                            "Already have an account? "
                            <a href="/auth" class="link link-primary" on:click=on_signin>
                                "Sign in"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
