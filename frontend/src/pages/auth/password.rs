use leptos::prelude::*;
use leptos::task::spawn_local;

use super::wizard_sync;
use crate::api::{use_client, ApiError};
use crate::auth::{submit_password, use_auth, PasswordOutcome};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Password screen. A wrong password stays here; a vanished account moves
/// the flow to registration.
#[component]
pub fn PasswordPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_client();
    let router = use_router();
    wizard_sync(auth, AppRoute::AuthPassword);

    let email = Signal::derive(move || {
        auth.session
            .with(|s| s.flow().map(|f| f.email.clone()).unwrap_or_default())
    });
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let secret = password.get_untracked();
        if secret.is_empty() {
            set_error_msg.set(Some("Enter your password.".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let client = client.clone();
        spawn_local(async move {
            match submit_password(&auth, &client, secret).await {
                Ok(PasswordOutcome::OtpSent) => {
                    router.navigate(&AppRoute::AuthOtp.to_path());
                }
                Ok(PasswordOutcome::Unknown) => {
                    router.navigate(&AppRoute::AuthRegister.to_path());
                }
                Err(ApiError::Unauthorized) => {
                    set_error_msg.set(Some("Incorrect password. Try again.".to_string()));
                }
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    let on_change_email = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&AppRoute::AuthStart.to_path());
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Welcome back"</h1>
                    <p class="text-base-content/70">
                        "Signing in as " <span class="font-medium">{move || email.get()}</span>
                    </p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Continue".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2 text-base-content/70">
                            <a href="/auth" class="link" on:click=on_change_email>
                                "Use a different email"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
