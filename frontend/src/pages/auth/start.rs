use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_client;
use crate::auth::{check_email, start_registration, use_auth, EmailGateOutcome};
use crate::validate::is_valid_email;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Entry screen of the sign-in wizard: collect the email, then route to
/// the password screen or the registration form depending on whether an
/// account exists.
#[component]
pub fn StartPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_client();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let address = email.get_untracked().trim().to_lowercase();
        if !is_valid_email(&address) {
            set_error_msg.set(Some("Enter a valid email address.".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let client = client.clone();
        spawn_local(async move {
            match check_email(&auth, &client, address).await {
                Ok(EmailGateOutcome::Existing) => {
                    router.navigate(&AppRoute::AuthPassword.to_path());
                }
                Ok(EmailGateOutcome::Unknown) => {
                    router.navigate(&AppRoute::AuthRegister.to_path());
                }
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    let on_register = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        start_registration(&auth, email.get_untracked().trim().to_lowercase());
        router.navigate(&AppRoute::AuthRegister.to_path());
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"GP Portal"</h1>
                    <p class="text-base-content/70">"Sign in or create your investor account"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Checking..." }.into_any()
                                } else {
                                    "Continue".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2 text-base-content/70">
                            "New to the portal? "
                            <a href="/auth/register" class="link link-primary" on:click=on_register>
                                "Create an account"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
