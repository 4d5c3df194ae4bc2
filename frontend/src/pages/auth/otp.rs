use leptos::prelude::*;
use leptos::task::spawn_local;

use super::wizard_sync;
use crate::api::{use_client, ApiError};
use crate::auth::{use_auth, verify_otp, AuthEvent};
use crate::validate::complete_otp;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

const CODE_LEN: usize = 6;

/// One-time code screen: six boxes with auto-advance. A rejected code
/// stays here; a valid one flips the session and the router takes over.
#[component]
pub fn OtpPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_client();
    let router = use_router();
    wizard_sync(auth, AppRoute::AuthOtp);

    let email = Signal::derive(move || {
        auth.session
            .with(|s| s.flow().map(|f| f.email.clone()).unwrap_or_default())
    });
    let (digits, set_digits) = signal(vec![String::new(); CODE_LEN]);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // A shared literal would alias one slot; each box needs its own ref.
    let inputs: [NodeRef<leptos::html::Input>; CODE_LEN] =
        std::array::from_fn(|_| NodeRef::new());

    let focus_box = move |index: usize| {
        if let Some(input) = inputs.get(index).and_then(|r| r.get_untracked()) {
            let _ = input.focus();
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(code) = digits.with_untracked(|d| complete_otp(d)) else {
            set_error_msg.set(Some("Enter the 6-digit code from your email.".to_string()));
            return;
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let client = client.clone();
        spawn_local(async move {
            match verify_otp(&auth, &client, code).await {
                // The router's access effect lands on the dashboard.
                Ok(()) => {}
                Err(ApiError::Unauthorized) => {
                    set_error_msg.set(Some("Invalid or expired code. Try again.".to_string()));
                }
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    let on_back = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        auth.apply(AuthEvent::CodeAbandoned);
        router.navigate(&AppRoute::AuthPassword.to_path());
    };

    let boxes = (0..CODE_LEN)
        .map(|index| {
            let node = inputs[index];
            view! {
                <input
                    type="text"
                    inputmode="numeric"
                    maxlength="1"
                    class="input input-bordered w-12 h-14 text-center text-xl"
                    node_ref=node
                    prop:value=move || digits.with(|d| d[index].clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        let digit = value
                            .chars()
                            .rev()
                            .find(|c| c.is_ascii_digit())
                            .map(|c| c.to_string())
                            .unwrap_or_default();
                        let advance = !digit.is_empty();
                        set_digits.update(|d| d[index] = digit);
                        if advance && index + 1 < CODE_LEN {
                            focus_box(index + 1);
                        }
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Backspace"
                            && index > 0
                            && digits.with_untracked(|d| d[index].is_empty())
                        {
                            focus_box(index - 1);
                        }
                    }
                />
            }
        })
        .collect_view();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Check your email"</h1>
                    <p class="text-base-content/70">
                        "We sent a 6-digit code to "
                        <span class="font-medium">{move || email.get()}</span>
                    </p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="flex justify-center gap-2">{boxes}</div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Verifying..." }.into_any()
                                } else {
                                    "Verify".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2 text-base-content/70">
                            "Didn't get it? "
                            <a href="/auth/password" class="link" on:click=on_back>
                                "Re-enter your password to resend"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
