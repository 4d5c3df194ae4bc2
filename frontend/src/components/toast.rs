//! Transient corner notification: (message, is_error) pairs that clear
//! themselves after a few seconds.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::components::icons::{CircleAlert, CircleCheck};

const TOAST_MILLIS: u32 = 3_000;

/// Set a notification and schedule its dismissal. The timer may outlive
/// the owning component, so the clear is a try_set.
pub fn flash(set_note: WriteSignal<Option<(String, bool)>>, message: impl Into<String>, is_error: bool) {
    set_note.set(Some((message.into(), is_error)));
    Timeout::new(TOAST_MILLIS, move || {
        let _ = set_note.try_set(None);
    })
    .forget();
}

#[component]
pub fn Toast(note: ReadSignal<Option<(String, bool)>>) -> impl IntoView {
    view! {
        <Show when=move || note.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                {move || {
                    let (message, is_error) = note.get().unwrap_or_default();
                    if is_error {
                        view! {
                            <div class="alert alert-error shadow-lg">
                                <CircleAlert attr:class="h-5 w-5" />
                                <span>{message}</span>
                            </div>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="alert alert-success shadow-lg">
                                <CircleCheck attr:class="h-5 w-5" />
                                <span>{message}</span>
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </Show>
    }
}
