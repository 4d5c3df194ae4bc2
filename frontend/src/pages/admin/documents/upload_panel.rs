use gpportal_shared::{UploadMeta, UserSummary};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::api::use_api;
use crate::components::icons::{RefreshCw, Upload};
use crate::components::{flash, Toast};
use crate::upload::{AdminUploadSink, BatchReport, TaskState, UploadBatch, UploadItem};
use crate::validate::is_pdf_filename;

/// On-behalf uploads as an explicit task list: every picked file goes to
/// every picked recipient, one request per pair, and a retry re-runs only
/// the pairs that failed.
#[component]
pub fn UploadPanel(
    #[prop(into)] users: Signal<Vec<UserSummary>>,
    #[prop(into)] on_uploaded: Callback<()>,
) -> impl IntoView {
    let api = use_api();

    let file_input: NodeRef<html::Input> = NodeRef::new();
    let files = RwSignal::new_local(Vec::<web_sys::File>::new());
    let (selected, set_selected) = signal(Vec::<i64>::new());

    let (label, set_label) = signal(String::new());
    let (deal_name, set_deal_name) = signal(String::new());
    let (profile_name, set_profile_name) = signal(String::new());
    let (note, set_note) = signal(Option::<(String, bool)>::None);

    // The live batch holds browser file handles, so it stays thread-local;
    // the UI renders from plain snapshots instead.
    let batch = StoredValue::new_local(Option::<UploadBatch<AdminUploadSink>>::None);
    let (tasks, set_tasks) = signal(Vec::new());
    let (report, set_report) = signal(Option::<BatchReport>::None);
    let (is_running, set_is_running) = signal(false);

    let on_pick = move |ev| {
        let input = event_target::<HtmlInputElement>(&ev);
        let mut picked = Vec::new();
        if let Some(list) = input.files() {
            for index in 0..list.length() {
                if let Some(file) = list.get(index) {
                    picked.push(file);
                }
            }
        }
        files.set(picked);
    };

    let toggle_recipient = move |id: i64| {
        set_selected.update(|ids| {
            if let Some(position) = ids.iter().position(|&existing| existing == id) {
                ids.remove(position);
            } else {
                ids.push(id);
            }
        });
    };

    let run_batch = move || {
        set_is_running.set(true);
        spawn_local(async move {
            let mut taken = None;
            if batch.try_update_value(|slot| taken = slot.take()).is_none() {
                return;
            }
            let Some(mut active) = taken else {
                set_is_running.set(false);
                return;
            };
            let outcome = active
                .run(|snapshot| {
                    let _ = set_tasks.try_set(snapshot);
                })
                .await;
            let _ = batch.try_set_value(Some(active));
            // A failed write means the page is gone; stop quietly.
            if set_report.try_set(Some(outcome.clone())).is_some() {
                return;
            }
            if outcome.all_succeeded() {
                flash(
                    set_note,
                    format!("All {} uploads completed.", outcome.total),
                    false,
                );
                files.set(Vec::new());
                set_selected.set(Vec::new());
                if let Some(input) = file_input.get_untracked() {
                    input.set_value("");
                }
            } else {
                flash(
                    set_note,
                    format!("{} of {} uploads failed.", outcome.failed.len(), outcome.total),
                    true,
                );
            }
            if !outcome.succeeded.is_empty() {
                on_uploaded.run(());
            }
            set_is_running.set(false);
        });
    };

    let on_start = {
        let api = api.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if is_running.get_untracked() {
                return;
            }
            let items: Vec<UploadItem<web_sys::File>> = files.with_untracked(|picked| {
                picked
                    .iter()
                    .map(|file| UploadItem {
                        file: file.clone(),
                        name: file.name(),
                    })
                    .collect()
            });
            if items.is_empty() {
                flash(set_note, "Choose at least one file.".to_string(), true);
                return;
            }
            if let Some(bad) = items.iter().find(|item| !is_pdf_filename(&item.name)) {
                flash(set_note, format!("{} is not a PDF.", bad.name), true);
                return;
            }
            let recipients: Vec<UserSummary> = selected.with_untracked(|ids| {
                users.with_untracked(|list| {
                    list.iter()
                        .filter(|user| ids.contains(&user.id))
                        .cloned()
                        .collect()
                })
            });
            if recipients.is_empty() {
                flash(set_note, "Pick at least one recipient.".to_string(), true);
                return;
            }
            let non_empty = |s: String| {
                let s = s.trim().to_string();
                (!s.is_empty()).then_some(s)
            };
            let meta = UploadMeta {
                label: non_empty(label.get_untracked()),
                deal_name: non_empty(deal_name.get_untracked()),
                profile_name: non_empty(profile_name.get_untracked()),
            };
            let sink = AdminUploadSink::new(api.clone());
            let plan = UploadBatch::new(sink, items, recipients, meta);
            set_tasks.set(plan.snapshots());
            set_report.set(None);
            batch.set_value(Some(plan));
            run_batch();
        }
    };

    let on_retry = move |_| {
        if is_running.get_untracked() {
            return;
        }
        batch.update_value(|slot| {
            if let Some(active) = slot {
                active.reset_failed();
            }
        });
        run_batch();
    };

    let state_cell = |state: &TaskState| match state {
        TaskState::Pending => view! { <span class="badge badge-ghost">"Pending"</span> }.into_any(),
        TaskState::InFlight => {
            view! { <span class="loading loading-spinner loading-xs"></span> }.into_any()
        }
        TaskState::Done(_) => view! { <span class="badge badge-success">"Done"</span> }.into_any(),
        TaskState::Failed(reason) => {
            let reason = reason.clone();
            view! {
                <div>
                    <span class="badge badge-error">"Failed"</span>
                    <div class="text-xs text-error mt-1">{reason}</div>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"Upload for investors"</h2>
                <form class="grid grid-cols-1 lg:grid-cols-2 gap-6" on:submit=on_start>
                    <div class="space-y-3">
                        <input
                            type="file"
                            multiple
                            accept=".pdf"
                            class="file-input file-input-bordered w-full"
                            node_ref=file_input
                            on:change=on_pick
                        />
                        <div class="text-sm text-base-content/60">
                            {move || {
                                let count = files.with(|f| f.len());
                                if count == 0 {
                                    "PDF only. Every file goes to every selected recipient."
                                        .to_string()
                                } else {
                                    format!("{count} file(s) selected")
                                }
                            }}
                        </div>
                        <label class="form-control w-full">
                            <div class="label"><span class="label-text">"Label"</span></div>
                            <input
                                type="text"
                                class="input input-bordered w-full"
                                placeholder="e.g. K-1"
                                on:input=move |ev| set_label.set(event_target_value(&ev))
                                prop:value=label
                            />
                        </label>
                        <div class="grid grid-cols-2 gap-x-4">
                            <label class="form-control w-full">
                                <div class="label"><span class="label-text">"Deal"</span></div>
                                <input
                                    type="text"
                                    class="input input-bordered w-full"
                                    placeholder="Optional"
                                    on:input=move |ev| set_deal_name.set(event_target_value(&ev))
                                    prop:value=deal_name
                                />
                            </label>
                            <label class="form-control w-full">
                                <div class="label"><span class="label-text">"Profile"</span></div>
                                <input
                                    type="text"
                                    class="input input-bordered w-full"
                                    placeholder="Optional"
                                    on:input=move |ev| set_profile_name.set(event_target_value(&ev))
                                    prop:value=profile_name
                                />
                            </label>
                        </div>
                        <button
                            type="submit"
                            class="btn btn-primary w-full"
                            disabled=move || is_running.get()
                        >
                            {move || if is_running.get() {
                                view! { <span class="loading loading-spinner loading-sm"></span> }
                                    .into_any()
                            } else {
                                view! {
                                    <Upload attr:class="h-4 w-4" />
                                    "Start uploads"
                                }
                                    .into_any()
                            }}
                        </button>
                    </div>

                    <div>
                        <div class="label"><span class="label-text">"Recipients"</span></div>
                        <div class="max-h-64 overflow-y-auto rounded-box border border-base-300 p-2 space-y-1">
                            <For
                                each=move || users.get()
                                key=|user| user.id
                                children=move |user: UserSummary| {
                                    let id = user.id;
                                    view! {
                                        <label class="label cursor-pointer justify-start gap-3 py-1">
                                            <input
                                                type="checkbox"
                                                class="checkbox checkbox-sm"
                                                prop:checked=move || selected.with(|ids| ids.contains(&id))
                                                on:change=move |_| toggle_recipient(id)
                                            />
                                            <span class="label-text">{user.email.clone()}</span>
                                        </label>
                                    }
                                }
                            />
                            <Show when=move || users.get().is_empty()>
                                <div class="text-sm text-base-content/60 p-2">
                                    "No investors found."
                                </div>
                            </Show>
                        </div>
                    </div>
                </form>

                <Show when=move || !tasks.get().is_empty()>
                    <div class="divider my-2"></div>
                    <div class="flex items-center justify-between">
                        <h3 class="font-semibold">"Upload tasks"</h3>
                        <Show when=move || {
                            !is_running.get()
                                && report.get().is_some_and(|r| !r.failed.is_empty())
                        }>
                            <button class="btn btn-warning btn-sm gap-2" on:click=on_retry>
                                <RefreshCw attr:class="h-4 w-4" />
                                "Retry failed"
                            </button>
                        </Show>
                    </div>
                    <div class="overflow-x-auto">
                        <table class="table table-sm">
                            <thead>
                                <tr>
                                    <th>"File"</th>
                                    <th>"Recipient"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    tasks
                                        .get()
                                        .iter()
                                        .map(|task| {
                                            view! {
                                                <tr>
                                                    <td>{task.file_name.clone()}</td>
                                                    <td>{task.recipient.email.clone()}</td>
                                                    <td>{state_cell(&task.state)}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>
                </Show>
            </div>
        </div>

        <Toast note=note />
    }
}
