use gpportal_shared::fmt::date_time;
use gpportal_shared::protocol::ListDocumentsRequest;
use gpportal_shared::{Document, UploadMeta};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::api::use_api;
use crate::components::icons::Upload;
use crate::components::{flash, Toast};
use crate::validate::is_pdf_filename;

/// The investor's own document locker: everything shared with them plus a
/// form to send paperwork back to the GP.
#[component]
pub fn DocumentsPage() -> impl IntoView {
    let api = use_api();

    let (docs, set_docs) = signal(Vec::<Document>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (note, set_note) = signal(Option::<(String, bool)>::None);

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                match api.send(&ListDocumentsRequest).await {
                    Ok(rows) => set_docs.set(rows),
                    Err(err) if err.is_abort() => return,
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_is_loading.set(false);
            });
        }
    };
    load();

    // ---- Upload form ----

    let file_input: NodeRef<html::Input> = NodeRef::new();
    let picked_file = RwSignal::new_local(Option::<web_sys::File>::None);
    let (label, set_label) = signal(String::new());
    let (deal_name, set_deal_name) = signal(String::new());
    let (profile_name, set_profile_name) = signal(String::new());
    let (is_uploading, set_is_uploading) = signal(false);

    let on_pick = move |ev| {
        let input = event_target::<HtmlInputElement>(&ev);
        picked_file.set(input.files().and_then(|list| list.get(0)));
    };

    let on_upload = {
        let api = api.clone();
        let load = load.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(file) = picked_file.get_untracked() else {
                flash(set_note, "Choose a file to upload.".to_string(), true);
                return;
            };
            if !is_pdf_filename(&file.name()) {
                flash(set_note, "Only PDF files are accepted.".to_string(), true);
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
            set_is_uploading.set(true);
            let api = api.clone();
            let load = load.clone();
            spawn_local(async move {
                match api.upload_document(&file, &meta).await {
                    Ok(_) => {
                        flash(set_note, "Document uploaded.".to_string(), false);
                        picked_file.set(None);
                        if let Some(input) = file_input.get_untracked() {
                            input.set_value("");
                        }
                        set_label.set(String::new());
                        set_deal_name.set(String::new());
                        set_profile_name.set(String::new());
                        load();
                    }
                    Err(err) if err.is_abort() => return,
                    Err(err) => flash(set_note, err.to_string(), true),
                }
                set_is_uploading.set(false);
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Documents"</h1>
                <p class="text-base-content/70">"Paperwork shared between you and the GP"</p>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <div class="card bg-base-100 shadow lg:col-span-2">
                    <div class="card-body p-0">
                        <div class="overflow-x-auto">
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"Document"</th>
                                        <th>"Label"</th>
                                        <th>"Deal"</th>
                                        <th>"Uploaded"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || is_loading.get()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8">
                                                <span class="loading loading-spinner text-primary"></span>
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || docs.get()
                                        key=|doc| doc.id
                                        children=move |doc: Document| {
                                            view! {
                                                <tr class="hover">
                                                    <td class="font-medium">{doc.name.clone()}</td>
                                                    <td>
                                                        {doc.label.clone().map(|label| view! {
                                                            <span class="badge badge-ghost">{label}</span>
                                                        })}
                                                    </td>
                                                    <td>{doc.deal_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                                                    <td>
                                                        {doc
                                                            .uploaded_at
                                                            .map(|ts| date_time(&ts))
                                                            .unwrap_or_else(|| "-".to_string())}
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                    <Show when=move || !is_loading.get() && docs.get().is_empty()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/60">
                                                "No documents yet."
                                            </td>
                                        </tr>
                                    </Show>
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow h-fit">
                    <div class="card-body">
                        <h2 class="card-title">"Upload a document"</h2>
                        <form class="space-y-3" on:submit=on_upload>
                            <input
                                type="file"
                                accept=".pdf"
                                class="file-input file-input-bordered w-full"
                                node_ref=file_input
                                on:change=on_pick
                            />
                            <label class="form-control w-full">
                                <div class="label"><span class="label-text">"Label"</span></div>
                                <input
                                    type="text"
                                    class="input input-bordered w-full"
                                    placeholder="e.g. Subscription agreement"
                                    on:input=move |ev| set_label.set(event_target_value(&ev))
                                    prop:value=label
                                />
                            </label>
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
                            <button
                                type="submit"
                                class="btn btn-primary w-full"
                                disabled=move || is_uploading.get()
                            >
                                {move || if is_uploading.get() {
                                    view! { <span class="loading loading-spinner loading-sm"></span> }
                                        .into_any()
                                } else {
                                    view! {
                                        <Upload attr:class="h-4 w-4" />
                                        "Upload"
                                    }
                                        .into_any()
                                }}
                            </button>
                        </form>
                    </div>
                </div>
            </div>

            <Toast note=note />
        </div>
    }
}
