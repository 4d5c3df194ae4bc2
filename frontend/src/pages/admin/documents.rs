use gpportal_shared::fmt::date_time;
use gpportal_shared::protocol::{
    admin_document_download_path, admin_document_view_path, AdminListDocumentsRequest,
    ListUsersRequest,
};
use gpportal_shared::{Document, UserSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::{Download, Eye};
use crate::components::{flash, Toast};
use crate::web::download::{open_in_new_tab, save_as};

mod upload_panel;

use upload_panel::UploadPanel;

const PDF_MIME: &str = "application/pdf";

/// Every document in the portal, with authenticated preview/download and
/// the on-behalf upload panel.
#[component]
pub fn AdminDocumentsPage() -> impl IntoView {
    let api = use_api();

    let (docs, set_docs) = signal(Vec::<Document>::new());
    let (users, set_users) = signal(Vec::<UserSummary>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (note, set_note) = signal(Option::<(String, bool)>::None);

    let load_docs = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                match api.send(&AdminListDocumentsRequest).await {
                    Ok(rows) => set_docs.set(rows),
                    Err(err) if err.is_abort() => return,
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_is_loading.set(false);
            });
        }
    };
    load_docs();

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

    let on_uploaded = {
        let load_docs = load_docs.clone();
        move |_| load_docs()
    };

    // Blob endpoints need the bearer header, so plain <a href> will not do;
    // the bytes are fetched and handed to the browser afterwards.
    let row = {
        let api = api.clone();
        move |doc: Document| {
            let recipient = move || {
                doc.recipient_user_id.and_then(|id| {
                    users.with(|list| list.iter().find(|u| u.id == id).map(|u| u.email.clone()))
                })
            };
            let on_view = {
                let api = api.clone();
                let doc_id = doc.id;
                move |_| {
                    let api = api.clone();
                    spawn_local(async move {
                        match api.fetch_blob(&admin_document_view_path(doc_id)).await {
                            Ok(bytes) => open_in_new_tab(&bytes, PDF_MIME),
                            Err(err) if err.is_abort() => {}
                            Err(err) => flash(set_note, err.to_string(), true),
                        }
                    });
                }
            };
            let on_download = {
                let api = api.clone();
                let doc_id = doc.id;
                let file_name = doc.name.clone();
                move |_| {
                    let api = api.clone();
                    let file_name = file_name.clone();
                    spawn_local(async move {
                        match api.fetch_blob(&admin_document_download_path(doc_id)).await {
                            Ok(bytes) => save_as(&bytes, &file_name, PDF_MIME),
                            Err(err) if err.is_abort() => {}
                            Err(err) => flash(set_note, err.to_string(), true),
                        }
                    });
                }
            };
            view! {
                <tr class="hover">
                    <td class="font-medium">{doc.name.clone()}</td>
                    <td>
                        {doc.label.clone().map(|label| view! {
                            <span class="badge badge-ghost">{label}</span>
                        })}
                    </td>
                    <td>{doc.deal_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                    <td>{doc.uploaded_by_email.clone().unwrap_or_else(|| "-".to_string())}</td>
                    <td>{move || recipient().unwrap_or_else(|| "-".to_string())}</td>
                    <td>
                        {doc
                            .uploaded_at
                            .map(|ts| date_time(&ts))
                            .unwrap_or_else(|| "-".to_string())}
                    </td>
                    <td>
                        <div class="flex justify-end gap-1">
                            <button class="btn btn-ghost btn-xs" title="Open in a new tab" on:click=on_view>
                                <Eye attr:class="h-4 w-4" />
                            </button>
                            <button class="btn btn-ghost btn-xs" title="Download" on:click=on_download>
                                <Download attr:class="h-4 w-4" />
                            </button>
                        </div>
                    </td>
                </tr>
            }
        }
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Documents"</h1>
                <p class="text-base-content/70">"All investor paperwork across the portal"</p>
            </div>

            <UploadPanel users=users on_uploaded=on_uploaded />

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
                                    <th>"Document"</th>
                                    <th>"Label"</th>
                                    <th>"Deal"</th>
                                    <th>"Uploaded by"</th>
                                    <th>"Recipient"</th>
                                    <th>"Uploaded"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || is_loading.get()>
                                    <tr>
                                        <td colspan="7" class="text-center py-8">
                                            <span class="loading loading-spinner text-primary"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <For each=move || docs.get() key=|doc| doc.id children=row />
                                <Show when=move || !is_loading.get() && docs.get().is_empty()>
                                    <tr>
                                        <td colspan="7" class="text-center py-8 text-base-content/60">
                                            "No documents uploaded yet."
                                        </td>
                                    </tr>
                                </Show>
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            <Toast note=note />
        </div>
    }
}
