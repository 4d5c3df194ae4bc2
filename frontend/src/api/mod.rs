//! Backend access.
//!
//! [`PortalApi`] is the app-wide adapter provided through context.
//! [`use_api`] hands a component its own handle whose in-flight requests
//! are aborted when the component is cleaned up.

mod client;
mod error;

pub use client::PortalApi;
pub use error::ApiError;

use gpportal_shared::protocol::ApiRequest;
use gpportal_shared::{UploadMeta, UploadReceipt};
use leptos::prelude::*;
use send_wrapper::SendWrapper;
use web_sys::{AbortSignal, File};

use crate::web::abort::AbortGuard;

/// Component-scoped handle: the shared adapter plus an abort signal tied
/// to the component's lifetime.
///
/// Event handlers and view closures must be `Send`, so the JS signal
/// rides in a [`SendWrapper`]; the app is single threaded.
#[derive(Clone)]
pub struct Api {
    client: PortalApi,
    abort: SendWrapper<AbortSignal>,
}

impl Api {
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        self.client.send(request, Some(&self.abort)).await
    }

    pub async fn upload_document(
        &self,
        file: &File,
        meta: &UploadMeta,
    ) -> Result<UploadReceipt, ApiError> {
        self.client.upload_document(file, meta, Some(&self.abort)).await
    }

    pub async fn admin_upload_for_user(
        &self,
        file: &File,
        recipient_id: i64,
        meta: &UploadMeta,
    ) -> Result<UploadReceipt, ApiError> {
        self.client
            .admin_upload_for_user(file, recipient_id, meta, Some(&self.abort))
            .await
    }

    pub async fn fetch_blob(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        self.client.fetch_blob(path, Some(&self.abort)).await
    }
}

/// Get the shared adapter (must be provided by App).
pub fn use_client() -> PortalApi {
    use_context::<PortalApi>().expect("PortalApi not found in context. Ensure App provides it.")
}

/// Component-scoped API access. Requests still running when the calling
/// component is cleaned up are aborted, so late responses never touch
/// disposed state.
pub fn use_api() -> Api {
    let client = use_client();
    let guard = SendWrapper::new(AbortGuard::new());
    let abort = SendWrapper::new(guard.signal());
    on_cleanup(move || drop(guard.take()));
    Api { client, abort }
}
