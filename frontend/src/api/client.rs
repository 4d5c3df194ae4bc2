//! The portal's HTTP adapter.
//!
//! Single choke point between the app and the backend: every JSON endpoint
//! goes through [`PortalApi::send`], uploads and blob fetches through their
//! dedicated methods. The adapter attaches the bearer token persisted for
//! this tab, normalises error bodies and raises the unauthorized event the
//! session store consumes.

use gloo_net::http::{Request, Response};
use gpportal_shared::protocol::{ApiRequest, HttpMethod, ADMIN_UPLOAD_PATH, DOCUMENT_UPLOAD_PATH};
use gpportal_shared::{UploadMeta, UploadReceipt, BEARER_PREFIX, HEADER_AUTHORIZATION};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use web_sys::{AbortSignal, File, FormData};

use super::error::{parse_detail, ApiError};

#[derive(Clone)]
pub struct PortalApi {
    base_url: String,
    unauthorized: RwSignal<u64>,
}

impl PortalApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            unauthorized: RwSignal::new(0),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&crate::config::api_base_url())
    }

    /// Bumped once per rejected token. The session store is the only
    /// consumer; nothing else reacts to a 401 globally.
    pub fn unauthorized_events(&self) -> ReadSignal<u64> {
        self.unauthorized.read_only()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        crate::auth::stored_session().map(|s| s.token)
    }

    /// Issue one protocol request. The abort signal, when given, cancels
    /// the fetch as soon as the owning component is cleaned up.
    pub async fn send<R: ApiRequest>(
        &self,
        request: &R,
        abort: Option<&AbortSignal>,
    ) -> Result<R::Response, ApiError> {
        let url = self.url(&request.path());
        let mut builder = match R::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
        };
        builder = builder.abort_signal(abort);
        if let Some(token) = self.bearer() {
            builder = builder.header(HEADER_AUTHORIZATION, &format!("{BEARER_PREFIX}{token}"));
        }

        let result = match R::METHOD {
            HttpMethod::Get => builder.send().await,
            _ => match builder.json(request) {
                Ok(built) => built.send().await,
                Err(err) => return Err(ApiError::Request(err.to_string())),
            },
        };
        let response = result.map_err(fetch_error)?;
        self.decode(response).await
    }

    /// Upload a PDF on the caller's own behalf.
    pub async fn upload_document(
        &self,
        file: &File,
        meta: &UploadMeta,
        abort: Option<&AbortSignal>,
    ) -> Result<UploadReceipt, ApiError> {
        let form = multipart_form(file, meta)?;
        self.post_form(DOCUMENT_UPLOAD_PATH, form, abort).await
    }

    /// Admin-only: upload a PDF into another user's document list.
    pub async fn admin_upload_for_user(
        &self,
        file: &File,
        recipient_id: i64,
        meta: &UploadMeta,
        abort: Option<&AbortSignal>,
    ) -> Result<UploadReceipt, ApiError> {
        let form = multipart_form(file, meta)?;
        form.append_with_str("recipient_user_id", &recipient_id.to_string())
            .map_err(|_| ApiError::Request("form field rejected".into()))?;
        self.post_form(ADMIN_UPLOAD_PATH, form, abort).await
    }

    /// Fetch an authenticated binary body (document view and download).
    pub async fn fetch_blob(
        &self,
        path: &str,
        abort: Option<&AbortSignal>,
    ) -> Result<Vec<u8>, ApiError> {
        let mut builder = Request::get(&self.url(path)).abort_signal(abort);
        if let Some(token) = self.bearer() {
            builder = builder.header(HEADER_AUTHORIZATION, &format!("{BEARER_PREFIX}{token}"));
        }
        let response = builder.send().await.map_err(fetch_error)?;
        if !response.ok() {
            return Err(self.error_for(response).await);
        }
        response
            .binary()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn post_form(
        &self,
        path: &str,
        form: FormData,
        abort: Option<&AbortSignal>,
    ) -> Result<UploadReceipt, ApiError> {
        let mut builder = Request::post(&self.url(path)).abort_signal(abort);
        if let Some(token) = self.bearer() {
            builder = builder.header(HEADER_AUTHORIZATION, &format!("{BEARER_PREFIX}{token}"));
        }
        // No explicit Content-Type: the browser supplies the multipart
        // boundary itself.
        let request = builder
            .body(form)
            .map_err(|err| ApiError::Request(err.to_string()))?;
        let response = request.send().await.map_err(fetch_error)?;
        self.decode(response).await
    }

    /// Shared tail of every call: status mapping, the 401 event, decode.
    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(self.error_for(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn error_for(&self, response: Response) -> ApiError {
        let status = response.status();
        if status == 401 {
            self.unauthorized.update(|n| *n += 1);
        }
        let detail = match response.text().await {
            Ok(text) if !text.trim().is_empty() => {
                parse_detail(&text).unwrap_or(text)
            }
            _ => format!("HTTP {status}"),
        };
        ApiError::from_status(status, detail)
    }
}

fn multipart_form(file: &File, meta: &UploadMeta) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|_| ApiError::Request("FormData unavailable".into()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Request("file rejected".into()))?;
    for (key, value) in [
        ("label", &meta.label),
        ("deal_name", &meta.deal_name),
        ("profile_name", &meta.profile_name),
    ] {
        if let Some(value) = value {
            form.append_with_str(key, value)
                .map_err(|_| ApiError::Request("form field rejected".into()))?;
        }
    }
    Ok(form)
}

/// Distinguish an abort (the component went away) from a real transport
/// failure.
fn fetch_error(err: gloo_net::Error) -> ApiError {
    match err {
        gloo_net::Error::JsError(js) if js.name == "AbortError" => ApiError::Aborted,
        other => ApiError::Network(other.to_string()),
    }
}
