//! Blob handoff to the browser: open a fetched PDF in a tab or save it.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Url};

/// Wrap raw bytes in an object URL. The caller must revoke it.
fn object_url(bytes: &[u8], mime: &str) -> Result<String, JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).into());
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    Url::create_object_url_with_blob(&blob)
}

/// Open the bytes as a document in a new tab. The object URL is revoked on
/// a timer so the tab has time to load it.
pub fn open_in_new_tab(bytes: &[u8], mime: &str) {
    let Ok(url) = object_url(bytes, mime) else {
        log::error!("object URL creation failed");
        return;
    };
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(&url, "_blank");
    }
    revoke_later(url);
}

/// Trigger a download under the given filename.
pub fn save_as(bytes: &[u8], filename: &str, mime: &str) {
    let Ok(url) = object_url(bytes, mime) else {
        log::error!("object URL creation failed");
        return;
    };
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Ok(element) = document.create_element("a") {
            if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
                anchor.set_href(&url);
                anchor.set_download(filename);
                anchor.click();
            }
        }
    }
    revoke_later(url);
}

fn revoke_later(url: String) {
    gloo_timers::callback::Timeout::new(10_000, move || {
        let _ = Url::revoke_object_url(&url);
    })
    .forget();
}
