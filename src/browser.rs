//! Browser-side implementations of the core seams: token persistence in
//! `localStorage`, PDF saving through an anchor download, file reading, and a
//! reactive state handle.

use equiviz_core::config::{API_URL_ENV, DEFAULT_API_URL};
use equiviz_core::{
    ApiConfig, ClientError, Report, ReportSink, StateHandle, TokenStore, UploadFile, ViewState,
    TOKEN_KEY,
};
use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Storage, Url};

/// API location baked in at build time through `EQUIVIZ_API_URL`.
pub fn api_config() -> ApiConfig {
    let raw = option_env!("EQUIVIZ_API_URL").unwrap_or(DEFAULT_API_URL);
    ApiConfig::new(raw).unwrap_or_else(|e| {
        tracing::warn!("Ignoring {}: {}", API_URL_ENV, e);
        ApiConfig::default()
    })
}

/// View state held in a signal so every controller update re-renders.
#[derive(Clone, Copy)]
pub struct SignalState(pub RwSignal<ViewState>);

impl StateHandle for SignalState {
    fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        self.0.update(f);
    }
}

/// Session token kept in `window.localStorage` so it survives reloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokens;

impl LocalStorageTokens {
    fn storage() -> Result<Storage, ClientError> {
        web_sys::window()
            .ok_or_else(|| ClientError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ClientError::Storage("localStorage unavailable".to_string()))
    }
}

impl TokenStore for LocalStorageTokens {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Self::storage()?.get_item(TOKEN_KEY).map_err(js_error)
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        Self::storage()?.set_item(TOKEN_KEY, token).map_err(js_error)
    }

    fn clear(&self) -> Result<(), ClientError> {
        Self::storage()?.remove_item(TOKEN_KEY).map_err(js_error)
    }
}

/// Saves a report by clicking a temporary download link.
pub struct BrowserDownload;

impl ReportSink for BrowserDownload {
    fn save(&self, report: &Report) -> Result<(), ClientError> {
        let bytes = js_sys::Uint8Array::from(report.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&bytes);

        let options = BlobPropertyBag::new();
        options.set_type("application/pdf");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ClientError::Storage("no document".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| ClientError::Storage("no body".to_string()))?;
        let link: HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| ClientError::Storage("anchor cast failed".to_string()))?;

        link.set_href(&url);
        link.set_download(&report.filename);
        body.append_child(&link).map_err(js_error)?;
        link.click();
        link.remove();
        Url::revoke_object_url(&url).map_err(js_error)
    }
}

/// Read a picked file into memory for upload.
pub async fn read_upload_file(file: web_sys::File) -> Result<UploadFile, ClientError> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| ClientError::Storage("Failed to convert to ArrayBuffer".to_string()))?;

    let bytes = Uint8Array::new(&array_buffer).to_vec();
    Ok(UploadFile::new(file.name(), bytes))
}

fn js_error(err: JsValue) -> ClientError {
    ClientError::Storage(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}
