use equiviz_core::UploadFile;
use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::browser::read_upload_file;
use crate::components::error_banner::ErrorBanner;

/// CSV picker and upload button.
///
/// The picked file is read into memory straight away; the controller decides
/// whether there is anything to send.
#[component]
pub fn UploadForm() -> impl IntoView {
    let app = use_app();
    let state = app.state;
    let (file, set_file) = signal::<Option<UploadFile>>(None);
    let input_ref = NodeRef::<Input>::new();

    let loading = Memo::new(move |_| state.with(|s| s.loading));
    let error = Memo::new(move |_| state.with(|s| s.error.clone()));

    let on_change = move |_| {
        let picked = input_ref
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        match picked {
            Some(picked) => spawn_local(async move {
                match read_upload_file(picked).await {
                    Ok(upload) => set_file.set(Some(upload)),
                    Err(e) => {
                        tracing::warn!("Failed to read selected file: {}", e);
                        set_file.set(None);
                    }
                }
            }),
            None => set_file.set(None),
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let controller = app.controller();
        let upload = file.get_untracked();
        spawn_local(async move {
            if controller.upload_dataset(upload).await.is_ok() {
                set_file.set(None);
                if let Some(input) = input_ref.get_untracked() {
                    input.set_value("");
                }
            }
        });
    };

    view! {
        <div class="upload-section">
            <h3>"Upload CSV"</h3>
            <ErrorBanner message=error />
            <form on:submit=on_submit>
                <input
                    id="fileInput"
                    type="file"
                    accept=".csv"
                    node_ref=input_ref
                    on:change=on_change
                />
                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || loading.get() || file.with(|f| f.is_none())
                >
                    {move || if loading.get() { "Uploading..." } else { "Upload" }}
                </button>
            </form>
        </div>
    }
}
