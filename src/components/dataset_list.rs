use equiviz_core::format::{records_label, upload_time};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;

/// The five most recent uploads; clicking one selects it.
#[component]
pub fn DatasetList() -> impl IntoView {
    let app = use_app();
    let state = app.state;

    let datasets = Memo::new(move |_| state.with(|s| s.datasets.clone()));
    let selected_id = Memo::new(move |_| state.with(|s| s.selected.as_ref().map(|d| d.id)));

    let on_select = move |dataset_id: i64| {
        let controller = app.controller();
        spawn_local(async move {
            let _ = controller.select_dataset(dataset_id).await;
        });
    };

    view! {
        <div class="history-section">
            <h3>"Recent Datasets (Last 5)"</h3>
            {move || {
                let datasets = datasets.get();
                if datasets.is_empty() {
                    view! { <p class="no-data">"No datasets uploaded yet"</p> }.into_any()
                } else {
                    view! {
                        <ul class="dataset-list">
                            {datasets.into_iter().map(|ds| {
                                let id = ds.id;
                                view! {
                                    <li
                                        class:active=move || selected_id.get() == Some(id)
                                        on:click=move |_| on_select(id)
                                    >
                                        <div class="dataset-name">{ds.filename}</div>
                                        <div class="dataset-date">{upload_time(&ds.uploaded_at)}</div>
                                        <div class="dataset-count">{records_label(ds.total_records)}</div>
                                    </li>
                                }
                            }).collect::<Vec<_>>()}
                        </ul>
                    }.into_any()
                }
            }}
        </div>
    }
}
