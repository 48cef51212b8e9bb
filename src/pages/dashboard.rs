//! Main view once logged in: upload form and recent datasets on the left,
//! the selected dataset's statistics, charts and records on the right.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::browser::BrowserDownload;
use crate::components::average_chart::AverageChart;
use crate::components::dataset_list::DatasetList;
use crate::components::distribution_chart::DistributionChart;
use crate::components::equipment_table::EquipmentTable;
use crate::components::stats_grid::StatsGrid;
use crate::components::upload_form::UploadForm;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();
    let state = app.state;

    let selected = Memo::new(move |_| state.with(|s| s.selected.clone()));

    let on_logout = move |_| app.controller().logout();

    let on_download = move |dataset_id: i64| {
        let controller = app.controller();
        spawn_local(async move {
            let _ = controller.download_report(dataset_id, &BrowserDownload).await;
        });
    };

    view! {
        <div class="app">
            <header>
                <h1>"Chemical Equipment Parameter Visualizer"</h1>
                <button class="btn logout-btn" on:click=on_logout>"Logout"</button>
            </header>

            <div class="main-container">
                <aside class="sidebar">
                    <UploadForm />
                    <DatasetList />
                </aside>

                <main class="content">
                    {move || match selected.get() {
                        None => view! {
                            <div class="placeholder">
                                <h2>"Welcome!"</h2>
                                <p>"Upload a CSV file or select a dataset from history to view visualizations"</p>
                            </div>
                        }.into_any(),
                        Some(detail) => {
                            let dataset_id = detail.id;
                            view! {
                                <div class="dataset-header">
                                    <h2>{detail.filename.clone()}</h2>
                                    <button class="btn pdf-btn" on:click=move |_| on_download(dataset_id)>
                                        "Download PDF Report"
                                    </button>
                                </div>
                                <StatsGrid detail=detail.clone() />
                                <div class="charts-container">
                                    <AverageChart detail=detail.clone() />
                                    <DistributionChart distribution=detail.type_distribution.clone() />
                                </div>
                                <EquipmentTable equipment=detail.equipment.clone() />
                            }.into_any()
                        }
                    }}
                </main>
            </div>
        </div>
    }
}
