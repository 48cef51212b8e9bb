use equiviz_core::format::fixed2_opt;
use equiviz_core::DatasetDetail;
use leptos::prelude::*;

#[component]
fn StatCard(#[prop(into)] title: String, value: String) -> impl IntoView {
    view! {
        <div class="stat-card">
            <h4>{title}</h4>
            <p class="stat-value">{value}</p>
        </div>
    }
}

/// Record count and the three averages for a dataset.
#[component]
pub fn StatsGrid(detail: DatasetDetail) -> impl IntoView {
    view! {
        <div class="stats-grid">
            <StatCard title="Total Records" value=detail.total_records.to_string() />
            <StatCard title="Avg Flowrate" value=fixed2_opt(detail.avg_flowrate) />
            <StatCard title="Avg Pressure" value=fixed2_opt(detail.avg_pressure) />
            <StatCard title="Avg Temperature" value=fixed2_opt(detail.avg_temperature) />
        </div>
    }
}
