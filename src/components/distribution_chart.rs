use equiviz_core::charts::{distribution_slices, layout_pie};
use equiviz_core::TypeDistribution;
use leptos::prelude::*;

const SIZE: f64 = 220.0;

/// Pie chart of equipment counts per type, with a legend.
#[component]
pub fn DistributionChart(distribution: TypeDistribution) -> impl IntoView {
    let radius = SIZE / 2.0 - 10.0;
    let segments = layout_pie(&distribution_slices(&distribution), SIZE / 2.0, SIZE / 2.0, radius);

    view! {
        <div class="chart-box">
            <h3>"Equipment Type Distribution"</h3>
            {if segments.is_empty() {
                view! { <p class="no-data">"No equipment records"</p> }.into_any()
            } else {
                let legend = segments.clone();
                view! {
                    <div class="pie-layout">
                        <svg class="chart pie" viewBox=format!("0 0 {} {}", SIZE, SIZE)>
                            {segments
                                .into_iter()
                                .map(|seg| {
                                    view! {
                                        <path d=seg.path fill=seg.slice.color stroke="#fff" stroke-width="1" />
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </svg>
                        <ul class="legend">
                            {legend
                                .into_iter()
                                .map(|seg| {
                                    view! {
                                        <li>
                                            <span class="legend-swatch" style:background-color=seg.slice.color></span>
                                            {format!("{} ({})", seg.slice.label, seg.slice.count)}
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    </div>
                }.into_any()
            }}
        </div>
    }
}
