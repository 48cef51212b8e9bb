use equiviz_core::charts::{average_bars, layout_bars};
use equiviz_core::format::fixed2;
use equiviz_core::DatasetDetail;
use leptos::prelude::*;

const WIDTH: f64 = 360.0;
const HEIGHT: f64 = 220.0;
const AXIS_SPACE: f64 = 24.0;

/// Bar chart of the average flowrate, pressure and temperature.
#[component]
pub fn AverageChart(detail: DatasetDetail) -> impl IntoView {
    let plot_height = HEIGHT - AXIS_SPACE * 2.0;
    let rects = layout_bars(&average_bars(&detail), WIDTH, plot_height);

    view! {
        <div class="chart-box">
            <h3>"Average Parameter Values"</h3>
            <svg class="chart" viewBox=format!("0 0 {} {}", WIDTH, HEIGHT) preserveAspectRatio="xMidYMid meet">
                <line
                    x1="0"
                    y1=(AXIS_SPACE + plot_height).to_string()
                    x2=WIDTH.to_string()
                    y2=(AXIS_SPACE + plot_height).to_string()
                    class="chart-axis"
                />
                {rects
                    .into_iter()
                    .map(|rect| {
                        let center = rect.x + rect.width / 2.0;
                        let top = AXIS_SPACE + rect.y;
                        view! {
                            <g>
                                <rect
                                    x=rect.x.to_string()
                                    y=top.to_string()
                                    width=rect.width.to_string()
                                    height=rect.height.to_string()
                                    fill=rect.color
                                />
                                <text x=center.to_string() y=(top - 6.0).to_string() text-anchor="middle" class="chart-value">
                                    {fixed2(rect.value)}
                                </text>
                                <text x=center.to_string() y=(HEIGHT - 6.0).to_string() text-anchor="middle" class="chart-label">
                                    {rect.label.clone()}
                                </text>
                            </g>
                        }
                    })
                    .collect::<Vec<_>>()}
            </svg>
        </div>
    }
}
