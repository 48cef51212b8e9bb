//! Chart data and SVG geometry for the dataset views.
//!
//! Everything here is pure so both front ends can share it: the browser turns
//! the layouts into `<rect>`/`<path>` elements, the terminal client draws the
//! same series as text bars.

use crate::types::{DatasetDetail, TypeDistribution};

pub const AVERAGE_COLORS: [&str; 3] = ["#36A2EB", "#FF6384", "#FFCE56"];

pub const DISTRIBUTION_COLORS: [&str; 10] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6384", "#C9CBCF",
    "#4BC0C0", "#FF6384",
];

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

/// Average flowrate, pressure and temperature, rounded to two decimals.
/// Averages the server left null are skipped.
pub fn average_bars(detail: &DatasetDetail) -> Vec<BarDatum> {
    let series = [
        ("Flowrate", detail.avg_flowrate),
        ("Pressure", detail.avg_pressure),
        ("Temperature", detail.avg_temperature),
    ];
    series
        .iter()
        .zip(AVERAGE_COLORS)
        .filter_map(|((label, value), color)| {
            value.map(|v| BarDatum {
                label: label.to_string(),
                value: round2(v),
                color,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: u64,
    pub fraction: f64,
    pub color: &'static str,
}

/// One slice per equipment type, colours cycling through the palette.
pub fn distribution_slices(distribution: &TypeDistribution) -> Vec<Slice> {
    let total = distribution.total();
    if total == 0 {
        return Vec::new();
    }
    distribution
        .entries()
        .iter()
        .enumerate()
        .map(|(i, (label, count))| Slice {
            label: label.clone(),
            count: *count,
            fraction: *count as f64 / total as f64,
            color: DISTRIBUTION_COLORS[i % DISTRIBUTION_COLORS.len()],
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lay bars out left to right in a `width` x `height` box, scaled to the
/// largest value. Each bar takes 60% of its slot; negatives draw flat.
pub fn layout_bars(bars: &[BarDatum], width: f64, height: f64) -> Vec<BarRect> {
    if bars.is_empty() {
        return Vec::new();
    }
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let slot = width / bars.len() as f64;

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let h = if max > 0.0 {
                (bar.value.max(0.0) / max) * height
            } else {
                0.0
            };
            BarRect {
                label: bar.label.clone(),
                value: bar.value,
                color: bar.color,
                x: i as f64 * slot + slot * 0.2,
                y: height - h,
                width: slot * 0.6,
                height: h,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    pub slice: Slice,
    pub path: String,
}

/// SVG paths for each non-empty slice, clockwise from twelve o'clock.
pub fn layout_pie(slices: &[Slice], cx: f64, cy: f64, r: f64) -> Vec<PieSegment> {
    let mut start = 0.0;
    let mut segments = Vec::with_capacity(slices.len());
    for slice in slices {
        if slice.count == 0 {
            continue;
        }
        let end = start + slice.fraction;
        segments.push(PieSegment {
            slice: slice.clone(),
            path: slice_path(cx, cy, r, start, end),
        });
        start = end;
    }
    segments
}

/// Path for the wedge between two fractions of a full turn.
pub fn slice_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let sweep = end - start;
    if sweep >= 1.0 - 1e-9 {
        // A single arc cannot close on itself; draw two half circles.
        return format!(
            "M {:.3} {:.3} A {:.3} {:.3} 0 1 1 {:.3} {:.3} A {:.3} {:.3} 0 1 1 {:.3} {:.3} Z",
            cx,
            cy - r,
            r,
            r,
            cx,
            cy + r,
            r,
            r,
            cx,
            cy - r
        );
    }
    let (x1, y1) = point_on_circle(cx, cy, r, start);
    let (x2, y2) = point_on_circle(cx, cy, r, end);
    let large_arc = if sweep > 0.5 { 1 } else { 0 };
    format!(
        "M {:.3} {:.3} L {:.3} {:.3} A {:.3} {:.3} 0 {} 1 {:.3} {:.3} Z",
        cx, cy, x1, y1, r, r, large_arc, x2, y2
    )
}

fn point_on_circle(cx: f64, cy: f64, r: f64, fraction: f64) -> (f64, f64) {
    let angle = fraction * std::f64::consts::TAU - std::f64::consts::FRAC_PI_2;
    (cx + r * angle.cos(), cy + r * angle.sin())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
