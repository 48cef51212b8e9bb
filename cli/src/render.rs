//! Plain-text rendering of datasets for the terminal.

use equiviz_core::charts::{average_bars, distribution_slices};
use equiviz_core::format::{fixed2, fixed2_opt, upload_time};
use equiviz_core::{DatasetDetail, DatasetSummary};

const BAR_WIDTH: usize = 30;

/// Left-aligned table with a header rule.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.to_vec()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

/// `value` as a run of `#` proportional to `max`.
pub fn text_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "#".repeat(filled.clamp(1, width))
}

pub fn dataset_list(datasets: &[DatasetSummary]) -> String {
    if datasets.is_empty() {
        return "No datasets uploaded yet".to_string();
    }
    let rows: Vec<Vec<String>> = datasets
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.filename.clone(),
                upload_time(&d.uploaded_at),
                d.total_records.to_string(),
            ]
        })
        .collect();
    format!(
        "Recent Datasets (Last 5)\n\n{}",
        table(&["ID", "Filename", "Uploaded", "Records"], &rows)
    )
}

pub fn dataset_detail(detail: &DatasetDetail) -> String {
    let mut sections = Vec::new();

    sections.push(format!(
        "{} (#{})\nUploaded: {}",
        detail.filename,
        detail.id,
        upload_time(&detail.uploaded_at)
    ));

    sections.push(table(
        &["Total Records", "Avg Flowrate", "Avg Pressure", "Avg Temperature"],
        &[vec![
            detail.total_records.to_string(),
            fixed2_opt(detail.avg_flowrate),
            fixed2_opt(detail.avg_pressure),
            fixed2_opt(detail.avg_temperature),
        ]],
    ));

    let bars = average_bars(detail);
    if !bars.is_empty() {
        let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        let label_width = bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
        let lines: Vec<String> = bars
            .iter()
            .map(|b| {
                format!(
                    "{:<lw$}  {:<bw$}  {}",
                    b.label,
                    text_bar(b.value, max, BAR_WIDTH),
                    fixed2(b.value),
                    lw = label_width,
                    bw = BAR_WIDTH
                )
            })
            .collect();
        sections.push(format!("Average Parameter Values\n{}", lines.join("\n")));
    }

    let slices = distribution_slices(&detail.type_distribution);
    if !slices.is_empty() {
        let label_width = slices.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);
        let lines: Vec<String> = slices
            .iter()
            .map(|s| {
                format!(
                    "{:<lw$}  {:<bw$}  {} ({:.1}%)",
                    s.label,
                    text_bar(s.fraction, 1.0, BAR_WIDTH),
                    s.count,
                    s.fraction * 100.0,
                    lw = label_width,
                    bw = BAR_WIDTH
                )
            })
            .collect();
        sections.push(format!("Equipment Type Distribution\n{}", lines.join("\n")));
    }

    let rows: Vec<Vec<String>> = detail
        .equipment
        .iter()
        .map(|eq| {
            vec![
                eq.equipment_name.clone(),
                eq.equipment_type.clone(),
                fixed2(eq.flowrate),
                fixed2(eq.pressure),
                fixed2(eq.temperature),
            ]
        })
        .collect();
    sections.push(format!(
        "Equipment Details\n{}",
        table(&["Equipment Name", "Type", "Flowrate", "Pressure", "Temperature"], &rows)
    ));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use equiviz_core::{Equipment, TypeDistribution};

    fn sample() -> DatasetDetail {
        DatasetDetail {
            id: 7,
            filename: "plant.csv".to_string(),
            uploaded_at: "2024-03-01T09:15:00".to_string(),
            total_records: 2,
            avg_flowrate: Some(100.0),
            avg_pressure: Some(50.0),
            avg_temperature: None,
            type_distribution: TypeDistribution::new(vec![("Pump".to_string(), 1), ("Valve".to_string(), 1)]),
            equipment: vec![
                Equipment {
                    id: 1,
                    equipment_name: "Pump-1".to_string(),
                    equipment_type: "Pump".to_string(),
                    flowrate: 100.0,
                    pressure: 50.0,
                    temperature: 110.5,
                },
                Equipment {
                    id: 2,
                    equipment_name: "Valve-1".to_string(),
                    equipment_type: "Valve".to_string(),
                    flowrate: 100.0,
                    pressure: 50.0,
                    temperature: 99.25,
                },
            ],
        }
    }

    #[test]
    fn test_table_pads_columns() {
        let out = table(&["ID", "Name"], &[vec!["7".into(), "plant.csv".into()]]);
        assert_eq!(out, "ID  Name\n--  ---------\n7   plant.csv");
    }

    #[test]
    fn test_text_bar_proportions() {
        assert_eq!(text_bar(50.0, 100.0, 10), "#####");
        assert_eq!(text_bar(100.0, 100.0, 10), "##########");
        assert_eq!(text_bar(0.1, 100.0, 10), "#");
        assert_eq!(text_bar(0.0, 100.0, 10), "");
        assert_eq!(text_bar(5.0, 0.0, 10), "");
    }

    #[test]
    fn test_empty_list_message() {
        assert_eq!(dataset_list(&[]), "No datasets uploaded yet");
    }

    #[test]
    fn test_list_shows_rows() {
        let summary = DatasetSummary {
            id: 4,
            filename: "reactor_line.csv".to_string(),
            uploaded_at: "2024-02-27T16:02:41".to_string(),
            total_records: 12,
            avg_flowrate: None,
            avg_pressure: None,
            avg_temperature: None,
            equipment_count: None,
        };
        let out = dataset_list(&[summary]);
        assert!(out.contains("reactor_line.csv"));
        assert!(out.contains("2024-02-27 16:02:41"));
        assert!(out.lines().last().unwrap().ends_with("12"));
    }

    #[test]
    fn test_detail_sections() {
        let out = dataset_detail(&sample());
        assert!(out.starts_with("plant.csv (#7)\nUploaded: 2024-03-01 09:15:00"));
        assert!(out.contains("Average Parameter Values"));
        assert!(out.contains("Pump   "));
        assert!(out.contains("1 (50.0%)"));
        assert!(out.contains("110.50"));
        assert!(out.contains("99.25"));
        // Null average renders as a dash and gets no bar
        assert!(!out.contains("Temperature  #"));
    }
}
