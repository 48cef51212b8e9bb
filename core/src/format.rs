use chrono::{DateTime, Local, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Two-decimal rendering used for every reading and average.
pub fn fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Like [`fixed2`] for averages the server may leave null.
pub fn fixed2_opt(value: Option<f64>) -> String {
    value.map(fixed2).unwrap_or_else(|| "-".to_string())
}

/// Render an upload timestamp in local time. Timestamps without an offset
/// are shown as-is; anything unparseable falls back to the raw string.
pub fn upload_time(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY_FORMAT).to_string();
    }
    raw.to_string()
}

pub fn records_label(count: u64) -> String {
    format!("{} records", count)
}
