//! Display formatting for metric values.

use super::metric::Metric;

/// Format a count or magnitude for display (e.g., 1234 -> "1.23K").
pub fn format_number(value: f64, decimals: usize) -> String {
    if value >= 1_000_000.0 {
        format!("{:.*}M", decimals, value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.*}K", decimals, value / 1_000.0)
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Format a ratio in `[0, 1]` as a percentage (0.873 -> "87.3%").
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

/// Format a latency in milliseconds, switching to seconds above 1000ms.
pub fn format_latency(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else {
        format!("{:.0}ms", ms)
    }
}

const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count with binary prefixes (1536 -> "1.5 KB").
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.*}", decimals, value);
    // Drop trailing zeros the way a float parse would ("1.50" -> "1.5").
    let rendered = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        rendered
    };
    format!("{} {}", rendered, BYTE_UNITS[unit])
}

/// Format a metric value according to its unit.
pub fn format_metric_value(metric: &Metric) -> String {
    match metric.unit.as_str() {
        "%" => format_percentage(metric.value, 1),
        "ms" => format_latency(metric.value),
        "score" => format!("{:.3}", metric.value),
        "s" => format!("{:.2}s", metric.value),
        "GB" => format!("{:.1} GB", metric.value),
        unit => format!("{} {}", format_number(metric.value, 1), unit),
    }
}

/// Mean of a set of scores, `None` when empty.
pub fn calculate_health_score(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
