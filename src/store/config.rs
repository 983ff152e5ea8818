//! User-mutable dashboard configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default auto-refresh interval.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30_000;

/// Metric keys shown on the overview page out of the box.
pub const DEFAULT_SELECTED_METRICS: [&str; 5] = [
    "textExtractionAccuracy",
    "tableDetectionRecall",
    "queryLatency",
    "qaAccuracy",
    "overallScore",
];

/// Color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

/// Preferred chart for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Radar,
    Gauge,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Radar => "radar",
            ChartKind::Gauge => "gauge",
        }
    }
}

/// Dashboard preferences. Persisted as a whole alongside the current page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// Auto-refresh period in milliseconds. Not range checked; 0 disables ticking.
    #[serde(rename = "refreshInterval")]
    pub refresh_interval_ms: u64,
    pub theme: ThemeMode,
    pub selected_metrics: Vec<String>,
    pub chart_types: BTreeMap<String, ChartKind>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let chart_types = [
            ("textExtractionAccuracy", ChartKind::Gauge),
            ("tableDetectionRecall", ChartKind::Bar),
            ("queryLatency", ChartKind::Line),
            ("qaAccuracy", ChartKind::Radar),
            ("overallScore", ChartKind::Gauge),
        ]
        .into_iter()
        .map(|(key, kind)| (key.to_string(), kind))
        .collect();

        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            theme: ThemeMode::Light,
            selected_metrics: DEFAULT_SELECTED_METRICS.iter().map(|s| s.to_string()).collect(),
            chart_types,
        }
    }
}

impl DashboardConfig {
    /// The refresh interval, or `None` when auto-refresh is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_ms > 0).then(|| Duration::from_millis(self.refresh_interval_ms))
    }

    /// Chart kind configured for a metric, defaulting to a line chart.
    pub fn chart_kind(&self, metric_key: &str) -> ChartKind {
        self.chart_types.get(metric_key).copied().unwrap_or(ChartKind::Line)
    }

    /// Shallow merge: every field present in the patch replaces the current one.
    pub fn apply(&mut self, patch: DashboardConfigPatch) {
        if let Some(interval) = patch.refresh_interval_ms {
            self.refresh_interval_ms = interval;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(selected) = patch.selected_metrics {
            self.selected_metrics = selected;
        }
        if let Some(chart_types) = patch.chart_types {
            self.chart_types = chart_types;
        }
    }
}

/// A partial [`DashboardConfig`]; `None` fields are left untouched on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfigPatch {
    #[serde(rename = "refreshInterval", skip_serializing_if = "Option::is_none")]
    pub refresh_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_metrics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_types: Option<BTreeMap<String, ChartKind>>,
}

impl DashboardConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh_interval_ms(mut self, ms: u64) -> Self {
        self.refresh_interval_ms = Some(ms);
        self
    }

    pub fn theme(mut self, theme: ThemeMode) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn selected_metrics(mut self, keys: Vec<String>) -> Self {
        self.selected_metrics = Some(keys);
        self
    }

    pub fn chart_types(mut self, chart_types: BTreeMap<String, ChartKind>) -> Self {
        self.chart_types = Some(chart_types);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = DashboardConfig::default();
        assert_eq!(config.refresh_interval_ms, 30_000);
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.selected_metrics.len(), 5);
        assert_eq!(config.chart_kind("queryLatency"), ChartKind::Line);
        assert_eq!(config.chart_kind("overallScore"), ChartKind::Gauge);
        assert_eq!(config.chart_kind("unknown"), ChartKind::Line);
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut config = DashboardConfig::default();
        let before = config.clone();
        config.apply(DashboardConfigPatch::new().theme(ThemeMode::Dark));

        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.refresh_interval_ms, before.refresh_interval_ms);
        assert_eq!(config.selected_metrics, before.selected_metrics);
        assert_eq!(config.chart_types, before.chart_types);
    }

    #[test]
    fn zero_interval_disables_refresh() {
        let mut config = DashboardConfig::default();
        assert_eq!(config.refresh_interval(), Some(Duration::from_secs(30)));
        config.apply(DashboardConfigPatch::new().refresh_interval_ms(0));
        assert_eq!(config.refresh_interval(), None);
    }

    #[test]
    fn serializes_with_original_field_names() {
        let json = serde_json::to_value(DashboardConfig::default()).unwrap();
        assert_eq!(json["refreshInterval"], 30_000);
        assert_eq!(json["theme"], "light");
        assert_eq!(json["chartTypes"]["qaAccuracy"], "radar");
        assert!(json["selectedMetrics"].is_array());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: DashboardConfig = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.refresh_interval_ms, DEFAULT_REFRESH_INTERVAL_MS);
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }
}
