//! Time-series data for trend charts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated value of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// An ordered series of dated values for one metric, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub metric_name: String,
    pub points: Vec<TrendPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TrendSeries {
    /// Most recent value, if the series is non-empty.
    pub fn latest(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    /// `(x, y)` pairs for chart widgets, x being the point index.
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.points.iter().enumerate().map(|(i, p)| (i as f64, p.value)).collect()
    }

    /// Values scaled to `0..=100` for sparkline and bar widgets.
    pub fn percent_values(&self) -> Vec<u64> {
        self.points.iter().map(|p| (p.value.clamp(0.0, 1.0) * 100.0).round() as u64).collect()
    }

    /// Smallest and largest value, or `None` for an empty series.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.points.iter().map(|p| p.value);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}
