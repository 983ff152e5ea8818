//! Metrics source abstraction.
//!
//! The dashboard store never generates data itself; it asks a
//! [`MetricsSource`] for a [`MetricsBundle`] on every load cycle. Two
//! sources ship with the crate: [`MockSource`] (simulated latency, then
//! random data) and [`FileSource`] (a bundle previously written by
//! `--export`).

mod file;
mod mock;

pub use file::FileSource;
pub use mock::{MockSource, DEFAULT_DELAY};

use std::collections::BTreeMap;
use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::data::{mock as generators, ModuleStatus, OverallMetrics, TrendSeries};

/// Everything one load cycle produces.
///
/// This is also the on-disk format of an exported snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsBundle {
    pub metrics: OverallMetrics,
    pub module_statuses: Vec<ModuleStatus>,
    #[serde(default)]
    pub trends: BTreeMap<String, TrendSeries>,
}

/// Trait for fetching dashboard data from various backends.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use metrics_dashboard::{MetricsSource, MockSource};
///
/// # tokio_test::block_on(async {
/// let source = MockSource::new(Duration::ZERO);
/// let bundle = source.fetch(&["qaAccuracy"], 7).await.unwrap();
/// assert_eq!(bundle.trends["qaAccuracy"].points.len(), 8);
/// # });
/// ```
#[async_trait]
pub trait MetricsSource: Send + Sync + Debug {
    /// Fetch a fresh snapshot, module statuses and one trend series per
    /// requested metric over a `days` window.
    ///
    /// Any error is treated by the store as a failed load.
    async fn fetch(&self, trend_metrics: &[&str], days: u32) -> anyhow::Result<MetricsBundle>;

    /// Regenerate a single trend series.
    fn trend_series(&self, metric_name: &str, days: u32) -> TrendSeries {
        generators::generate_trend_series(&mut rand::thread_rng(), metric_name, days)
    }

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the status bar.
    fn description(&self) -> &str;
}
