//! Metric data models, sample generation and display formatting.
//!
//! ## Submodules
//!
//! - [`metric`]: Snapshot types ([`OverallMetrics`] and its four groups)
//! - [`status`]: Per-module health rollups ([`ModuleStatus`], [`HealthStatus`])
//! - [`trend`]: Dated series for trend charts ([`TrendSeries`])
//! - [`mock`]: Random generators standing in for a real metrics pipeline
//! - [`format`]: Number, percentage, latency and byte formatting
//! - [`productivity`]: Fixed figures for the productivity page
//!
//! ## Data Flow
//!
//! ```text
//! mock::generate_overall_snapshot()   mock::generate_trend_series()
//!        │                                    │
//!        ▼                                    ▼
//!   OverallMetrics + Vec<ModuleStatus>   TrendSeries (per metric key)
//!        │                                    │
//!        └──────────────┬─────────────────────┘
//!                       ▼
//!              MetricsBundle (source)
//! ```

pub mod format;
pub mod metric;
pub mod mock;
pub mod productivity;
pub mod status;
pub mod trend;

pub use metric::{
    DataUnlockingMetrics, DocumentParsingMetrics, Metric, MetricEntry, MetricStatus,
    OverallMetrics, QaMetrics, SystemHealthMetrics, Trend,
};
pub use status::{HealthStatus, ModuleStatus};
pub use trend::{TrendPoint, TrendSeries};
