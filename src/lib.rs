//! # metrics-dashboard
//!
//! A terminal dashboard and library for watching the quality metrics of a
//! document-to-answer pipeline: document parsing, data unlocking (retrieval
//! and knowledge-graph), question answering, and overall system health.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │   app   │───▶│  store   │───▶│   ui    │───▶│ Terminal │  │
//! │  │ (input) │    │ (state)  │    │(render) │    │          │  │
//! │  └─────────┘    └────┬─────┘    └─────────┘    └──────────┘  │
//! │                      │    ▲                                  │
//! │           ┌──────────┘    └───────────┐                      │
//! │           ▼                           │                      │
//! │  ┌────────────────┐          ┌────────┴───────┐              │
//! │  │     source     │          │    refresh     │              │
//! │  │ Mock | File    │          │ (interval task)│              │
//! │  └────────────────┘          └────────────────┘              │
//! │           persist ◀── dashboardConfig + currentPage          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: Metric models, random generators and formatting
//! - **[`source`]**: The [`MetricsSource`] trait with [`MockSource`] and
//!   [`FileSource`]
//! - **[`store`]**: [`DashboardStore`], the single owner of [`DashboardState`]
//! - **[`persist`]**: Key-value storage for user preferences
//! - **[`refresh`]**: [`AutoRefresh`], the periodic reload task
//! - **[`app`]**, **[`events`]**, **[`ui`]**: The terminal front end
//! - **[`settings`]**, **[`logging`]**: Startup configuration
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Mock data with the default 800ms latency
//! metrics-dashboard
//!
//! # Write one snapshot and exit, then browse it later
//! metrics-dashboard --export snapshot.json
//! metrics-dashboard --source file --file snapshot.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use metrics_dashboard::{DashboardConfigPatch, DashboardStore, MockSource};
//!
//! # tokio_test::block_on(async {
//! let store = DashboardStore::new(Arc::new(MockSource::new(Duration::ZERO)));
//! store.load_metrics().await;
//! assert!(store.state().metrics.is_some());
//!
//! store.update_dashboard_config(DashboardConfigPatch::default().refresh_interval_ms(0));
//! assert_eq!(store.state().dashboard_config.refresh_interval(), None);
//! # });
//! ```
//!
//! ### Persisting preferences
//!
//! ```no_run
//! use std::sync::Arc;
//! use metrics_dashboard::{DashboardStore, FileStore, MockSource, Page, Preferences};
//!
//! let prefs = Preferences::new(Arc::new(FileStore::new(".metrics-dashboard")));
//! let store = DashboardStore::new(Arc::new(MockSource::default())).with_preferences(prefs);
//! store.set_current_page(Page::Settings);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod logging;
pub mod persist;
pub mod refresh;
pub mod settings;
pub mod source;
pub mod store;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{HealthStatus, Metric, MetricStatus, ModuleStatus, OverallMetrics, TrendSeries};
pub use persist::{FileStore, KeyValueStore, MemoryStore, PersistedPreferences, Preferences};
pub use refresh::{AutoRefresh, RefreshHandle};
pub use settings::{Settings, SourceKind};
pub use source::{FileSource, MetricsBundle, MetricsSource, MockSource};
pub use store::{
    ChartKind, DashboardConfig, DashboardConfigPatch, DashboardState, DashboardStore, Page,
    ThemeMode,
};
