//! Dashboard state container.
//!
//! [`DashboardStore`] owns the read model ([`DashboardState`]) and is the only
//! thing that mutates it. Views read it through [`DashboardStore::state`] or
//! watch it through [`DashboardStore::subscribe`]; every mutation notifies
//! subscribers.
//!
//! ## Load cycle
//!
//! ```text
//! Idle ──load_metrics()──▶ Loading ──fetch ok──▶ Idle (snapshot, statuses, trends replaced)
//!                             │
//!                             └──fetch err─▶ Idle (error set, previous snapshot kept)
//! ```
//!
//! Only one load is in flight at a time; a load requested while another is
//! running returns immediately.

mod config;
mod page;

pub use self::config::{
    ChartKind, DashboardConfig, DashboardConfigPatch, ThemeMode, DEFAULT_REFRESH_INTERVAL_MS,
    DEFAULT_SELECTED_METRICS,
};
pub use self::page::Page;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::data::mock::DEFAULT_TREND_DAYS;
use crate::data::{ModuleStatus, OverallMetrics, TrendSeries};
use crate::persist::{PersistedPreferences, Preferences};
use crate::source::{MetricsBundle, MetricsSource};

/// Metrics that get a trend series on every load, regardless of selection.
pub const TREND_METRICS: [&str; 5] = DEFAULT_SELECTED_METRICS;

/// Error shown when a failed load carries no message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "failed to load metrics";

/// Everything the views render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Latest snapshot; `None` until the first successful load.
    pub metrics: Option<OverallMetrics>,
    pub trend_data: BTreeMap<String, TrendSeries>,
    pub module_statuses: Vec<ModuleStatus>,
    /// Time of the last successful load. Strictly increasing.
    pub last_updated: Option<DateTime<Utc>>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_page: Page,
    pub dashboard_config: DashboardConfig,
    pub sidebar_open: bool,
}

impl DashboardState {
    /// The persisted subset of this state.
    pub fn preferences(&self) -> PersistedPreferences {
        PersistedPreferences {
            dashboard_config: self.dashboard_config.clone(),
            current_page: self.current_page,
        }
    }

    /// The loaded data as an exportable bundle.
    pub fn bundle(&self) -> Option<MetricsBundle> {
        Some(MetricsBundle {
            metrics: self.metrics.clone()?,
            module_statuses: self.module_statuses.clone(),
            trends: self.trend_data.clone(),
        })
    }
}

/// Owns the dashboard read model and the operations on it.
///
/// Shared between the UI loop, spawned loads and the auto-refresh task via
/// `Arc`.
#[derive(Debug)]
pub struct DashboardStore {
    state: watch::Sender<DashboardState>,
    source: Arc<dyn MetricsSource>,
    preferences: Option<Preferences>,
    trend_days: u32,
}

impl DashboardStore {
    /// Create a store with default state and no persistence.
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            state,
            source,
            preferences: None,
            trend_days: DEFAULT_TREND_DAYS,
        }
    }

    /// Restore config and page from `preferences` and write every later
    /// change to them back.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        let restored = preferences.load();
        self.state.send_modify(|s| {
            s.dashboard_config = restored.dashboard_config;
            s.current_page = restored.current_page;
        });
        self.preferences = Some(preferences);
        self
    }

    /// Set the trend window used by loads and [`Self::update_trend_data`].
    pub fn with_trend_days(mut self, days: u32) -> Self {
        self.trend_days = days;
        self
    }

    /// Borrow the current state.
    ///
    /// Holding the guard blocks every mutation; drop it before awaiting.
    pub fn state(&self) -> watch::Ref<'_, DashboardState> {
        self.state.borrow()
    }

    /// A receiver notified after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// The source loads are fetched from.
    pub fn source(&self) -> &dyn MetricsSource {
        self.source.as_ref()
    }

    pub fn trend_days(&self) -> u32 {
        self.trend_days
    }

    /// Fetch a fresh snapshot and apply it.
    ///
    /// Returns immediately if a load is already in flight. Failures end up in
    /// [`DashboardState::error`]; the previous snapshot is left as it was.
    /// Dropping the future mid-fetch clears the loading flag.
    pub async fn load_metrics(&self) {
        let started = self.state.send_if_modified(|s| {
            if s.loading {
                return false;
            }
            s.loading = true;
            s.error = None;
            true
        });
        if !started {
            debug!("load already in flight, skipping");
            return;
        }
        let _guard = LoadingGuard { state: &self.state };

        match self.source.fetch(&TREND_METRICS, self.trend_days).await {
            Ok(bundle) => {
                let trends = bundle.trends.len();
                self.state.send_modify(|s| {
                    s.metrics = Some(bundle.metrics);
                    s.trend_data = bundle.trends;
                    s.module_statuses = bundle.module_statuses;
                    s.last_updated = Some(next_timestamp(s.last_updated));
                    s.loading = false;
                });
                info!(source = self.source.description(), trends, "metrics loaded");
            }
            Err(e) => {
                let message = format!("{e:#}");
                let message = if message.is_empty() {
                    DEFAULT_ERROR_MESSAGE.to_string()
                } else {
                    message
                };
                warn!(source = self.source.description(), error = %message, "metrics load failed");
                self.state.send_modify(|s| {
                    s.error = Some(message);
                    s.loading = false;
                });
            }
        }
    }

    /// Same as [`Self::load_metrics`].
    pub async fn refresh_metrics(&self) {
        self.load_metrics().await
    }

    /// Regenerate the trend series of one metric, leaving every other key
    /// untouched.
    pub fn update_trend_data(&self, metric_name: &str) {
        let series = self.source.trend_series(metric_name, self.trend_days);
        self.state.send_modify(|s| {
            s.trend_data.insert(metric_name.to_string(), series);
        });
        debug!(metric = metric_name, "trend regenerated");
    }

    pub fn set_current_page(&self, page: Page) {
        self.state.send_modify(|s| s.current_page = page);
        self.persist();
    }

    /// Shallow-merge `patch` into the dashboard config.
    ///
    /// Values are not validated.
    pub fn update_dashboard_config(&self, patch: DashboardConfigPatch) {
        self.state.send_modify(|s| s.dashboard_config.apply(patch));
        self.persist();
    }

    pub fn toggle_sidebar(&self) {
        self.state.send_modify(|s| s.sidebar_open = !s.sidebar_open);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|s| s.error = error);
    }

    /// Set the loading flag directly.
    ///
    /// A store left loading ignores [`Self::load_metrics`] until cleared.
    pub fn set_loading(&self, loading: bool) {
        self.state.send_modify(|s| s.loading = loading);
    }

    fn persist(&self) {
        if let Some(preferences) = &self.preferences {
            let prefs = self.state.borrow().preferences();
            preferences.save(&prefs);
        }
    }
}

/// Clears the loading flag when a load ends without applying a result,
/// i.e. the future was dropped mid-fetch or the source panicked.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<DashboardState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|s| std::mem::take(&mut s.loading));
    }
}

/// Now, or just past `prev` if the clock has not moved beyond it.
fn next_timestamp(prev: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match prev {
        Some(prev) if now <= prev => prev + TimeDelta::microseconds(1),
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;
    use crate::source::MockSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock data behind the default delay, with a fetch counter and a
    /// failure switch.
    #[derive(Debug, Default)]
    struct ScriptedSource {
        fetches: AtomicUsize,
        fail_with: parking_lot::Mutex<Option<String>>,
        inner: MockSource,
    }

    impl ScriptedSource {
        fn fail(&self, message: &str) {
            *self.fail_with.lock() = Some(message.to_string());
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetricsSource for ScriptedSource {
        async fn fetch(&self, trend_metrics: &[&str], days: u32) -> anyhow::Result<MetricsBundle> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let bundle = self.inner.fetch(trend_metrics, days).await?;
            let failure = self.fail_with.lock().clone();
            match failure {
                Some(message) => Err(anyhow::anyhow!(message)),
                None => Ok(bundle),
            }
        }

        fn description(&self) -> &str {
            "scripted"
        }
    }

    fn scripted() -> (Arc<ScriptedSource>, DashboardStore) {
        let source = Arc::new(ScriptedSource::default());
        let store = DashboardStore::new(source.clone());
        (source, store)
    }

    #[test]
    fn initial_state() {
        let store = DashboardStore::new(Arc::new(MockSource::new(Duration::ZERO)));
        let state = store.state();
        assert!(state.metrics.is_none());
        assert!(state.trend_data.is_empty());
        assert!(state.module_statuses.is_empty());
        assert!(state.last_updated.is_none());
        assert!(!state.loading);
        assert!(!state.sidebar_open);
        assert_eq!(state.current_page, Page::Dashboard);
        assert!(state.bundle().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn load_applies_snapshot_statuses_and_trends() {
        let (_, store) = scripted();
        store.load_metrics().await;

        let state = store.state();
        assert!(state.metrics.is_some());
        assert_eq!(state.module_statuses.len(), 3);
        assert_eq!(state.trend_data.len(), TREND_METRICS.len());
        for key in TREND_METRICS {
            assert_eq!(state.trend_data[key].points.len(), DEFAULT_TREND_DAYS as usize + 1);
        }
        assert!(state.last_updated.is_some());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_loads_fetch_once() {
        let (source, store) = scripted();
        let mut rx = store.subscribe();
        let recorder = tokio::spawn(async move {
            let mut seen = Vec::new();
            while rx.changed().await.is_ok() {
                seen.push(rx.borrow_and_update().loading);
            }
            seen
        });

        tokio::join!(store.load_metrics(), store.load_metrics());
        assert_eq!(source.fetches(), 1);
        assert!(!store.state().loading);

        drop(store);
        assert_eq!(recorder.await.unwrap(), vec![true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_load_does_not_block_later_loads() {
        let (source, store) = scripted();
        let cancelled =
            tokio::time::timeout(Duration::from_millis(100), store.load_metrics()).await;
        assert!(cancelled.is_err());
        assert!(!store.state().loading);
        assert!(store.state().metrics.is_none());

        store.load_metrics().await;
        assert_eq!(source.fetches(), 2);
        let state = store.state();
        assert!(state.metrics.is_some());
        assert!(!state.loading);
    }

    /// Panics on the first fetch, then serves mock data.
    #[derive(Debug, Default)]
    struct PanicOnceSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MetricsSource for PanicOnceSource {
        async fn fetch(&self, trend_metrics: &[&str], days: u32) -> anyhow::Result<MetricsBundle> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("source exploded");
            }
            MockSource::new(Duration::ZERO).fetch(trend_metrics, days).await
        }

        fn description(&self) -> &str {
            "panic-once"
        }
    }

    #[tokio::test]
    async fn panicking_source_does_not_block_later_loads() {
        let store = Arc::new(DashboardStore::new(Arc::new(PanicOnceSource::default())));
        let result = tokio::spawn({
            let store = store.clone();
            async move { store.load_metrics().await }
        })
        .await;
        assert!(result.unwrap_err().is_panic());
        assert!(!store.state().loading);

        store.load_metrics().await;
        assert!(store.state().metrics.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_is_visible_during_fetch() {
        let (_, store) = scripted();
        let store = Arc::new(store);
        let mut rx = store.subscribe();

        let task = tokio::spawn({
            let store = store.clone();
            async move { store.load_metrics().await }
        });
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().loading);

        task.await.unwrap();
        assert!(!store.state().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn last_updated_strictly_increases() {
        let (_, store) = scripted();
        store.load_metrics().await;
        let first = store.state().last_updated.unwrap();
        store.refresh_metrics().await;
        let second = store.state().last_updated.unwrap();
        assert!(second > first);
    }

    #[test]
    fn next_timestamp_moves_past_future_previous() {
        let ahead = Utc::now() + TimeDelta::hours(1);
        assert_eq!(next_timestamp(Some(ahead)), ahead + TimeDelta::microseconds(1));
        assert!(next_timestamp(None) <= Utc::now());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_load_keeps_previous_snapshot() {
        let (source, store) = scripted();
        store.load_metrics().await;
        let before = store.state().clone();

        source.fail("backend unavailable");
        store.load_metrics().await;

        let after = store.state();
        assert_eq!(after.error.as_deref(), Some("backend unavailable"));
        assert!(!after.loading);
        assert_eq!(after.metrics, before.metrics);
        assert_eq!(after.module_statuses, before.module_statuses);
        assert_eq!(after.trend_data, before.trend_data);
        assert_eq!(after.last_updated, before.last_updated);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_error_message_gets_fallback() {
        let (source, store) = scripted();
        source.fail("");
        store.load_metrics().await;
        assert_eq!(store.state().error.as_deref(), Some(DEFAULT_ERROR_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn load_clears_previous_error() {
        let (_, store) = scripted();
        store.set_error(Some("stale".to_string()));
        store.load_metrics().await;
        assert!(store.state().error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn load_is_skipped_while_loading_flag_is_set() {
        let (source, store) = scripted();
        store.set_loading(true);
        store.load_metrics().await;
        assert_eq!(source.fetches(), 0);

        store.set_loading(false);
        store.load_metrics().await;
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn update_trend_data_replaces_one_key() {
        let (_, store) = scripted();
        store.load_metrics().await;
        let before = store.state().trend_data.clone();

        store.update_trend_data("qaAccuracy");

        let after = store.state().trend_data.clone();
        assert_eq!(after.len(), before.len());
        assert_ne!(after["qaAccuracy"], before["qaAccuracy"]);
        for (key, series) in &before {
            if key != "qaAccuracy" {
                assert_eq!(&after[key], series);
            }
        }
    }

    #[test]
    fn update_trend_data_adds_unknown_key() {
        let store =
            DashboardStore::new(Arc::new(MockSource::new(Duration::ZERO))).with_trend_days(7);
        store.update_trend_data("ndcg");
        let state = store.state();
        assert_eq!(state.trend_data.len(), 1);
        assert_eq!(state.trend_data["ndcg"].points.len(), 8);
    }

    #[test]
    fn config_update_is_shallow_merge() {
        let store = DashboardStore::new(Arc::new(MockSource::new(Duration::ZERO)));
        let before = store.state().dashboard_config.clone();

        store.update_dashboard_config(DashboardConfigPatch::new().theme(ThemeMode::Dark));

        let after = store.state().dashboard_config.clone();
        assert_eq!(after.theme, ThemeMode::Dark);
        assert_eq!(after.refresh_interval_ms, before.refresh_interval_ms);
        assert_eq!(after.selected_metrics, before.selected_metrics);
        assert_eq!(after.chart_types, before.chart_types);
    }

    #[test]
    fn sidebar_toggles() {
        let store = DashboardStore::new(Arc::new(MockSource::new(Duration::ZERO)));
        store.toggle_sidebar();
        assert!(store.state().sidebar_open);
        store.toggle_sidebar();
        assert!(!store.state().sidebar_open);
    }

    #[tokio::test]
    async fn subscribers_see_mutations() {
        let store = DashboardStore::new(Arc::new(MockSource::new(Duration::ZERO)));
        let mut rx = store.subscribe();
        store.set_current_page(Page::Settings);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().current_page, Page::Settings);
    }

    #[test]
    fn preferences_round_trip_through_a_new_store() {
        let backend = Arc::new(MemoryStore::new());
        let source: Arc<dyn MetricsSource> = Arc::new(MockSource::new(Duration::ZERO));

        let store = DashboardStore::new(source.clone())
            .with_preferences(Preferences::new(backend.clone()));
        store.set_current_page(Page::DataUnlocking);
        store.update_dashboard_config(
            DashboardConfigPatch::new().refresh_interval_ms(10_000).theme(ThemeMode::Dark),
        );
        store.toggle_sidebar();
        let expected = store.state().preferences();

        let reopened = DashboardStore::new(source).with_preferences(Preferences::new(backend));
        let state = reopened.state();
        assert_eq!(state.preferences(), expected);
        assert_eq!(state.current_page, Page::DataUnlocking);
        assert_eq!(state.dashboard_config.refresh_interval_ms, 10_000);
        // Not persisted.
        assert!(!state.sidebar_open);
    }

    #[test]
    fn no_prior_state_yields_defaults() {
        let store = DashboardStore::new(Arc::new(MockSource::new(Duration::ZERO)))
            .with_preferences(Preferences::new(Arc::new(MemoryStore::new())));
        let state = store.state();
        assert_eq!(state.current_page, Page::Dashboard);
        assert_eq!(state.dashboard_config.theme, ThemeMode::Light);
        assert_eq!(state.dashboard_config.refresh_interval_ms, 30_000);
    }

    #[tokio::test(start_paused = true)]
    async fn bundle_mirrors_loaded_data() {
        let (_, store) = scripted();
        store.load_metrics().await;
        let state = store.state();
        let bundle = state.bundle().unwrap();
        assert_eq!(Some(&bundle.metrics), state.metrics.as_ref());
        assert_eq!(bundle.trends, state.trend_data);
    }
}
