//! Application state and navigation logic.
//!
//! [`App`] holds view-local state (selection, overlays, status messages) and
//! forwards everything else to the shared [`DashboardStore`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::runtime::Handle;
use tracing::info;

use crate::store::{DashboardConfigPatch, DashboardState, DashboardStore, Page};
use crate::ui::Theme;

/// Step applied by the refresh interval keys.
pub const REFRESH_STEP_MS: u64 = 5_000;

/// Default target of the export key.
pub const DEFAULT_EXPORT_PATH: &str = "metrics_export.json";

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    store: Arc<DashboardStore>,
    runtime: Handle,

    /// Selected row on the current page.
    pub selected_row: usize,
    pub export_path: PathBuf,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create an app over `store`; loads are spawned on `runtime`.
    pub fn new(store: Arc<DashboardStore>, runtime: Handle) -> Self {
        Self {
            running: true,
            show_help: false,
            store,
            runtime,
            selected_row: 0,
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            status_message: None,
        }
    }

    pub fn store(&self) -> &Arc<DashboardStore> {
        &self.store
    }

    /// A copy of the store state for one frame.
    pub fn snapshot(&self) -> DashboardState {
        self.store.state().clone()
    }

    pub fn current_page(&self) -> Page {
        self.store.state().current_page
    }

    /// Theme matching the configured mode.
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.store.state().dashboard_config.theme)
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.store.source().description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_TTL => Some(msg),
            _ => None,
        }
    }

    /// Switch to the next page.
    pub fn next_page(&mut self) {
        self.set_page(self.current_page().next());
    }

    /// Switch to the previous page.
    pub fn prev_page(&mut self) {
        self.set_page(self.current_page().prev());
    }

    /// Switch to a specific page.
    pub fn set_page(&mut self, page: Page) {
        self.store.set_current_page(page);
        self.selected_row = 0;
    }

    /// Metric keys listed on the current page, in display order.
    pub fn page_metric_keys(&self) -> Vec<String> {
        page_metric_keys(&self.store.state())
    }

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        let max = self.page_metric_keys().len().saturating_sub(1);
        self.selected_row = (self.selected_row + 1).min(max);
    }

    /// Move selection up by one row.
    pub fn select_prev(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// Key of the selected metric, if the page lists metrics.
    pub fn selected_metric(&self) -> Option<String> {
        let keys = self.page_metric_keys();
        let index = self.selected_row.min(keys.len().checked_sub(1)?);
        keys.into_iter().nth(index)
    }

    /// Start a background refresh. A refresh already in flight wins.
    pub fn refresh(&mut self) {
        if self.store.state().loading {
            self.set_status_message("Refresh already in progress".to_string());
            return;
        }
        let store = self.store.clone();
        self.runtime.spawn(async move { store.refresh_metrics().await });
    }

    /// Regenerate the trend of the selected metric.
    pub fn update_selected_trend(&mut self) {
        match self.selected_metric() {
            Some(key) => {
                self.store.update_trend_data(&key);
                self.set_status_message(format!("Regenerated trend for {key}"));
            }
            None => self.set_status_message("No metric selected".to_string()),
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.store.toggle_sidebar();
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.store.state().dashboard_config.theme.toggled();
        self.store.update_dashboard_config(DashboardConfigPatch::new().theme(theme));
    }

    /// Lengthen the refresh interval by one step.
    pub fn increase_refresh_interval(&mut self) {
        let current = self.store.state().dashboard_config.refresh_interval_ms;
        self.set_refresh_interval(current.saturating_add(REFRESH_STEP_MS));
    }

    /// Shorten the refresh interval by one step; zero turns auto-refresh off.
    pub fn decrease_refresh_interval(&mut self) {
        let current = self.store.state().dashboard_config.refresh_interval_ms;
        self.set_refresh_interval(current.saturating_sub(REFRESH_STEP_MS));
    }

    fn set_refresh_interval(&mut self, ms: u64) {
        self.store.update_dashboard_config(DashboardConfigPatch::new().refresh_interval_ms(ms));
        let message = if ms == 0 {
            "Auto-refresh off".to_string()
        } else {
            format!("Auto-refresh every {}s", ms / 1000)
        };
        self.set_status_message(message);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Close the help overlay, or clear the error banner.
    pub fn dismiss(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else if self.store.state().error.is_some() {
            self.store.set_error(None);
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Write the loaded data to the configured export path.
    pub fn export(&mut self) {
        let path = self.export_path.clone();
        match self.export_state(&path) {
            Ok(()) => self.set_status_message(format!("Exported to {}", path.display())),
            Err(e) => self.set_status_message(format!("Export failed: {}", e)),
        }
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(bundle) = self.store.state().bundle() else {
            anyhow::bail!("No data to export");
        };
        write_bundle(&bundle, path)?;
        info!(path = %path.display(), "exported metrics bundle");
        Ok(())
    }
}

/// Write a bundle as pretty-printed JSON.
pub fn write_bundle(bundle: &crate::source::MetricsBundle, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(bundle)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Metric keys shown by a page, in display order.
pub fn page_metric_keys(state: &DashboardState) -> Vec<String> {
    let Some(metrics) = &state.metrics else {
        return match state.current_page {
            Page::Dashboard => state.dashboard_config.selected_metrics.clone(),
            _ => Vec::new(),
        };
    };

    let entries = match state.current_page {
        Page::Dashboard => return state.dashboard_config.selected_metrics.clone(),
        Page::MetricGrid => metrics.entries(),
        Page::DocumentParsing => metrics.document_parsing.entries(),
        Page::DataUnlocking => metrics.data_unlocking.entries(),
        Page::QaMetrics => metrics.qa.entries(),
        Page::Productivity | Page::Settings => Vec::new(),
    };
    entries.into_iter().map(|e| e.key.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockSource;
    use crate::store::ThemeMode;
    use tempfile::TempDir;

    fn app() -> App {
        let store = DashboardStore::new(Arc::new(MockSource::new(Duration::ZERO)));
        App::new(Arc::new(store), Handle::current())
    }

    #[tokio::test]
    async fn page_navigation_resets_selection() {
        let mut app = app();
        app.selected_row = 3;
        app.next_page();
        assert_eq!(app.current_page(), Page::Productivity);
        assert_eq!(app.selected_row, 0);
        app.prev_page();
        app.prev_page();
        assert_eq!(app.current_page(), Page::Settings);
    }

    #[tokio::test]
    async fn refresh_interval_steps() {
        let mut app = app();
        app.increase_refresh_interval();
        assert_eq!(app.snapshot().dashboard_config.refresh_interval_ms, 35_000);
        for _ in 0..10 {
            app.decrease_refresh_interval();
        }
        assert_eq!(app.snapshot().dashboard_config.refresh_interval_ms, 0);
        assert_eq!(app.get_status_message(), Some("Auto-refresh off"));
    }

    #[tokio::test]
    async fn theme_toggles_through_store() {
        let mut app = app();
        app.toggle_theme();
        assert_eq!(app.snapshot().dashboard_config.theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn selection_is_clamped_to_page_rows() {
        let mut app = app();
        app.store().load_metrics().await;
        app.set_page(Page::DocumentParsing);

        let rows = app.page_metric_keys().len();
        for _ in 0..rows + 5 {
            app.select_next();
        }
        assert_eq!(app.selected_row, rows - 1);
        assert_eq!(app.selected_metric().as_deref(), Some("throughput"));
    }

    #[tokio::test]
    async fn dashboard_lists_selected_metrics() {
        let mut app = app();
        assert_eq!(app.page_metric_keys().len(), 5);
        app.set_page(Page::Settings);
        assert!(app.page_metric_keys().is_empty());
        assert!(app.selected_metric().is_none());
    }

    #[tokio::test]
    async fn update_selected_trend_touches_store() {
        let mut app = app();
        app.update_selected_trend();
        let state = app.snapshot();
        assert_eq!(state.trend_data.len(), 1);
        assert!(state.trend_data.contains_key("textExtractionAccuracy"));
    }

    #[tokio::test]
    async fn dismiss_closes_help_before_error() {
        let mut app = app();
        app.store().set_error(Some("boom".to_string()));
        app.toggle_help();

        app.dismiss();
        assert!(!app.show_help);
        assert!(app.snapshot().error.is_some());

        app.dismiss();
        assert!(app.snapshot().error.is_none());
    }

    #[tokio::test]
    async fn export_requires_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        let app = app();
        assert!(app.export_state(&path).is_err());

        app.store().load_metrics().await;
        app.export_state(&path).unwrap();
        let written: crate::source::MetricsBundle =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(Some(written), app.snapshot().bundle());
    }
}
