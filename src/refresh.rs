//! Periodic background refresh.
//!
//! [`AutoRefresh::start`] spawns a task that calls
//! [`DashboardStore::refresh_metrics`] every `refresh_interval_ms`. The task
//! watches the store, so changing the interval re-arms the timer. An interval
//! of zero pauses ticking until a non-zero interval is configured.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::store::DashboardStore;

/// Starts auto-refresh tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoRefresh;

impl AutoRefresh {
    /// Spawn the refresh task on the current runtime.
    ///
    /// The first refresh happens one full interval after start. Drop the
    /// returned handle or call [`RefreshHandle::stop`] to cancel.
    pub fn start(store: Arc<DashboardStore>) -> RefreshHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let mut state_rx = store.subscribe();

        let task = tokio::spawn(async move {
            let mut period = state_rx.borrow_and_update().dashboard_config.refresh_interval();
            let mut timer = period.map(arm);
            info!(interval = ?period, "auto-refresh started");

            loop {
                tokio::select! {
                    _ = tick(&mut timer) => {
                        let store = store.clone();
                        tokio::spawn(async move { store.refresh_metrics().await });
                    }
                    changed = state_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let next = state_rx.borrow_and_update().dashboard_config.refresh_interval();
                        if next != period {
                            debug!(from = ?period, to = ?next, "refresh interval changed");
                            period = next;
                            timer = period.map(arm);
                        }
                    }
                    stopped = stop_rx.changed() => {
                        if stopped.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("auto-refresh stopped");
        });

        RefreshHandle { stop_tx, task }
    }
}

fn arm(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Wait for the next tick, forever if the timer is disarmed.
async fn tick(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Handle for controlling auto-refresh.
///
/// Drop this handle to stop refreshing, or call `stop()` explicitly.
#[derive(Debug)]
pub struct RefreshHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop refreshing. Loads already in flight complete normally.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }

    /// Whether the refresh task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MetricsBundle, MetricsSource, MockSource};
    use crate::store::DashboardConfigPatch;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingSource {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl MetricsSource for CountingSource {
        async fn fetch(&self, trend_metrics: &[&str], days: u32) -> anyhow::Result<MetricsBundle> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            MockSource::new(Duration::ZERO).fetch(trend_metrics, days).await
        }

        fn description(&self) -> &str {
            "counting"
        }
    }

    fn store_with_interval(ms: u64) -> (Arc<CountingSource>, Arc<DashboardStore>) {
        let source = Arc::new(CountingSource::default());
        let store = DashboardStore::new(source.clone());
        store.update_dashboard_config(DashboardConfigPatch::new().refresh_interval_ms(ms));
        (source, Arc::new(store))
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn fetches(source: &CountingSource) -> usize {
        source.fetches.load(Ordering::SeqCst)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_at_configured_interval() {
        let (source, store) = store_with_interval(1_000);
        let _handle = AutoRefresh::start(store);

        sleep_ms(999).await;
        assert_eq!(fetches(&source), 0);

        sleep_ms(2).await;
        assert_eq!(fetches(&source), 1);

        sleep_ms(2_000).await;
        assert_eq!(fetches(&source), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_change_rearms_timer() {
        let (source, store) = store_with_interval(1_000);
        let _handle = AutoRefresh::start(store.clone());

        sleep_ms(500).await;
        store.update_dashboard_config(DashboardConfigPatch::new().refresh_interval_ms(5_000));

        sleep_ms(1_000).await;
        assert_eq!(fetches(&source), 0);

        sleep_ms(4_100).await;
        assert_eq!(fetches(&source), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_pauses_refresh() {
        let (source, store) = store_with_interval(0);
        let _handle = AutoRefresh::start(store.clone());

        sleep_ms(100_000).await;
        assert_eq!(fetches(&source), 0);

        store.update_dashboard_config(DashboardConfigPatch::new().refresh_interval_ms(1_000));
        sleep_ms(1_100).await;
        assert_eq!(fetches(&source), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_ticking() {
        let (source, store) = store_with_interval(1_000);
        let handle = AutoRefresh::start(store);

        sleep_ms(1_100).await;
        assert_eq!(fetches(&source), 1);

        handle.stop();
        sleep_ms(5_000).await;
        assert_eq!(fetches(&source), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_cancels_ticking() {
        let (source, store) = store_with_interval(1_000);
        let handle = AutoRefresh::start(store);
        drop(handle);

        sleep_ms(5_000).await;
        assert_eq!(fetches(&source), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn task_exits_after_stop() {
        let (_, store) = store_with_interval(1_000);
        let handle = AutoRefresh::start(store);
        sleep_ms(10).await;
        assert!(!handle.is_finished());

        let _ = handle.stop_tx.send(true);
        sleep_ms(10).await;
        assert!(handle.is_finished());
    }
}
