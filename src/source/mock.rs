//! Randomly generated data behind a simulated network delay.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use super::{MetricsBundle, MetricsSource};
use crate::data::mock;

/// Latency simulated before every fetch.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

/// A source that sleeps, then returns freshly randomized data.
#[derive(Debug)]
pub struct MockSource {
    delay: Duration,
    description: String,
}

impl MockSource {
    /// Create a mock source with the given simulated latency.
    pub fn new(delay: Duration) -> Self {
        let description = format!("mock ({}ms delay)", delay.as_millis());
        Self { delay, description }
    }

    /// The simulated latency.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

/// Build a complete bundle from one RNG.
pub(crate) fn generate_bundle<R: Rng + ?Sized>(
    rng: &mut R,
    trend_metrics: &[&str],
    days: u32,
) -> MetricsBundle {
    MetricsBundle {
        metrics: mock::generate_overall_snapshot(rng),
        module_statuses: mock::generate_module_statuses(rng),
        trends: trend_metrics
            .iter()
            .map(|name| (name.to_string(), mock::generate_trend_series(rng, name, days)))
            .collect(),
    }
}

#[async_trait]
impl MetricsSource for MockSource {
    async fn fetch(&self, trend_metrics: &[&str], days: u32) -> anyhow::Result<MetricsBundle> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let bundle = generate_bundle(&mut rand::thread_rng(), trend_metrics, days);
        debug!(trends = bundle.trends.len(), "generated mock bundle");
        Ok(bundle)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
