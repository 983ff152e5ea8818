//! Runtime settings: an optional TOML file layered under environment
//! variables prefixed `METRICS_DASHBOARD_`.
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Prefix of environment overrides (`METRICS_DASHBOARD_DELAY_MS=0`).
pub const ENV_PREFIX: &str = "METRICS_DASHBOARD";

/// Where dashboard data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Random data behind a simulated delay
    #[default]
    Mock,
    /// A bundle previously written with --export
    File,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding persisted preferences.
    pub state_dir: PathBuf,
    /// Simulated latency of the mock source.
    pub delay_ms: u64,
    /// Trend window; each series has `trend_days + 1` points.
    pub trend_days: u32,
    /// Log destination. No logging without one.
    pub log_file: Option<PathBuf>,
    pub source: SourceKind,
    /// Bundle read by the file source.
    pub file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(".metrics-dashboard"),
            delay_ms: 800,
            trend_days: 30,
            log_file: None,
            source: SourceKind::Mock,
            file: PathBuf::from("metrics.json"),
        }
    }
}

impl Settings {
    /// Load settings from `path` (if given) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(env.try_parsing(true))
            .build()
            .context("failed to read settings")?;
        config.try_deserialize().context("invalid settings")
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .source(Some(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()))
    }

    #[test]
    fn defaults_without_sources() {
        let settings = Settings::load_with(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.delay(), Duration::from_millis(800));
        assert_eq!(settings.state_dir, PathBuf::from(".metrics-dashboard"));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "delay_ms = 250\nsource = \"file\"\nfile = \"snap.json\"\n").unwrap();

        let settings = Settings::load_with(Some(&path), env(&[])).unwrap();
        assert_eq!(settings.delay_ms, 250);
        assert_eq!(settings.source, SourceKind::File);
        assert_eq!(settings.file, PathBuf::from("snap.json"));
        assert_eq!(settings.trend_days, 30);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "delay_ms = 250\n").unwrap();

        let settings = Settings::load_with(
            Some(&path),
            env(&[("METRICS_DASHBOARD_DELAY_MS", "0"), ("METRICS_DASHBOARD_TREND_DAYS", "7")]),
        )
        .unwrap();
        assert_eq!(settings.delay_ms, 0);
        assert_eq!(settings.trend_days, 7);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Settings::load_with(Some(Path::new("/nonexistent/dashboard.toml")), env(&[]));
        assert!(result.is_err());
    }
}
