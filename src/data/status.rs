//! Coarse per-module health rollups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health status for a functional module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "OK",
            HealthStatus::Warning => "WARN",
            HealthStatus::Critical => "CRIT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Warning => "Warning",
            HealthStatus::Critical => "Critical",
        }
    }
}

/// Health summary for one functional module.
///
/// The whole list is replaced on every load cycle; entries are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleStatus {
    pub name: String,
    pub status: HealthStatus,
    /// Score in `[0.7, 1.0]`.
    pub score: f64,
    pub last_updated: DateTime<Utc>,
}

/// Worst status across a set of modules, `Healthy` when empty.
pub fn worst_status(statuses: &[ModuleStatus]) -> HealthStatus {
    statuses.iter().map(|m| m.status).max().unwrap_or(HealthStatus::Healthy)
}
