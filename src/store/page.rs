//! Page routes.

use serde::{Deserialize, Serialize};

/// The page currently shown in the content area.
///
/// Only the route is persisted; per-page selection state lives in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    /// Overview: system health, module statuses, selected trend charts.
    #[default]
    Dashboard,
    /// Engineering throughput and cycle-time breakdown.
    Productivity,
    /// Every metric as a compact grid.
    MetricGrid,
    DocumentParsing,
    DataUnlocking,
    QaMetrics,
    /// Dashboard configuration.
    Settings,
}

impl Page {
    /// Every page, in tab order.
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Productivity,
        Page::MetricGrid,
        Page::DocumentParsing,
        Page::DataUnlocking,
        Page::QaMetrics,
        Page::Settings,
    ];

    /// Position in tab order.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// Page at a tab position, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Cycle to the next page.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous page.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Returns the display label for this page.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Productivity => "Productivity",
            Page::MetricGrid => "Metric Grid",
            Page::DocumentParsing => "Document Parsing",
            Page::DataUnlocking => "Data Unlocking",
            Page::QaMetrics => "QA",
            Page::Settings => "Settings",
        }
    }
}
