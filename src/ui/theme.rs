//! Theme configuration for the TUI.
//!
//! The palette follows the configured [`ThemeMode`]; `--theme auto` resolves
//! a mode from the terminal background at startup.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{HealthStatus, MetricStatus};
use crate::store::ThemeMode;

/// Accent of the dark palette; also the default trend line color.
const ACCENT_DARK: Color = Color::Rgb(0x60, 0xa5, 0xfa);
const ACCENT_LIGHT: Color = Color::Rgb(0x3b, 0x82, 0xf6);

/// Color and style theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color of trend lines and chart bars.
    pub chart: Color,
    pub warning: Color,
    pub critical: Color,
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Palette for a configured mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Slate background palette.
    pub fn dark() -> Self {
        Self {
            highlight: ACCENT_DARK,
            chart: ACCENT_DARK,
            warning: Color::Rgb(0xfb, 0xbf, 0x24),
            critical: Color::Rgb(0xf8, 0x71, 0x71),
            healthy: Color::Rgb(0x4a, 0xde, 0x80),
            border: Color::Rgb(0x47, 0x55, 0x69),
            header: Style::default().fg(ACCENT_DARK).add_modifier(Modifier::BOLD),
            selected: Style::default()
                .bg(Color::Rgb(0x1e, 0x29, 0x3b))
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Black)
                .bg(ACCENT_DARK)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Rgb(0x94, 0xa3, 0xb8)),
            border_type: BorderType::Rounded,
        }
    }

    /// White background palette.
    pub fn light() -> Self {
        Self {
            highlight: ACCENT_LIGHT,
            chart: ACCENT_LIGHT,
            warning: Color::Rgb(0xd9, 0x77, 0x06),
            critical: Color::Rgb(0xdc, 0x26, 0x26),
            healthy: Color::Rgb(0x16, 0xa3, 0x4a),
            border: Color::Rgb(0xcb, 0xd5, 0xe1),
            header: Style::default().fg(ACCENT_LIGHT).add_modifier(Modifier::BOLD),
            selected: Style::default()
                .bg(Color::Rgb(0xdb, 0xea, 0xfe))
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::White)
                .bg(ACCENT_LIGHT)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Rgb(0x64, 0x74, 0x8b)),
            border_type: BorderType::Plain,
        }
    }

    /// Get style for a module health status
    pub fn status_style(&self, status: HealthStatus) -> Style {
        match status {
            HealthStatus::Healthy => Style::default().fg(self.healthy),
            HealthStatus::Warning => Style::default().fg(self.warning),
            HealthStatus::Critical => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }

    /// Get style for a metric status; unannotated metrics are unstyled.
    pub fn metric_style(&self, status: Option<MetricStatus>) -> Style {
        status.map(|s| self.status_style(s.health())).unwrap_or_default()
    }
}

/// Pick a mode from the terminal background luminance.
pub fn detect_mode() -> ThemeMode {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.5 => ThemeMode::Light,
        _ => ThemeMode::Dark,
    }
}
