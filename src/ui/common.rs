//! Common UI components shared across pages.
//!
//! This module contains the header bar, tab bar, sidebar, error banner,
//! status bar, and help overlay.

use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use super::Theme;
use crate::app::App;
use crate::data::format::{format_metric_value, format_percentage};
use crate::data::status::worst_status;
use crate::data::HealthStatus;
use crate::store::{DashboardState, Page};

/// Render the header bar with system health overview.
///
/// Displays: status indicator, overall score, uptime, module counts by
/// health, and the loading / last-updated indicator.
pub fn render_header(frame: &mut Frame, state: &DashboardState, theme: &Theme, area: Rect) {
    let freshness = if state.loading {
        Span::styled("Loading...", Style::default().fg(theme.highlight))
    } else if let Some(updated) = state.last_updated {
        Span::raw(format!("Updated {}", updated.with_timezone(&Local).format("%H:%M:%S")))
    } else {
        Span::styled("No data", Style::default().add_modifier(Modifier::DIM))
    };

    let Some(ref metrics) = state.metrics else {
        let line = Line::from(vec![
            Span::styled(" METRICS DASHBOARD ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("│ "),
            freshness,
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let mut healthy = 0;
    let mut warning = 0;
    let mut critical = 0;
    for module in &state.module_statuses {
        match module.status {
            HealthStatus::Healthy => healthy += 1,
            HealthStatus::Warning => warning += 1,
            HealthStatus::Critical => critical += 1,
        }
    }

    let overall = worst_status(&state.module_statuses);
    let health = &metrics.system_health;

    let line = Line::from(vec![
        Span::styled(format!(" {} ", overall.symbol()), theme.status_style(overall)),
        Span::styled("METRICS ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ score "),
        Span::styled(
            format_metric_value(&health.overall_score),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ uptime "),
        Span::raw(format_percentage(health.uptime.value, 2)),
        Span::raw(" │ "),
        Span::styled(format!("{}", healthy), Style::default().fg(theme.healthy)),
        Span::raw(" ok "),
        if warning > 0 {
            Span::styled(format!("{}", warning), Style::default().fg(theme.warning))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" warn "),
        if critical > 0 {
            Span::styled(
                format!("{}", critical),
                Style::default().fg(theme.critical).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" crit │ "),
        freshness,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available pages.
///
/// Highlights the currently active page.
pub fn render_tabs(frame: &mut Frame, state: &DashboardState, theme: &Theme, area: Rect) {
    let titles: Vec<Line> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| Line::from(format!(" {}:{} ", i + 1, page.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.current_page.index())
        .style(theme.tab_inactive)
        .highlight_style(theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the page list shown when the sidebar is open.
pub fn render_sidebar(frame: &mut Frame, state: &DashboardState, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| ListItem::new(format!("{} {}", i + 1, page.label())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Pages ")
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(theme.selected)
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.current_page.index()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Render the error banner for a failed load.
pub fn render_error(frame: &mut Frame, error: &str, theme: &Theme, area: Rect) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(
            " Error: ",
            Style::default().fg(theme.critical).add_modifier(Modifier::BOLD),
        ),
        Span::raw(error.to_string()),
        Span::styled(
            "  (Esc to dismiss, r to retry)",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, refresh interval, available controls. Temporary status
/// messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, state: &DashboardState, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph = Paragraph::new(format!(" {} ", msg))
            .style(Style::default().fg(app.theme().highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let refresh = match state.dashboard_config.refresh_interval_ms {
        0 => "off".to_string(),
        ms => format!("{}s", ms / 1000),
    };

    let controls = match state.current_page {
        Page::Settings => "+/-:interval t:theme Tab:switch ?:help q:quit",
        Page::Productivity => "r:refresh Tab:switch ?:help q:quit",
        _ => "↑↓:select u:trend r:refresh Tab:switch ?:help q:quit",
    };

    let status = format!(
        " {} | {} | auto-refresh {} | {}",
        app.source_description(),
        state.current_page.label(),
        refresh,
        controls,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current page.
pub fn render_help(frame: &mut Frame, theme: &Theme, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch pages"),
        Line::from("  1-7         Jump to page"),
        Line::from("  ↑/↓ j/k     Select metric"),
        Line::from("  b           Toggle sidebar"),
        Line::from(""),
        section(" Data"),
        Line::from("  r           Refresh metrics"),
        Line::from("  u           New trend for selection"),
        Line::from("  e           Export to JSON"),
        Line::from(""),
        section(" Settings"),
        Line::from("  t           Toggle light/dark"),
        Line::from("  +/-         Refresh interval ±5s"),
        Line::from(""),
        section(" General"),
        Line::from("  Esc         Dismiss error"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 25u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
