//! Settings page: current dashboard configuration.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::app::App;
use crate::store::DashboardState;

pub fn render(frame: &mut Frame, app: &App, state: &DashboardState, theme: &Theme, area: Rect) {
    let config = &state.dashboard_config;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let interval = match config.refresh_interval() {
        Some(d) => format!("{}s", d.as_secs_f64()),
        None => "off".to_string(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Refresh interval  "),
            Span::styled(interval, bold),
            Span::styled("   (+/- to change by 5s, 0 turns it off)", dim),
        ]),
        Line::from(vec![
            Span::raw("Theme             "),
            Span::styled(config.theme.label(), bold),
            Span::styled("   (t to toggle)", dim),
        ]),
        Line::from(vec![
            Span::raw("Data source       "),
            Span::styled(app.source_description().to_string(), bold),
        ]),
        Line::from(vec![
            Span::raw("Trend window      "),
            Span::styled(format!("{} days", app.store().trend_days()), bold),
        ]),
        Line::from(""),
        Line::from(Span::styled("Selected metrics", theme.header)),
    ];

    for key in &config.selected_metrics {
        lines.push(Line::from(format!("  {:<28} {}", key, config.chart_kind(key).label())));
    }

    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
