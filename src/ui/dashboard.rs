//! Overview page: system health gauges, module statuses, selected trends.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use super::{charts, Theme};
use crate::app::App;
use crate::data::format::format_metric_value;
use crate::data::Metric;
use crate::store::DashboardState;

/// Trend charts shown per row.
const CHARTS_PER_ROW: usize = 3;

pub fn render(frame: &mut Frame, app: &App, state: &DashboardState, theme: &Theme, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Health gauges
        Constraint::Length(state.module_statuses.len() as u16 + 3), // Module table
        Constraint::Min(6),    // Trends
    ])
    .split(area);

    render_health(frame, state, theme, chunks[0]);
    render_modules(frame, state, theme, chunks[1]);
    render_trends(frame, app, state, theme, chunks[2]);
}

fn render_health(frame: &mut Frame, state: &DashboardState, theme: &Theme, area: Rect) {
    let Some(ref metrics) = state.metrics else {
        let block = Block::default()
            .title(" System Health ")
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border));
        let text = if state.loading { " Loading metrics..." } else { " No data yet, press r" };
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let health = &metrics.system_health;
    let cells = Layout::horizontal([Constraint::Fill(1); 4]).split(area);
    let gauges: [(&Metric, f64); 4] = [
        (&health.overall_score, health.overall_score.value),
        (&health.uptime, health.uptime.value),
        // Lower is better; show the share of successful requests.
        (&health.error_rate, 1.0 - health.error_rate.value),
        (&health.user_satisfaction, health.user_satisfaction.value),
    ];

    for ((metric, ratio), cell) in gauges.into_iter().zip(cells.iter()) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" {} ", metric.name))
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.border)),
            )
            .gauge_style(theme.metric_style(metric.status))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(format_metric_value(metric));
        frame.render_widget(gauge, *cell);
    }
}

fn render_modules(frame: &mut Frame, state: &DashboardState, theme: &Theme, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Module"),
        Cell::from("Score"),
        Cell::from("Updated"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(theme.header);

    let rows: Vec<Row> = state
        .module_statuses
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.name.clone()),
                Cell::from(format!("{:.1}%", m.score * 100.0)),
                Cell::from(
                    m.last_updated
                        .with_timezone(&chrono::Local)
                        .format("%H:%M:%S")
                        .to_string(),
                ),
                Cell::from(format!("{} {}", m.status.symbol(), m.status.label()))
                    .style(theme.status_style(m.status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" Modules ")
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border)),
    );

    frame.render_widget(table, area);
}

fn render_trends(frame: &mut Frame, app: &App, state: &DashboardState, theme: &Theme, area: Rect) {
    let keys = &state.dashboard_config.selected_metrics;
    if keys.is_empty() {
        frame.render_widget(
            Paragraph::new(" No metrics selected")
                .style(Style::default().add_modifier(Modifier::DIM)),
            area,
        );
        return;
    }

    let row_count = keys.len().div_ceil(CHARTS_PER_ROW);
    let rows = Layout::vertical(vec![Constraint::Fill(1); row_count]).split(area);

    for (row_index, chunk) in keys.chunks(CHARTS_PER_ROW).enumerate() {
        let cells =
            Layout::horizontal(vec![Constraint::Fill(1); CHARTS_PER_ROW]).split(rows[row_index]);
        for (col, key) in chunk.iter().enumerate() {
            let index = row_index * CHARTS_PER_ROW + col;
            let selected = index == app.selected_row;
            let title = state
                .metrics
                .as_ref()
                .and_then(|m| m.find(key))
                .map(|m| m.name.clone())
                .unwrap_or_else(|| key.clone());

            match state.trend_data.get(key) {
                Some(series) => charts::render_trend(
                    frame,
                    series,
                    state.dashboard_config.chart_kind(key),
                    &title,
                    theme,
                    selected,
                    cells[col],
                ),
                None => {
                    let border = if selected { theme.highlight } else { theme.border };
                    let block = Block::default()
                        .title(format!(" {} ", title))
                        .borders(Borders::ALL)
                        .border_type(theme.border_type)
                        .border_style(Style::default().fg(border));
                    frame.render_widget(
                        Paragraph::new(" no trend, press u").block(block),
                        cells[col],
                    );
                }
            }
        }
    }
}
