//! Metric group pages (document parsing, data unlocking, QA).
//!
//! Displays a table of the group's metrics with status and trend arrow, and
//! a detail panel for the selected metric.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::{charts, Theme};
use crate::app::App;
use crate::data::format::format_metric_value;
use crate::data::mock::bounds_for;
use crate::data::MetricEntry;
use crate::store::{DashboardState, Page};

pub fn render(frame: &mut Frame, app: &App, state: &DashboardState, theme: &Theme, area: Rect) {
    let Some(ref metrics) = state.metrics else {
        render_placeholder(frame, state, theme, area);
        return;
    };

    let entries = match state.current_page {
        Page::DocumentParsing => metrics.document_parsing.entries(),
        Page::DataUnlocking => metrics.data_unlocking.entries(),
        Page::QaMetrics => metrics.qa.entries(),
        _ => return,
    };

    let chunks = Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).split(area);
    let selected = app.selected_row.min(entries.len().saturating_sub(1));

    render_table(frame, &entries, state.current_page, selected, theme, chunks[0]);
    if let Some(entry) = entries.get(selected) {
        render_detail(frame, entry, state, theme, chunks[1]);
    }
}

fn render_placeholder(frame: &mut Frame, state: &DashboardState, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", state.current_page.label()))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    let text = if state.loading { " Loading metrics..." } else { " No data yet, press r" };
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_table(
    frame: &mut Frame,
    entries: &[MetricEntry<'_>],
    page: Page,
    selected: usize,
    theme: &Theme,
    area: Rect,
) {
    let header = Row::new(vec![
        Cell::from("Metric"),
        Cell::from("Value"),
        Cell::from("Trend"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(theme.header);

    let rows: Vec<Row> = entries
        .iter()
        .map(|e| {
            let m = e.metric;
            Row::new(vec![
                Cell::from(m.name.clone()),
                Cell::from(format_metric_value(m)),
                Cell::from(m.trend.map(|t| t.arrow()).unwrap_or("-")),
                Cell::from(m.status.map(|s| s.symbol()).unwrap_or("-"))
                    .style(theme.metric_style(m.status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(1),
        Constraint::Min(5),
        Constraint::Min(6),
    ];

    let title = format!(" {} [{}/{}] ", page.label(), selected + 1, entries.len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border)),
        )
        .row_highlight_style(theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(
    frame: &mut Frame,
    entry: &MetricEntry<'_>,
    state: &DashboardState,
    theme: &Theme,
    area: Rect,
) {
    let m = entry.metric;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(m.name.clone(), theme.header)),
        Line::from(Span::styled(
            entry.key.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(vec![Span::raw("Value   "), Span::styled(format_metric_value(m), bold)]),
        Line::from(vec![
            Span::raw("Status  "),
            Span::styled(
                m.status.map(|s| s.symbol()).unwrap_or("-"),
                theme.metric_style(m.status),
            ),
        ]),
        Line::from(vec![
            Span::raw("Trend   "),
            Span::raw(m.trend.map(|t| t.arrow()).unwrap_or("-")),
        ]),
    ];

    if let Some(bounds) = bounds_for(entry.key) {
        lines.push(Line::from(format!("Range   {} to {} {}", bounds.min, bounds.max, bounds.unit)));
    }

    lines.push(Line::from(format!(
        "Sampled {}",
        m.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S")
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(m.description.clone()));

    if let Some(series) = state.trend_data.get(entry.key) {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("{}-day trend", series.points.len().saturating_sub(1))));
        lines.push(Line::from(Span::styled(
            charts::sparkline(&series.percent_values(), area.width.saturating_sub(2) as usize),
            Style::default().fg(theme.chart),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Detail ")
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(paragraph, area);
}
