//! Trend chart widgets, one per configured [`ChartKind`].
//!
//! Terminal cells cannot draw pies or radars, so both render as a sparkline
//! over the series with the latest value alongside.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph},
    Frame,
};

use super::Theme;
use crate::data::format::format_percentage;
use crate::data::TrendSeries;
use crate::store::ChartKind;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render one metric's trend as the given chart kind.
pub fn render_trend(
    frame: &mut Frame,
    series: &TrendSeries,
    kind: ChartKind,
    title: &str,
    theme: &Theme,
    selected: bool,
    area: Rect,
) {
    let border_style = if selected {
        Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    };
    let block = Block::default()
        .title(format!(" {} [{}] ", title, kind.label()))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(border_style);

    if series.points.is_empty() {
        frame.render_widget(Paragraph::new(" no data").block(block), area);
        return;
    }

    match kind {
        ChartKind::Line => render_line(frame, series, theme, block, area),
        ChartKind::Bar => render_bars(frame, series, theme, block, area),
        ChartKind::Gauge => render_gauge(frame, series, theme, block, area),
        ChartKind::Pie | ChartKind::Radar => render_spark(frame, series, theme, block, area),
    }
}

fn render_line(frame: &mut Frame, series: &TrendSeries, theme: &Theme, block: Block, area: Rect) {
    let points = series.chart_points();
    let (lo, hi) = series.bounds().unwrap_or((0.0, 1.0));
    let y_min = (lo - 0.02).max(0.0);
    let y_max = (hi + 0.02).min(1.0);
    let x_max = points.len().saturating_sub(1) as f64;

    let first = series.points.first().map(|p| p.date.format("%m/%d").to_string());
    let last = series.points.last().map(|p| p.date.format("%m/%d").to_string());

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.chart))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::raw(first.unwrap_or_default()),
                    Span::raw(last.unwrap_or_default()),
                ]),
        )
        .y_axis(Axis::default().bounds([y_min, y_max]).labels(vec![
            Span::raw(format!("{:.2}", y_min)),
            Span::raw(format!("{:.2}", y_max)),
        ]));

    frame.render_widget(chart, area);
}

fn render_bars(frame: &mut Frame, series: &TrendSeries, theme: &Theme, block: Block, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    // bar_width 3 + gap 1
    let visible = (inner_width / 4).max(1);
    let labels: Vec<String> = series
        .points
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|p| p.date.format("%d").to_string())
        .collect();
    let values = series.percent_values();
    let values = &values[values.len().saturating_sub(visible)..];
    let data: Vec<(&str, u64)> = labels
        .iter()
        .map(String::as_str)
        .zip(values.iter().copied())
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.chart))
        .max(100)
        .data(data.as_slice());

    frame.render_widget(chart, area);
}

fn render_gauge(frame: &mut Frame, series: &TrendSeries, theme: &Theme, block: Block, area: Rect) {
    let latest = series.latest().unwrap_or(0.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(theme.chart))
        .ratio(latest)
        .label(format_percentage(latest, 1));
    frame.render_widget(gauge, area);
}

fn render_spark(frame: &mut Frame, series: &TrendSeries, theme: &Theme, block: Block, area: Rect) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(inner);
    let latest = series.latest().unwrap_or(0.0);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("latest "),
            Span::styled(
                format_percentage(latest, 1),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(sparkline(&series.percent_values(), inner.width as usize))
            .style(Style::default().fg(theme.chart)),
        rows[1],
    );
}

/// Text sparkline of the last `width` values, scaled between their min and max.
pub fn sparkline(values: &[u64], width: usize) -> String {
    let values = &values[values.len().saturating_sub(width)..];
    let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
        return String::new();
    };
    let span = (max - min).max(1);
    values
        .iter()
        .map(|v| SPARKLINE_CHARS[(((v - min) * 7) / span).min(7) as usize])
        .collect()
}
