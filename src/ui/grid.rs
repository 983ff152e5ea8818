//! Metric grid page: every metric as a compact card.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::app::App;
use crate::data::format::format_metric_value;
use crate::store::DashboardState;

const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, app: &App, state: &DashboardState, theme: &Theme, area: Rect) {
    let Some(ref metrics) = state.metrics else {
        let text = if state.loading { " Loading metrics..." } else { " No data yet, press r" };
        frame.render_widget(Paragraph::new(text), area);
        return;
    };

    let entries = metrics.entries();
    let cols = (area.width / CARD_WIDTH).max(1) as usize;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected = app.selected_row.min(entries.len().saturating_sub(1));

    // Scroll so the selected card's row stays on screen.
    let selected_row = selected / cols;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let rows = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(area);
    for (screen_row, row_area) in rows.iter().enumerate() {
        let cells = Layout::horizontal(vec![Constraint::Fill(1); cols]).split(*row_area);
        for (col, cell) in cells.iter().enumerate() {
            let index = (first_row + screen_row) * cols + col;
            let Some(entry) = entries.get(index) else {
                return;
            };
            let m = entry.metric;
            let border = if index == selected {
                Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.border)
            };
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    format_metric_value(m),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(
                        m.status.map(|s| s.symbol()).unwrap_or("-"),
                        theme.metric_style(m.status),
                    ),
                    Span::raw(" "),
                    Span::raw(m.trend.map(|t| t.arrow()).unwrap_or("")),
                ]),
            ])
            .block(
                Block::default()
                    .title(format!(" {} ", m.name))
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(border),
            );
            frame.render_widget(card, *cell);
        }
    }
}
