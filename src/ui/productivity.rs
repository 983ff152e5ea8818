//! Productivity page: throughput, cycle time, PR mix and scan findings.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{BarChart, Block, Borders, Cell, Row, Table},
    Frame,
};

use super::Theme;
use crate::data::productivity::{CYCLE_TIME, PR_MIX, SCAN_FINDINGS, THROUGHPUT};

pub fn render(frame: &mut Frame, theme: &Theme, area: Rect) {
    let rows = Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).split(area);
    let top = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(rows[0]);
    let bottom = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(rows[1]);

    render_cycle_time(frame, theme, top[0]);
    render_throughput(frame, theme, top[1]);
    render_pr_mix(frame, theme, bottom[0]);
    render_findings(frame, theme, bottom[1]);
}

fn block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
}

fn render_cycle_time(frame: &mut Frame, theme: &Theme, area: Rect) {
    let data: Vec<(&str, u64)> = CYCLE_TIME.iter().map(|p| (p.phase, p.share)).collect();
    let chart = BarChart::default()
        .block(block(" Cycle time (% of total) ", theme))
        .bar_width(8)
        .bar_gap(2)
        .bar_style(Style::default().fg(theme.chart))
        .data(data.as_slice());
    frame.render_widget(chart, area);
}

fn render_throughput(frame: &mut Frame, theme: &Theme, area: Rect) {
    let header = Row::new(vec!["Week", "Team", "Automated", "Total"]).style(theme.header);
    let rows: Vec<Row> = THROUGHPUT
        .iter()
        .map(|w| {
            Row::new(vec![
                Cell::from(w.week),
                Cell::from(w.team.to_string()),
                Cell::from(w.automated.to_string()),
                Cell::from((w.team + w.automated).to_string()),
            ])
        })
        .collect();
    let table = Table::new(rows, [Constraint::Fill(1); 4])
        .header(header)
        .block(block(" Merged PRs per week ", theme));
    frame.render_widget(table, area);
}

fn render_pr_mix(frame: &mut Frame, theme: &Theme, area: Rect) {
    let header = Row::new(vec!["Week", "Features", "Fixes", "Quality", "Security", "Total"])
        .style(theme.header);
    let rows: Vec<Row> = PR_MIX
        .iter()
        .map(|w| {
            Row::new(vec![
                w.week.to_string(),
                w.features.to_string(),
                w.bug_fixes.to_string(),
                w.quality.to_string(),
                w.security.to_string(),
                w.total().to_string(),
            ])
        })
        .collect();
    let table = Table::new(rows, [Constraint::Fill(1); 6])
        .header(header)
        .block(block(" PR types ", theme));
    frame.render_widget(table, area);
}

fn render_findings(frame: &mut Frame, theme: &Theme, area: Rect) {
    let header = Row::new(vec!["Finding", "Type", "Severity"]).style(theme.header);
    let rows: Vec<Row> = SCAN_FINDINGS
        .iter()
        .map(|f| {
            let style = match f.severity {
                "Critical" => Style::default().fg(theme.critical),
                "High" => Style::default().fg(theme.warning),
                _ => Style::default(),
            };
            Row::new(vec![
                Cell::from(f.title),
                Cell::from(f.kind),
                Cell::from(f.severity).style(style),
            ])
        })
        .collect();
    let table = Table::new(rows, [Constraint::Fill(3), Constraint::Fill(1), Constraint::Fill(1)])
        .header(header)
        .block(block(" Background scans ", theme));
    frame.render_widget(table, area);
}
