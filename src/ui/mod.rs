//! Terminal rendering.
//!
//! [`render`] draws one frame from a snapshot of the store state: header,
//! page tabs, an optional error banner, the current page, and the status
//! bar. The sidebar and help overlay are drawn on top when enabled.

pub mod charts;
pub mod common;
pub mod dashboard;
pub mod grid;
pub mod group;
pub mod productivity;
pub mod settings;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::store::Page;

/// Minimum terminal size for a usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 12;

/// Width of the navigation sidebar.
const SIDEBAR_WIDTH: u16 = 22;

/// Draw one frame of the dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(
            0,
            (area.height / 2).saturating_sub(2),
            area.width,
            5u16.min(area.height),
        );
        frame.render_widget(paragraph, centered);
        return;
    }

    let state = app.snapshot();
    let theme = Theme::for_mode(state.dashboard_config.theme);

    let error_height = if state.error.is_some() { 1 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Length(1),            // Header bar
        Constraint::Length(1),            // Tabs
        Constraint::Length(error_height), // Error banner
        Constraint::Min(8),               // Content
        Constraint::Length(1),            // Status bar
    ])
    .split(area);

    common::render_header(frame, &state, &theme, chunks[0]);
    common::render_tabs(frame, &state, &theme, chunks[1]);
    if let Some(ref error) = state.error {
        common::render_error(frame, error, &theme, chunks[2]);
    }

    let content = if state.sidebar_open {
        let split = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(chunks[3]);
        common::render_sidebar(frame, &state, &theme, split[0]);
        split[1]
    } else {
        chunks[3]
    };

    match state.current_page {
        Page::Dashboard => dashboard::render(frame, app, &state, &theme, content),
        Page::Productivity => productivity::render(frame, &theme, content),
        Page::MetricGrid => grid::render(frame, app, &state, &theme, content),
        Page::DocumentParsing | Page::DataUnlocking | Page::QaMetrics => {
            group::render(frame, app, &state, &theme, content)
        }
        Page::Settings => settings::render(frame, app, &state, &theme, content),
    }

    common::render_status_bar(frame, app, &state, chunks[4]);

    if app.show_help {
        common::render_help(frame, &theme, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use ratatui::{backend::TestBackend, Terminal};
    use tokio::runtime::Handle;

    use crate::source::MockSource;
    use crate::store::DashboardStore;

    fn app() -> App {
        let store = DashboardStore::new(Arc::new(MockSource::new(Duration::ZERO)));
        App::new(Arc::new(store), Handle::current())
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[tokio::test]
    async fn every_page_renders_without_data() {
        let mut app = app();
        for page in Page::ALL {
            app.set_page(page);
            draw(&app, 120, 40);
        }
    }

    #[tokio::test]
    async fn every_page_renders_after_load() {
        let mut app = app();
        app.store().load_metrics().await;
        app.store().toggle_sidebar();
        app.show_help = true;
        for page in Page::ALL {
            app.set_page(page);
            app.selected_row = 2;
            draw(&app, 120, 40);
        }
    }

    #[tokio::test]
    async fn small_terminal_shows_resize_hint() {
        let app = app();
        let screen = draw(&app, 40, 10);
        assert!(screen.contains("Terminal too small"));
    }

    #[tokio::test]
    async fn error_banner_is_drawn() {
        let app = app();
        app.store().set_error(Some("boom".to_string()));
        let screen = draw(&app, 120, 40);
        assert!(screen.contains("boom"));
    }
}
