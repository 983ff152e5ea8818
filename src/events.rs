use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::store::Page;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Page switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_page();
            } else {
                app.next_page();
            }
        }
        KeyCode::BackTab => app.prev_page(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_page(),
        KeyCode::Right | KeyCode::Char('l') => app.next_page(),

        // Direct page access
        KeyCode::Char(c @ '1'..='7') => {
            let index = c as usize - '1' as usize;
            if let Some(page) = Page::from_index(index) {
                app.set_page(page);
            }
        }

        // Row selection
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),

        KeyCode::Char('b') => app.toggle_sidebar(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('u') => app.update_selected_trend(),

        // Refresh interval (settings page only)
        KeyCode::Char('+') | KeyCode::Char('=') if app.current_page() == Page::Settings => {
            app.increase_refresh_interval()
        }
        KeyCode::Char('-') if app.current_page() == Page::Settings => {
            app.decrease_refresh_interval()
        }

        KeyCode::Char('e') => app.export(),
        KeyCode::Esc => app.dismiss(),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
