//! # Input Handling
//!
//! Translates crossterm events into navigator gestures and app actions.
//!
//! | Terminal input              | Gesture                         |
//! |-----------------------------|---------------------------------|
//! | mouse wheel                 | wheel event (`wheel_delta` px)  |
//! | left press / release        | touch start / touch end         |
//! | click on a header tab       | desktop nav button              |
//! | click on a bottom nav item  | mobile nav button               |
//! | `Left` / `Right`, `h` / `l` | arrow keys                      |
//! | `1`-`9`                     | desktop nav button              |

use crate::navigator::{NavKey, NavKind};
use crate::ui::app::App;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

pub fn handle_event(app: &mut App, event: &Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, *key),
        Event::Mouse(mouse) => handle_mouse(app, *mouse),
        _ => {}
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Handle info modal close first
    if app.show_info {
        if matches!(key.code, KeyCode::Char('i') | KeyCode::Esc) {
            app.toggle_info();
        }
        return;
    }

    if app.filter_mode {
        match key.code {
            KeyCode::Esc => app.exit_filter_mode(),
            KeyCode::Enter => app.apply_filter(),
            KeyCode::Backspace => app.filter_pop_char(),
            KeyCode::Char(c) => app.filter_push_char(c),
            // Arrows belong to the text field while it has focus.
            KeyCode::Left => {
                app.page(NavKey::ArrowLeft);
            }
            KeyCode::Right => {
                app.page(NavKey::ArrowRight);
            }
            KeyCode::Down => app.next(),
            KeyCode::Up => app.previous(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
        }
        KeyCode::Char('i') => app.toggle_info(),
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Esc => app.exit_filter_mode(),
        KeyCode::Char('t') => {
            if let Err(e) = app.toggle_theme() {
                log::warn!("Failed to save theme preference: {e:#}");
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.page(NavKey::ArrowLeft);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.page(NavKey::ArrowRight);
        }
        KeyCode::Down | KeyCode::Char('j') => app.next(),
        KeyCode::Up | KeyCode::Char('k') => app.previous(),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_pages(1.0),
        KeyCode::PageUp => app.scroll_pages(-1.0),
        KeyCode::Enter => {
            app.activate_selected();
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if let Some(section) = app.navigator.order().get(index).cloned() {
                app.click_nav(NavKind::Desktop, &section);
            }
        }
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.show_info {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            app.wheel(1.0);
        }
        MouseEventKind::ScrollUp => {
            app.wheel(-1.0);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let button = app
                .layout
                .nav_button_at(mouse.column, mouse.row)
                .map(|(kind, id)| (kind, id.clone()));
            match button {
                Some((kind, section)) => {
                    app.click_nav(kind, &section);
                }
                None if app.layout.in_body(mouse.column, mouse.row) => {
                    app.press(mouse.column, mouse.row);
                }
                None => {}
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.release(mouse.column, mouse.row);
        }
        _ => {}
    }
}
