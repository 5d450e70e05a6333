use crate::application::{App, AppMode};
use crossterm::event::{KeyCode, KeyModifiers};

use super::ui::HELP_TEXT;

/// What the event loop should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    Quit,
}

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> InputOutcome {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => {
                Self::handle_help_mode(app, key);
                InputOutcome::Continue
            }
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> InputOutcome {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return InputOutcome::Quit;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => return InputOutcome::Quit,
            KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
            KeyCode::PageUp => app.move_selection(-5),
            KeyCode::PageDown => app.move_selection(5),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('f') => app.toggle_selected(),
            KeyCode::Char('r') => app.refresh(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            _ => {}
        }

        InputOutcome::Continue
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        let max_scroll = HELP_TEXT.lines().count().saturating_sub(1);

        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1) | KeyCode::Char('?') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = (app.help_scroll + 1).min(max_scroll);
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll = (app.help_scroll + 5).min(max_scroll);
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
