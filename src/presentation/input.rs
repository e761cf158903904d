use crate::application::{App, AppMode, ViewMode};
use crate::infrastructure::CsvLoader;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Filter => Self::handle_filter_mode(app, key),
            AppMode::Columns => Self::handle_column_menu(app, key),
            AppMode::ViewMenu | AppMode::Actions(_) => Self::handle_menu(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        match key {
            KeyCode::Char('v') => {
                app.open_view_menu();
                return;
            }
            KeyCode::Char('t') => {
                app.toggle_theme();
                return;
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.open_help();
                return;
            }
            KeyCode::Char('R') => {
                if app.can_retry() {
                    let result = CsvLoader::new(app.settings.timeout).load(&app.settings.source);
                    app.set_load_result(result);
                }
                return;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
                return;
            }
            _ => {}
        }

        app.status_message = None;

        // toolbar actions work from every view
        match key {
            KeyCode::Char('a') => {
                app.toggle_select_all();
                return;
            }
            KeyCode::Char('r') => {
                app.reset_columns();
                return;
            }
            _ => {}
        }

        match app.view_mode {
            ViewMode::Table => Self::handle_table_keys(app, key),
            ViewMode::Card => Self::handle_card_keys(app, key),
            ViewMode::Comparison => Self::handle_comparison_keys(app, key),
        }
    }

    fn handle_table_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_table_cursor(false),
            KeyCode::Down | KeyCode::Char('j') => app.move_table_cursor(true),
            KeyCode::Left | KeyCode::Char('h') => app.move_column_cursor(false),
            KeyCode::Right | KeyCode::Char('l') => app.move_column_cursor(true),
            KeyCode::Char('s') => app.sort_focused_column(),
            KeyCode::Char(' ') => app.toggle_focused_row_selection(),
            KeyCode::Char('/') => app.start_filter(),
            KeyCode::Char('c') => app.open_column_menu(),
            KeyCode::Char('n') | KeyCode::PageDown => app.next_page(),
            KeyCode::Char('p') | KeyCode::PageUp => app.previous_page(),
            KeyCode::Enter => app.open_actions_menu(),
            KeyCode::Char('y') => {
                if let Some(id) = app.focused_row() {
                    app.copy_company_name(id);
                }
            }
            _ => {}
        }
    }

    fn handle_card_keys(app: &mut App, key: KeyCode) {
        let per_row = app.card_columns() as isize;
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_card_cursor(-per_row),
            KeyCode::Down | KeyCode::Char('j') => app.move_card_cursor(per_row),
            KeyCode::Left | KeyCode::Char('h') => app.move_card_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => app.move_card_cursor(1),
            KeyCode::Enter => app.open_actions_menu(),
            KeyCode::Char('y') => {
                if let Some(id) = app.focused_row() {
                    app.copy_company_name(id);
                }
            }
            _ => {}
        }
    }

    fn handle_comparison_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.scroll_comparison(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_comparison(1, 0),
            KeyCode::Left | KeyCode::Char('h') => app.scroll_comparison(0, -1),
            KeyCode::Right | KeyCode::Char('l') => app.scroll_comparison(0, 1),
            KeyCode::PageDown => app.scroll_comparison(5, 0),
            KeyCode::PageUp => app.scroll_comparison(-5, 0),
            _ => {}
        }
    }

    fn handle_filter_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_filter(),
            KeyCode::Esc => app.cancel_filter(),
            KeyCode::Backspace => app.delete_filter_char_before_cursor(),
            KeyCode::Delete => app.delete_filter_char_at_cursor(),
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filter_input.chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filter_input.chars().count();
            }
            KeyCode::Char(c) => app.insert_filter_char(c),
            _ => {}
        }
    }

    fn handle_column_menu(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_menu_cursor(false),
            KeyCode::Down | KeyCode::Char('j') => app.move_menu_cursor(true),
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_menu_column(),
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q') => app.close_popup(),
            _ => {}
        }
    }

    fn handle_menu(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_menu_cursor(false),
            KeyCode::Down | KeyCode::Char('j') => app.move_menu_cursor(true),
            KeyCode::Enter => match app.mode {
                AppMode::ViewMenu => app.choose_view_menu_entry(),
                AppMode::Actions(_) => app.run_menu_action(),
                _ => {}
            },
            KeyCode::Esc | KeyCode::Char('q') => app.close_popup(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
