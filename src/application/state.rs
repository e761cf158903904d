//! Application state for the company list.
//!
//! Owns the loaded dataset (or the reason it could not be loaded), the
//! active view mode and every piece of UI state the presenters read. The
//! presenters never reach into ambient state: they are handed the dataset
//! and the state they need.

use crate::application::Settings;
use crate::domain::{
    Dataset, LoadError, LoadResult, RowId, TableColumn, TableState, Theme,
};
use crate::infrastructure::{ClipboardSink, SystemClipboard};
use tracing::{debug, info, warn};

/// The three ways of presenting the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Card,
    Comparison,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Table, ViewMode::Card, ViewMode::Comparison];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Table => "Vue tableau",
            ViewMode::Card => "Vue carte",
            ViewMode::Comparison => "Vue comparaison",
        }
    }
}

/// Represents the current input mode of the application.
///
/// The mode decides how key presses are interpreted and which popup, if
/// any, is drawn over the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation within the current view
    Normal,
    /// Typing into the name filter
    Filter,
    /// Column visibility menu is open
    Columns,
    /// Row action menu is open for a company
    Actions(RowId),
    /// View selection menu is open
    ViewMenu,
    /// Help screen is displayed
    Help,
}

/// Entries of the row action menu.
pub const ROW_ACTIONS: [&str; 1] = ["Copier le nom de l'entreprise"];

/// Number of card columns that fit in `width` terminal cells.
pub fn card_columns_for_width(width: u16) -> usize {
    (width as usize / 32).clamp(1, 6)
}

/// Status text for a failed load, with a retry hint when it is recoverable.
pub fn load_failure_message(error: &LoadError) -> String {
    if error.is_recoverable() {
        format!("Chargement impossible : {} (R pour réessayer)", error)
    } else {
        format!("Données inutilisables : {}", error)
    }
}

fn loaded<'a>(load: &'a LoadResult<Dataset>, empty: &'a Dataset) -> &'a Dataset {
    match load {
        Ok(dataset) => dataset,
        Err(_) => empty,
    }
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use portage_list::application::{App, ViewMode};
///
/// let app = App::default();
/// assert_eq!(app.view_mode, ViewMode::Table);
/// assert!(app.dataset().is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Outcome of the last load
    pub load: LoadResult<Dataset>,
    empty: Dataset,
    /// Settings the app was started with
    pub settings: Settings,
    /// Sort, filter, pagination, visibility and selection of the table
    pub table: TableState,
    pub view_mode: ViewMode,
    pub mode: AppMode,
    pub theme: Theme,
    /// Highlighted row within the current table page
    pub table_cursor: usize,
    /// Focused dataset column of the table, as an index into its visible field columns
    pub column_cursor: usize,
    /// Focused card
    pub card_cursor: usize,
    /// First attribute row shown in the comparison view
    pub comparison_scroll_row: usize,
    /// First company column shown in the comparison view
    pub comparison_scroll_col: usize,
    /// Highlighted entry of the open menu
    pub menu_cursor: usize,
    /// Filter text being edited
    pub filter_input: String,
    filter_before_edit: String,
    /// Cursor position within the filter input
    pub cursor_position: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Terminal size as of the last frame
    pub viewport_width: u16,
    pub viewport_height: u16,
    clipboard: Box<dyn ClipboardSink>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Ok(Dataset::default()), Settings::default(), Box::new(SystemClipboard::default()))
    }
}

impl App {
    pub fn new(load: LoadResult<Dataset>, settings: Settings, clipboard: Box<dyn ClipboardSink>) -> Self {
        let mut app = Self {
            load: Ok(Dataset::default()),
            empty: Dataset::default(),
            table: TableState::default(),
            view_mode: ViewMode::default(),
            mode: AppMode::Normal,
            theme: settings.theme,
            settings,
            table_cursor: 0,
            column_cursor: 0,
            card_cursor: 0,
            comparison_scroll_row: 0,
            comparison_scroll_col: 0,
            menu_cursor: 0,
            filter_input: String::new(),
            filter_before_edit: String::new(),
            cursor_position: 0,
            help_scroll: 0,
            status_message: None,
            viewport_width: 80,
            viewport_height: 24,
            clipboard,
        };
        app.set_load_result(load);
        app
    }

    /// The loaded dataset, or an empty one when loading failed.
    pub fn dataset(&self) -> &Dataset {
        loaded(&self.load, &self.empty)
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.load.as_ref().err()
    }

    pub fn can_retry(&self) -> bool {
        self.load_error().is_some_and(LoadError::is_recoverable)
    }

    /// Replaces the dataset with the outcome of a (re)load.
    ///
    /// Table state, cursors and scroll offsets start over. A failure is
    /// reported in the status line, with a retry hint when it is recoverable.
    pub fn set_load_result(&mut self, result: LoadResult<Dataset>) {
        self.load = result;
        self.table = TableState::new(
            self.dataset().schema(),
            self.settings.page_size,
            self.settings.matcher,
        );
        self.table_cursor = 0;
        self.column_cursor = 0;
        self.card_cursor = 0;
        self.comparison_scroll_row = 0;
        self.comparison_scroll_col = 0;

        self.status_message = match &self.load {
            Ok(dataset) if !dataset.schema().missing().is_empty() => Some(format!(
                "Colonnes attendues absentes : {}",
                dataset.schema().missing().join(", ")
            )),
            Ok(dataset) if !dataset.incomplete_rows().is_empty() => Some(format!(
                "{} ligne(s) incomplète(s) dans les données",
                dataset.incomplete_rows().len()
            )),
            Ok(_) => None,
            Err(error) => {
                warn!(source = %self.settings.source, error = %error, recoverable = error.is_recoverable(), "load failed");
                Some(load_failure_message(error))
            }
        };
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        debug!(?view_mode, "view changed");
        self.view_mode = view_mode;
        self.mode = AppMode::Normal;
    }

    pub fn open_view_menu(&mut self) {
        self.mode = AppMode::ViewMenu;
        self.menu_cursor = ViewMode::ALL
            .iter()
            .position(|m| *m == self.view_mode)
            .unwrap_or(0);
    }

    pub fn choose_view_menu_entry(&mut self) {
        if let Some(view_mode) = ViewMode::ALL.get(self.menu_cursor).copied() {
            self.set_view_mode(view_mode);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        debug!(theme = self.theme.label(), "theme toggled");
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_popup(&mut self) {
        self.mode = AppMode::Normal;
        self.menu_cursor = 0;
    }

    /// Moves the highlight of the open menu, wrapping at both ends.
    pub fn move_menu_cursor(&mut self, down: bool) {
        let len = match self.mode {
            AppMode::ViewMenu => ViewMode::ALL.len(),
            AppMode::Columns => self.table.hideable_columns().count(),
            AppMode::Actions(_) => ROW_ACTIONS.len(),
            _ => 0,
        };
        if len == 0 {
            return;
        }
        self.menu_cursor = if down {
            (self.menu_cursor + 1) % len
        } else {
            (self.menu_cursor + len - 1) % len
        };
    }

    // Table view

    /// Rows of the current table page.
    pub fn page_rows(&self) -> Vec<RowId> {
        self.table.page_rows(self.dataset())
    }

    /// Visible dataset columns of the table, in display order.
    pub fn visible_field_columns(&self) -> Vec<String> {
        self.table
            .visible_columns()
            .into_iter()
            .filter_map(TableColumn::field)
            .map(str::to_string)
            .collect()
    }

    pub fn focused_column(&self) -> Option<String> {
        self.visible_field_columns().get(self.column_cursor).cloned()
    }

    pub fn move_table_cursor(&mut self, down: bool) {
        let rows = self.page_rows().len();
        if down {
            if self.table_cursor + 1 < rows {
                self.table_cursor += 1;
            }
        } else {
            self.table_cursor = self.table_cursor.saturating_sub(1);
        }
    }

    pub fn move_column_cursor(&mut self, right: bool) {
        let columns = self.visible_field_columns().len();
        if right {
            if self.column_cursor + 1 < columns {
                self.column_cursor += 1;
            }
        } else {
            self.column_cursor = self.column_cursor.saturating_sub(1);
        }
    }

    fn clamp_column_cursor(&mut self) {
        let columns = self.visible_field_columns().len();
        self.column_cursor = self.column_cursor.min(columns.saturating_sub(1));
    }

    pub fn sort_focused_column(&mut self) {
        if let Some(column) = self.focused_column() {
            self.table.toggle_sort(&column);
            self.table_cursor = 0;
            debug!(column = %column, sorting = ?self.table.sorting(), "sort changed");
        }
    }

    pub fn next_page(&mut self) {
        let dataset = loaded(&self.load, &self.empty);
        self.table.next_page(dataset);
        self.table_cursor = 0;
    }

    pub fn previous_page(&mut self) {
        self.table.previous_page();
        self.table_cursor = 0;
    }

    /// Row under the cursor in the current view.
    pub fn focused_row(&self) -> Option<RowId> {
        match self.view_mode {
            ViewMode::Table => self.page_rows().get(self.table_cursor).copied(),
            ViewMode::Card => self.dataset().ids().nth(self.card_cursor),
            ViewMode::Comparison => None,
        }
    }

    pub fn toggle_focused_row_selection(&mut self) {
        if let Some(id) = self.page_rows().get(self.table_cursor).copied() {
            self.table.toggle_row_selected(id);
        }
    }

    /// Selects every row of the current page, or deselects them when they
    /// are all selected already.
    pub fn toggle_select_all(&mut self) {
        let dataset = loaded(&self.load, &self.empty);
        let all = self.table.is_all_page_rows_selected(dataset);
        self.table.toggle_all_page_rows_selected(dataset, !all);
    }

    pub fn reset_columns(&mut self) {
        self.table.reset_columns();
        self.clamp_column_cursor();
        self.status_message = Some("Colonnes réinitialisées".to_string());
    }

    pub fn open_column_menu(&mut self) {
        self.mode = AppMode::Columns;
        self.menu_cursor = 0;
    }

    /// Toggles the column highlighted in the column menu.
    pub fn toggle_menu_column(&mut self) {
        let column = self
            .table
            .hideable_columns()
            .nth(self.menu_cursor)
            .map(|c| c.id().to_string());
        if let Some(column) = column {
            self.table.toggle_column_visibility(&column);
            self.clamp_column_cursor();
        }
    }

    pub fn start_filter(&mut self) {
        self.mode = AppMode::Filter;
        self.filter_input = self.table.filter().to_string();
        self.filter_before_edit = self.filter_input.clone();
        self.cursor_position = self.filter_input.chars().count();
        self.status_message = None;
    }

    /// Applies the filter input to the table; called on every edit.
    pub fn apply_filter_input(&mut self) {
        self.table.set_filter(self.filter_input.clone());
        self.table_cursor = 0;
    }

    pub fn finish_filter(&mut self) {
        self.apply_filter_input();
        debug!(filter = %self.filter_input, "filter applied");
        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    pub fn cancel_filter(&mut self) {
        self.filter_input = self.filter_before_edit.clone();
        self.apply_filter_input();
        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    pub fn insert_filter_char(&mut self, c: char) {
        let byte = self.filter_byte_index();
        self.filter_input.insert(byte, c);
        self.cursor_position += 1;
        self.apply_filter_input();
    }

    pub fn delete_filter_char_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte = self.filter_byte_index();
            self.filter_input.remove(byte);
            self.apply_filter_input();
        }
    }

    pub fn delete_filter_char_at_cursor(&mut self) {
        if self.cursor_position < self.filter_input.chars().count() {
            let byte = self.filter_byte_index();
            self.filter_input.remove(byte);
            self.apply_filter_input();
        }
    }

    fn filter_byte_index(&self) -> usize {
        self.filter_input
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.filter_input.len())
    }

    // Row actions

    pub fn open_actions_menu(&mut self) {
        if let Some(id) = self.focused_row() {
            self.mode = AppMode::Actions(id);
            self.menu_cursor = 0;
        }
    }

    pub fn run_menu_action(&mut self) {
        if let AppMode::Actions(id) = self.mode {
            if self.menu_cursor == 0 {
                self.copy_company_name(id);
            }
            self.close_popup();
        }
    }

    /// Copies the name of company `id` to the clipboard.
    pub fn copy_company_name(&mut self, id: RowId) {
        let Some(name) = self.dataset().get(id).map(|r| r.name().to_string()) else {
            return;
        };
        match self.clipboard.set_text(&name) {
            Ok(()) => {
                info!(row = %id, "company name copied");
                self.status_message = Some(format!("Nom copié : {}", name));
            }
            Err(error) => {
                warn!(error = %error, "copy failed");
                self.status_message = Some(format!("Copie impossible : {}", error));
            }
        }
    }

    // Card view

    pub fn card_columns(&self) -> usize {
        card_columns_for_width(self.viewport_width)
    }

    /// Moves the card cursor by `delta` cards, staying on the grid.
    pub fn move_card_cursor(&mut self, delta: isize) {
        let count = self.dataset().len();
        if count == 0 {
            return;
        }
        let target = self.card_cursor as isize + delta;
        if (0..count as isize).contains(&target) {
            self.card_cursor = target as usize;
        }
    }

    // Comparison view

    pub fn scroll_comparison(&mut self, rows: isize, cols: isize) {
        let dataset = self.dataset();
        let max_row = if dataset.is_empty() { 0 } else { dataset.schema().len().saturating_sub(1) };
        let max_col = dataset.len().saturating_sub(1);
        self.comparison_scroll_row = (self.comparison_scroll_row as isize + rows).clamp(0, max_row as isize) as usize;
        self.comparison_scroll_col = (self.comparison_scroll_col as isize + cols).clamp(0, max_col as isize) as usize;
    }

    /// Updates the viewport size used for layout-dependent navigation.
    pub fn update_viewport_size(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Selection footer: selected rows among the filtered ones.
    pub fn selection_summary(&self) -> String {
        let dataset = self.dataset();
        format!(
            "{} sur {} ligne(s) sélectionnée(s).",
            self.table.filtered_selected_count(dataset),
            self.table.filtered_count(dataset)
        )
    }
}
