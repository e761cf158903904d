use crate::application::load_failure_message;
use crate::domain::{
    Dataset, LoadError, RowId, SortDirection, TableBody, TableColumn, TableState, FILTER_COLUMN,
};
use crate::presentation::Palette;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub const NO_RESULTS: &str = "Aucun résultat.";
const FILTER_PLACEHOLDER: &str = "Filtrer les entreprises...";
const MIN_COLUMN_WIDTH: usize = 4;
const MAX_COLUMN_WIDTH: usize = 32;
const COLUMN_SPACING: usize = 1;

/// Everything the table presenter reads.
pub struct TableView<'a> {
    pub dataset: &'a Dataset,
    pub state: &'a TableState,
    /// Highlighted row within the page
    pub cursor: usize,
    pub focused_column: Option<&'a str>,
    /// Filter text while it is being edited
    pub editing_filter: Option<&'a str>,
    /// Why the dataset is empty, when loading failed
    pub load_error: Option<&'a LoadError>,
}

impl TableView<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let [filter_area, table_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_filter(f, filter_area, palette);
        self.render_grid(f, table_area, palette);
        self.render_footer(f, footer_area, palette);
    }

    fn render_filter(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let line = match self.editing_filter {
            Some(input) => Line::from(vec![
                Span::styled("/ ", palette.header()),
                Span::styled(format!("{}▏", input), palette.base()),
            ]),
            None if self.state.filter().is_empty() => {
                Line::from(Span::styled(format!("/ {}", FILTER_PLACEHOLDER), palette.muted()))
            }
            None => Line::from(vec![
                Span::styled("/ ", palette.header()),
                Span::raw(self.state.filter().to_string()),
            ]),
        };
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_grid(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let body = self.state.body(self.dataset);
        let page: &[RowId] = match &body {
            TableBody::Rows(rows) => rows,
            TableBody::NoResults { .. } => &[],
        };

        let block = Block::default().borders(Borders::ALL).title("Entreprises");
        let inner = block.inner(area);
        let columns = self.window(page, inner.width as usize);
        let widths: Vec<Constraint> = columns
            .iter()
            .map(|(_, width)| Constraint::Length(*width as u16))
            .collect();

        let all_selected = self.state.is_all_page_rows_selected(self.dataset);
        let header = Row::new(columns.iter().map(|(column, _)| {
            let focused = column.field().is_some() && column.field() == self.focused_column;
            let style = if focused { palette.cursor() } else { palette.header() };
            Cell::from(self.header_label(column, all_selected)).style(style)
        }));

        let rows: Vec<Row> = page
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let cells = columns.iter().map(|(column, _)| self.cell(column, *id, palette));
                let style = if index == self.cursor {
                    palette.cursor()
                } else if self.state.is_row_selected(*id) {
                    palette.selected()
                } else {
                    palette.base()
                };
                Row::new(cells).style(style)
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(COLUMN_SPACING as u16);
        f.render_widget(table, area);

        if let TableBody::NoResults { .. } = body {
            // single row under the header, across every column
            if inner.height > 1 {
                let row_area = Rect { x: inner.x, y: inner.y + 1, width: inner.width, height: 1 };
                let message = Paragraph::new(NO_RESULTS)
                    .alignment(Alignment::Center)
                    .style(palette.muted());
                f.render_widget(message, row_area);
            }
            if let Some(error) = self.load_error {
                if inner.height > 2 {
                    let reason_area = Rect { x: inner.x, y: inner.y + 2, width: inner.width, height: 1 };
                    let reason = Paragraph::new(load_failure_message(error))
                        .alignment(Alignment::Center)
                        .style(palette.muted());
                    f.render_widget(reason, reason_area);
                }
            }
        }
    }

    fn render_footer(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let model = self.state.row_model(self.dataset);
        let summary = format!(
            "{} sur {} ligne(s) sélectionnée(s).",
            self.state.filtered_selected_count(self.dataset),
            model.filtered.len()
        );
        let enabled = |on: bool| if on { palette.base() } else { palette.muted() };

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(40)]).areas(area);
        f.render_widget(Paragraph::new(summary).style(palette.muted()), left);

        let pages = Line::from(vec![
            Span::styled("[p] Précédent", enabled(self.state.can_previous_page())),
            Span::raw(format!("  {}/{}  ", model.page_index + 1, model.page_count.max(1))),
            Span::styled("Suivant [n]", enabled(self.state.can_next_page(self.dataset))),
        ]);
        f.render_widget(Paragraph::new(pages).alignment(Alignment::Right), right);
    }

    fn header_label(&self, column: &TableColumn, all_selected: bool) -> String {
        match column {
            TableColumn::Select => checkbox(all_selected).to_string(),
            TableColumn::Actions => String::new(),
            TableColumn::Field(name) => match self.state.sorting() {
                Some(sort) if sort.column == *name => match sort.direction {
                    SortDirection::Ascending => format!("{} ▲", name),
                    SortDirection::Descending => format!("{} ▼", name),
                },
                _ => name.clone(),
            },
        }
    }

    fn cell(&self, column: &TableColumn, id: RowId, palette: &Palette) -> Cell<'static> {
        let record = self.dataset.get(id);
        match column {
            TableColumn::Select => Cell::from(checkbox(self.state.is_row_selected(id))),
            TableColumn::Actions => Cell::from("⋯"),
            TableColumn::Field(name) => {
                let value = record.map(|r| r.value(name)).unwrap_or("").to_string();
                if name == FILTER_COLUMN {
                    Cell::from(Span::styled(value, palette.link()))
                } else {
                    Cell::from(value)
                }
            }
        }
    }

    fn content_width(&self, column: &TableColumn, page: &[RowId]) -> usize {
        match column {
            TableColumn::Select | TableColumn::Actions => 3,
            TableColumn::Field(name) => {
                let values = page
                    .iter()
                    .filter_map(|id| self.dataset.get(*id))
                    .map(|r| r.value(name).chars().count());
                // room for the sort arrow
                let header = name.chars().count() + 2;
                values.fold(header, usize::max).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
            }
        }
    }

    /// Visible columns that fit in `available` cells with their widths.
    ///
    /// Selection and actions are always kept. Dataset columns scroll
    /// horizontally so that the focused column is on screen.
    fn window(&self, page: &[RowId], available: usize) -> Vec<(TableColumn, usize)> {
        let visible = self.state.visible_columns();
        let fields: Vec<(TableColumn, usize)> = visible
            .iter()
            .filter(|c| c.field().is_some())
            .map(|c| ((*c).clone(), self.content_width(c, page)))
            .collect();
        let fixed = 2 * (3 + COLUMN_SPACING);
        let room = available.saturating_sub(fixed);

        let focus = fields
            .iter()
            .position(|(c, _)| c.field() == self.focused_column)
            .unwrap_or(0);
        let span = |from: usize, to: usize| -> usize {
            fields[from..=to].iter().map(|(_, w)| w + COLUMN_SPACING).sum()
        };
        let mut start = 0;
        while start < focus && span(start, focus) > room {
            start += 1;
        }

        let mut used = 0;
        let mut shown = Vec::new();
        for (column, width) in fields.iter().skip(start) {
            if used + width + COLUMN_SPACING > room && !shown.is_empty() {
                break;
            }
            used += width + COLUMN_SPACING;
            shown.push((column.clone(), *width));
        }

        let mut window = vec![(TableColumn::Select, 3)];
        window.extend(shown);
        window.push((TableColumn::Actions, 3));
        window
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}
