use crate::application::load_failure_message;
use crate::domain::{ComparisonGrid, Dataset, LoadError, ATTRIBUTE_HEADER};
use crate::presentation::Palette;
use ratatui::{
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

const COMPANY_COLUMN_WIDTH: u16 = 20;
const MAX_ATTRIBUTE_WIDTH: usize = 28;

pub struct ComparisonView<'a> {
    pub dataset: &'a Dataset,
    /// First attribute row shown
    pub scroll_row: usize,
    /// First company column shown
    pub scroll_col: usize,
    pub load_error: Option<&'a LoadError>,
}

impl ComparisonView<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let grid = ComparisonGrid::build(self.dataset);
        let block = Block::default().borders(Borders::ALL).title("Comparaison");
        let inner = block.inner(area);

        if grid.companies.is_empty() {
            let mut lines = vec![Line::styled("Aucune entreprise à comparer.", palette.muted())];
            if let Some(error) = self.load_error {
                lines.push(Line::styled(load_failure_message(error), palette.muted()));
            }
            f.render_widget(Paragraph::new(lines).block(block).style(palette.base()), area);
            return;
        }

        let attribute_width = grid
            .rows
            .iter()
            .map(|r| r.attribute.chars().count())
            .fold(ATTRIBUTE_HEADER.chars().count(), usize::max)
            .min(MAX_ATTRIBUTE_WIDTH) as u16;
        let room = inner.width.saturating_sub(attribute_width + 1);
        let company_columns = ((room / (COMPANY_COLUMN_WIDTH + 1)) as usize).max(1);
        let start = self.scroll_col.min(grid.companies.len());
        let shown = start..(start + company_columns).min(grid.companies.len());

        let mut widths = vec![Constraint::Length(attribute_width)];
        widths.extend(shown.clone().map(|_| Constraint::Length(COMPANY_COLUMN_WIDTH)));

        let mut header_cells = vec![Cell::from(ATTRIBUTE_HEADER)];
        header_cells.extend(grid.companies[shown.clone()].iter().map(|(_, name)| Cell::from(name.clone())));
        let header = Row::new(header_cells).style(palette.header());

        let rows: Vec<Row> = grid
            .rows
            .iter()
            .skip(self.scroll_row)
            .map(|row| {
                let mut cells = vec![Cell::from(row.attribute.clone()).style(palette.header())];
                cells.extend(row.values[shown.clone()].iter().map(|v| Cell::from(v.clone())));
                Row::new(cells)
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .style(palette.base())
            .column_spacing(1);
        f.render_widget(table, area);
    }
}
