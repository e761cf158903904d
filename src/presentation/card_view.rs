use crate::application::{card_columns_for_width, load_failure_message};
use crate::domain::{company_cards, Dataset, LoadError};
use crate::presentation::Palette;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const CARD_HEIGHT: u16 = 5;

pub struct CardView<'a> {
    pub dataset: &'a Dataset,
    /// Focused card, by position
    pub cursor: usize,
    pub load_error: Option<&'a LoadError>,
}

impl CardView<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let cards = company_cards(self.dataset);
        if cards.is_empty() {
            let mut lines = vec![Line::styled("Aucune entreprise à afficher.", palette.muted())];
            if let Some(error) = self.load_error {
                lines.push(Line::styled(load_failure_message(error), palette.muted()));
            }
            f.render_widget(Paragraph::new(lines), area);
            return;
        }

        let per_row = card_columns_for_width(area.width);
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let cursor_row = self.cursor / per_row;
        let first_row = (cursor_row + 1).saturating_sub(visible_rows);

        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(area);
        for (slot, row_area) in row_areas.iter().enumerate() {
            let start = (first_row + slot) * per_row;
            if start >= cards.len() {
                break;
            }
            let cells = Layout::horizontal(vec![Constraint::Ratio(1, per_row as u32); per_row]).split(*row_area);
            for (offset, cell) in cells.iter().enumerate() {
                let index = start + offset;
                let Some(card) = cards.get(index) else {
                    break;
                };
                let border = if index == self.cursor { palette.cursor() } else { palette.muted() };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(Span::styled(card.name.clone(), palette.header()));
                let body = Paragraph::new(vec![
                    Line::raw(card.fees_line()),
                    Line::raw(card.creation_line()),
                    Line::styled(card.website_line(), palette.link()),
                ])
                .block(block);
                f.render_widget(body, *cell);
            }
        }
    }
}
