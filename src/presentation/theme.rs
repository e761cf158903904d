use crate::domain::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Colours used by every view for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub link: Color,
    pub header: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub selected_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                link: Color::LightBlue,
                header: Color::Yellow,
                cursor_fg: Color::White,
                cursor_bg: Color::Blue,
                selected_bg: Color::Rgb(40, 48, 64),
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::Gray,
                accent: Color::Blue,
                link: Color::Blue,
                header: Color::Magenta,
                cursor_fg: Color::Black,
                cursor_bg: Color::LightBlue,
                selected_bg: Color::Rgb(226, 232, 240),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn header(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn cursor(&self) -> Style {
        Style::default().fg(self.cursor_fg).bg(self.cursor_bg)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.selected_bg)
    }

    pub fn link(&self) -> Style {
        Style::default().fg(self.link).add_modifier(Modifier::UNDERLINED)
    }
}
