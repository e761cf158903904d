use crate::application::{load_failure_message, App, AppMode, ViewMode, ROW_ACTIONS};
use crate::presentation::{CardView, ComparisonView, Palette, TableView};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub const TITLE: &str = "Portage List";
pub const SUBTITLE: &str = "Comparateur des sociétés de portage salarial en France";

pub fn render_ui(f: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme);
    f.render_widget(Block::default().style(palette.base()), f.area());

    let [nav, subtitle, toolbar, main, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(f.area());

    render_navbar(f, app, nav, &palette);
    f.render_widget(Paragraph::new(SUBTITLE).style(palette.muted()), subtitle);
    render_toolbar(f, app, toolbar, &palette);
    render_main(f, app, main, &palette);
    render_status_bar(f, app, status, &palette);

    match app.mode {
        AppMode::Columns => render_column_menu(f, app, &palette),
        AppMode::ViewMenu => render_view_menu(f, app, &palette),
        AppMode::Actions(_) => render_actions_menu(f, app, &palette),
        AppMode::Help => render_help_popup(f, app.help_scroll, &palette),
        AppMode::Normal | AppMode::Filter => {}
    }
}

fn render_navbar(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let [title, theme] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(24)]).areas(area);
    f.render_widget(
        Paragraph::new(Span::styled(TITLE, palette.header())),
        title,
    );
    f.render_widget(
        Paragraph::new(format!("Thème : {} [t]", app.theme.label()))
            .alignment(Alignment::Right)
            .style(Style::default().fg(palette.accent)),
        theme,
    );
}

fn render_toolbar(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let select = if app.table.is_all_page_rows_selected(app.dataset()) {
        "Désélectionner tout"
    } else {
        "Sélectionner tout"
    };
    let line = Line::from(vec![
        Span::styled("[a] ", palette.muted()),
        Span::raw(select),
        Span::styled("  [r] ", palette.muted()),
        Span::raw("Réinitialiser les colonnes"),
        Span::styled("  [v] ", palette.muted()),
        Span::raw(format!("Vue : {}", app.view_mode.label())),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

fn render_main(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    match app.view_mode {
        ViewMode::Table => {
            let focused = app.focused_column();
            TableView {
                dataset: app.dataset(),
                state: &app.table,
                cursor: app.table_cursor,
                focused_column: focused.as_deref(),
                editing_filter: matches!(app.mode, AppMode::Filter).then_some(app.filter_input.as_str()),
                load_error: app.load_error(),
            }
            .render(f, area, palette)
        }
        ViewMode::Card => CardView {
            dataset: app.dataset(),
            cursor: app.card_cursor,
            load_error: app.load_error(),
        }
        .render(f, area, palette),
        ViewMode::Comparison => ComparisonView {
            dataset: app.dataset(),
            scroll_row: app.comparison_scroll_row,
            scroll_col: app.comparison_scroll_col,
            load_error: app.load_error(),
        }
        .render(f, area, palette),
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let text = match app.mode {
        AppMode::Filter => "Filtre : Entrée pour valider, Échap pour annuler".to_string(),
        AppMode::Columns => "↑↓ : choisir | Espace/Entrée : afficher/masquer | Échap : fermer".to_string(),
        AppMode::ViewMenu | AppMode::Actions(_) => "↑↓ : choisir | Entrée : valider | Échap : fermer".to_string(),
        AppMode::Help => "↑↓/jk : défiler | PgUp/PgDn : défiler vite | Début : haut | Échap/q : fermer".to_string(),
        AppMode::Normal => match (&app.status_message, app.load_error()) {
            (Some(status), _) => status.clone(),
            // the failure stays visible once the transient message is gone
            (None, Some(error)) => load_failure_message(error),
            (None, None) => match app.view_mode {
                ViewMode::Table => {
                    "/ : filtrer | s : trier | Espace : sélectionner | c : colonnes | Entrée : actions | ? : aide | q : quitter".to_string()
                }
                ViewMode::Card => "Flèches : parcourir | Entrée : actions | ? : aide | q : quitter".to_string(),
                ViewMode::Comparison => "Flèches : défiler | ? : aide | q : quitter".to_string(),
            },
        },
    };

    let style = if app.load_error().is_some() && matches!(app.mode, AppMode::Normal) {
        Style::default().fg(ratatui::style::Color::Red)
    } else {
        palette.base()
    };
    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Statut"))
        .style(style);
    f.render_widget(widget, area);
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_menu(f: &mut Frame, title: &str, items: Vec<String>, cursor: usize, palette: &Palette) {
    let width = items
        .iter()
        .map(|i| i.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0) as u16
        + 4;
    let area = popup_area(f.area(), width, items.len() as u16 + 2);
    let list = List::new(items.into_iter().enumerate().map(|(index, item)| {
        let style = if index == cursor { palette.cursor() } else { palette.base() };
        ListItem::new(item).style(style)
    }))
    .block(Block::default().borders(Borders::ALL).title(title.to_string()).style(palette.base()));

    f.render_widget(Clear, area);
    f.render_widget(list, area);
}

fn render_column_menu(f: &mut Frame, app: &App, palette: &Palette) {
    let items = app
        .table
        .hideable_columns()
        .map(|column| {
            let mark = if app.table.is_column_visible(column) { "[x]" } else { "[ ]" };
            format!("{} {}", mark, column.id())
        })
        .collect();
    render_menu(f, "Colonnes", items, app.menu_cursor, palette);
}

fn render_view_menu(f: &mut Frame, app: &App, palette: &Palette) {
    let items = ViewMode::ALL.iter().map(|m| m.label().to_string()).collect();
    render_menu(f, "Vue", items, app.menu_cursor, palette);
}

fn render_actions_menu(f: &mut Frame, app: &App, palette: &Palette) {
    let AppMode::Actions(id) = app.mode else {
        return;
    };
    let title = match app.dataset().get(id) {
        Some(record) if !record.website().is_empty() => format!("Actions - {}", record.website()),
        _ => "Actions".to_string(),
    };
    let items = ROW_ACTIONS.iter().map(|a| a.to_string()).collect();
    render_menu(f, &title, items, app.menu_cursor, palette);
}

fn render_help_popup(f: &mut Frame, scroll: usize, palette: &Palette) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Aide (ligne {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(palette.accent)),
        )
        .style(palette.base());

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"PORTAGE LIST - RACCOURCIS CLAVIER

=== GÉNÉRAL ===
v               Menu Vue : tableau, carte, comparaison
a               Sélectionner / désélectionner toute la page
r               Réinitialiser les colonnes visibles
t               Basculer le thème clair / sombre
R               Recharger les données après un échec
F1 ou ?         Afficher cette aide
q               Quitter

=== VUE TABLEAU ===
↑↓ ou j/k       Ligne précédente / suivante
←→ ou h/l       Colonne précédente / suivante
s               Trier la colonne (croissant, décroissant, aucun)
Espace          Sélectionner la ligne
/               Filtrer par nom d'entreprise
c               Choisir les colonnes visibles
n / PgDn        Page suivante
p / PgUp        Page précédente
Entrée          Actions de la ligne
y               Copier le nom de l'entreprise

=== VUE CARTE ===
Flèches / hjkl  Parcourir les cartes
Entrée          Actions de la carte
y               Copier le nom de l'entreprise

=== VUE COMPARAISON ===
↑↓ ou j/k       Défiler les attributs
←→ ou h/l       Défiler les entreprises

=== AIDE ===
↑↓ ou j/k       Défiler d'une ligne
PgUp / PgDn     Défiler de 5 lignes
Début           Revenir en haut
Échap/F1/?/q    Fermer l'aide

Le tri compare les valeurs comme du texte : "10" précède "9"."#;
